//! Markdown and plain-text rendering of extracted page content.
//!
//! Both renderers are pure functions of a [`PageContent`]: they build a list
//! of lines, join them with `\n` and trim the result.

mod markdown;
mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{BlockKind, ContentBlock, PageContent};

pub use markdown::to_markdown;
pub use text::to_plain_text;

/// Output format for a copy request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
	#[default]
	Markdown,
	Plaintext,
}

impl Format {
	/// Human-readable name used in notifications.
	pub fn label(self) -> &'static str {
		match self {
			Format::Markdown => "Markdown",
			Format::Plaintext => "Plain Text",
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Format::Markdown => "markdown",
			Format::Plaintext => "plaintext",
		}
	}
}

impl fmt::Display for Format {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Format {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"markdown" | "md" => Ok(Format::Markdown),
			"plaintext" | "text" | "txt" => Ok(Format::Plaintext),
			other => Err(format!("unknown format `{other}` (expected markdown or plaintext)")),
		}
	}
}

pub fn render(content: &PageContent, format: Format) -> String {
	match format {
		Format::Markdown => to_markdown(content),
		Format::Plaintext => to_plain_text(content),
	}
}

/// Code, list, table and alert blocks get a blank line first unless they
/// open the page or directly follow a heading.
fn needs_leading_blank(previous: Option<&ContentBlock>) -> bool {
	previous.is_some_and(|block| block.kind() != BlockKind::Heading)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn format_names_round_trip() {
		for format in [Format::Markdown, Format::Plaintext] {
			assert_eq!(format.to_string().parse::<Format>(), Ok(format));
		}
		assert_eq!("TEXT".parse::<Format>(), Ok(Format::Plaintext));
		assert!("html".parse::<Format>().is_err());
	}

	#[test]
	fn format_serializes_lowercase() {
		assert_eq!(serde_json::to_string(&Format::Plaintext).unwrap(), "\"plaintext\"");
		assert_eq!(Format::Plaintext.label(), "Plain Text");
	}

	#[test]
	fn render_dispatches_on_format() {
		let content = PageContent {
			title: "Intro".to_string(),
			..PageContent::default()
		};
		assert_eq!(render(&content, Format::Markdown), "# Intro");
		assert_eq!(render(&content, Format::Plaintext), "INTRO\n=====");
	}
}
