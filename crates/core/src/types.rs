//! Public types produced by extraction and consumed by the renderers.

use serde::{Deserialize, Serialize};

/// One classified, renderable unit of page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
	Heading {
		/// Heading depth, always within `1..=6`.
		level: u8,
		content: String,
	},
	Code {
		/// Exact text of the code element, whitespace included.
		content: String,
		/// Language tag from the highlighter classes, possibly empty.
		language: String,
	},
	/// A paragraph, or a blockquote with every line prefixed `> `.
	Prose { content: String },
	/// Pre-rendered `- ` / `N. ` lines, nested items indented two spaces per level.
	List { content: String },
	/// Pre-rendered Markdown pipe table.
	Table { content: String },
	/// Flattened text of a callout or admonition box.
	Alert { content: String },
}

/// Fieldless discriminant of [`ContentBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
	Heading,
	Code,
	Prose,
	List,
	Table,
	Alert,
}

impl ContentBlock {
	pub fn kind(&self) -> BlockKind {
		match self {
			ContentBlock::Heading { .. } => BlockKind::Heading,
			ContentBlock::Code { .. } => BlockKind::Code,
			ContentBlock::Prose { .. } => BlockKind::Prose,
			ContentBlock::List { .. } => BlockKind::List,
			ContentBlock::Table { .. } => BlockKind::Table,
			ContentBlock::Alert { .. } => BlockKind::Alert,
		}
	}

	pub fn content(&self) -> &str {
		match self {
			ContentBlock::Heading { content, .. }
			| ContentBlock::Code { content, .. }
			| ContentBlock::Prose { content }
			| ContentBlock::List { content }
			| ContentBlock::Table { content }
			| ContentBlock::Alert { content } => content,
		}
	}
}

/// Everything extracted from one page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
	/// Trimmed text of the page's first top-level heading, empty when absent.
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub blocks: Vec<ContentBlock>,
}

impl PageContent {
	pub fn is_empty(&self) -> bool {
		self.title.is_empty() && self.description.as_deref().is_none_or(str::is_empty) && self.blocks.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_with_type_tag() {
		let block = ContentBlock::Code {
			content: "x := 1".to_string(),
			language: "go".to_string(),
		};
		let json = serde_json::to_value(&block).unwrap();
		assert_eq!(json["type"], "code");
		assert_eq!(json["language"], "go");
	}

	#[test]
	fn empty_page_has_no_description_key() {
		let json = serde_json::to_value(PageContent::default()).unwrap();
		assert!(json.get("description").is_none());
		assert!(PageContent::default().is_empty());
	}
}
