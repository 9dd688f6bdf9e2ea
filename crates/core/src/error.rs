//! Error types for the library.
//!
//! Missing page structure (no title, no content container, no table rows) is
//! never an error; these variants cover configuration and filesystem input.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PageCopyError>;

#[derive(Debug, Error)]
pub enum PageCopyError {
	#[error("invalid selector `{selector}`: {reason}")]
	Selector { selector: String, reason: String },

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("malformed JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid front matter in {}: {source}", path.display())]
	FrontMatter {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
}
