use std::path::PathBuf;

use pagecopy::PageCopyError;
use thiserror::Error;

use crate::output::ErrorCode;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Page(#[from] PageCopyError),

	#[error("failed to write {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Failed to copy")]
	CopyFailed,

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Page(PageCopyError::Selector { .. } | PageCopyError::InvalidConfig(_)) => ErrorCode::InvalidConfig,
			CliError::Page(PageCopyError::Io { .. }) | CliError::Write { .. } => ErrorCode::IoError,
			CliError::Page(_) | CliError::Anyhow(_) => ErrorCode::InvalidInput,
			CliError::CopyFailed => ErrorCode::ClipboardFailed,
			CliError::Json(_) => ErrorCode::InternalError,
		}
	}
}
