//! Clipboard sinks and the two-stage copy with fallback.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ClipboardError {
	#[error("clipboard sink `{0}` is not available")]
	Unavailable(String),

	#[error("failed to start `{program}`: {source}")]
	Spawn {
		program: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write to {target}: {source}")]
	Write {
		target: String,
		#[source]
		source: std::io::Error,
	},

	#[error("`{program}` exited with {status}")]
	ExitStatus { program: String, status: String },
}

/// Somewhere copied text can be written.
#[async_trait]
pub trait ClipboardSink: Send + Sync {
	/// Short name used in log output.
	fn name(&self) -> &str;

	async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes `text` through `primary`, then through `fallback` if the primary
/// sink is missing or fails. Returns whether either succeeded.
pub async fn copy_to_clipboard(text: &str, primary: Option<&dyn ClipboardSink>, fallback: &dyn ClipboardSink) -> bool {
	if let Some(sink) = primary {
		match sink.write_text(text).await {
			Ok(()) => {
				debug!(target = "pagecopy.clipboard", sink = sink.name(), bytes = text.len(), "copied text");
				return true;
			}
			Err(err) => warn!(target = "pagecopy.clipboard", sink = sink.name(), error = %err, "primary clipboard failed, trying fallback"),
		}
	}

	match fallback.write_text(text).await {
		Ok(()) => {
			debug!(target = "pagecopy.clipboard", sink = fallback.name(), bytes = text.len(), "copied text via fallback");
			true
		}
		Err(err) => {
			warn!(target = "pagecopy.clipboard", sink = fallback.name(), error = %err, "fallback clipboard failed");
			false
		}
	}
}


#[cfg(test)]
mod tests {
	use super::testing::RecordingSink;
	use super::*;

	#[tokio::test]
	async fn primary_success_skips_fallback() {
		let primary = RecordingSink::new("primary", true);
		let fallback = RecordingSink::new("fallback", true);
		assert!(copy_to_clipboard("hello", Some(&primary), &fallback).await);
		assert_eq!(primary.writes(), vec!["hello"]);
		assert!(fallback.writes().is_empty());
	}

	#[tokio::test]
	async fn primary_failure_uses_fallback() {
		let primary = RecordingSink::new("primary", false);
		let fallback = RecordingSink::new("fallback", true);
		assert!(copy_to_clipboard("hello", Some(&primary), &fallback).await);
		assert_eq!(fallback.writes(), vec!["hello"]);
	}

	#[tokio::test]
	async fn missing_primary_uses_fallback() {
		let fallback = RecordingSink::new("fallback", true);
		assert!(copy_to_clipboard("hello", None, &fallback).await);
		assert_eq!(fallback.writes(), vec!["hello"]);
	}

	#[tokio::test]
	async fn both_failing_returns_false() {
		let primary = RecordingSink::new("primary", false);
		let fallback = RecordingSink::new("fallback", false);
		assert!(!copy_to_clipboard("hello", Some(&primary), &fallback).await);
	}
}
