//! System clipboard and file sinks.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use pagecopy::{ClipboardError, ClipboardSink};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Clipboard programs in probe order, with the arguments that make them read
/// the clipboard contents from stdin.
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[
	("wl-copy", &[]),
	("xclip", &["-selection", "clipboard"]),
	("xsel", &["--clipboard", "--input"]),
	("pbcopy", &[]),
	("clip", &[]),
];

/// Pipes text into an external clipboard program.
#[derive(Debug, Clone)]
pub struct CommandSink {
	name: String,
	program: PathBuf,
	args: Vec<String>,
}

impl CommandSink {
	pub fn new(name: impl Into<String>, program: impl Into<PathBuf>, args: &[&str]) -> Self {
		Self {
			name: name.into(),
			program: program.into(),
			args: args.iter().map(|arg| (*arg).to_string()).collect(),
		}
	}

	/// First clipboard program found on `PATH`.
	pub fn detect() -> Option<Self> {
		CLIPBOARD_PROGRAMS.iter().find_map(|(name, args)| {
			let program = which::which(name).ok()?;
			debug!(target = "pagecopy.clipboard", program = %program.display(), "found clipboard program");
			Some(Self::new(*name, program, args))
		})
	}
}

#[async_trait]
impl ClipboardSink for CommandSink {
	fn name(&self) -> &str {
		&self.name
	}

	async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
		let mut child = Command::new(&self.program)
			.args(&self.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.spawn()
			.map_err(|source| ClipboardError::Spawn {
				program: self.name.clone(),
				source,
			})?;

		let mut stdin = child.stdin.take().ok_or_else(|| ClipboardError::Unavailable(self.name.clone()))?;
		stdin.write_all(text.as_bytes()).await.map_err(|source| ClipboardError::Write {
			target: self.name.clone(),
			source,
		})?;
		drop(stdin);

		let status = child.wait().await.map_err(|source| ClipboardError::Spawn {
			program: self.name.clone(),
			source,
		})?;
		if !status.success() {
			return Err(ClipboardError::ExitStatus {
				program: self.name.clone(),
				status: status.to_string(),
			});
		}
		Ok(())
	}
}

/// Writes the text to a file.
#[derive(Debug, Clone)]
pub struct FileSink {
	path: PathBuf,
	name: String,
}

impl FileSink {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let name = format!("file:{}", path.display());
		Self { path, name }
	}
}

#[async_trait]
impl ClipboardSink for FileSink {
	fn name(&self) -> &str {
		&self.name
	}

	async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
		tokio::fs::write(&self.path, text).await.map_err(|source| ClipboardError::Write {
			target: self.name.clone(),
			source,
		})
	}
}

/// Stand-in fallback when no fallback file was requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSink;

#[async_trait]
impl ClipboardSink for NoSink {
	fn name(&self) -> &str {
		"none"
	}

	async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
		Err(ClipboardError::Unavailable("fallback".to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn file_sink_writes_text() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("copied.md");
		FileSink::new(&path).write_text("# Title").await.unwrap();
		assert_eq!(std::fs::read_to_string(path).unwrap(), "# Title");
	}

	#[tokio::test]
	async fn file_sink_reports_missing_directory() {
		let dir = tempfile::tempdir().unwrap();
		let err = FileSink::new(dir.path().join("missing/copied.md")).write_text("x").await.unwrap_err();
		assert!(matches!(err, ClipboardError::Write { .. }));
	}

	#[tokio::test]
	async fn missing_program_fails_to_spawn() {
		let sink = CommandSink::new("nope", "/nonexistent/clipboard-program", &[]);
		let err = sink.write_text("x").await.unwrap_err();
		assert!(matches!(err, ClipboardError::Spawn { .. }));
	}

	#[tokio::test]
	async fn no_sink_always_fails() {
		assert!(NoSink.write_text("x").await.is_err());
	}
}
