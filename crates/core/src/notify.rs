//! Transient copy notifications.

use std::time::Duration;

use serde::Serialize;

use crate::render::Format;

/// How long a toast stays fully visible.
pub const VISIBLE_FOR: Duration = Duration::from_millis(2000);
/// Length of the fade-out after [`VISIBLE_FOR`] elapses.
pub const FADE_FOR: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
	Success,
	Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
	pub message: String,
	pub outcome: Outcome,
	#[serde(skip)]
	pub visible_for: Duration,
	#[serde(skip)]
	pub fade_for: Duration,
}

impl Toast {
	pub fn new(message: impl Into<String>, outcome: Outcome) -> Self {
		Self {
			message: message.into(),
			outcome,
			visible_for: VISIBLE_FOR,
			fade_for: FADE_FOR,
		}
	}

	pub fn copied(format: Format) -> Self {
		Self::new(format!("Copied as {}", format.label()), Outcome::Success)
	}

	pub fn copy_failed() -> Self {
		Self::new("Failed to copy", Outcome::Failure)
	}

	pub fn for_result(success: bool, format: Format) -> Self {
		if success { Self::copied(format) } else { Self::copy_failed() }
	}

	pub fn is_success(&self) -> bool {
		self.outcome == Outcome::Success
	}

	/// CSS classes of the rendered toast element.
	pub fn class_name(&self) -> &'static str {
		match self.outcome {
			Outcome::Success => "copy-page-toast success",
			Outcome::Failure => "copy-page-toast error",
		}
	}

	/// Total time before the toast is removed.
	pub fn lifetime(&self) -> Duration {
		self.visible_for + self.fade_for
	}
}

/// Surface that displays toasts. At most one toast is shown at a time; a new
/// one replaces whatever is on screen.
pub trait Notifier: Send + Sync {
	fn show(&self, toast: &Toast);
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_follow_format() {
		assert_eq!(Toast::copied(Format::Markdown).message, "Copied as Markdown");
		assert_eq!(Toast::copied(Format::Plaintext).message, "Copied as Plain Text");
		assert_eq!(Toast::for_result(false, Format::Markdown).message, "Failed to copy");
	}

	#[test]
	fn timing_and_classes() {
		let toast = Toast::copy_failed();
		assert_eq!(toast.class_name(), "copy-page-toast error");
		assert_eq!(toast.lifetime(), Duration::from_millis(2300));
		assert!(!toast.is_success());
	}
}
