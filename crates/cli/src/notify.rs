use colored::Colorize;
use pagecopy::{Notifier, Outcome, Toast};

/// Prints toasts to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
	pub fn line(toast: &Toast) -> String {
		match toast.outcome {
			Outcome::Success => format!("{} {}", "✓".green().bold(), toast.message),
			Outcome::Failure => format!("{} {}", "✗".red().bold(), toast.message.red()),
		}
	}
}

impl Notifier for TerminalNotifier {
	fn show(&self, toast: &Toast) {
		eprintln!("{}", Self::line(toast));
	}
}
