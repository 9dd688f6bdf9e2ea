use clap::ValueEnum;

/// How `pagecopy` reports a command's result on stdout (`-f`).
///
/// Distinct from the page text format chosen with `--as`: `render -f json
/// --as plaintext` prints the plain text inside a JSON envelope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Rendered page, summary line or pretty data; errors go to stderr
	#[default]
	Text,
	/// Pretty-printed `CommandResult` envelope, also on failure
	Json,
	/// One envelope per line, for piping into `jq -c` and log collectors
	Ndjson,
}

impl OutputFormat {
	/// Whether results and failures are emitted as envelopes.
	pub fn is_structured(self) -> bool {
		!matches!(self, OutputFormat::Text)
	}
}

impl std::str::FromStr for OutputFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		<Self as ValueEnum>::from_str(s, true).map_err(|_| format!("unknown result format `{s}` (expected text, json or ndjson)"))
	}
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.to_possible_value() {
			Some(value) => f.write_str(value.get_name()),
			None => Ok(()),
		}
	}
}
