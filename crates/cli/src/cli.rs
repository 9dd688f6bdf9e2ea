use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pagecopy::Format;
use pagecopy::search_index::DEFAULT_DEST;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pagecopy")]
#[command(about = "Copy, extract and enhance documentation pages")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// JSON file overriding selector and threshold defaults
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Result format
	#[arg(short = 'f', long = "format-output", global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Copy a page to the clipboard as Markdown or plain text
	#[command(alias = "cp")]
	Copy {
		/// HTML file, or `-` for stdin
		file: PathBuf,
		/// Text format to copy (markdown or plaintext)
		#[arg(long = "as", value_name = "FORMAT", default_value_t = Format::Markdown)]
		text_format: Format,
		/// Write here when no system clipboard accepts the text
		#[arg(long, value_name = "PATH")]
		fallback_file: Option<PathBuf>,
	},

	/// Print the extracted page content as JSON
	Extract {
		/// HTML file, or `-` for stdin
		file: PathBuf,
	},

	/// Print the page rendered as Markdown or plain text
	Render {
		/// HTML file, or `-` for stdin
		file: PathBuf,
		/// Text format to render (markdown or plaintext)
		#[arg(long = "as", value_name = "FORMAT", default_value_t = Format::Markdown)]
		text_format: Format,
	},

	/// Estimate LLM tokens for the page content
	Tokens {
		/// HTML file, or `-` for stdin
		file: PathBuf,
	},

	/// List the headings an auto table of contents would link
	Toc {
		/// HTML file, or `-` for stdin
		file: PathBuf,
	},

	/// Apply token badges, external-link marking and the auto table of contents
	Enhance {
		/// HTML file, or `-` for stdin
		file: PathBuf,
		/// Output file (defaults to stdout)
		#[arg(short, long)]
		output: Option<PathBuf>,
	},

	/// Build the site search index from a content directory
	Index {
		/// Content root to scan for .md and .html pages
		#[arg(default_value = "content")]
		content_dir: PathBuf,
		/// Index destination
		#[arg(short, long, default_value = DEFAULT_DEST)]
		output: PathBuf,
	},
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Copy { .. } => "copy",
			Commands::Extract { .. } => "extract",
			Commands::Render { .. } => "render",
			Commands::Tokens { .. } => "tokens",
			Commands::Toc { .. } => "toc",
			Commands::Enhance { .. } => "enhance",
			Commands::Index { .. } => "index",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_copy_with_format_and_fallback() {
		let cli = Cli::try_parse_from(["pagecopy", "copy", "page.html", "--as", "plaintext", "--fallback-file", "out.txt"]).unwrap();
		match cli.command {
			Commands::Copy {
				file,
				text_format,
				fallback_file,
			} => {
				assert_eq!(file, PathBuf::from("page.html"));
				assert_eq!(text_format, Format::Plaintext);
				assert_eq!(fallback_file, Some(PathBuf::from("out.txt")));
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn global_flags_after_subcommand() {
		let cli = Cli::try_parse_from(["pagecopy", "tokens", "page.html", "-vv", "-f", "json"]).unwrap();
		assert_eq!(cli.verbose, 2);
		assert_eq!(cli.format, OutputFormat::Json);
		assert_eq!(cli.command.name(), "tokens");
	}

	#[test]
	fn index_defaults() {
		let cli = Cli::try_parse_from(["pagecopy", "index"]).unwrap();
		match cli.command {
			Commands::Index { content_dir, output } => {
				assert_eq!(content_dir, PathBuf::from("content"));
				assert_eq!(output, PathBuf::from("static/js/pindex.json"));
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn render_format_and_result_format_are_independent() {
		let cli = Cli::try_parse_from(["pagecopy", "-f", "json", "render", "page.html", "--as", "plaintext"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Json);
		match cli.command {
			Commands::Render { text_format, .. } => assert_eq!(text_format, Format::Plaintext),
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn render_defaults_to_markdown() {
		let cli = Cli::try_parse_from(["pagecopy", "render", "page.html"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Text);
		assert!(matches!(cli.command, Commands::Render { text_format: Format::Markdown, .. }));
	}

	#[test]
	fn command_definitions_are_consistent() {
		use clap::CommandFactory;
		Cli::command().debug_assert();
	}

	#[test]
	fn rejects_unknown_render_format() {
		assert!(Cli::try_parse_from(["pagecopy", "render", "page.html", "--as", "html"]).is_err());
	}
}
