use std::path::Path;

use pagecopy::{ClipboardSink, CopyPage, Format, PageConfig};
use serde::Serialize;
use tracing::info;

use crate::clipboard::{CommandSink, FileSink, NoSink};
use crate::error::{CliError, Result};
use crate::notify::TerminalNotifier;
use crate::output::{OutputFormat, ResultBuilder, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CopyData {
	format: Format,
	copied: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	clipboard: Option<String>,
}

pub async fn execute(file: &Path, text_format: Format, fallback_file: Option<&Path>, config: &PageConfig, format: OutputFormat) -> Result<()> {
	let doc = super::read_document(file)?;
	let page = CopyPage::new(config)?;

	let system = CommandSink::detect();
	let fallback: Box<dyn ClipboardSink> = match fallback_file {
		Some(path) => Box::new(FileSink::new(path)),
		None => Box::new(NoSink),
	};
	info!(
		target = "pagecopy",
		file = %file.display(),
		format = %text_format,
		clipboard = system.as_ref().map(|sink| sink.name()).unwrap_or("none"),
		"copy page"
	);

	let primary = system.as_ref().map(|sink| sink as &dyn ClipboardSink);
	let copied = page
		.copy_page(&doc, text_format, primary, fallback.as_ref(), &TerminalNotifier)
		.await;
	if !copied {
		return Err(CliError::CopyFailed);
	}

	// The toast already reported success on stderr.
	if format.is_structured() {
		let result = ResultBuilder::new("copy")
			.data(CopyData {
				format: text_format,
				copied,
				clipboard: system.as_ref().map(|sink| sink.name().to_string()),
			})
			.build();
		print_result(&result, format);
	}
	Ok(())
}
