use std::path::Path;

use pagecopy::{CopyPage, Format, PageConfig};
use serde::Serialize;

use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderData {
	format: Format,
	content: String,
	char_count: usize,
}

pub fn execute(file: &Path, text_format: Format, config: &PageConfig, format: OutputFormat) -> Result<()> {
	let doc = super::read_document(file)?;
	let content = CopyPage::new(config)?.render(&doc, text_format);

	let result = ResultBuilder::new("render")
		.text(content.clone())
		.data(RenderData {
			format: text_format,
			char_count: content.chars().count(),
			content,
		})
		.build();
	print_result(&result, format);
	Ok(())
}
