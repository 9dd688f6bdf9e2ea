use std::path::Path;

use pagecopy::{Extractor, PageConfig};
use tracing::info;

use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, print_result};

pub fn execute(file: &Path, config: &PageConfig, format: OutputFormat) -> Result<()> {
	let doc = super::read_document(file)?;
	let content = Extractor::new(config)?.extract(&doc);
	info!(target = "pagecopy", file = %file.display(), blocks = content.blocks.len(), "extracted page");

	print_result(&ResultBuilder::new("extract").data(content).build(), format);
	Ok(())
}
