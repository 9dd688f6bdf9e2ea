use std::path::Path;

use pagecopy::search_index::{build_index, write_index};
use serde::Serialize;

use crate::error::Result;
use crate::output::{ArtifactType, OutputFormat, ResultBuilder, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexData {
	pages: usize,
}

pub fn execute(content_dir: &Path, output: &Path, format: OutputFormat) -> Result<()> {
	let pages = build_index(content_dir)?;
	write_index(&pages, output)?;

	let result = ResultBuilder::new("index")
		.text(format!("Indexed {} page(s)", pages.len()))
		.data(IndexData { pages: pages.len() })
		.artifact(ArtifactType::Index, output)
		.build();
	print_result(&result, format);
	Ok(())
}
