use std::path::Path;

use pagecopy::PageConfig;
use pagecopy::links::LinkMarker;
use pagecopy::toc::AutoToc;
use pagecopy::tokens::update_token_displays;
use serde::Serialize;
use tracing::info;

use crate::error::{CliError, Result};
use crate::output::{ArtifactType, OutputFormat, ResultBuilder, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnhanceData {
	token_displays: usize,
	external_links: usize,
	toc_headings: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	html: Option<String>,
}

pub fn execute(file: &Path, output: Option<&Path>, config: &PageConfig, format: OutputFormat) -> Result<()> {
	let mut doc = super::read_document(file)?;

	let token_displays = update_token_displays(&mut doc);
	let external_links = LinkMarker::new(config)?.process_links(&mut doc);
	let toc_headings = AutoToc::new(config)?.init_auto_toc(&mut doc).len();
	info!(target = "pagecopy", token_displays, external_links, toc_headings, "enhanced page");

	let html = doc.to_html();
	let mut result = ResultBuilder::new("enhance");
	match output {
		Some(path) => {
			std::fs::write(path, &html).map_err(|source| CliError::Write {
				path: path.to_path_buf(),
				source,
			})?;
			result = result
				.text(format!(
					"{token_displays} token badge(s), {external_links} external link(s), {toc_headings} TOC heading(s)"
				))
				.artifact(ArtifactType::Html, path)
				.data(EnhanceData {
					token_displays,
					external_links,
					toc_headings,
					html: None,
				});
		}
		None => {
			result = result.text(html.clone()).data(EnhanceData {
				token_displays,
				external_links,
				toc_headings,
				html: Some(html),
			});
		}
	}

	print_result(&result.build(), format);
	Ok(())
}
