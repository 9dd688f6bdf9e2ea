use std::path::Path;

use pagecopy::toc::{AutoToc, TocHeading};
use pagecopy::tokens::count_words;
use pagecopy::{PageConfig, TreeQuery};
use serde::Serialize;

use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TocData {
	words: usize,
	would_generate: bool,
	headings: Vec<TocHeading>,
}

pub fn execute(file: &Path, config: &PageConfig, format: OutputFormat) -> Result<()> {
	let mut doc = super::read_document(file)?;
	let toc = AutoToc::new(config)?;
	let content = toc.content_element(&doc);

	let words = content.map_or(0, |id| count_words(&doc.text_content(id)));
	let would_generate = toc.should_generate_toc(&doc, content);
	let headings = content.map(|id| toc.extract_headings(&mut doc, id)).unwrap_or_default();

	let mut text = format!("{words} words, auto TOC {}", if would_generate { "enabled" } else { "disabled" });
	for heading in &headings {
		let indent = "  ".repeat(usize::from(heading.level.saturating_sub(2)));
		text.push_str(&format!("\n{indent}- {} (#{})", heading.text, heading.id));
	}

	let result = ResultBuilder::new("toc")
		.text(text)
		.data(TocData {
			words,
			would_generate,
			headings,
		})
		.build();
	print_result(&result, format);
	Ok(())
}
