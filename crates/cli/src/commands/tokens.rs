use std::path::Path;

use pagecopy::tokens::{count_words, element_token_count, format_token_count};
use pagecopy::{Extractor, PageConfig, TreeQuery};
use serde::Serialize;

use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenData {
	words: usize,
	tokens: usize,
	display: String,
}

pub fn execute(file: &Path, config: &PageConfig, format: OutputFormat) -> Result<()> {
	let doc = super::read_document(file)?;
	let content = Extractor::new(config)?.content_root(&doc);

	let words = content.map_or(0, |id| count_words(&doc.text_content(id)));
	let tokens = element_token_count(&doc, content);
	let display = format_token_count(tokens);

	let result = ResultBuilder::new("tokens")
		.text(format!("{words} words, ~{display} tokens"))
		.data(TokenData { words, tokens, display })
		.build();
	print_result(&result, format);
	Ok(())
}
