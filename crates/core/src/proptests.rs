//! Property-based tests for the renderers and the extractor.

use proptest::prelude::*;

use crate::dom::Document;
use crate::extract::Extractor;
use crate::render::{to_markdown, to_plain_text};
use crate::types::{ContentBlock, PageContent};

const LANGUAGES: &[&str] = &["go", "javascript", "python", "typescript", "rust", "bash", "yaml", "json", ""];

fn text() -> impl Strategy<Value = String> {
	"[A-Za-z0-9]([A-Za-z0-9 ,.]{0,30}[A-Za-z0-9])?"
}

fn language() -> impl Strategy<Value = String> {
	prop::sample::select(LANGUAGES).prop_map(str::to_string)
}

fn code_block() -> impl Strategy<Value = ContentBlock> {
	("[a-z0-9 =:;(){}]{1,40}", language()).prop_map(|(content, language)| ContentBlock::Code { content, language })
}

fn block() -> impl Strategy<Value = ContentBlock> {
	prop_oneof![
		(1u8..=6, text()).prop_map(|(level, content)| ContentBlock::Heading { level, content }),
		code_block(),
		text().prop_map(|content| ContentBlock::Prose { content }),
		prop::collection::vec(text(), 1..4).prop_map(|items| ContentBlock::List {
			content: items.iter().map(|item| format!("- {item}")).collect::<Vec<_>>().join("\n"),
		}),
		(text(), text()).prop_map(|(a, b)| ContentBlock::Table {
			content: format!("| {a} | {b} |\n| --- | --- |\n| {b} | {a} |"),
		}),
		text().prop_map(|content| ContentBlock::Alert { content }),
	]
}

fn page_content() -> impl Strategy<Value = PageContent> {
	(
		prop_oneof![Just(String::new()), text()],
		prop::option::of(text()),
		prop::collection::vec(block(), 0..12),
	)
		.prop_map(|(title, description, blocks)| PageContent { title, description, blocks })
}

/// Page content with at least two code blocks mixed into other blocks.
fn page_with_code_blocks() -> impl Strategy<Value = PageContent> {
	(page_content(), prop::collection::vec(code_block(), 2..5), any::<prop::sample::Index>()).prop_map(|(mut page, codes, at)| {
		for code in codes {
			let position = at.index(page.blocks.len() + 1);
			page.blocks.insert(position, code);
		}
		page
	})
}

/// Line indices of the opening and closing fence of every code block.
fn fence_pairs(lines: &[&str]) -> Vec<(usize, usize)> {
	let fences: Vec<usize> = lines
		.iter()
		.enumerate()
		.filter(|(_, line)| line.starts_with("```"))
		.map(|(index, _)| index)
		.collect();
	fences.chunks(2).filter(|pair| pair.len() == 2).map(|pair| (pair[0], pair[1])).collect()
}

proptest! {
	#[test]
	fn markdown_contains_title(page in page_content()) {
		let markdown = to_markdown(&page);
		if !page.title.is_empty() {
			let heading = format!("# {}", page.title);
			prop_assert!(markdown.contains(&heading));
		}
	}

	#[test]
	fn plain_text_contains_uppercased_title(page in page_content()) {
		let text = to_plain_text(&page);
		if !page.title.is_empty() {
			prop_assert!(text.contains(&page.title.to_uppercase()));
		}
	}

	#[test]
	fn markdown_fences_carry_language(page in page_content()) {
		let markdown = to_markdown(&page);
		for block in &page.blocks {
			if let ContentBlock::Code { language, .. } = block {
				if !language.is_empty() {
					let fence = format!("```{language}");
					prop_assert!(markdown.contains(&fence));
				}
			}
		}
	}

	#[test]
	fn plain_text_never_contains_fences(page in page_content()) {
		prop_assert!(!to_plain_text(&page).contains("```"));
	}

	#[test]
	fn markdown_code_blocks_are_separated(page in page_with_code_blocks()) {
		let markdown = to_markdown(&page);
		let lines: Vec<&str> = markdown.split('\n').collect();
		for (open, close) in fence_pairs(&lines) {
			if open > 0 {
				prop_assert_eq!(lines[open - 1], "");
			}
			if close + 1 < lines.len() {
				prop_assert_eq!(lines[close + 1], "");
			}
		}
	}

	#[test]
	fn plain_text_code_markers_follow_blank_lines(page in page_with_code_blocks()) {
		let text = to_plain_text(&page);
		let lines: Vec<&str> = text.split('\n').collect();
		for (index, line) in lines.iter().enumerate() {
			if *line == "--- CODE ---" && index > 0 {
				prop_assert_eq!(lines[index - 1], "");
			}
		}
	}

	#[test]
	fn rendering_is_deterministic(page in page_content()) {
		prop_assert_eq!(to_markdown(&page), to_markdown(&page.clone()));
		prop_assert_eq!(to_plain_text(&page), to_plain_text(&page.clone()));
	}
}

#[test]
fn extract_then_render_example_page() {
	let doc = Document::parse(r#"<h1>Title</h1><div class="td-content"><p>Hello</p><pre><code class="language-go">x:=1</code></pre></div>"#);
	let content = Extractor::default().extract(&doc);
	assert_eq!(
		content,
		PageContent {
			title: "Title".into(),
			description: None,
			blocks: vec![
				ContentBlock::Prose { content: "Hello".into() },
				ContentBlock::Code {
					content: "x:=1".into(),
					language: "go".into(),
				},
			],
		}
	);

	let markdown = to_markdown(&content);
	assert!(markdown.contains("# Title"));
	assert!(markdown.contains("Hello"));
	assert!(markdown.contains("```go\nx:=1\n```"));
}

#[test]
fn nested_list_renders_once() {
	let doc = Document::parse("<main><ul><li>a<ul><li>b</li></ul></li></ul></main>");
	let content = Extractor::default().extract(&doc);
	assert_eq!(content.blocks.len(), 1);
	let list = content.blocks[0].content();
	assert!(list.contains("- a"));
	assert!(list.contains("\n  - b"));
}

#[test]
fn empty_container_renders_empty_strings() {
	let doc = Document::parse(r#"<div class="td-content"></div>"#);
	let content = Extractor::default().extract(&doc);
	assert_eq!(content, PageContent::default());
	assert_eq!(to_markdown(&content), "");
	assert_eq!(to_plain_text(&content), "");
}
