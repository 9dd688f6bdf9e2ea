use super::needs_leading_blank;
use crate::types::{ContentBlock, PageContent};

pub fn to_markdown(content: &PageContent) -> String {
	let mut lines: Vec<String> = Vec::new();

	if !content.title.is_empty() {
		lines.push(format!("# {}", content.title));
		lines.push(String::new());
	}

	if let Some(description) = content.description.as_deref().filter(|d| !d.is_empty()) {
		lines.push(description.to_string());
		lines.push(String::new());
	}

	let mut previous: Option<&ContentBlock> = None;
	for block in &content.blocks {
		match block {
			ContentBlock::Heading { level, content } => {
				if previous.is_some() {
					lines.push(String::new());
				}
				lines.push(format!("{} {content}", "#".repeat(usize::from(*level))));
			}
			ContentBlock::Code { content, language } => {
				if needs_leading_blank(previous) {
					lines.push(String::new());
				}
				lines.push(format!("```{language}"));
				lines.push(content.clone());
				lines.push("```".to_string());
			}
			ContentBlock::List { content } | ContentBlock::Table { content } => {
				if needs_leading_blank(previous) {
					lines.push(String::new());
				}
				lines.push(content.clone());
			}
			ContentBlock::Alert { content } => {
				if needs_leading_blank(previous) {
					lines.push(String::new());
				}
				lines.push(format!("> **Note:** {content}"));
			}
			ContentBlock::Prose { content } => lines.push(content.clone()),
		}
		lines.push(String::new());
		previous = Some(block);
	}

	lines.join("\n").trim().to_string()
}
