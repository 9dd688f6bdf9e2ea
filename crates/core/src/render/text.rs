use std::sync::LazyLock;

use regex_lite::Regex;

use super::needs_leading_blank;
use crate::types::{ContentBlock, PageContent};

static TABLE_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|[\s\-|]+\|$").expect("TABLE_SEPARATOR_RE should compile"));

pub fn to_plain_text(content: &PageContent) -> String {
	let mut lines: Vec<String> = Vec::new();

	if !content.title.is_empty() {
		lines.push(content.title.to_uppercase());
		lines.push(underline('=', &content.title));
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
				lines.push(content.clone());
				lines.push(underline(if *level <= 2 { '=' } else { '-' }, content));
			}
			ContentBlock::Code { content, .. } => {
				if needs_leading_blank(previous) {
					lines.push(String::new());
				}
				lines.push("--- CODE ---".to_string());
				lines.push(content.clone());
				lines.push("--- END CODE ---".to_string());
			}
			ContentBlock::List { content } => {
				if needs_leading_blank(previous) {
					lines.push(String::new());
				}
				lines.push(content.clone());
			}
			ContentBlock::Table { content } => {
				if needs_leading_blank(previous) {
					lines.push(String::new());
				}
				lines.extend(content.split('\n').filter(|line| !TABLE_SEPARATOR_RE.is_match(line)).map(unpipe));
			}
			ContentBlock::Alert { content } => {
				if needs_leading_blank(previous) {
					lines.push(String::new());
				}
				lines.push(format!("NOTE: {content}"));
			}
			ContentBlock::Prose { content } => lines.push(strip_quote_markers(content)),
		}
		lines.push(String::new());
		previous = Some(block);
	}

	lines.join("\n").trim().to_string()
}

fn underline(ch: char, text: &str) -> String {
	ch.to_string().repeat(text.chars().count())
}

/// `| a | b |` becomes `a  |  b`.
fn unpipe(line: &str) -> String {
	let line = line.strip_prefix('|').unwrap_or(line);
	let line = line.strip_suffix('|').unwrap_or(line);
	line.replace('|', "  |  ").trim().to_string()
}

fn strip_quote_markers(content: &str) -> String {
	content
		.split('\n')
		.map(|line| match line.strip_prefix('>') {
			Some(rest) => rest.trim_start_matches([' ', '\t']),
			None => line,
		})
		.collect::<Vec<_>>()
		.join("\n")
}
