//! Page-content extraction.
//!
//! An [`Extractor`] walks the descendant elements of the page's content
//! container in document order and classifies each one with a
//! priority-ordered rule table. Rules that fold a whole subtree into one
//! block (lists, tables, alerts, blockquotes) mark the subtree consumed so
//! its elements are never classified again.

mod list;
mod metadata;
mod table;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::{debug, trace};

use crate::config::PageConfig;
use crate::dom::{NodeId, Selector, TreeQuery};
use crate::error::Result;
use crate::types::{ContentBlock, PageContent};

static LANGUAGE_CLASS_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(?:language-|highlight-)(.+)$").expect("LANGUAGE_CLASS_RE should compile"));
static CODE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("code").expect("CODE should parse"));

type Predicate = fn(&Extractor, &dyn TreeQuery, NodeId) -> bool;
type Constructor = fn(&Extractor, &dyn TreeQuery, NodeId) -> Option<ContentBlock>;

struct Rule {
	name: &'static str,
	applies: Predicate,
	build: Constructor,
	/// Whether descendants are folded into this element's block.
	consumes_subtree: bool,
}

/// Evaluated top to bottom; the first rule that applies wins.
const RULES: &[Rule] = &[
	Rule {
		name: "heading",
		applies: is_heading,
		build: heading_block,
		consumes_subtree: false,
	},
	Rule {
		name: "code",
		applies: |_, tree, id| tree.has_tag(id, "pre"),
		build: code_block,
		consumes_subtree: false,
	},
	Rule {
		name: "list",
		applies: |_, tree, id| list::is_list(tree, id),
		build: |_, tree, id| {
			Some(ContentBlock::List {
				content: list::render_list(tree, id, 0),
			})
		},
		consumes_subtree: true,
	},
	Rule {
		name: "table",
		applies: |_, tree, id| tree.has_tag(id, "table"),
		build: |_, tree, id| {
			Some(ContentBlock::Table {
				content: table::render_table(tree, id),
			})
		},
		consumes_subtree: true,
	},
	Rule {
		name: "alert",
		applies: |extractor, tree, id| extractor.alert_classes.iter().any(|class| tree.has_class(id, class)),
		build: |_, tree, id| {
			Some(ContentBlock::Alert {
				content: tree.text_content(id).trim().to_string(),
			})
		},
		consumes_subtree: true,
	},
	Rule {
		name: "paragraph",
		applies: |_, tree, id| tree.has_tag(id, "p"),
		build: paragraph_block,
		consumes_subtree: false,
	},
	Rule {
		name: "blockquote",
		applies: |_, tree, id| tree.has_tag(id, "blockquote"),
		build: blockquote_block,
		consumes_subtree: true,
	},
];

/// Extracts [`PageContent`] from any [`TreeQuery`] implementor.
///
/// Built once from a [`PageConfig`]; selector strings are parsed here so a
/// bad override fails early instead of on every page.
#[derive(Debug, Clone)]
pub struct Extractor {
	title_selectors: Vec<Selector>,
	description_selector: Selector,
	content_selectors: Vec<Selector>,
	excluded_regions: Vec<Selector>,
	alert_classes: Vec<String>,
}

impl Default for Extractor {
	fn default() -> Self {
		Self::new(&PageConfig::default()).expect("default page config selectors should parse")
	}
}

impl Extractor {
	pub fn new(config: &PageConfig) -> Result<Self> {
		Ok(Self {
			title_selectors: parse_all(&config.title_selectors)?,
			description_selector: Selector::parse(&config.description_selector)?,
			content_selectors: parse_all(&config.content_selectors)?,
			excluded_regions: parse_all(&config.excluded_regions)?,
			alert_classes: config.alert_classes.clone(),
		})
	}

	/// First element matched by the ordered content selectors.
	pub fn content_root(&self, tree: &dyn TreeQuery) -> Option<NodeId> {
		self.content_selectors
			.iter()
			.find_map(|selector| tree.select_first(tree.root(), selector))
	}

	pub fn extract<T: TreeQuery>(&self, tree: &T) -> PageContent {
		let tree: &dyn TreeQuery = tree;
		let title = metadata::extract_title(tree, &self.title_selectors);
		let description = metadata::extract_description(tree, &self.description_selector);

		let blocks = match self.content_root(tree) {
			Some(container) => self.collect_blocks(tree, container),
			None => {
				debug!(target = "pagecopy.extract", "no content container matched");
				Vec::new()
			}
		};

		debug!(
			target = "pagecopy.extract",
			title = %title,
			has_description = description.is_some(),
			blocks = blocks.len(),
			"extracted page content"
		);

		PageContent { title, description, blocks }
	}

	fn collect_blocks(&self, tree: &dyn TreeQuery, container: NodeId) -> Vec<ContentBlock> {
		let mut blocks = Vec::new();
		let mut consumed: HashSet<NodeId> = HashSet::new();
		let mut pending: Vec<NodeId> = tree.element_children(container).into_iter().rev().collect();

		while let Some(node) = pending.pop() {
			if self.is_excluded(tree, node) {
				trace!(target = "pagecopy.extract", tag = tree.tag(node).unwrap_or_default(), "skipping excluded region");
				continue;
			}
			pending.extend(tree.element_children(node).into_iter().rev());

			if consumed.contains(&node) {
				continue;
			}
			let Some(rule) = RULES.iter().find(|rule| (rule.applies)(self, tree, node)) else {
				continue;
			};

			consumed.insert(node);
			if rule.consumes_subtree {
				consumed.extend(tree.descendants(node));
			}
			if let Some(block) = (rule.build)(self, tree, node) {
				trace!(target = "pagecopy.extract", rule = rule.name, "classified element");
				blocks.push(block);
			}
		}

		blocks
	}

	fn is_excluded(&self, tree: &dyn TreeQuery, node: NodeId) -> bool {
		self.excluded_regions.iter().any(|region| tree.matches(node, region))
	}
}

fn parse_all(sources: &[String]) -> Result<Vec<Selector>> {
	sources.iter().map(|source| Selector::parse(source)).collect()
}

fn heading_level(tree: &dyn TreeQuery, id: NodeId) -> Option<u8> {
	let tag = tree.tag(id)?;
	let digit = tag.strip_prefix('h')?;
	match digit.parse::<u8>() {
		Ok(level @ 1..=6) => Some(level),
		_ => None,
	}
}

fn is_heading(_: &Extractor, tree: &dyn TreeQuery, id: NodeId) -> bool {
	heading_level(tree, id).is_some()
}

fn heading_block(_: &Extractor, tree: &dyn TreeQuery, id: NodeId) -> Option<ContentBlock> {
	Some(ContentBlock::Heading {
		level: heading_level(tree, id)?,
		content: tree.text_content(id).trim().to_string(),
	})
}

fn code_block(_: &Extractor, tree: &dyn TreeQuery, pre: NodeId) -> Option<ContentBlock> {
	let code = tree.select_first(pre, &CODE).unwrap_or(pre);

	let language = tree
		.classes(code)
		.into_iter()
		.find_map(|class| LANGUAGE_CLASS_RE.captures(class).map(|caps| caps[1].to_string()))
		.or_else(|| tree.attribute(pre, "data-lang").filter(|lang| !lang.is_empty()).map(str::to_string))
		.unwrap_or_default();

	Some(ContentBlock::Code {
		content: tree.text_content(code),
		language,
	})
}

fn paragraph_block(_: &Extractor, tree: &dyn TreeQuery, id: NodeId) -> Option<ContentBlock> {
	let text = tree.text_content(id);
	let text = text.trim();
	if text.is_empty() {
		return None;
	}
	Some(ContentBlock::Prose { content: text.to_string() })
}

fn blockquote_block(_: &Extractor, tree: &dyn TreeQuery, id: NodeId) -> Option<ContentBlock> {
	let text = tree.text_content(id);
	Some(ContentBlock::Prose {
		content: format!("> {}", text.trim().replace('\n', "\n> ")),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::Document;
	use crate::types::BlockKind;

	fn extract(html: &str) -> PageContent {
		Extractor::default().extract(&Document::parse(html))
	}

	fn kinds(content: &PageContent) -> Vec<BlockKind> {
		content.blocks.iter().map(ContentBlock::kind).collect()
	}

	#[test]
	fn extracts_title_description_and_blocks() {
		let html = r#"<html><head><meta name="description" content="Goa guide"></head><body>
			<h1>Getting Started</h1>
			<div class="td-content"><p>Hello</p><pre><code class="language-go">x:=1</code></pre></div>
			</body></html>"#;
		let content = extract(html);
		assert_eq!(content.title, "Getting Started");
		assert_eq!(content.description.as_deref(), Some("Goa guide"));
		assert_eq!(
			content.blocks,
			vec![
				ContentBlock::Prose { content: "Hello".into() },
				ContentBlock::Code {
					content: "x:=1".into(),
					language: "go".into(),
				},
			]
		);
	}

	#[test]
	fn no_container_yields_no_blocks() {
		let content = extract("<div><h1>Lonely</h1><p>outside</p></div>");
		assert_eq!(content.title, "Lonely");
		assert!(content.blocks.is_empty());
	}

	#[test]
	fn empty_page_is_empty() {
		assert!(extract("").is_empty());
	}

	#[test]
	fn container_priority_prefers_td_content() {
		let content = extract("<main><p>main text</p></main><article><p>article text</p></article><div class='td-content'><p>docs text</p></div>");
		assert_eq!(content.blocks, vec![ContentBlock::Prose { content: "docs text".into() }]);
	}

	#[test]
	fn headings_keep_level() {
		let content = extract("<article><h2> Design </h2><h4>Types</h4></article>");
		assert_eq!(
			content.blocks,
			vec![
				ContentBlock::Heading {
					level: 2,
					content: "Design".into(),
				},
				ContentBlock::Heading {
					level: 4,
					content: "Types".into(),
				},
			]
		);
	}

	#[test]
	fn code_content_is_not_trimmed() {
		let content = extract("<main><pre><code>\n  indented\n</code></pre></main>");
		assert_eq!(
			content.blocks,
			vec![ContentBlock::Code {
				content: "\n  indented\n".into(),
				language: String::new(),
			}]
		);
	}

	#[test]
	fn code_skips_newline_after_pre_tag() {
		let content = extract("<main><pre class=\"language-go\">\nx := 1\n</pre></main>");
		assert_eq!(
			content.blocks,
			vec![ContentBlock::Code {
				content: "x := 1\n".to_string(),
				language: "go".to_string(),
			}]
		);
	}

	#[test]
	fn code_language_falls_back_to_data_lang() {
		let content = extract("<main><pre data-lang=\"bash\"><code class=\"chroma\">goa gen</code></pre><pre class=\"highlight-yaml\">a: b</pre></main>");
		let languages: Vec<_> = content
			.blocks
			.iter()
			.map(|block| match block {
				ContentBlock::Code { language, .. } => language.as_str(),
				_ => "",
			})
			.collect();
		assert_eq!(languages, vec!["bash", "yaml"]);
	}

	#[test]
	fn excluded_regions_are_skipped_with_their_subtree() {
		let html = "<div class='td-content'><nav><p>menu</p></nav><div class='td-toc'><ul><li>toc</li></ul></div><p>body</p></div>";
		assert_eq!(extract(html).blocks, vec![ContentBlock::Prose { content: "body".into() }]);
	}

	#[test]
	fn nested_list_is_one_block() {
		let content = extract("<article><ul><li>a<ul><li>b</li></ul></li></ul></article>");
		assert_eq!(content.blocks, vec![ContentBlock::List { content: "- a\n  - b".into() }]);
	}

	#[test]
	fn alert_consumes_inner_paragraphs() {
		let content = extract("<main><div class='alert alert-info'><p>Heads up</p><p>twice</p></div><p>after</p></main>");
		assert_eq!(kinds(&content), vec![BlockKind::Alert, BlockKind::Prose]);
		assert_eq!(content.blocks[0].content(), "Heads uptwice");
	}

	#[test]
	fn blockquote_lines_are_prefixed() {
		let content = extract("<main><blockquote>\n<p>first\nsecond</p>\n</blockquote></main>");
		assert_eq!(content.blocks, vec![ContentBlock::Prose { content: "> first\n> second".into() }]);
	}

	#[test]
	fn empty_paragraphs_are_dropped() {
		let content = extract("<main><p>   </p><p>kept</p></main>");
		assert_eq!(content.blocks, vec![ContentBlock::Prose { content: "kept".into() }]);
	}

	#[test]
	fn generic_containers_are_transparent() {
		let content = extract("<main><section><div><p>deep</p></div></section><table><tbody><tr><td>x</td></tr></tbody></table></main>");
		assert_eq!(kinds(&content), vec![BlockKind::Prose, BlockKind::Table]);
	}

	#[test]
	fn extraction_is_idempotent() {
		let doc = Document::parse("<article><h2>A</h2><p>b</p><ol><li>c</li></ol></article>");
		let extractor = Extractor::default();
		assert_eq!(extractor.extract(&doc), extractor.extract(&doc));
	}

	#[test]
	fn custom_alert_classes_from_config() {
		let config = PageConfig {
			alert_classes: vec!["warning".to_string()],
			..PageConfig::default()
		};
		let extractor = Extractor::new(&config).unwrap();
		let content = extractor.extract(&Document::parse("<main><div class='warning'>careful</div><div class='alert'><p>plain</p></div></main>"));
		assert_eq!(kinds(&content), vec![BlockKind::Alert, BlockKind::Prose]);
	}

	#[test]
	fn bad_selector_is_rejected() {
		let config = PageConfig {
			content_selectors: vec!["main > p".to_string()],
			..PageConfig::default()
		};
		assert!(Extractor::new(&config).is_err());
	}
}
