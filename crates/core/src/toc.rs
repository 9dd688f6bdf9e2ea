//! Auto-generated table of contents for long pages, plus the scroll-spy
//! logic that picks the active entry.

use std::sync::LazyLock;

use serde::Serialize;
use tracing::debug;

use crate::config::PageConfig;
use crate::dom::{Document, NodeId, Selector, TreeQuery, escape_attribute, escape_text};
use crate::error::Result;
use crate::tokens::count_words;

/// Distance below the top of the viewport at which a heading becomes active.
pub const SCROLL_OFFSET: f64 = 100.0;

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("TITLE should parse"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocHeading {
	pub level: u8,
	pub text: String,
	pub id: String,
}

/// Builds and inserts the auto TOC.
#[derive(Debug, Clone)]
pub struct AutoToc {
	scope: Selector,
	headings: Selector,
	word_threshold: usize,
}

impl Default for AutoToc {
	fn default() -> Self {
		Self::new(&PageConfig::default()).expect("default page config selectors should parse")
	}
}

impl AutoToc {
	pub fn new(config: &PageConfig) -> Result<Self> {
		Ok(Self {
			scope: Selector::parse(&config.toc_scope)?,
			headings: Selector::parse(&config.toc_headings)?,
			word_threshold: config.toc_word_threshold,
		})
	}

	pub fn content_element(&self, tree: &dyn TreeQuery) -> Option<NodeId> {
		tree.select_first(tree.root(), &self.scope)
	}

	/// Strictly more words than the threshold.
	pub fn should_generate_toc(&self, tree: &dyn TreeQuery, content: Option<NodeId>) -> bool {
		content.is_some_and(|id| count_words(&tree.text_content(id)) > self.word_threshold)
	}

	/// Headings in document order. Headings without an id get
	/// `toc-heading-{index}` written back so the TOC links resolve.
	pub fn extract_headings(&self, doc: &mut Document, container: NodeId) -> Vec<TocHeading> {
		let matched = doc.select_all(container, &self.headings);
		let mut headings = Vec::with_capacity(matched.len());

		for (index, heading) in matched.into_iter().enumerate() {
			let level = doc
				.tag(heading)
				.and_then(|tag| tag.strip_prefix('h'))
				.and_then(|digit| digit.parse().ok())
				.unwrap_or(2);
			let text = doc.text_content(heading).trim().to_string();
			let id = match doc.attribute(heading, "id").filter(|id| !id.is_empty()) {
				Some(id) => id.to_string(),
				None => {
					let id = format!("toc-heading-{index}");
					doc.set_attribute(heading, "id", &id);
					id
				}
			};
			headings.push(TocHeading { level, text, id });
		}

		headings
	}

	/// Runs the whole flow on `doc`: threshold check, heading ids, insertion.
	/// Returns the headings listed in the inserted TOC, empty when none was
	/// inserted.
	pub fn init_auto_toc(&self, doc: &mut Document) -> Vec<TocHeading> {
		let Some(content) = self.content_element(doc) else {
			debug!(target = "pagecopy.toc", "no content element, skipping auto toc");
			return Vec::new();
		};
		if !self.should_generate_toc(doc, Some(content)) {
			debug!(target = "pagecopy.toc", threshold = self.word_threshold, "page below word threshold");
			return Vec::new();
		}

		let headings = self.extract_headings(doc, content);
		if headings.is_empty() {
			return Vec::new();
		}

		insert_toc(doc, content, &generate_toc_html(&headings));
		debug!(target = "pagecopy.toc", headings = headings.len(), "inserted auto toc");
		headings
	}
}

pub fn generate_toc_html(headings: &[TocHeading]) -> String {
	if headings.is_empty() {
		return String::new();
	}

	let mut html = String::from("<nav class=\"toc-auto\" aria-label=\"Table of Contents\">\n");
	html.push_str("<div class=\"toc-auto-header\">\n");
	html.push_str("<i class=\"fas fa-list\" aria-hidden=\"true\"></i>\n");
	html.push_str("<span>On this page</span>\n");
	html.push_str("</div>\n");
	html.push_str("<ul class=\"toc-auto-list\">\n");

	for heading in headings {
		let indent = i32::from(heading.level) - 2;
		let indent_class = if indent > 0 { format!(" toc-indent-{indent}") } else { String::new() };
		html.push_str(&format!(
			"<li class=\"toc-auto-item{indent_class}\"><a href=\"#{}\" class=\"toc-auto-link\">{}</a></li>\n",
			escape_attribute(&heading.id),
			escape_text(&heading.text)
		));
	}

	html.push_str("</ul>\n</nav>");
	html
}

/// Wraps `toc_html` in `div.toc-auto-container` and places it after the
/// first `h1` (and its `.lead` paragraph), else at the top of `container`.
pub fn insert_toc(doc: &mut Document, container: NodeId, toc_html: &str) {
	if toc_html.is_empty() {
		return;
	}

	let h1 = doc.select_first(container, &TITLE);
	let mut insert_point = match h1 {
		Some(h1) => doc.next_element_sibling(h1),
		None => doc.first_child(container),
	};
	if let Some(point) = insert_point {
		if doc.has_class(point, "lead") {
			insert_point = doc.next_element_sibling(point);
		}
	}

	let wrapper = doc.create_element("div", &[("class", "toc-auto-container")]);
	doc.append_html(wrapper, toc_html);
	match insert_point {
		Some(point) => {
			let parent = doc.parent(point).unwrap_or(container);
			doc.insert_before(parent, wrapper, point);
		}
		None => doc.append_child(container, wrapper),
	}
}

/// Vertical position of a heading on the rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingPosition {
	pub id: String,
	pub offset: f64,
}

/// Picks the TOC entry to highlight for a scroll position.
#[derive(Debug, Clone, Default)]
pub struct ScrollSpy {
	headings: Vec<HeadingPosition>,
}

impl ScrollSpy {
	pub fn new(headings: Vec<HeadingPosition>) -> Self {
		Self { headings }
	}

	/// The last heading whose offset is at or above `scroll_y + SCROLL_OFFSET`.
	pub fn active_heading(&self, scroll_y: f64) -> Option<&str> {
		let line = scroll_y + SCROLL_OFFSET;
		self.headings
			.iter()
			.rev()
			.find(|heading| heading.offset <= line)
			.map(|heading| heading.id.as_str())
	}

	/// Like [`ScrollSpy::active_heading`], but defaults to the first heading
	/// before the reader has scrolled past any.
	pub fn initial_active(&self, scroll_y: f64) -> Option<&str> {
		self.active_heading(scroll_y)
			.or_else(|| self.headings.first().map(|heading| heading.id.as_str()))
	}

	/// One `(href, active)` pair per TOC link; exactly the link pointing at
	/// the active heading is marked.
	pub fn active_link_states<'a>(&self, hrefs: &'a [String], scroll_y: f64) -> Vec<(&'a str, bool)> {
		let active = self.active_heading(scroll_y).map(|id| format!("#{id}"));
		hrefs
			.iter()
			.map(|href| (href.as_str(), active.as_deref() == Some(href.as_str())))
			.collect()
	}
}
