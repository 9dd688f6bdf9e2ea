//! Lenient HTML tokenizer and tree builder.
//!
//! Good enough for generated documentation pages: it never fails, drops
//! comments, keeps raw-text elements verbatim, and applies the implied end
//! tags that matter for content extraction (`p`, `li`, table rows and cells).

use std::sync::LazyLock;

use regex_lite::Regex;

use super::entities::decode_html_entities;
use super::{Document, NodeId, TreeQuery};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(?s)<!--.*?(?:-->|\z)|<![^>]*>|<\?[^>]*>|</([A-Za-z][A-Za-z0-9:-]*)[^>]*>|<([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
		.expect("TOKEN_RE should compile")
});
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).expect("ATTR_RE should compile")
});

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];
/// A newline directly after these start tags is not part of the content.
const DROPS_LEADING_NEWLINE: &[&str] = &["pre", "listing"];
/// Opening any of these closes an open `p`.
const CLOSES_P: &[&str] = &[
	"address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
	"header", "hr", "main", "nav", "ol", "p", "pre", "section", "table", "ul",
];

pub(crate) fn parse_document(html: &str) -> Document {
	let mut builder = TreeBuilder::new();
	let mut pos = 0;

	while pos < html.len() {
		let Some(caps) = TOKEN_RE.captures_at(html, pos) else {
			builder.text(&html[pos..]);
			break;
		};
		let Some(whole) = caps.get(0) else {
			break;
		};

		if whole.start() > pos {
			builder.text(&html[pos..whole.start()]);
		}
		pos = whole.end();

		if let Some(name) = caps.get(1) {
			builder.close(&name.as_str().to_ascii_lowercase());
			continue;
		}

		let Some(name) = caps.get(2) else {
			let token = whole.as_str();
			if token.len() > 9 && token.as_bytes().get(..9).is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"<!doctype")) {
				builder.doc.set_doctype(token.to_string());
			}
			continue;
		};

		let tag = name.as_str().to_ascii_lowercase();
		let raw_attrs = caps.get(3).map(|m| m.as_str()).unwrap_or("");
		let self_closing = raw_attrs.trim_end().ends_with('/');
		let attrs = parse_attributes(raw_attrs);

		let element = builder.open(&tag, attrs);
		if VOID_ELEMENTS.contains(&tag.as_str()) || self_closing {
			continue;
		}

		if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
			let (content, next) = raw_text_until_close(html, pos, &tag);
			let content = if tag == "textarea" { &content[leading_newline_len(content)..] } else { content };
			if !content.is_empty() {
				let content = if tag == "script" || tag == "style" { content.to_string() } else { decode_html_entities(content) };
				let text = builder.doc.create_text(&content);
				builder.doc.append_child(element, text);
			}
			pos = next;
			continue;
		}

		builder.stack.push(element);
		if DROPS_LEADING_NEWLINE.contains(&tag.as_str()) {
			pos += leading_newline_len(&html[pos..]);
		}
	}

	builder.doc
}

/// Byte length of a single newline at the start of `text`, if any.
fn leading_newline_len(text: &str) -> usize {
	if text.starts_with("\r\n") {
		2
	} else if text.starts_with('\n') {
		1
	} else {
		0
	}
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
	let mut attrs: Vec<(String, String)> = Vec::new();
	for caps in ATTR_RE.captures_iter(raw) {
		let name = caps[1].to_ascii_lowercase();
		if name.is_empty() || attrs.iter().any(|(k, _)| *k == name) {
			continue;
		}
		let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)).map(|m| decode_html_entities(m.as_str())).unwrap_or_default();
		attrs.push((name, value));
	}
	attrs
}

/// Returns the raw content and the byte offset just past the end tag.
fn raw_text_until_close<'a>(html: &'a str, from: usize, tag: &str) -> (&'a str, usize) {
	let needle = format!("</{tag}");
	let haystack = html[from..].to_ascii_lowercase();
	match haystack.find(&needle) {
		Some(offset) => {
			let start = from + offset;
			let end = html[start..].find('>').map(|i| start + i + 1).unwrap_or(html.len());
			(&html[from..start], end)
		}
		None => (&html[from..], html.len()),
	}
}

struct TreeBuilder {
	doc: Document,
	stack: Vec<NodeId>,
}

impl TreeBuilder {
	fn new() -> Self {
		let doc = Document::new();
		let root = doc.root();
		Self { doc, stack: vec![root] }
	}

	fn current(&self) -> NodeId {
		self.stack.last().copied().unwrap_or_else(|| self.doc.root())
	}

	fn current_tag(&self) -> Option<&str> {
		self.doc.tag(self.current())
	}

	fn text(&mut self, raw: &str) {
		if raw.is_empty() {
			return;
		}
		let decoded = decode_html_entities(raw);
		let parent = self.current();
		self.doc.push_text(parent, &decoded);
	}

	fn open(&mut self, tag: &str, attrs: Vec<(String, String)>) -> NodeId {
		self.apply_implied_end_tags(tag);

		let element = self.doc.create_element(tag, &[]);
		for (name, value) in &attrs {
			self.doc.set_attribute(element, name, value);
		}
		let parent = self.current();
		self.doc.append_child(parent, element);
		element
	}

	fn apply_implied_end_tags(&mut self, tag: &str) {
		if CLOSES_P.contains(&tag) && self.current_tag() == Some("p") {
			self.stack.pop();
		}

		match tag {
			"li" => self.close_within("li", &["ul", "ol"]),
			"dt" | "dd" => {
				self.close_within("dt", &["dl"]);
				self.close_within("dd", &["dl"]);
			}
			"td" | "th" => {
				self.close_within("td", &["tr", "table"]);
				self.close_within("th", &["tr", "table"]);
			}
			"tr" => self.close_within("tr", &["thead", "tbody", "tfoot", "table"]),
			"thead" | "tbody" | "tfoot" => {
				for section in ["thead", "tbody", "tfoot"] {
					self.close_within(section, &["table"]);
				}
			}
			_ => {}
		}
	}

	/// Pop back through `tag` if it is open below the nearest boundary.
	fn close_within(&mut self, tag: &str, boundaries: &[&str]) {
		for depth in (1..self.stack.len()).rev() {
			let Some(open) = self.doc.tag(self.stack[depth]) else {
				continue;
			};
			if open == tag {
				self.stack.truncate(depth);
				return;
			}
			if boundaries.contains(&open) {
				return;
			}
		}
	}

	fn close(&mut self, tag: &str) {
		for depth in (1..self.stack.len()).rev() {
			if self.doc.tag(self.stack[depth]) == Some(tag) {
				self.stack.truncate(depth);
				return;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::Selector;

	fn tags(doc: &Document) -> Vec<String> {
		doc.descendants(doc.root()).into_iter().filter_map(|id| doc.tag(id).map(String::from)).collect()
	}

	#[test]
	fn builds_nested_elements() {
		let doc = Document::parse("<div class='a b'><p>Hello <em>there</em></p></div>");
		assert_eq!(tags(&doc), vec!["div", "p", "em"]);
		let div = doc.select_first(doc.root(), &Selector::parse("div").unwrap()).unwrap();
		assert_eq!(doc.classes(div), vec!["a", "b"]);
		assert_eq!(doc.text_content(div), "Hello there");
	}

	#[test]
	fn parses_attribute_forms() {
		let doc = Document::parse(r#"<pre data-lang=go class="x" hidden title='a &amp; b'>x</pre>"#);
		let pre = doc.select_first(doc.root(), &Selector::parse("pre").unwrap()).unwrap();
		assert_eq!(doc.attribute(pre, "data-lang"), Some("go"));
		assert_eq!(doc.attribute(pre, "hidden"), Some(""));
		assert_eq!(doc.attribute(pre, "title"), Some("a & b"));
	}

	#[test]
	fn void_and_self_closing_elements_have_no_children() {
		let doc = Document::parse("<p>a<br>b<img src='x.png'/>c</p>");
		let p = doc.select_first(doc.root(), &Selector::parse("p").unwrap()).unwrap();
		assert_eq!(doc.element_children(p).len(), 2);
		assert_eq!(doc.text_content(p), "abc");
	}

	#[test]
	fn implied_end_tags_for_list_items_and_paragraphs() {
		let doc = Document::parse("<ul><li>one<li>two</ul><p>first<p>second");
		let li = Selector::parse("li").unwrap();
		assert_eq!(doc.select_all(doc.root(), &li).len(), 2);
		let p = Selector::parse("p").unwrap();
		let paragraphs = doc.select_all(doc.root(), &p);
		assert_eq!(paragraphs.len(), 2);
		assert_eq!(doc.text_content(paragraphs[0]), "first");
	}

	#[test]
	fn implied_end_tags_for_table_cells() {
		let doc = Document::parse("<table><tr><td>a<td>b<tr><td>c</table>");
		let tr = Selector::parse("tr").unwrap();
		let rows = doc.select_all(doc.root(), &tr);
		assert_eq!(rows.len(), 2);
		assert_eq!(doc.element_children(rows[0]).len(), 2);
	}

	#[test]
	fn script_content_is_raw_text() {
		let doc = Document::parse("<script>if (a < b && c) { x = '</p>'; }</script><p>after</p>");
		let script = doc.select_first(doc.root(), &Selector::parse("script").unwrap()).unwrap();
		assert_eq!(doc.text_content(script), "if (a < b && c) { x = '</p>'; }");
		assert_eq!(tags(&doc), vec!["script", "p"]);
	}

	#[test]
	fn comments_and_doctype_are_dropped() {
		let doc = Document::parse("<!DOCTYPE html><!-- note --><p>x</p>");
		assert_eq!(tags(&doc), vec!["p"]);
		assert_eq!(doc.doctype(), Some("<!DOCTYPE html>"));
	}

	#[test]
	fn non_ascii_comments_are_dropped() {
		let doc = Document::parse("<main><!-- 日本語のコメント --><p>こんにちは</p><!DOCTYPEé></main>");
		assert_eq!(tags(&doc), vec!["main", "p"]);
		let p = doc.select_first(doc.root(), &Selector::parse("p").unwrap()).unwrap();
		assert_eq!(doc.text_content(p), "こんにちは");
	}

	#[test]
	fn newline_after_pre_start_tag_is_dropped() {
		let doc = Document::parse("<pre>\nx := 1\n</pre><pre>\r\n\ny</pre><pre><code>\nz</code></pre>");
		let pre = doc.select_all(doc.root(), &Selector::parse("pre").unwrap());
		assert_eq!(doc.text_content(pre[0]), "x := 1\n");
		assert_eq!(doc.text_content(pre[1]), "\ny");
		assert_eq!(doc.text_content(pre[2]), "\nz");
	}

	#[test]
	fn newline_after_textarea_start_tag_is_dropped() {
		let doc = Document::parse("<textarea>\nvalue</textarea>");
		let textarea = doc.select_first(doc.root(), &Selector::parse("textarea").unwrap()).unwrap();
		assert_eq!(doc.text_content(textarea), "value");
	}

	#[test]
	fn stray_end_tags_are_ignored() {
		let doc = Document::parse("<div></span>text</b></div>");
		let div = doc.select_first(doc.root(), &Selector::parse("div").unwrap()).unwrap();
		assert_eq!(doc.text_content(div), "text");
	}

	#[test]
	fn code_whitespace_survives() {
		let doc = Document::parse("<pre><code>fn main() {\n    println!(\"&lt;hi&gt;\");\n}\n</code></pre>");
		let code = doc.select_first(doc.root(), &Selector::parse("code").unwrap()).unwrap();
		assert_eq!(doc.text_content(code), "fn main() {\n    println!(\"<hi>\");\n}\n");
	}

	#[test]
	fn unterminated_markup_does_not_panic() {
		let doc = Document::parse("<main><h1>Broken<h1><p>Still readable");
		let main = doc.select_first(doc.root(), &Selector::parse("main").unwrap()).unwrap();
		assert!(doc.text_content(main).contains("Still readable"));
	}
}
