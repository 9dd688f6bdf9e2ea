//! HTML serialization for enhanced documents.

use super::entities::{escape_attribute, escape_text};
use super::{Document, NodeData, NodeId, TreeQuery};

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

pub(super) fn document_html(doc: &Document) -> String {
	let mut out = String::new();
	if let Some(doctype) = doc.doctype() {
		out.push_str(doctype);
		out.push('\n');
	}
	for &child in doc.children(doc.root()) {
		write_node(doc, child, false, &mut out);
	}
	out
}

pub(super) fn inner_html(doc: &Document, id: NodeId) -> String {
	let raw = matches!(doc.tag(id), Some("script" | "style"));
	let mut out = String::new();
	for &child in doc.children(id) {
		write_node(doc, child, raw, &mut out);
	}
	out
}

fn write_node(doc: &Document, id: NodeId, raw_text: bool, out: &mut String) {
	match doc.data(id) {
		NodeData::Document => {}
		NodeData::Text(text) if raw_text => out.push_str(text),
		NodeData::Text(text) => out.push_str(&escape_text(text)),
		NodeData::Element { tag, attrs } => {
			out.push('<');
			out.push_str(tag);
			for (name, value) in attrs {
				out.push(' ');
				out.push_str(name);
				out.push_str("=\"");
				out.push_str(&escape_attribute(value));
				out.push('"');
			}
			out.push('>');
			if VOID_ELEMENTS.contains(&tag.as_str()) {
				return;
			}
			let inner = inner_html(doc, id);
			// The parser drops one newline after these start tags.
			if matches!(tag.as_str(), "pre" | "listing" | "textarea") && inner.starts_with('\n') {
				out.push('\n');
			}
			out.push_str(&inner);
			out.push_str("</");
			out.push_str(tag);
			out.push('>');
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::dom::Document;

	#[test]
	fn round_trips_simple_markup() {
		let html = r#"<div class="td-content"><h1>Title</h1><p>a &amp; b<br></p></div>"#;
		assert_eq!(Document::parse(html).to_html(), html);
	}

	#[test]
	fn keeps_doctype_and_script_text() {
		let doc = Document::parse("<!DOCTYPE html><html><body><script>if (a < b) {}</script></body></html>");
		assert_eq!(doc.to_html(), "<!DOCTYPE html>\n<html><body><script>if (a < b) {}</script></body></html>");
	}

	#[test]
	fn pre_leading_newline_survives_reparse() {
		let doc = Document::parse("<pre>\n\nx := 1</pre>");
		let html = doc.to_html();
		assert_eq!(html, "<pre>\n\nx := 1</pre>");
		assert_eq!(Document::parse(&html).to_html(), html);
	}

	#[test]
	fn escapes_attribute_values() {
		let mut doc = Document::new();
		let root = crate::dom::TreeQuery::root(&doc);
		let a = doc.create_element("a", &[("title", "say \"hi\"")]);
		doc.append_child(root, a);
		assert_eq!(doc.to_html(), r#"<a title="say &quot;hi&quot;"></a>"#);
	}
}
