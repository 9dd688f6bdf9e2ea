//! In-memory document tree.
//!
//! [`TreeQuery`] is the read-only capability set the extractor needs: tags,
//! attributes, children, text, and region containment. [`Document`] is the
//! arena-backed implementation built by [`Document::parse`]; it also carries
//! the small mutation API used by the page enhancements.

mod entities;
mod parse;
mod selector;
mod serialize;

pub use selector::Selector;

pub(crate) use entities::{decode_html_entities, escape_attribute, escape_text};

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
	Document,
	Element { tag: String, attrs: Vec<(String, String)> },
	Text(String),
}

#[derive(Debug, Clone)]
struct Node {
	data: NodeData,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

/// Read-only tree access.
///
/// Implementors provide the six primitives; traversal, text flattening and
/// selector matching are derived from them.
pub trait TreeQuery {
	fn root(&self) -> NodeId;
	fn parent(&self, id: NodeId) -> Option<NodeId>;
	fn children(&self, id: NodeId) -> &[NodeId];
	/// Lowercase tag name, `None` for text and document nodes.
	fn tag(&self, id: NodeId) -> Option<&str>;
	fn attribute(&self, id: NodeId, name: &str) -> Option<&str>;
	/// Character data of a text node, `None` for everything else.
	fn text(&self, id: NodeId) -> Option<&str>;

	fn is_element(&self, id: NodeId) -> bool {
		self.tag(id).is_some()
	}

	fn has_tag(&self, id: NodeId, tag: &str) -> bool {
		self.tag(id) == Some(tag)
	}

	fn classes(&self, id: NodeId) -> Vec<&str> {
		self.attribute(id, "class").map(|c| c.split_whitespace().collect()).unwrap_or_default()
	}

	fn has_class(&self, id: NodeId, class: &str) -> bool {
		self.classes(id).contains(&class)
	}

	fn element_children(&self, id: NodeId) -> Vec<NodeId> {
		self.children(id).iter().copied().filter(|&c| self.is_element(c)).collect()
	}

	/// Descendant elements of `id` in document order, excluding `id`.
	fn descendants(&self, id: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
		while let Some(node) = stack.pop() {
			if !self.is_element(node) {
				continue;
			}
			out.push(node);
			stack.extend(self.children(node).iter().rev().copied());
		}
		out
	}

	/// Concatenated character data of every text node under `id`.
	fn text_content(&self, id: NodeId) -> String {
		if let Some(text) = self.text(id) {
			return text.to_string();
		}
		let mut out = String::new();
		let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
		while let Some(node) = stack.pop() {
			match self.text(node) {
				Some(text) => out.push_str(text),
				None => stack.extend(self.children(node).iter().rev().copied()),
			}
		}
		out
	}

	/// Whether `node` is `ancestor` or lies somewhere beneath it.
	fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
		let mut current = Some(node);
		while let Some(id) = current {
			if id == ancestor {
				return true;
			}
			current = self.parent(id);
		}
		false
	}

	fn matches(&self, id: NodeId, selector: &Selector) -> bool {
		selector.matches(self, id)
	}

	/// Nearest inclusive ancestor matching `selector`.
	fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
		let mut current = Some(id);
		while let Some(node) = current {
			if selector.matches(self, node) {
				return Some(node);
			}
			current = self.parent(node);
		}
		None
	}

	fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
		self.descendants(scope).into_iter().find(|&node| selector.matches(self, node))
	}

	fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
		self.descendants(scope).into_iter().filter(|&node| selector.matches(self, node)).collect()
	}
}

/// Arena-backed document.
#[derive(Debug, Clone)]
pub struct Document {
	nodes: Vec<Node>,
	doctype: Option<String>,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// An empty document holding only the root node.
	pub fn new() -> Self {
		Self {
			nodes: vec![Node {
				data: NodeData::Document,
				parent: None,
				children: Vec::new(),
			}],
			doctype: None,
		}
	}

	/// Parse HTML leniently; malformed markup never fails.
	pub fn parse(html: &str) -> Self {
		parse::parse_document(html)
	}

	pub fn data(&self, id: NodeId) -> &NodeData {
		&self.nodes[id.0].data
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes[0].children.is_empty()
	}

	/// Create a detached element. Attach it with [`Document::append_child`]
	/// or [`Document::insert_before`].
	pub fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
		let attrs = attrs.iter().map(|(k, v)| (k.to_ascii_lowercase(), (*v).to_string())).collect();
		self.push_node(NodeData::Element {
			tag: tag.to_ascii_lowercase(),
			attrs,
		})
	}

	pub fn create_text(&mut self, text: &str) -> NodeId {
		self.push_node(NodeData::Text(text.to_string()))
	}

	fn push_node(&mut self, data: NodeData) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node {
			data,
			parent: None,
			children: Vec::new(),
		});
		id
	}

	/// Append character data to `parent`, merging with a trailing text node
	/// so adjacent runs split by dropped comments stay one node.
	pub(crate) fn push_text(&mut self, parent: NodeId, text: &str) {
		if let Some(&last) = self.nodes[parent.0].children.last() {
			if let NodeData::Text(existing) = &mut self.nodes[last.0].data {
				existing.push_str(text);
				return;
			}
		}
		let node = self.create_text(text);
		self.append_child(parent, node);
	}

	fn detach(&mut self, child: NodeId) {
		if let Some(parent) = self.nodes[child.0].parent.take() {
			self.nodes[parent.0].children.retain(|&c| c != child);
		}
	}

	pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
		self.detach(child);
		self.nodes[child.0].parent = Some(parent);
		self.nodes[parent.0].children.push(child);
	}

	/// Insert `child` before `reference`; appends when `reference` is not a
	/// child of `parent`.
	pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
		self.detach(child);
		self.nodes[child.0].parent = Some(parent);
		let siblings = &mut self.nodes[parent.0].children;
		match siblings.iter().position(|&c| c == reference) {
			Some(pos) => siblings.insert(pos, child),
			None => siblings.push(child),
		}
	}

	pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
		if let NodeData::Element { attrs, .. } = &mut self.nodes[id.0].data {
			let name = name.to_ascii_lowercase();
			match attrs.iter_mut().find(|(k, _)| *k == name) {
				Some((_, v)) => *v = value.to_string(),
				None => attrs.push((name, value.to_string())),
			}
		}
	}

	pub fn add_class(&mut self, id: NodeId, class: &str) {
		if self.has_class(id, class) {
			return;
		}
		let updated = match self.attribute(id, "class") {
			Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
			_ => class.to_string(),
		};
		self.set_attribute(id, "class", &updated);
	}

	/// Replace every child of `id` with a single text node.
	pub fn set_text_content(&mut self, id: NodeId, text: &str) {
		for child in std::mem::take(&mut self.nodes[id.0].children) {
			self.nodes[child.0].parent = None;
		}
		let node = self.create_text(text);
		self.append_child(id, node);
	}

	/// Parse `html` as a fragment and append its top-level nodes to `parent`.
	pub fn append_html(&mut self, parent: NodeId, html: &str) {
		let fragment = Document::parse(html);
		for &child in fragment.children(fragment.root()) {
			let copied = self.import_node(&fragment, child);
			self.append_child(parent, copied);
		}
	}

	fn import_node(&mut self, source: &Document, id: NodeId) -> NodeId {
		let copied = self.push_node(source.data(id).clone());
		for &child in source.children(id) {
			let grandchild = self.import_node(source, child);
			self.append_child(copied, grandchild);
		}
		copied
	}

	pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
		let parent = self.parent(id)?;
		let siblings = self.children(parent);
		let pos = siblings.iter().position(|&c| c == id)?;
		siblings[pos + 1..].iter().copied().find(|&c| self.is_element(c))
	}

	pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
		self.children(id).first().copied()
	}

	pub fn to_html(&self) -> String {
		serialize::document_html(self)
	}

	pub fn inner_html(&self, id: NodeId) -> String {
		serialize::inner_html(self, id)
	}

	pub(crate) fn doctype(&self) -> Option<&str> {
		self.doctype.as_deref()
	}

	pub(crate) fn set_doctype(&mut self, doctype: String) {
		self.doctype = Some(doctype);
	}
}

impl TreeQuery for Document {
	fn root(&self) -> NodeId {
		NodeId(0)
	}

	fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.nodes[id.0].parent
	}

	fn children(&self, id: NodeId) -> &[NodeId] {
		&self.nodes[id.0].children
	}

	fn tag(&self, id: NodeId) -> Option<&str> {
		match &self.nodes[id.0].data {
			NodeData::Element { tag, .. } => Some(tag),
			_ => None,
		}
	}

	fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
		match &self.nodes[id.0].data {
			NodeData::Element { attrs, .. } => attrs.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str()),
			_ => None,
		}
	}

	fn text(&self, id: NodeId) -> Option<&str> {
		match &self.nodes[id.0].data {
			NodeData::Text(text) => Some(text),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sel(s: &str) -> Selector {
		Selector::parse(s).unwrap()
	}

	#[test]
	fn text_content_concatenates_in_order() {
		let doc = Document::parse("<div id='a'>one <b>two</b> three<span> four</span></div>");
		let div = doc.select_first(doc.root(), &sel("#a")).unwrap();
		assert_eq!(doc.text_content(div), "one two three four");
	}

	#[test]
	fn descendants_are_preorder_elements() {
		let doc = Document::parse("<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>");
		let tags: Vec<_> = doc.descendants(doc.root()).into_iter().filter_map(|id| doc.tag(id)).collect();
		assert_eq!(tags, vec!["ul", "li", "ul", "li", "li"]);
	}

	#[test]
	fn closest_includes_self_and_ancestors() {
		let doc = Document::parse("<nav class='top'><ul><li id='x'>item</li></ul></nav>");
		let li = doc.select_first(doc.root(), &sel("#x")).unwrap();
		let nav = doc.closest(li, &sel("nav")).unwrap();
		assert_eq!(doc.tag(nav), Some("nav"));
		assert_eq!(doc.closest(li, &sel("li")), Some(li));
		assert!(doc.closest(li, &sel("table")).is_none());
	}

	#[test]
	fn contains_checks_ancestry() {
		let doc = Document::parse("<main><p id='p'>x</p></main><aside id='side'></aside>");
		let main = doc.select_first(doc.root(), &sel("main")).unwrap();
		let p = doc.select_first(doc.root(), &sel("#p")).unwrap();
		let side = doc.select_first(doc.root(), &sel("#side")).unwrap();
		assert!(doc.contains(main, p));
		assert!(!doc.contains(side, p));
	}

	#[test]
	fn add_class_is_idempotent() {
		let mut doc = Document::parse("<a class='x' href='#'>y</a>");
		let a = doc.select_first(doc.root(), &sel("a")).unwrap();
		doc.add_class(a, "external-link");
		doc.add_class(a, "external-link");
		assert_eq!(doc.attribute(a, "class"), Some("x external-link"));
	}

	#[test]
	fn insert_before_and_siblings() {
		let mut doc = Document::parse("<div id='c'><h1>T</h1><p>body</p></div>");
		let container = doc.select_first(doc.root(), &sel("#c")).unwrap();
		let h1 = doc.select_first(container, &sel("h1")).unwrap();
		let p = doc.next_element_sibling(h1).unwrap();
		assert_eq!(doc.tag(p), Some("p"));

		let marker = doc.create_element("hr", &[]);
		doc.insert_before(container, marker, p);
		assert_eq!(doc.next_element_sibling(h1), Some(marker));
	}

	#[test]
	fn set_text_content_replaces_children() {
		let mut doc = Document::parse("<span class='token-value'><b>old</b> text</span>");
		let span = doc.select_first(doc.root(), &sel(".token-value")).unwrap();
		doc.set_text_content(span, "1.5K");
		assert_eq!(doc.text_content(span), "1.5K");
		assert_eq!(doc.element_children(span).len(), 0);
	}
}
