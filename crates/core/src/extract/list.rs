//! List rendering: `- ` / `N. ` lines, two spaces of indent per level.

use crate::dom::{NodeId, TreeQuery};

pub(super) fn is_list(tree: &dyn TreeQuery, id: NodeId) -> bool {
	matches!(tree.tag(id), Some("ul" | "ol"))
}

pub(super) fn render_list(tree: &dyn TreeQuery, list: NodeId, depth: usize) -> String {
	let ordered = tree.has_tag(list, "ol");
	let indent = "  ".repeat(depth);
	let mut lines = Vec::new();
	let mut index = 1;

	for item in tree.element_children(list) {
		if !tree.has_tag(item, "li") {
			continue;
		}

		let marker = if ordered { format!("{index}. ") } else { "- ".to_string() };
		lines.push(format!("{indent}{marker}{}", item_text(tree, item).trim()));
		index += 1;

		// Only the first directly nested list is rendered.
		if let Some(nested) = tree.element_children(item).into_iter().find(|&child| is_list(tree, child)) {
			let rendered = render_list(tree, nested, depth + 1);
			if !rendered.is_empty() {
				lines.push(rendered);
			}
		}
	}

	lines.join("\n")
}

/// Direct text of an item plus the text of its non-list children.
fn item_text(tree: &dyn TreeQuery, item: NodeId) -> String {
	let mut text = String::new();
	for &child in tree.children(item) {
		match tree.tag(child) {
			None => text.push_str(tree.text(child).unwrap_or_default()),
			Some("ul" | "ol") => {}
			Some(_) => text.push_str(&tree.text_content(child)),
		}
	}
	text
}
