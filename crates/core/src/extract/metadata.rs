//! Page-level metadata: title and description.

use crate::dom::{Selector, TreeQuery};

/// Trimmed text of the first element matched by the candidate selectors,
/// tried in order. Empty when nothing matches.
pub(super) fn extract_title(tree: &dyn TreeQuery, candidates: &[Selector]) -> String {
	candidates
		.iter()
		.find_map(|selector| tree.select_first(tree.root(), selector))
		.map(|heading| tree.text_content(heading).trim().to_string())
		.unwrap_or_default()
}

/// `content` attribute of the description meta element, `None` when absent
/// or empty.
pub(super) fn extract_description(tree: &dyn TreeQuery, selector: &Selector) -> Option<String> {
	let meta = tree.select_first(tree.root(), selector)?;
	tree.attribute(meta, "content").filter(|content| !content.is_empty()).map(str::to_string)
}
