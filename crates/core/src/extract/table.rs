//! Table rendering as a Markdown pipe table.

use std::sync::LazyLock;

use crate::dom::{NodeId, Selector, TreeQuery};

static HEADER_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("thead tr").expect("HEADER_ROW should parse"));

pub(super) fn render_table(tree: &dyn TreeQuery, table: NodeId) -> String {
	let mut rows = Vec::new();

	if let Some(header) = tree.select_first(table, &HEADER_ROW) {
		let headers = row_cells(tree, header);
		rows.push(pipe_row(&headers));
		rows.push(pipe_row(&vec!["---".to_string(); headers.len()]));
	}

	for row in body_rows(tree, table) {
		rows.push(pipe_row(&row_cells(tree, row)));
	}

	rows.join("\n")
}

/// Rows under this table's `tbody`, plus rows placed directly in the table
/// (where a browser would have implied the `tbody`).
fn body_rows(tree: &dyn TreeQuery, table: NodeId) -> Vec<NodeId> {
	let mut rows = Vec::new();
	for child in tree.element_children(table) {
		match tree.tag(child) {
			Some("tr") => rows.push(child),
			Some("tbody") => rows.extend(tree.element_children(child).into_iter().filter(|&row| tree.has_tag(row, "tr"))),
			_ => {}
		}
	}
	rows
}

fn row_cells(tree: &dyn TreeQuery, row: NodeId) -> Vec<String> {
	tree.descendants(row)
		.into_iter()
		.filter(|&cell| matches!(tree.tag(cell), Some("td" | "th")))
		.map(|cell| tree.text_content(cell).trim().to_string())
		.collect()
}

fn pipe_row(cells: &[String]) -> String {
	format!("| {} |", cells.join(" | "))
}
