//! LLM token estimates for page content.
//!
//! The estimate is `ceil(words * 1.3)`, which tracks English prose mixed with
//! code closely enough for a "this page is about N tokens" badge.

use std::sync::LazyLock;

use tracing::debug;

use crate::dom::{Document, NodeId, Selector, TreeQuery};

pub const TOKENS_PER_WORD: f64 = 1.3;

static WORD_COUNT_HOLDERS: LazyLock<Selector> =
	LazyLock::new(|| Selector::parse("[data-word-count]").expect("WORD_COUNT_HOLDERS should parse"));
static TOKEN_VALUE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".token-value").expect("TOKEN_VALUE should parse"));

pub fn count_words(text: &str) -> usize {
	text.split_whitespace().count()
}

pub fn tokens_for_words(words: usize) -> usize {
	(words as f64 * TOKENS_PER_WORD).ceil() as usize
}

/// `0` for empty or whitespace-only text.
pub fn estimate_tokens(text: &str) -> usize {
	tokens_for_words(count_words(text))
}

/// `1500` → `1.5K`; counts under a thousand are printed as-is. Exact
/// halves round up: `1250` → `1.3K`.
pub fn format_token_count(tokens: usize) -> String {
	if tokens >= 1000 {
		// `{:.1}` rounds exact ties to even; only x250 and x750 are exact ties.
		let tokens = if tokens % 500 == 250 { tokens + 50 } else { tokens };
		format!("{:.1}K", tokens as f64 / 1000.0)
	} else {
		tokens.to_string()
	}
}

pub fn element_token_count(tree: &dyn TreeQuery, element: Option<NodeId>) -> usize {
	element.map_or(0, |id| estimate_tokens(&tree.text_content(id)))
}

/// Fills in token badges from their precomputed `data-word-count`.
///
/// Each holder gets a `data-token-count` attribute, and its first
/// `.token-value` descendant shows the formatted count. Returns the number of
/// holders updated; holders without a leading integer are left untouched.
pub fn update_token_displays(doc: &mut Document) -> usize {
	let holders = doc.select_all(doc.root(), &WORD_COUNT_HOLDERS);
	let mut updated = 0;

	for holder in holders {
		let Some(words) = doc.attribute(holder, "data-word-count").and_then(parse_leading_int) else {
			continue;
		};
		let tokens = tokens_for_words(words);
		doc.set_attribute(holder, "data-token-count", &tokens.to_string());
		if let Some(display) = doc.select_first(holder, &TOKEN_VALUE) {
			doc.set_text_content(display, &format_token_count(tokens));
		}
		updated += 1;
	}

	debug!(target = "pagecopy.tokens", updated, "updated token displays");
	updated
}

/// Integer prefix of an attribute value: `"120 words"` → 120.
fn parse_leading_int(value: &str) -> Option<usize> {
	let value = value.trim_start();
	let digits = value.find(|c: char| !c.is_ascii_digit()).map_or(value, |end| &value[..end]);
	digits.parse().ok()
}
