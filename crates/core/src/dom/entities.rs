//! Entity decoding for parsed text and escaping for serialized output.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});").expect("ENTITY_RE should compile"));

fn named_entity(name: &str) -> Option<&'static str> {
	Some(match name {
		"amp" => "&",
		"lt" => "<",
		"gt" => ">",
		"quot" => "\"",
		"apos" => "'",
		"nbsp" => "\u{a0}",
		"copy" => "\u{a9}",
		"reg" => "\u{ae}",
		"trade" => "\u{2122}",
		"hellip" => "\u{2026}",
		"mdash" => "\u{2014}",
		"ndash" => "\u{2013}",
		"lsquo" => "\u{2018}",
		"rsquo" => "\u{2019}",
		"ldquo" => "\u{201c}",
		"rdquo" => "\u{201d}",
		"laquo" => "\u{ab}",
		"raquo" => "\u{bb}",
		"middot" => "\u{b7}",
		"bull" => "\u{2022}",
		"rarr" => "\u{2192}",
		"larr" => "\u{2190}",
		"times" => "\u{d7}",
		_ => return None,
	})
}

/// Decode named and numeric character references. Unknown references are
/// left untouched.
pub(crate) fn decode_html_entities(s: &str) -> String {
	if !s.contains('&') {
		return s.to_string();
	}

	ENTITY_RE
		.replace_all(s, |caps: &Captures| {
			let body = &caps[1];
			let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
				u32::from_str_radix(hex, 16).ok().and_then(char::from_u32).map(String::from)
			} else if let Some(dec) = body.strip_prefix('#') {
				dec.parse::<u32>().ok().and_then(char::from_u32).map(String::from)
			} else {
				named_entity(body).map(String::from)
			};
			decoded.unwrap_or_else(|| caps[0].to_string())
		})
		.into_owned()
}

pub(crate) fn escape_text(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'\u{a0}' => out.push_str("&nbsp;"),
			_ => out.push(c),
		}
	}
	out
}

pub(crate) fn escape_attribute(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'"' => out.push_str("&quot;"),
			'\u{a0}' => out.push_str("&nbsp;"),
			_ => out.push(c),
		}
	}
	out
}
