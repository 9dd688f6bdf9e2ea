//! The small CSS selector subset the page configuration uses.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`
//! (value bare or quoted), compounds of those, the descendant combinator,
//! and comma-separated selector lists.

use std::fmt;
use std::str::FromStr;

use super::{NodeId, TreeQuery};
use crate::error::PageCopyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
	source: String,
	alternatives: Vec<Vec<Compound>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
	tag: Option<String>,
	id: Option<String>,
	classes: Vec<String>,
	attrs: Vec<AttrTest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrTest {
	name: String,
	value: Option<String>,
}

impl Selector {
	pub fn parse(input: &str) -> Result<Self, PageCopyError> {
		let fail = |reason: &str| PageCopyError::Selector {
			selector: input.to_string(),
			reason: reason.to_string(),
		};

		let mut alternatives = Vec::new();
		for group in split_outside_brackets(input, |c| c == ',') {
			let compounds = split_outside_brackets(group, char::is_whitespace)
				.into_iter()
				.filter(|part| !part.is_empty())
				.map(parse_compound)
				.collect::<Result<Vec<_>, _>>()
				.map_err(|reason| fail(&reason))?;
			if compounds.is_empty() {
				return Err(fail("empty selector"));
			}
			alternatives.push(compounds);
		}

		Ok(Self {
			source: input.trim().to_string(),
			alternatives,
		})
	}

	pub fn as_str(&self) -> &str {
		&self.source
	}

	pub fn matches<T: TreeQuery + ?Sized>(&self, tree: &T, id: NodeId) -> bool {
		self.alternatives.iter().any(|compounds| matches_descendant_chain(tree, id, compounds))
	}
}

impl FromStr for Selector {
	type Err = PageCopyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.source)
	}
}

fn matches_descendant_chain<T: TreeQuery + ?Sized>(tree: &T, id: NodeId, compounds: &[Compound]) -> bool {
	let Some((last, ancestors)) = compounds.split_last() else {
		return false;
	};
	if !last.matches(tree, id) {
		return false;
	}

	let mut current = tree.parent(id);
	for compound in ancestors.iter().rev() {
		loop {
			let Some(node) = current else {
				return false;
			};
			current = tree.parent(node);
			if compound.matches(tree, node) {
				break;
			}
		}
	}
	true
}

impl Compound {
	fn matches<T: TreeQuery + ?Sized>(&self, tree: &T, id: NodeId) -> bool {
		let Some(tag) = tree.tag(id) else {
			return false;
		};
		if self.tag.as_deref().is_some_and(|want| want != tag) {
			return false;
		}
		if let Some(want) = &self.id {
			if tree.attribute(id, "id") != Some(want.as_str()) {
				return false;
			}
		}
		if !self.classes.is_empty() {
			let classes = tree.classes(id);
			if !self.classes.iter().all(|c| classes.contains(&c.as_str())) {
				return false;
			}
		}
		self.attrs.iter().all(|test| match (tree.attribute(id, &test.name), &test.value) {
			(Some(actual), Some(want)) => actual == want,
			(Some(_), None) => true,
			(None, _) => false,
		})
	}
}

/// Split on `is_sep` while ignoring separators inside `[...]` or quotes.
fn split_outside_brackets(input: &str, is_sep: impl Fn(char) -> bool) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut depth = 0usize;
	let mut quote: Option<char> = None;
	let mut start = 0;

	for (i, c) in input.char_indices() {
		match (quote, c) {
			(Some(q), _) if c == q => quote = None,
			(Some(_), _) => {}
			(None, '"' | '\'') => quote = Some(c),
			(None, '[') => depth += 1,
			(None, ']') => depth = depth.saturating_sub(1),
			(None, _) if depth == 0 && is_sep(c) => {
				parts.push(input[start..i].trim());
				start = i + c.len_utf8();
			}
			_ => {}
		}
	}
	parts.push(input[start..].trim());
	parts
}

fn is_ident_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> Result<String, String> {
	let start = *pos;
	while *pos < chars.len() && is_ident_char(chars[*pos]) {
		*pos += 1;
	}
	if *pos == start {
		return Err(format!("expected a name at offset {start}"));
	}
	Ok(chars[start..*pos].iter().collect())
}

fn parse_compound(part: &str) -> Result<Compound, String> {
	let chars: Vec<char> = part.chars().collect();
	let mut pos = 0;
	let mut compound = Compound::default();

	if chars.first() == Some(&'*') {
		pos = 1;
	} else if chars.first().is_some_and(|c| c.is_ascii_alphabetic()) {
		compound.tag = Some(take_ident(&chars, &mut pos)?.to_ascii_lowercase());
	}

	while pos < chars.len() {
		match chars[pos] {
			'#' => {
				pos += 1;
				compound.id = Some(take_ident(&chars, &mut pos)?);
			}
			'.' => {
				pos += 1;
				compound.classes.push(take_ident(&chars, &mut pos)?);
			}
			'[' => {
				pos += 1;
				compound.attrs.push(parse_attr_test(&chars, &mut pos)?);
			}
			other => return Err(format!("unsupported character `{other}`")),
		}
	}

	Ok(compound)
}

fn parse_attr_test(chars: &[char], pos: &mut usize) -> Result<AttrTest, String> {
	let name = take_ident(chars, pos)?.to_ascii_lowercase();
	let value = match chars.get(*pos) {
		Some(']') => None,
		Some('=') => {
			*pos += 1;
			Some(parse_attr_value(chars, pos)?)
		}
		_ => return Err("malformed attribute test".to_string()),
	};
	if chars.get(*pos) != Some(&']') {
		return Err("unterminated attribute test".to_string());
	}
	*pos += 1;
	Ok(AttrTest { name, value })
}

fn parse_attr_value(chars: &[char], pos: &mut usize) -> Result<String, String> {
	match chars.get(*pos) {
		Some(&q) if q == '"' || q == '\'' => {
			let start = *pos + 1;
			let end = chars[start..].iter().position(|&c| c == q).map(|i| start + i).ok_or("unterminated quoted value")?;
			*pos = end + 1;
			Ok(chars[start..end].iter().collect())
		}
		_ => take_ident(chars, pos),
	}
}
