//! Build-time search index for the site's client-side search.
//!
//! Every `.html` and `.md` file under the content directory becomes one
//! [`PageIndex`] entry. Markdown pages carry `+++`-delimited TOML front matter
//! supplying the title, tags and an optional explicit URL.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::dom::decode_html_entities;
use crate::error::{PageCopyError, Result};

/// Where the site expects the index, relative to the project root.
pub const DEFAULT_DEST: &str = "static/js/pindex.json";

const FRONT_MATTER_DELIMITER: &str = "+++";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG_RE should compile"));
static PUNCTUATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]|_").expect("PUNCTUATION_RE should compile"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RE should compile"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIndex {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	pub href: String,
	pub content: String,
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
	title: Option<String>,
	tags: Option<Vec<String>>,
	url: Option<String>,
}

/// Indexes every page under `content_dir`, in path order.
pub fn build_index(content_dir: &Path) -> Result<Vec<PageIndex>> {
	let mut files = Vec::new();
	collect_files(content_dir, &mut files)?;
	files.sort();

	let mut pages = Vec::with_capacity(files.len());
	for path in &files {
		if let Some(page) = index_file(content_dir, path)? {
			pages.push(page);
		}
	}

	info!(target = "pagecopy.index", root = %content_dir.display(), pages = pages.len(), "built search index");
	Ok(pages)
}

/// Serializes `pages` as compact JSON, creating parent directories.
pub fn write_index(pages: &[PageIndex], dest: &Path) -> Result<()> {
	let json = serde_json::to_string(pages)?;
	if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).map_err(|source| PageCopyError::Io {
			path: parent.to_path_buf(),
			source,
		})?;
	}
	fs::write(dest, json).map_err(|source| PageCopyError::Io {
		path: dest.to_path_buf(),
		source,
	})
}

/// Indexes one file. Files that are neither HTML nor Markdown are skipped.
pub fn index_file(root: &Path, path: &Path) -> Result<Option<PageIndex>> {
	let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
	if extension != "html" && extension != "md" {
		debug!(target = "pagecopy.index", path = %path.display(), "skipping non-page file");
		return Ok(None);
	}

	let raw = fs::read_to_string(path).map_err(|source| PageCopyError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let relative = site_path(root, path);
	debug!(target = "pagecopy.index", path = %relative, "indexing page");

	let page = if extension == "html" {
		index_html(path, relative, &raw)
	} else {
		index_markdown(path, &relative, &raw)
	};
	Ok(Some(page))
}

fn index_html(path: &Path, href: String, raw: &str) -> PageIndex {
	PageIndex {
		title: path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string),
		tags: None,
		href,
		content: plain_content(raw),
	}
}

fn index_markdown(path: &Path, relative: &str, raw: &str) -> PageIndex {
	let mut sections = raw.splitn(3, FRONT_MATTER_DELIMITER);
	let _before = sections.next();
	let front = sections.next();
	let body = sections.next();

	let front_matter = match (front, body) {
		(Some(front), Some(_)) => match parse_front_matter(path, front) {
			Ok(front_matter) => front_matter,
			Err(err) => {
				error!(target = "pagecopy.index", error = %err, "front matter did not parse");
				FrontMatter::default()
			}
		},
		_ => {
			error!(target = "pagecopy.index", path = %path.display(), "missing +++ front matter");
			FrontMatter::default()
		}
	};

	let href = front_matter
		.url
		.unwrap_or_else(|| format!("{}.html", relative.strip_suffix(".md").unwrap_or(relative)));

	PageIndex {
		title: front_matter.title,
		tags: front_matter.tags,
		href,
		content: plain_content(body.unwrap_or(raw)),
	}
}

fn parse_front_matter(path: &Path, front: &str) -> Result<FrontMatter> {
	toml::from_str(front.trim()).map_err(|source| PageCopyError::FrontMatter {
		path: path.to_path_buf(),
		source,
	})
}

/// Trimmed text with tags and punctuation removed and whitespace collapsed.
fn plain_content(raw: &str) -> String {
	let text = TAG_RE.replace_all(raw.trim(), "");
	let text = decode_html_entities(&text);
	let text = PUNCTUATION_RE.replace_all(&text, "");
	WHITESPACE_RE.replace_all(&text, " ").into_owned()
}

/// `/`-separated path below `root`, with a leading slash.
fn site_path(root: &Path, path: &Path) -> String {
	let relative = path.strip_prefix(root).unwrap_or(path);
	let parts: Vec<_> = relative.components().map(|c| c.as_os_str().to_string_lossy()).collect();
	format!("/{}", parts.join("/"))
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
	let entries = fs::read_dir(dir).map_err(|source| PageCopyError::Io {
		path: dir.to_path_buf(),
		source,
	})?;
	for entry in entries {
		let entry = entry.map_err(|source| PageCopyError::Io {
			path: dir.to_path_buf(),
			source,
		})?;
		let path = entry.path();
		if path.is_dir() {
			collect_files(&path, out)?;
		} else {
			out.push(path);
		}
	}
	Ok(())
}
