//! Selector and threshold configuration loaded from `page.json`.
//!
//! The embedded defaults describe the documentation theme the tools were
//! written for. A user file only needs the keys it wants to change: its
//! top-level keys replace the defaults key by key.

use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PageCopyError, Result};

static DEFAULTS: LazyLock<Value> = LazyLock::new(|| serde_json::from_str(include_str!("../page.json")).expect("embedded page.json should parse"));

/// Everything the extractor and the page enhancements look up by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
	/// Candidate selectors for the page title, most specific first.
	pub title_selectors: Vec<String>,
	/// Selector for the meta element carrying the page description.
	pub description_selector: String,
	/// Candidate selectors for the main content container, first match wins.
	pub content_selectors: Vec<String>,
	/// Regions whose elements never produce content blocks.
	pub excluded_regions: Vec<String>,
	/// Class names marking callout / admonition boxes.
	pub alert_classes: Vec<String>,
	/// Hosts (and their subdomains) treated as internal by link marking.
	pub internal_domains: Vec<String>,
	pub link_scope: String,
	pub link_skip_classes: Vec<String>,
	pub link_skip_regions: Vec<String>,
	pub toc_scope: String,
	pub toc_headings: String,
	/// Pages must have strictly more words than this to get an auto TOC.
	pub toc_word_threshold: usize,
}

impl Default for PageConfig {
	fn default() -> Self {
		serde_json::from_value(DEFAULTS.clone()).expect("embedded page.json should match PageConfig")
	}
}

impl PageConfig {
	/// Parses an override document and layers it over the defaults.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let overlay: Value = serde_json::from_str(json)?;
		let Value::Object(overlay) = overlay else {
			return Err(PageCopyError::InvalidConfig("top-level value must be an object".to_string()));
		};

		let mut merged = DEFAULTS.clone();
		if let Value::Object(base) = &mut merged {
			for (key, value) in overlay {
				if !base.contains_key(&key) {
					tracing::warn!(target = "pagecopy.config", %key, "ignoring unknown configuration key");
					continue;
				}
				base.insert(key, value);
			}
		}

		Ok(serde_json::from_value(merged)?)
	}

	/// Reads an override file from disk.
	pub fn from_path(path: &Path) -> Result<Self> {
		let json = std::fs::read_to_string(path).map_err(|source| PageCopyError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::debug!(target = "pagecopy.config", path = %path.display(), "loaded configuration override");
		Self::from_json_str(&json)
	}
}
