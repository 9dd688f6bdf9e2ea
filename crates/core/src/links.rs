//! External-link marking.
//!
//! Links leaving the site get the `external-link` class, open in a new tab
//! with `rel="noopener"`, and carry a trailing `↗` icon.

use std::sync::LazyLock;

use tracing::debug;
use url::Url;

use crate::config::PageConfig;
use crate::dom::{Document, NodeId, Selector, TreeQuery};
use crate::error::Result;

pub const EXTERNAL_LINK_CLASS: &str = "external-link";
pub const ICON_CLASS: &str = "external-link-icon";
const ICON: &str = "\u{2197}";

static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("ANCHORS should parse"));
static ICONS: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".external-link-icon").expect("ICONS should parse"));

/// Whether `href` points off-site.
///
/// Fragments, `javascript:`, `mailto:`, `tel:` and every relative form are
/// internal. Absolute `http(s)` and protocol-relative URLs are external unless
/// their host is one of `internal_domains` or a subdomain of one. Unparseable
/// URLs count as internal.
pub fn is_external_link(href: &str, internal_domains: &[String]) -> bool {
	if href.is_empty() || href.starts_with('#') {
		return false;
	}
	if ["javascript:", "mailto:", "tel:"].iter().any(|scheme| href.starts_with(scheme)) {
		return false;
	}

	let parsed = if href.starts_with("//") {
		Url::parse(&format!("https:{href}"))
	} else if href.starts_with("http://") || href.starts_with("https://") {
		Url::parse(href)
	} else {
		return false;
	};

	let Ok(url) = parsed else {
		return false;
	};
	let Some(host) = url.host_str() else {
		return false;
	};

	let host = host.to_ascii_lowercase();
	!internal_domains
		.iter()
		.any(|domain| host == *domain || host.strip_suffix(domain.as_str()).is_some_and(|rest| rest.ends_with('.')))
}

/// Marks external anchors inside the configured content area.
#[derive(Debug, Clone)]
pub struct LinkMarker {
	scope: Selector,
	skip_classes: Vec<String>,
	skip_regions: Vec<Selector>,
	internal_domains: Vec<String>,
}

impl Default for LinkMarker {
	fn default() -> Self {
		Self::new(&PageConfig::default()).expect("default page config selectors should parse")
	}
}

impl LinkMarker {
	pub fn new(config: &PageConfig) -> Result<Self> {
		Ok(Self {
			scope: Selector::parse(&config.link_scope)?,
			skip_classes: config.link_skip_classes.clone(),
			skip_regions: config.link_skip_regions.iter().map(|s| Selector::parse(s)).collect::<Result<_>>()?,
			internal_domains: config.internal_domains.iter().map(|d| d.to_ascii_lowercase()).collect(),
		})
	}

	pub fn is_external(&self, href: &str) -> bool {
		is_external_link(href, &self.internal_domains)
	}

	/// Anchors already marked, navigation links, buttons, and anchors inside
	/// navigation regions are left alone.
	pub fn should_process_anchor(&self, tree: &dyn TreeQuery, anchor: NodeId) -> bool {
		if tree.has_class(anchor, EXTERNAL_LINK_CLASS) {
			return false;
		}
		if self.skip_classes.iter().any(|class| tree.has_class(anchor, class)) {
			return false;
		}
		!self.skip_regions.iter().any(|region| tree.closest(anchor, region).is_some())
	}

	/// Marks every qualifying anchor and returns how many were marked.
	pub fn process_links(&self, doc: &mut Document) -> usize {
		let Some(content) = doc.select_first(doc.root(), &self.scope) else {
			return 0;
		};

		let mut marked = 0;
		for anchor in doc.select_all(content, &ANCHORS) {
			let external = doc.attribute(anchor, "href").is_some_and(|href| self.is_external(href));
			if external && self.should_process_anchor(doc, anchor) {
				mark_as_external(doc, anchor);
				marked += 1;
			}
		}

		debug!(target = "pagecopy.links", marked, "marked external links");
		marked
	}
}

pub fn mark_as_external(doc: &mut Document, anchor: NodeId) {
	doc.add_class(anchor, EXTERNAL_LINK_CLASS);
	doc.set_attribute(anchor, "target", "_blank");
	doc.set_attribute(anchor, "rel", "noopener");

	if doc.select_first(anchor, &ICONS).is_none() {
		let icon = doc.create_element("span", &[("class", ICON_CLASS), ("aria-hidden", "true")]);
		let arrow = doc.create_text(ICON);
		doc.append_child(icon, arrow);
		doc.append_child(anchor, icon);
	}
}
