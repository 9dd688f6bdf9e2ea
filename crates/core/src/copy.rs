//! Copy-page orchestration: extract once, render once, copy, notify.

use tracing::info;

use crate::clipboard::{ClipboardSink, copy_to_clipboard};
use crate::config::PageConfig;
use crate::dom::TreeQuery;
use crate::error::Result;
use crate::extract::Extractor;
use crate::notify::{Notifier, Toast};
use crate::render::{Format, render};
use crate::types::PageContent;

/// Entry point for copy requests, built once per configuration.
#[derive(Debug, Clone, Default)]
pub struct CopyPage {
	extractor: Extractor,
}

impl CopyPage {
	pub fn new(config: &PageConfig) -> Result<Self> {
		Ok(Self {
			extractor: Extractor::new(config)?,
		})
	}

	pub fn extractor(&self) -> &Extractor {
		&self.extractor
	}

	pub fn extract<T: TreeQuery>(&self, tree: &T) -> PageContent {
		self.extractor.extract(tree)
	}

	pub fn render<T: TreeQuery>(&self, tree: &T, format: Format) -> String {
		render(&self.extract(tree), format)
	}

	/// Copies the page in `format` and shows the outcome through `notifier`.
	pub async fn copy_page<T: TreeQuery>(
		&self,
		tree: &T,
		format: Format,
		primary: Option<&dyn ClipboardSink>,
		fallback: &dyn ClipboardSink,
		notifier: &dyn Notifier,
	) -> bool {
		let text = self.render(tree, format);
		let copied = copy_to_clipboard(&text, primary, fallback).await;
		info!(target = "pagecopy.copy", %format, copied, chars = text.chars().count(), "copy request finished");
		notifier.show(&Toast::for_result(copied, format));
		copied
	}
}
