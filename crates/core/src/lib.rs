//! Page-content tools for a static documentation site.
//!
//! The core is a two-stage pipeline: an [`Extractor`] classifies the
//! elements of a page's content container into [`ContentBlock`]s, and the
//! pure renderers [`to_markdown`] / [`to_plain_text`] turn the resulting
//! [`PageContent`] into text ready to paste into an LLM conversation.
//! [`CopyPage`] ties the pipeline to a clipboard with fallback and a
//! notification surface.
//!
//! Alongside it live the page enhancements that operate on the same
//! [`dom::Document`]: token estimates ([`tokens`]), an auto-generated table
//! of contents ([`toc`]), external-link marking ([`links`]), and the
//! build-time search index ([`search_index`]).

pub mod clipboard;
pub mod config;
pub mod copy;
pub mod dom;
pub mod error;
pub mod extract;
pub mod links;
pub mod notify;
pub mod render;
pub mod search_index;
pub mod toc;
pub mod tokens;
pub mod types;

pub use clipboard::{ClipboardError, ClipboardSink, copy_to_clipboard};
pub use config::PageConfig;
pub use copy::CopyPage;
pub use dom::{Document, NodeId, Selector, TreeQuery};
pub use error::{PageCopyError, Result};
pub use extract::Extractor;
pub use notify::{Notifier, Outcome, Toast};
pub use render::{Format, render, to_markdown, to_plain_text};
pub use types::{BlockKind, ContentBlock, PageContent};

#[cfg(test)]
mod proptests;
