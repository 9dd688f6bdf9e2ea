mod copy;
mod enhance;
mod extract;
mod index;
mod render;
mod toc;
mod tokens;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use pagecopy::{Document, PageConfig};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::error::Result;

pub async fn dispatch(cli: Cli) -> Result<()> {
	let config = load_config(cli.config.as_deref())?;
	let format = cli.format;

	match cli.command {
		Commands::Copy {
			file,
			text_format,
			fallback_file,
		} => copy::execute(&file, text_format, fallback_file.as_deref(), &config, format).await,
		Commands::Extract { file } => extract::execute(&file, &config, format),
		Commands::Render { file, text_format } => render::execute(&file, text_format, &config, format),
		Commands::Tokens { file } => tokens::execute(&file, &config, format),
		Commands::Toc { file } => toc::execute(&file, &config, format),
		Commands::Enhance { file, output } => enhance::execute(&file, output.as_deref(), &config, format),
		Commands::Index { content_dir, output } => index::execute(&content_dir, &output, format),
	}
}

fn load_config(path: Option<&Path>) -> Result<PageConfig> {
	match path {
		Some(path) => Ok(PageConfig::from_path(path)?),
		None => Ok(PageConfig::default()),
	}
}

/// Parses the page at `path`; `-` reads stdin.
fn read_document(path: &Path) -> Result<Document> {
	let html = if path == Path::new("-") {
		let mut html = String::new();
		std::io::stdin().read_to_string(&mut html).context("failed to read page from stdin")?;
		html
	} else {
		std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
	};
	debug!(target = "pagecopy", path = %path.display(), bytes = html.len(), "read page");
	Ok(Document::parse(&html))
}
