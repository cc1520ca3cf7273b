//! Output formats behind one trait.

pub mod json;
pub mod markdown;

use crate::config::{Config, OutputFormat};
use crate::model::Document;

/// Renders a parsed [`Document`] into one output format. Renderers only
/// read the document.
pub trait Renderer {
    fn render(&self, doc: &Document, config: &Config) -> String;
    fn file_extension(&self) -> &str;
}

/// Create the renderer for a configured format.
pub fn create_renderer(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Markdown => Box::new(markdown::MarkdownRenderer),
        OutputFormat::Json => Box::new(json::JsonRenderer),
    }
}
