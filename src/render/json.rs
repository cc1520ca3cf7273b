//! JSON renderer: structured output for tooling.
//!
//! Serializes every block of the document, internal ones included.

use crate::config::Config;
use crate::model::Document;
use crate::render::Renderer;
use tracing::error;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document, _config: &Config) -> String {
        match serde_json::to_string_pretty(doc) {
            Ok(mut out) => {
                out.push('\n');
                out
            }
            Err(err) => {
                error!(%err, "failed to serialize document");
                String::new()
            }
        }
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
