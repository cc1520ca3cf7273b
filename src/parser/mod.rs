//! Doc-comment parser for shell scripts.
//!
//! [`classify`] labels lines, [`tag`] splits tag lines, [`cursor`] collects
//! continuation lines, [`handlers`] apply tags to blocks and [`engine`] drives
//! it all line by line.

pub mod classify;
pub mod cursor;
pub mod engine;
pub mod handlers;
pub mod tag;

pub use engine::{ParseOptions, Parser, DEFAULT_MAX_BLOCKS};

use crate::error::ParseResult;
use crate::model::Document;
use std::path::Path;

/// Parse a script on disk with default options.
pub fn parse_file(path: &Path) -> ParseResult<Document> {
    Parser::default().parse_file(path)
}

/// Parse in-memory script text with default options.
pub fn parse_str(text: &str, file_name: &str) -> ParseResult<Document> {
    Parser::default().parse_str(text, file_name)
}
