//! Documentation from tagged comments in shell scripts.
//!
//! The [`parser`] turns a script into a [`Document`]: block 0 carries
//! file-level metadata, every later block documents one function. The
//! [`render`] module turns a document into markdown or JSON.

pub mod config;
pub mod discover;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod toc;

pub use config::Config;
pub use error::{ConfigError, ParseError, TagError};
pub use model::{BlockView, DocBlock, Document};
pub use parser::{ParseOptions, Parser};
