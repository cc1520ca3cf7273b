//! Error types for parsing, tag handling and configuration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal per-file parse failure. The batch driver marks the file FAILED and
/// moves on.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Non-fatal failure of a single tag handler. The engine logs it and keeps
/// scanning at the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("@{tag}: missing {token}")]
    MissingToken { tag: String, token: &'static str },

    #[error("@{tag}: empty content")]
    EmptyContent { tag: String },

    #[error("invalid option specification: {content:?}")]
    InvalidOption { content: String },

    #[error("unknown tag @{tag}")]
    UnknownTag { tag: String },

    #[error("@{tag}: allocation failed")]
    Allocation { tag: String },
}

impl TagError {
    pub(crate) fn missing(tag: &str, token: &'static str) -> Self {
        TagError::MissingToken {
            tag: tag.to_string(),
            token,
        }
    }

    pub(crate) fn empty(tag: &str) -> Self {
        TagError::EmptyContent {
            tag: tag.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid value {value:?} for {key} (expected {expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
pub type TagResult = std::result::Result<(), TagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_error_messages() {
        assert_eq!(
            TagError::missing("arg", "name").to_string(),
            "@arg: missing name"
        );
        assert_eq!(
            TagError::empty("eol").to_string(),
            "@eol: empty content"
        );
    }

    #[test]
    fn config_error_message() {
        let err = ConfigError::InvalidValue {
            key: "format".to_string(),
            value: "pdf".to_string(),
            expected: "markdown, md or json",
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"pdf\" for format (expected markdown, md or json)"
        );
    }
}
