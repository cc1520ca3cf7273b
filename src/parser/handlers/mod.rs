//! Tag handlers and the name → handler registry.
//!
//! Every handler has the same shape: it receives the target block, the tag
//! name it was dispatched under (aliases share a handler) and the content,
//! already extended by continuation lines when the tag collects them.

pub mod alert;
pub mod annotation;
pub mod deprecation;
pub mod io;
pub mod metadata;
pub mod option;
pub mod reference;
pub mod section;
pub mod shellcheck;
pub mod signature;
pub mod variable;

use super::cursor::Continuation;
use crate::error::{TagError, TagResult};
use crate::model::DocBlock;
use std::collections::HashMap;

pub type Handler = fn(&mut DocBlock, &str, &str) -> TagResult;

#[derive(Clone, Copy)]
pub struct TagEntry {
    pub handler: Handler,
    pub continuation: Continuation,
}

/// Mapping from tag name to handler, built once per parser.
pub struct TagRegistry {
    entries: HashMap<&'static str, TagEntry>,
}

impl TagRegistry {
    /// Registry with every built-in tag family.
    pub fn new() -> Self {
        let mut registry = TagRegistry {
            entries: HashMap::new(),
        };
        metadata::register(&mut registry);
        signature::register(&mut registry);
        option::register(&mut registry);
        variable::register(&mut registry);
        reference::register(&mut registry);
        alert::register(&mut registry);
        deprecation::register(&mut registry);
        section::register(&mut registry);
        annotation::register(&mut registry);
        io::register(&mut registry);
        registry
    }

    /// Bind `names` to one handler. Later registrations win.
    pub fn register(&mut self, names: &[&'static str], handler: Handler, continuation: Continuation) {
        for &name in names {
            self.entries.insert(
                name,
                TagEntry {
                    handler,
                    continuation,
                },
            );
        }
    }

    pub fn get(&self, tag: &str) -> Option<&TagEntry> {
        self.entries.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Run the handler for `tag` on `content` as-is.
    pub fn dispatch(&self, block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
        match self.entries.get(tag) {
            Some(entry) => (entry.handler)(block, tag, content),
            None => Err(TagError::UnknownTag {
                tag: tag.to_string(),
            }),
        }
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// -- Shared helpers -----------------------------------------------------------

/// Append `item`, reserving space fallibly. On failure the list is unchanged.
pub(crate) fn append<T>(list: &mut Vec<T>, item: T, tag: &str) -> TagResult {
    list.try_reserve(1).map_err(|_| TagError::Allocation {
        tag: tag.to_string(),
    })?;
    list.push(item);
    Ok(())
}

/// Split off the first whitespace-delimited token. The remainder is trimmed.
pub(crate) fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim()),
        None => (s, ""),
    }
}

/// Strip one pair of surrounding double quotes.
pub(crate) fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Overwrite an optional scalar, rejecting empty content.
pub(crate) fn set_scalar(field: &mut Option<String>, tag: &str, content: &str) -> TagResult {
    if content.is_empty() {
        return Err(TagError::empty(tag));
    }
    *field = Some(content.to_string());
    Ok(())
}
