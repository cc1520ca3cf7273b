//! `@example`, `@internal` and `@alias`.

use super::{set_scalar, TagRegistry};
use crate::error::{TagError, TagResult};
use crate::model::{DocBlock, EXAMPLE_SEPARATOR};
use crate::parser::cursor::Continuation;

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(&["example"], example, Continuation::Raw);
    registry.register(&["internal"], internal, Continuation::None);
    registry.register(&["alias"], alias, Continuation::None);
}

/// Append one example. A second example is separated by a blank line.
fn example(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    if content.trim().is_empty() {
        return Err(TagError::empty(tag));
    }
    match block.example {
        Some(ref mut existing) => {
            existing
                .try_reserve(EXAMPLE_SEPARATOR.len() + content.len())
                .map_err(|_| TagError::Allocation {
                    tag: tag.to_string(),
                })?;
            existing.push_str(EXAMPLE_SEPARATOR);
            existing.push_str(content);
        }
        None => block.example = Some(content.to_string()),
    }
    Ok(())
}

fn internal(block: &mut DocBlock, _tag: &str, _content: &str) -> TagResult {
    block.is_internal = true;
    Ok(())
}

fn alias(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.alias, tag, content)
}
