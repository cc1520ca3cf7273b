//! `@deprecated`, `@replacement` and `@eol`.

use super::{set_scalar, TagRegistry};
use crate::error::TagResult;
use crate::model::DocBlock;
use crate::parser::cursor::Continuation;

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(&["deprecated"], deprecated, Continuation::None);
    registry.register(&["replacement"], replacement, Continuation::None);
    registry.register(&["eol"], eol, Continuation::None);
}

/// `@deprecated [from] VERSION`. Empty content only sets the flag.
fn deprecated(block: &mut DocBlock, _tag: &str, content: &str) -> TagResult {
    block.deprecation.is_deprecated = true;
    if content.is_empty() {
        return Ok(());
    }
    let version = match content.find("from") {
        Some(pos) => content[pos + 4..].trim(),
        None => content,
    };
    if !version.is_empty() {
        block.deprecation.version = Some(version.to_string());
    }
    Ok(())
}

fn replacement(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.deprecation.replacement, tag, content)
}

fn eol(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.deprecation.eol, tag, content)
}
