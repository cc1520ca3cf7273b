//! File metadata tags and the context-sensitive narrative tags.

use super::{set_scalar, TagRegistry};
use crate::error::{TagError, TagResult};
use crate::model::DocBlock;
use crate::parser::cursor::Continuation;

/// Tags the header pre-pass applies to the file-level block.
pub const FILE_LEVEL_TAGS: &[&str] = &[
    "file", "name", "version", "author", "contact", "email", "project", "package", "license",
    "copyright", "since", "brief", "skip",
];

pub fn is_file_level_tag(tag: &str) -> bool {
    FILE_LEVEL_TAGS.contains(&tag)
}

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(&["file", "name"], file_name, Continuation::None);
    registry.register(&["version"], version, Continuation::None);
    registry.register(&["author"], author, Continuation::None);
    registry.register(&["contact", "email"], contact, Continuation::None);
    registry.register(&["project", "package"], project, Continuation::None);
    registry.register(&["license"], license, Continuation::None);
    registry.register(&["copyright"], copyright, Continuation::None);
    registry.register(&["since"], since, Continuation::None);
    registry.register(&["skip"], skip, Continuation::None);
    registry.register(&["brief"], brief, Continuation::None);
    registry.register(&["description"], description, Continuation::Trimmed);
}

fn file_name(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.file_name, tag, content)
}

fn version(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.version, tag, content)
}

fn author(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.author, tag, content)
}

fn contact(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.author_contact, tag, content)
}

fn project(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.project, tag, content)
}

fn license(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.license, tag, content)
}

fn copyright(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.copyright, tag, content)
}

fn since(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    set_scalar(&mut block.since, tag, content)
}

fn skip(block: &mut DocBlock, _tag: &str, _content: &str) -> TagResult {
    block.is_skipped = true;
    Ok(())
}

/// File brief until the block names a function, function brief after.
fn brief(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    if content.is_empty() {
        return Err(TagError::empty(tag));
    }
    let field = if block.is_file_level() {
        &mut block.brief
    } else {
        &mut block.function_brief
    };
    *field = Some(content.to_string());
    Ok(())
}

fn description(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    if content.trim().is_empty() {
        return Err(TagError::empty(tag));
    }
    let field = if block.is_file_level() {
        &mut block.description
    } else {
        &mut block.function_description
    };
    *field = Some(content.to_string());
    Ok(())
}
