//! `@section`: groups the functions that follow under a heading.

use super::{split_token, TagRegistry};
use crate::error::{TagError, TagResult};
use crate::model::{DocBlock, Section};
use crate::parser::cursor::Continuation;

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(&["section"], section, Continuation::None);
}

/// `name [description]`; a second `@section` replaces both fields.
fn section(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    let (name, description) = split_token(content);
    if name.is_empty() {
        return Err(TagError::missing(tag, "name"));
    }
    block.section = Some(Section {
        name: name.to_string(),
        description: description.to_string(),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_overwrites() {
        let registry = TagRegistry::new();
        let mut block = DocBlock::default();
        registry.dispatch(&mut block, "section", "Strings").unwrap();
        assert_eq!(
            block.section,
            Some(Section {
                name: "Strings".to_string(),
                description: String::new(),
            })
        );
        registry
            .dispatch(&mut block, "section", "Arrays Helpers for arrays")
            .unwrap();
        let section = block.section.unwrap();
        assert_eq!(section.name, "Arrays");
        assert_eq!(section.description, "Helpers for arrays");
    }

    #[test]
    fn section_name_ends_at_any_whitespace() {
        let registry = TagRegistry::new();
        let mut block = DocBlock::default();
        registry
            .dispatch(&mut block, "section", "Strings\tHelpers for strings")
            .unwrap();
        assert_eq!(
            block.section,
            Some(Section {
                name: "Strings".to_string(),
                description: "Helpers for strings".to_string(),
            })
        );
    }

    #[test]
    fn section_requires_name() {
        let registry = TagRegistry::new();
        let mut block = DocBlock::default();
        assert!(registry.dispatch(&mut block, "section", "").is_err());
        assert_eq!(block.section, None);
    }
}
