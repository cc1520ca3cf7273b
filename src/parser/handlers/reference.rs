//! Cross-references: `@see` and the dependency lists.

use super::{append, TagRegistry};
use crate::error::{TagError, TagResult};
use crate::model::{DocBlock, SeeAlso};
use crate::parser::cursor::Continuation;

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(&["see"], see, Continuation::None);
    registry.register(&["dependency", "depends"], dependency, Continuation::None);
    registry.register(&["requires"], requires, Continuation::None);
    registry.register(&["used-by", "usedby"], used_by, Continuation::None);
    registry.register(&["calls"], calls, Continuation::None);
    registry.register(&["provides"], provides, Continuation::None);
    registry.register(&["internal_call", "internal-call"], internal_call, Continuation::None);
}

/// `[Name](URL)` is external; anything else is an internal name.
pub fn parse_see(content: &str) -> Option<SeeAlso> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }
    if let Some((name, url)) = markdown_link(content) {
        return Some(SeeAlso {
            name: name.to_string(),
            url: Some(url.to_string()),
            is_internal: false,
        });
    }
    Some(SeeAlso {
        name: content.to_string(),
        url: None,
        is_internal: true,
    })
}

/// `[`, `]`, `(`, `)` found in that order.
fn markdown_link(s: &str) -> Option<(&str, &str)> {
    let open_bracket = s.find('[')?;
    let close_bracket = s.find(']')?;
    let open_paren = s.find('(')?;
    let close_paren = s.find(')')?;
    if open_bracket < close_bracket && close_bracket < open_paren && open_paren < close_paren {
        Some((
            &s[open_bracket + 1..close_bracket],
            &s[open_paren + 1..close_paren],
        ))
    } else {
        None
    }
}

fn see(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    let entry = parse_see(content).ok_or_else(|| TagError::empty(tag))?;
    append(&mut block.see_also, entry, tag)
}

fn push_name(list: &mut Vec<String>, tag: &str, content: &str) -> TagResult {
    append(list, content.to_string(), tag)
}

fn dependency(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    push_name(&mut block.dependencies, tag, content)
}

fn requires(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    push_name(&mut block.requires, tag, content)
}

fn used_by(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    push_name(&mut block.used_by, tag, content)
}

fn calls(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    push_name(&mut block.calls, tag, content)
}

fn provides(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    push_name(&mut block.provides, tag, content)
}

fn internal_call(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    push_name(&mut block.internal_calls, tag, content)
}
