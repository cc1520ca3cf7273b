//! `@set` (globals a function assigns) and `@env` (variables it reads).

use super::{append, split_token, TagRegistry};
use crate::error::{TagError, TagResult};
use crate::model::{DocBlock, EnvVar, GlobalVar};
use crate::parser::cursor::Continuation;

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(&["set"], set, Continuation::None);
    registry.register(&["env"], env, Continuation::None);
}

/// `name [type] [description]`; missing parts are empty strings.
fn set(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    let (name, rest) = split_token(content);
    if name.is_empty() {
        return Err(TagError::missing(tag, "name"));
    }
    let (var_type, description) = split_token(rest);
    let var = GlobalVar {
        name: name.to_string(),
        var_type: var_type.to_string(),
        default_value: None,
        description: description.to_string(),
        is_readonly: false,
    };
    append(&mut block.set_vars, var, tag)
}

fn env(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    let (name, description) = split_token(content);
    if name.is_empty() {
        return Err(TagError::missing(tag, "name"));
    }
    let var = EnvVar {
        name: name.to_string(),
        default_value: None,
        description: description.to_string(),
    };
    append(&mut block.env_vars, var, tag)
}
