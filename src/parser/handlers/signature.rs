//! Arguments, parameters, return values and exit codes.

use super::{append, option, split_token, unquote, TagRegistry};
use crate::error::{TagError, TagResult};
use crate::model::{Argument, DocBlock, ExitCode, Param, ReturnValue};
use crate::parser::cursor::Continuation;

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(&["arg", "argument"], argument, Continuation::None);
    registry.register(&["param"], param, Continuation::None);
    registry.register(&["noargs"], no_args, Continuation::None);
    registry.register(&["return", "returns"], return_desc, Continuation::None);
    registry.register(&["retval"], return_value, Continuation::None);
    registry.register(&["exitcode"], exit_code, Continuation::None);
}

/// Parse `name [type] description`.
pub fn parse_argument(tag: &str, content: &str) -> Result<Argument, TagError> {
    let (name, rest) = split_token(content);
    if name.is_empty() {
        return Err(TagError::missing(tag, "name"));
    }
    let (arg_type, description) = split_token(rest);
    Ok(Argument {
        name: name.to_string(),
        arg_type: (!arg_type.is_empty()).then(|| arg_type.to_string()),
        description: unquote(description).to_string(),
    })
}

/// `@arg -x ...` documents an option, not a positional argument.
fn argument(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    if content.trim_start().starts_with('-') {
        let entry = option::parse_option(content)?;
        return append(&mut block.options, entry, tag);
    }
    let arg = parse_argument(tag, content)?;
    append(&mut block.arguments, arg, tag)
}

fn param(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    let (name, description) = split_token(content);
    if name.is_empty() {
        return Err(TagError::missing(tag, "name"));
    }
    let param = Param {
        name: name.to_string(),
        description: description.to_string(),
    };
    append(&mut block.params, param, tag)
}

fn no_args(block: &mut DocBlock, _tag: &str, _content: &str) -> TagResult {
    block.no_args = true;
    Ok(())
}

fn return_desc(block: &mut DocBlock, _tag: &str, content: &str) -> TagResult {
    block.return_desc = Some(content.to_string());
    Ok(())
}

fn return_value(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    let (value, description) = split_token(content);
    if value.is_empty() {
        return Err(TagError::missing(tag, "value"));
    }
    let entry = ReturnValue {
        value: value.to_string(),
        description: description.to_string(),
    };
    append(&mut block.returns, entry, tag)
}

/// `CODE description`. The code is not validated.
fn exit_code(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    let (code, description) = split_token(content);
    if code.is_empty() {
        return Err(TagError::missing(tag, "code"));
    }
    let entry = ExitCode {
        code: code.to_string(),
        description: description.to_string(),
    };
    append(&mut block.exit_codes, entry, tag)
}
