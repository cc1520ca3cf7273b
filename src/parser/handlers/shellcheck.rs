//! `# shellcheck disable=SC2034 # reason` lines.
//!
//! These are not `@` tags; the engine detects them with
//! [`is_shellcheck_directive`](crate::parser::classify::is_shellcheck_directive)
//! and hands the raw line over.

use super::append;
use crate::error::TagResult;
use crate::model::{DocBlock, ShellcheckDirective};
use crate::parser::classify;

/// Split a directive line into code, full directive text and reason.
pub fn parse_directive(line: &str) -> ShellcheckDirective {
    let directive = classify::comment_body(line).trim_end();
    let code_start = directive
        .find("disable=")
        .map(|pos| pos + "disable=".len())
        .or_else(|| directive.find("enable=").map(|pos| pos + "enable=".len()));

    let (code, reason) = match code_start {
        Some(start) => {
            let tail = &directive[start..];
            let end = tail
                .find(|c: char| c.is_whitespace() || c == '#')
                .unwrap_or(tail.len());
            let code = &tail[..end];
            let reason = tail[end..]
                .find('#')
                .map(|hash| tail[end + hash + 1..].trim())
                .filter(|r| !r.is_empty());
            ((!code.is_empty()).then_some(code), reason)
        }
        None => (None, None),
    };

    ShellcheckDirective {
        code: code.map(str::to_string),
        directive: directive.to_string(),
        reason: reason.map(str::to_string),
    }
}

pub fn attach(block: &mut DocBlock, line: &str) -> TagResult {
    append(&mut block.shellcheck, parse_directive(line), "shellcheck")
}
