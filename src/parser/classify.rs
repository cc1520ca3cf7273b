//! Line classification predicates.
//!
//! All predicates are stateless and ignore leading whitespace.

use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:space:]]*#[[:space:]]*@[A-Za-z0-9_-]+(?:[[:space:]:]|$)").unwrap());

static RE_FUNC_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[[:space:]]*(?:",
        r"function[[:space:]]+([A-Za-z0-9_]+)[[:space:]]*(?:\([[:space:]]*\))?",
        r"|([A-Za-z0-9_]+)[[:space:]]*\([[:space:]]*\)",
        r")[[:space:]]*\{"
    ))
    .unwrap()
});

/// Keywords that end a continuation block even inside a plain comment.
const SPECIAL_KEYWORDS: &[&str] = &["shellcheck", "disable", "TODO", "FIXME", "XXX", "HACK"];

// -- Predicates ---------------------------------------------------------------

pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// `#!` on the very first column.
pub fn is_shebang(line: &str) -> bool {
    line.starts_with("#!")
}

/// `# @tag content` or `# @tag: content`. A bare `# @tag` also counts.
pub fn is_tag_line(line: &str) -> bool {
    RE_TAG_LINE.is_match(line)
}

pub fn is_function_declaration(line: &str) -> bool {
    function_name(line).is_some()
}

/// Name declared on a function declaration line, if the line is one.
pub fn function_name(line: &str) -> Option<&str> {
    let caps = RE_FUNC_DECL.captures(line)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

pub fn is_special_annotation(line: &str) -> bool {
    SPECIAL_KEYWORDS.iter().any(|kw| line.contains(kw))
}

pub fn is_shellcheck_directive(line: &str) -> bool {
    let body = comment_body(line);
    body.get(..10)
        .is_some_and(|head| head.eq_ignore_ascii_case("shellcheck"))
}

/// Text after the leading `#` and any whitespace that follows it.
pub fn comment_body(line: &str) -> &str {
    let trimmed = line.trim_start();
    trimmed.strip_prefix('#').unwrap_or(trimmed).trim_start()
}

/// Text after the leading `#`, untouched. Used where indentation matters.
pub fn comment_body_raw(line: &str) -> &str {
    let trimmed = line.trim_start();
    trimmed.strip_prefix('#').unwrap_or(trimmed)
}
