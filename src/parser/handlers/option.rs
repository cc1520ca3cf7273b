//! `@option` parsing.
//!
//! Accepted shapes:
//!
//! - `-o | --output <file> description`
//! - `-o description`
//! - `--output=<file> description`
//! - `-o <file> description`

use super::{append, split_token, TagRegistry};
use crate::error::{TagError, TagResult};
use crate::model::{DocBlock, OptionEntry};
use crate::parser::cursor::Continuation;

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(&["option"], option, Continuation::None);
}

fn option(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    let entry = parse_option(content)?;
    append(&mut block.options, entry, tag)
}

/// Parse option content into an entry with at least one flag set.
pub fn parse_option(content: &str) -> Result<OptionEntry, TagError> {
    let content = content.trim();
    let invalid = || TagError::InvalidOption {
        content: content.to_string(),
    };

    let mut entry = OptionEntry::default();
    let mut rest = content;
    loop {
        let (token, after) = split_token(rest);
        if token == "|" {
            rest = after;
            continue;
        }
        if !token.starts_with('-') {
            break;
        }
        for part in token.split('|').filter(|p| !p.is_empty()) {
            add_flag(&mut entry, part);
        }
        rest = after;

        let (next, after) = split_token(rest);
        if let Some(arg) = placeholder(next) {
            entry.arg_spec.get_or_insert_with(|| arg.to_string());
            rest = after;
        }
    }

    if entry.short_opt.is_none() && entry.long_opt.is_none() {
        return Err(invalid());
    }
    if entry.arg_spec.is_none() {
        entry.arg_spec = first_placeholder(rest).map(str::to_string);
    }
    entry.description = rest.to_string();
    Ok(entry)
}

/// Record one flag such as `-o`, `--output` or `--output=<file>`.
fn add_flag(entry: &mut OptionEntry, part: &str) {
    let (flag, inline_arg) = match part.find(['=', '<']) {
        Some(pos) => (&part[..pos], first_placeholder(&part[pos..])),
        None => (part, None),
    };
    if let Some(arg) = inline_arg {
        entry.arg_spec.get_or_insert_with(|| arg.to_string());
    }
    if flag.len() < 2 || flag == "--" || !flag.starts_with('-') {
        return;
    }
    let slot = if flag.starts_with("--") {
        &mut entry.long_opt
    } else {
        &mut entry.short_opt
    };
    slot.get_or_insert_with(|| flag.to_string());
}

/// `<name>` as a whole token.
fn placeholder(token: &str) -> Option<&str> {
    token
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .filter(|t| !t.is_empty())
}

/// Text inside the first `<...>` in `s`.
fn first_placeholder(s: &str) -> Option<&str> {
    let open = s.find('<')?;
    let close = s[open..].find('>')? + open;
    let inner = &s[open + 1..close];
    (!inner.is_empty()).then_some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> OptionEntry {
        parse_option(content).unwrap()
    }

    #[test]
    fn short_and_long_with_pipe() {
        let opt = parse("-o | --output <file> Write here");
        assert_eq!(opt.short_opt.as_deref(), Some("-o"));
        assert_eq!(opt.long_opt.as_deref(), Some("--output"));
        assert_eq!(opt.arg_spec.as_deref(), Some("file"));
        assert_eq!(opt.description, "Write here");
    }

    #[test]
    fn pipe_without_spaces() {
        let opt = parse("-o|--output Output file");
        assert_eq!(opt.short_opt.as_deref(), Some("-o"));
        assert_eq!(opt.long_opt.as_deref(), Some("--output"));
        assert_eq!(opt.description, "Output file");
    }

    #[test]
    fn pipe_followed_by_description() {
        let opt = parse("-o | opt description");
        assert_eq!(opt.short_opt.as_deref(), Some("-o"));
        assert_eq!(opt.long_opt, None);
        assert_eq!(opt.description, "opt description");
    }

    #[test]
    fn short_only() {
        let opt = parse("-v Verbose output");
        assert_eq!(opt.short_opt.as_deref(), Some("-v"));
        assert_eq!(opt.long_opt, None);
        assert_eq!(opt.arg_spec, None);
        assert_eq!(opt.description, "Verbose output");
    }

    #[test]
    fn equals_argument() {
        let opt = parse("--out=<file> Output file");
        assert_eq!(opt.long_opt.as_deref(), Some("--out"));
        assert_eq!(opt.arg_spec.as_deref(), Some("file"));
        assert_eq!(opt.description, "Output file");
    }

    #[test]
    fn separate_argument() {
        let opt = parse("-n <count> Repeat count");
        assert_eq!(opt.short_opt.as_deref(), Some("-n"));
        assert_eq!(opt.arg_spec.as_deref(), Some("count"));
        assert_eq!(opt.description, "Repeat count");
    }

    #[test]
    fn argument_found_in_description() {
        let opt = parse("-f Path to <file> to read");
        assert_eq!(opt.arg_spec.as_deref(), Some("file"));
        assert_eq!(opt.description, "Path to <file> to read");
    }

    #[test]
    fn rejects_missing_dash() {
        assert_eq!(
            parse_option("output Missing dash").unwrap_err(),
            TagError::InvalidOption {
                content: "output Missing dash".to_string()
            }
        );
        assert!(parse_option("").is_err());
        assert!(parse_option("- lone dash").is_err());
    }
}
