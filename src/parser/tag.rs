//! Tag extraction: `# @name content` and `# @name: content`.

use super::classify;

/// A tag split out of a comment line. Borrows from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub content: &'a str,
}

/// Split a tag line into name and content. Returns `None` for lines that
/// are not tag lines.
pub fn extract(line: &str) -> Option<Tag<'_>> {
    if !classify::is_tag_line(line) {
        return None;
    }
    let at = line.find('@')?;
    let rest = &line[at + 1..];
    let name_end = rest
        .find(|c: char| c.is_whitespace() || c == ':')
        .unwrap_or(rest.len());
    let name = &rest[..name_end];
    let after = &rest[name_end..];
    let after = after.strip_prefix(':').unwrap_or(after);
    let content = after.trim_start().trim_end_matches(['\r', '\n']).trim_end();
    Some(Tag { name, content })
}
