//! GitHub-flavored markdown anchors and index entries.

use crate::model::{DocBlock, Document};

/// GitHub heading anchor slug.
///
/// - lowercase
/// - keep alphanumerics, spaces, hyphens and underscores; drop everything
///   else (including `:` and `.`)
/// - spaces become hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

/// Link to `text`: relative paths and URLs link to themselves, existing
/// markdown links pass through, anything else links to its heading.
pub fn render_link(text: &str) -> String {
    if text.starts_with('/') || text.starts_with("./") || text.starts_with("../") {
        return format!("[{}]({})", text, text);
    }
    if contains_markdown_link(text) {
        return text.to_string();
    }
    if text.contains("://") && !text.contains(char::is_whitespace) {
        return format!("[{}]({})", text, text);
    }
    format!("[{}](#{})", text, github_slug(text))
}

/// `* [name](#anchor) - brief`
pub fn render_index_item(block: &DocBlock) -> Option<String> {
    let name = block.function_name.as_deref()?;
    let mut item = format!("* {}", render_link(name));
    if let Some(brief) = block.function_brief.as_deref() {
        item.push_str(" - ");
        item.push_str(brief);
    }
    Some(item)
}

/// Index over every renderable function, one item per line.
pub fn render_index(doc: &Document) -> String {
    doc.blocks()
        .iter()
        .filter(|b| b.view().is_renderable())
        .filter_map(render_index_item)
        .map(|item| item + "\n")
        .collect()
}

/// `[...](...)` somewhere in `text`.
fn contains_markdown_link(text: &str) -> bool {
    text.match_indices('[').any(|(i, _)| {
        text[i + 1..]
            .find(']')
            .is_some_and(|close| text[i + 1 + close + 1..].starts_with('('))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_simple() {
        assert_eq!(github_slug("hello world"), "hello-world");
    }

    #[test]
    fn slug_strips_punctuation() {
        assert_eq!(github_slug("string::trim"), "stringtrim");
        assert_eq!(github_slug("log_info"), "log_info");
        assert_eq!(github_slug("trim-left"), "trim-left");
        assert_eq!(github_slug("Hello World"), "hello-world");
    }

    #[test]
    fn link_variants() {
        assert_eq!(render_link("greet"), "[greet](#greet)");
        assert_eq!(render_link("./other.md"), "[./other.md](./other.md)");
        assert_eq!(
            render_link("https://example.com/x"),
            "[https://example.com/x](https://example.com/x)"
        );
        assert_eq!(render_link("[a](b)"), "[a](b)");
    }

    #[test]
    fn index_item_with_brief() {
        let block = DocBlock {
            function_name: Some("greet_user".to_string()),
            function_brief: Some("Say hello".to_string()),
            ..Default::default()
        };
        assert_eq!(
            render_index_item(&block).as_deref(),
            Some("* [greet_user](#greet_user) - Say hello")
        );
    }

    #[test]
    fn index_skips_internal() {
        let mut doc = Document::new("t.sh", 4);
        let a = doc.push_block();
        doc.block_mut(a).unwrap().function_name = Some("a".to_string());
        let b = doc.push_block();
        let block = doc.block_mut(b).unwrap();
        block.function_name = Some("b".to_string());
        block.is_internal = true;
        assert_eq!(render_index(&doc), "* [a](#a)\n");
    }
}
