//! Data model for parsed documentation, independent of output format.
//!
//! A parse produces a [`Document`]: an ordered array of [`DocBlock`]s whose
//! first element always carries the file-level metadata. Every later block
//! documents one function. Blocks own all of their strings and lists;
//! renderers only ever borrow them.

use serde::Serialize;

/// Parsed `@arg` / `@argument` entry: `name [type] description`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub arg_type: Option<String>,
    pub description: String,
}

/// Parsed `@param` entry: `name description`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub description: String,
}

/// Parsed `@retval` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReturnValue {
    pub value: String,
    pub description: String,
}

/// Parsed `@exitcode` entry. The code is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExitCode {
    pub code: String,
    pub description: String,
}

/// Parsed `@option` entry. At least one of `short_opt`/`long_opt` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub short_opt: Option<String>,
    pub long_opt: Option<String>,
    pub arg_spec: Option<String>,
    pub description: String,
}

impl OptionEntry {
    /// Display term, e.g. `-o | --output <file>`.
    pub fn term(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(ref s) = self.short_opt {
            parts.push(s);
        }
        if let Some(ref l) = self.long_opt {
            parts.push(l);
        }
        let mut term = parts.join(" | ");
        if let Some(ref arg) = self.arg_spec {
            if !term.contains('<') {
                term.push_str(&format!(" <{}>", arg));
            }
        }
        term
    }
}

/// Parsed `@env` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub default_value: Option<String>,
    pub description: String,
}

/// Parsed `@set` entry: a global variable the function assigns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalVar {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: String,
    pub default_value: Option<String>,
    pub description: String,
    pub is_readonly: bool,
}

/// Parsed `@see` entry. Internal references carry no URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeeAlso {
    pub name: String,
    pub url: Option<String>,
    pub is_internal: bool,
}

/// Alert category, normalized from the tag name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertKind {
    #[default]
    Note,
    Tip,
    Important,
    Warning,
    Caution,
    Info,
    Danger,
}

impl AlertKind {
    /// Map a tag name to its alert type. `hint` is a tip; anything
    /// unrecognized degrades to a note.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "note" => AlertKind::Note,
            "tip" | "hint" => AlertKind::Tip,
            "important" => AlertKind::Important,
            "warning" => AlertKind::Warning,
            "caution" => AlertKind::Caution,
            "info" => AlertKind::Info,
            "danger" => AlertKind::Danger,
            _ => AlertKind::Note,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Note => "NOTE",
            AlertKind::Tip => "TIP",
            AlertKind::Important => "IMPORTANT",
            AlertKind::Warning => "WARNING",
            AlertKind::Caution => "CAUTION",
            AlertKind::Info => "INFO",
            AlertKind::Danger => "DANGER",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Deprecation {
    pub is_deprecated: bool,
    pub version: Option<String>,
    pub replacement: Option<String>,
    pub eol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub description: String,
}

/// A `# shellcheck disable=SC2034 # reason` line attached to a function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShellcheckDirective {
    pub code: Option<String>,
    pub directive: String,
    pub reason: Option<String>,
}

/// One documentation record: the file-level block or one function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocBlock {
    // Identity
    pub file_name: Option<String>,
    /// `None` only for the file-level block.
    pub function_name: Option<String>,
    pub alias: Option<String>,

    // Narrative. File text and function text are kept apart because one
    // block may hold both while the scan is in progress.
    pub brief: Option<String>,
    pub description: Option<String>,
    pub function_brief: Option<String>,
    pub function_description: Option<String>,

    // File metadata
    pub version: Option<String>,
    pub author: Option<String>,
    pub author_contact: Option<String>,
    pub project: Option<String>,
    pub license: Option<String>,
    pub copyright: Option<String>,
    pub since: Option<String>,
    pub interpreter: Option<String>,

    // Signature
    pub arguments: Vec<Argument>,
    pub params: Vec<Param>,
    pub no_args: bool,

    // Returns
    pub return_desc: Option<String>,
    pub returns: Vec<ReturnValue>,
    pub exit_codes: Vec<ExitCode>,

    // I/O
    pub stdin_doc: Option<String>,
    pub stdout_doc: Option<String>,
    pub stderr_doc: Option<String>,

    pub options: Vec<OptionEntry>,
    pub env_vars: Vec<EnvVar>,
    pub set_vars: Vec<GlobalVar>,

    /// All examples, separated by a blank line (`"\n\n"`).
    pub example: Option<String>,

    // Cross-references
    pub see_also: Vec<SeeAlso>,
    pub requires: Vec<String>,
    pub used_by: Vec<String>,
    pub calls: Vec<String>,
    pub provides: Vec<String>,
    pub dependencies: Vec<String>,
    pub internal_calls: Vec<String>,

    pub alerts: Vec<Alert>,
    pub deprecation: Deprecation,

    // Flags
    pub is_internal: bool,
    /// File-level "exclude from docs".
    pub is_skipped: bool,

    pub section: Option<Section>,
    pub shellcheck: Vec<ShellcheckDirective>,
}

/// Separator between two examples stored in [`DocBlock::example`].
pub const EXAMPLE_SEPARATOR: &str = "\n\n";

impl DocBlock {
    /// Empty block for the file-level slot.
    pub fn for_file(file_name: impl Into<String>) -> Self {
        DocBlock {
            file_name: Some(file_name.into()),
            ..Default::default()
        }
    }

    pub fn is_file_level(&self) -> bool {
        self.function_name.is_none()
    }

    /// Split the example field into individual examples, in order.
    pub fn examples(&self) -> Vec<&str> {
        match self.example {
            Some(ref ex) => ex
                .split(EXAMPLE_SEPARATOR)
                .filter(|s| !s.trim().is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn has_multiple_examples(&self) -> bool {
        self.example
            .as_deref()
            .is_some_and(|ex| ex.contains(EXAMPLE_SEPARATOR))
    }

    pub fn has_dependencies(&self) -> bool {
        !(self.requires.is_empty()
            && self.used_by.is_empty()
            && self.calls.is_empty()
            && self.provides.is_empty()
            && self.dependencies.is_empty()
            && self.internal_calls.is_empty())
    }

    /// Brief for display: the function-level text wins over leftover file text.
    pub fn display_brief(&self) -> Option<&str> {
        self.function_brief.as_deref().or(self.brief.as_deref())
    }

    pub fn display_description(&self) -> Option<&str> {
        self.function_description
            .as_deref()
            .or(self.description.as_deref())
    }

    /// Borrowed projection used by renderers to pick blocks.
    pub fn view(&self) -> BlockView<'_> {
        if self.is_skipped {
            return BlockView {
                is_skipped: true,
                ..Default::default()
            };
        }
        BlockView {
            function_name: self.function_name.as_deref(),
            function_description: self.function_description.as_deref(),
            is_internal: self.is_internal,
            is_skipped: false,
        }
    }
}

/// Read-only projection of a [`DocBlock`]. Borrows, never owns, so it cannot
/// outlive the document it was taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockView<'a> {
    pub function_name: Option<&'a str>,
    pub function_description: Option<&'a str>,
    pub is_internal: bool,
    pub is_skipped: bool,
}

impl BlockView<'_> {
    /// A function block a renderer should emit.
    pub fn is_renderable(&self) -> bool {
        self.function_name.is_some() && !self.is_internal && !self.is_skipped
    }
}

/// Complete parse result for one source file.
///
/// Never empty: index 0 is the file-level block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    blocks: Vec<DocBlock>,
}

impl Document {
    /// New document with the file-level block in place and room for
    /// `capacity` blocks in total.
    pub fn new(file_name: impl Into<String>, capacity: usize) -> Self {
        let mut blocks = Vec::with_capacity(capacity.max(1));
        blocks.push(DocBlock::for_file(file_name));
        Document { blocks }
    }

    /// Build a document from already parsed blocks. Returns `None` when
    /// `blocks` is empty or its first element names a function.
    pub fn from_blocks(blocks: Vec<DocBlock>) -> Option<Self> {
        match blocks.first() {
            Some(first) if first.is_file_level() => Some(Document { blocks }),
            _ => None,
        }
    }

    pub fn file(&self) -> &DocBlock {
        &self.blocks[0]
    }

    pub fn blocks(&self) -> &[DocBlock] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Function blocks, in file order.
    pub fn functions(&self) -> impl Iterator<Item = &DocBlock> {
        self.blocks[1..].iter().filter(|b| !b.is_file_level())
    }

    pub fn is_skipped(&self) -> bool {
        self.file().is_skipped
    }

    /// One view per block, index-aligned with [`Document::blocks`].
    pub fn model(&self) -> Vec<BlockView<'_>> {
        self.blocks.iter().map(DocBlock::view).collect()
    }

    pub(crate) fn file_mut(&mut self) -> &mut DocBlock {
        &mut self.blocks[0]
    }

    pub(crate) fn block_mut(&mut self, index: usize) -> Option<&mut DocBlock> {
        self.blocks.get_mut(index)
    }

    /// Append a fresh block and return its index.
    pub(crate) fn push_block(&mut self) -> usize {
        self.blocks.push(DocBlock::default());
        self.blocks.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn examples_split_on_blank_line() {
        let block = DocBlock {
            example: Some("foo --bar\n\nfoo --baz".to_string()),
            ..Default::default()
        };
        assert!(block.has_multiple_examples());
        assert_eq!(block.examples(), vec!["foo --bar", "foo --baz"]);
    }

    #[test]
    fn single_example() {
        let block = DocBlock {
            example: Some("foo".to_string()),
            ..Default::default()
        };
        assert!(!block.has_multiple_examples());
        assert_eq!(block.examples(), vec!["foo"]);
    }

    #[test]
    fn skipped_view_hides_fields() {
        let block = DocBlock {
            function_name: Some("f".to_string()),
            is_skipped: true,
            ..Default::default()
        };
        let view = block.view();
        assert!(view.is_skipped);
        assert_eq!(view.function_name, None);
        assert!(!view.is_renderable());
    }

    #[test]
    fn document_keeps_file_block_first() {
        let mut doc = Document::new("t.sh", 4);
        let idx = doc.push_block();
        doc.block_mut(idx).unwrap().function_name = Some("foo".to_string());
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.file().file_name.as_deref(), Some("t.sh"));
        let names: Vec<_> = doc.functions().map(|f| f.function_name.as_deref()).collect();
        assert_eq!(names, vec![Some("foo")]);
    }

    #[test]
    fn from_blocks_rejects_function_first() {
        let block = DocBlock {
            function_name: Some("f".to_string()),
            ..Default::default()
        };
        assert!(Document::from_blocks(vec![block]).is_none());
        assert!(Document::from_blocks(Vec::new()).is_none());
    }

    #[test]
    fn alert_kind_normalization() {
        assert_eq!(AlertKind::from_tag("hint"), AlertKind::Tip);
        assert_eq!(AlertKind::from_tag("whatever"), AlertKind::Note);
        assert_eq!(AlertKind::from_tag("danger").as_str(), "DANGER");
    }

    #[test]
    fn option_term() {
        let opt = OptionEntry {
            short_opt: Some("-o".to_string()),
            long_opt: Some("--output".to_string()),
            arg_spec: Some("file".to_string()),
            description: String::new(),
        };
        assert_eq!(opt.term(), "-o | --output <file>");
    }
}
