//! Line-by-line state machine that turns a script into a [`Document`].
//!
//! Two passes over the source:
//!
//! 1. A header pass reads the leading comment block (shebang, comments,
//!    blank lines) and records file-level metadata on block 0.
//! 2. The main pass walks every line, opening a block per function and
//!    dispatching tags to whichever block is current.

use super::classify;
use super::cursor::{collect_continuation, LineCursor};
use super::handlers::{metadata, shellcheck, TagRegistry};
use super::tag;
use crate::error::{ParseError, ParseResult, TagError};
use crate::model::{DocBlock, Document};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Default cap on blocks per file, file-level block included.
pub const DEFAULT_MAX_BLOCKS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Once reached, no further blocks are collected.
    pub max_blocks: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_blocks: DEFAULT_MAX_BLOCKS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No pending doc-block.
    Scanning,
    /// Tags are accumulating for a function not yet declared.
    InDocblock,
}

/// Parser with its tag registry. Reusable across files.
#[derive(Default)]
pub struct Parser {
    registry: TagRegistry,
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser {
            registry: TagRegistry::new(),
            options,
        }
    }

    pub fn parse_file(&self, path: &Path) -> ParseResult<Document> {
        let file = File::open(path).map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "parsing");
        self.parse_reader(BufReader::new(file), &path.to_string_lossy())
    }

    /// Parse any seekable buffered source. `file_name` seeds block 0.
    pub fn parse_reader<R: BufRead + Seek>(
        &self,
        mut reader: R,
        file_name: &str,
    ) -> ParseResult<Document> {
        let read_err = |source: io::Error| ParseError::Read {
            path: PathBuf::from(file_name),
            source,
        };

        let mut doc = Document::new(file_name, self.options.max_blocks.min(16));
        self.scan_header(&mut reader, doc.file_mut())
            .map_err(read_err)?;
        reader.rewind().map_err(read_err)?;

        let mut scan = Scan {
            registry: &self.registry,
            max_blocks: self.options.max_blocks,
            doc,
            current: 0,
            state: State::Scanning,
        };
        scan.run(LineCursor::new(reader)).map_err(read_err)?;
        debug!(
            file = file_name,
            blocks = scan.doc.block_count(),
            "parse complete"
        );
        Ok(scan.doc)
    }

    pub fn parse_str(&self, text: &str, file_name: &str) -> ParseResult<Document> {
        self.parse_reader(io::Cursor::new(text.as_bytes()), file_name)
    }

    // -- Header pass ----------------------------------------------------------

    fn scan_header<B: BufRead>(&self, reader: B, file: &mut DocBlock) -> io::Result<()> {
        let mut cursor = LineCursor::new(reader);
        while let Some(line) = cursor.next_line()? {
            if cursor.line_number() == 1 && classify::is_shebang(&line) {
                record_interpreter(file, &line);
                continue;
            }
            if classify::is_blank(&line) {
                continue;
            }
            if !classify::is_comment(&line) {
                break;
            }
            let Some(tag) = tag::extract(&line) else {
                continue;
            };
            if tag.name == "function" {
                break;
            }
            if metadata::is_file_level_tag(tag.name) {
                if let Err(err) = self.registry.dispatch(file, tag.name, tag.content) {
                    debug!(line = cursor.line_number(), %err, "header tag rejected");
                }
            }
        }
        Ok(())
    }
}

fn record_interpreter(file: &mut DocBlock, line: &str) {
    let interpreter = line[2..].trim();
    if !interpreter.is_empty() {
        file.interpreter = Some(interpreter.to_string());
    }
}

// -- Main pass ----------------------------------------------------------------

struct Scan<'p> {
    registry: &'p TagRegistry,
    max_blocks: usize,
    doc: Document,
    current: usize,
    state: State,
}

impl Scan<'_> {
    fn run<R: BufRead>(&mut self, mut cursor: LineCursor<R>) -> io::Result<()> {
        while let Some(line) = cursor.next_line()? {
            let line_no = cursor.line_number();
            trace!(line = line_no, "{}", line);

            if line_no == 1 && classify::is_shebang(&line) {
                record_interpreter(self.doc.file_mut(), &line);
                continue;
            }

            if classify::is_comment(&line) {
                if classify::is_shellcheck_directive(&line) {
                    self.shellcheck(&line, line_no);
                } else if let Some(tag) = tag::extract(&line) {
                    if tag.name == "function" {
                        if !self.open_documented_function(tag.content, line_no) {
                            break;
                        }
                    } else {
                        self.apply_tag(&mut cursor, tag.name, tag.content, line_no)?;
                    }
                }
                continue;
            }

            if classify::is_blank(&line) {
                continue;
            }

            if let Some(name) = classify::function_name(&line) {
                if !self.declare_function(name, line_no) {
                    break;
                }
                continue;
            }

            self.leave_docblock(line_no);
        }
        Ok(())
    }

    fn current_block(&mut self) -> Option<&mut DocBlock> {
        self.doc.block_mut(self.current)
    }

    /// New block index, or `None` once the cap is reached.
    fn allocate(&mut self, line_no: usize) -> Option<usize> {
        if self.doc.block_count() >= self.max_blocks {
            debug!(line = line_no, max = self.max_blocks, "block limit reached; stopping");
            return None;
        }
        Some(self.doc.push_block())
    }

    /// `@function name`: always starts a fresh block.
    fn open_documented_function(&mut self, content: &str, line_no: usize) -> bool {
        let name = content.trim();
        let name = name.strip_suffix("()").unwrap_or(name).trim_end();
        if name.is_empty() {
            let err = TagError::missing("function", "name");
            debug!(line = line_no, %err, "tag rejected");
            return true;
        }
        let Some(index) = self.allocate(line_no) else {
            return false;
        };
        self.current = index;
        if let Some(block) = self.current_block() {
            block.function_name = Some(name.to_string());
        }
        self.state = State::InDocblock;
        debug!(line = line_no, function = name, block = index, "enter docblock");
        true
    }

    /// `name() {` in code. Completes a pending block or opens a new one.
    fn declare_function(&mut self, name: &str, line_no: usize) -> bool {
        let pending = self.state == State::InDocblock && self.current != 0;
        if !pending {
            let Some(index) = self.allocate(line_no) else {
                return false;
            };
            self.current = index;
        }
        if let Some(block) = self.current_block() {
            match block.function_name {
                None => block.function_name = Some(name.to_string()),
                Some(ref documented) if documented != name => {
                    warn!(
                        line = line_no,
                        documented = %documented,
                        declared = name,
                        "function name mismatch; keeping documented name"
                    );
                }
                Some(_) => {}
            }
        }
        self.state = State::Scanning;
        debug!(line = line_no, function = name, block = self.current, "function declared");
        true
    }

    fn leave_docblock(&mut self, line_no: usize) {
        if self.state == State::InDocblock {
            debug!(line = line_no, block = self.current, "leave docblock");
        }
        self.state = State::Scanning;
    }

    fn apply_tag<R: BufRead>(
        &mut self,
        cursor: &mut LineCursor<R>,
        name: &str,
        content: &str,
        line_no: usize,
    ) -> io::Result<()> {
        let Some(entry) = self.registry.get(name).copied() else {
            let err = TagError::UnknownTag {
                tag: name.to_string(),
            };
            debug!(line = line_no, %err, "ignored");
            return Ok(());
        };
        let content = collect_continuation(cursor, content, entry.continuation)?;
        if let Some(block) = self.current_block() {
            if let Err(err) = (entry.handler)(block, name, &content) {
                debug!(line = line_no, %err, "tag rejected");
            }
        }
        Ok(())
    }

    /// Directives only document functions; at file level they are dropped.
    fn shellcheck(&mut self, line: &str, line_no: usize) {
        if self.current == 0 {
            trace!(line = line_no, "file-level shellcheck directive ignored");
            return;
        }
        if let Some(block) = self.current_block() {
            if let Err(err) = shellcheck::attach(block, line) {
                debug!(line = line_no, %err, "shellcheck directive dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Document {
        Parser::default().parse_str(text, "test.sh").unwrap()
    }

    fn names(doc: &Document) -> Vec<Option<&str>> {
        doc.blocks()
            .iter()
            .map(|b| b.function_name.as_deref())
            .collect()
    }

    #[test]
    fn file_and_function_blocks() {
        let doc = parse("# @file t.sh\n# @brief B\nfoo() {\n  :\n}\n");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.file().file_name.as_deref(), Some("t.sh"));
        assert_eq!(doc.file().brief.as_deref(), Some("B"));
        assert_eq!(doc.blocks()[1].function_name.as_deref(), Some("foo"));
    }

    #[test]
    fn seeds_file_name_from_path() {
        let doc = parse("echo hi\n");
        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.file().file_name.as_deref(), Some("test.sh"));
    }

    #[test]
    fn shebang_sets_interpreter() {
        let doc = parse("#!/usr/bin/env bash\necho hi\n");
        assert_eq!(doc.file().interpreter.as_deref(), Some("/usr/bin/env bash"));
    }

    #[test]
    fn function_tag_then_declaration_share_block() {
        let doc = parse(
            "# @function greet\n# @brief Says hello\n# @arg $1 string Name\ngreet() {\n  echo hi\n}\n",
        );
        assert_eq!(names(&doc), vec![None, Some("greet")]);
        let greet = &doc.blocks()[1];
        assert_eq!(greet.function_brief.as_deref(), Some("Says hello"));
        assert_eq!(greet.arguments.len(), 1);
    }

    #[test]
    fn function_tag_strips_parens() {
        let doc = parse("# @function greet()\n");
        assert_eq!(doc.blocks()[1].function_name.as_deref(), Some("greet"));
    }

    #[test]
    fn mismatched_declaration_keeps_documented_name() {
        let doc = parse("# @function documented\nactual() {\n}\n");
        assert_eq!(names(&doc), vec![None, Some("documented")]);
    }

    #[test]
    fn code_line_closes_docblock() {
        let doc = parse("# @function first\nx=1\nsecond() {\n}\n");
        assert_eq!(names(&doc), vec![None, Some("first"), Some("second")]);
    }

    #[test]
    fn blank_line_keeps_docblock_open() {
        let doc = parse("# @function first\n\nfirst() {\n}\n");
        assert_eq!(names(&doc), vec![None, Some("first")]);
    }

    #[test]
    fn undocumented_functions_get_blocks() {
        let doc = parse("a() {\n}\nfunction b {\n}\n");
        assert_eq!(names(&doc), vec![None, Some("a"), Some("b")]);
    }

    #[test]
    fn description_collects_continuation() {
        let doc = parse("# @description First line\n# second line\n#   third\n\necho\n");
        assert_eq!(
            doc.file().description.as_deref(),
            Some("First line\nsecond line\nthird")
        );
    }

    #[test]
    fn stdout_collects_but_stderr_does_not() {
        let doc = parse(
            "# @function f\n# @stdout Line one\n# line two\n# @stderr Err one\n# err two\nf() {\n}\n",
        );
        let f = &doc.blocks()[1];
        assert_eq!(f.stdout_doc.as_deref(), Some("Line one\nline two"));
        assert_eq!(f.stderr_doc.as_deref(), Some("Err one"));
    }

    #[test]
    fn examples_split_into_segments() {
        let doc = parse("# @function f\n# @example\n#   f one\n#\n#   f two\nf() {\n}\n");
        let f = &doc.blocks()[1];
        let examples: Vec<_> = f.examples().into_iter().map(str::trim).collect();
        assert_eq!(examples, vec!["f one", "f two"]);
    }

    #[test]
    fn unknown_tag_is_skipped() {
        let doc = parse("# @function f\n# @frobnicate foo\n# @brief Still parsed\nf() {\n}\n");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.blocks()[1].function_brief.as_deref(), Some("Still parsed"));
    }

    #[test]
    fn shellcheck_attaches_to_functions_only() {
        let doc = parse(
            "# shellcheck disable=SC2034\n# @function f\n# shellcheck disable=SC2154 # set by caller\nf() {\n}\n",
        );
        assert!(doc.file().shellcheck.is_empty());
        let f = &doc.blocks()[1];
        assert_eq!(f.shellcheck.len(), 1);
        assert_eq!(f.shellcheck[0].code.as_deref(), Some("SC2154"));
        assert_eq!(f.shellcheck[0].reason.as_deref(), Some("set by caller"));
    }

    #[test]
    fn skip_only_marks_file_block() {
        let doc = parse("# @skip\n# @function f\n# @brief B\nf() {\n}\n");
        assert!(doc.file().is_skipped);
        assert!(!doc.blocks()[1].is_skipped);
        assert_eq!(doc.blocks()[1].function_brief.as_deref(), Some("B"));
    }

    #[test]
    fn header_pass_ignores_function_tags() {
        let doc = parse("#!/bin/sh\n# @version 1.0\n\n# @author Jo\nset -e\n");
        assert_eq!(doc.file().version.as_deref(), Some("1.0"));
        assert_eq!(doc.file().author.as_deref(), Some("Jo"));
        assert_eq!(doc.file().interpreter.as_deref(), Some("/bin/sh"));
    }

    #[test]
    fn block_cap_stops_collection() {
        let parser = Parser::new(ParseOptions { max_blocks: 3 });
        let doc = parser
            .parse_str("a() {\n}\nb() {\n}\nc() {\n}\nd() {\n}\n", "cap.sh")
            .unwrap();
        assert_eq!(names(&doc), vec![None, Some("a"), Some("b")]);
    }

    #[test]
    fn missing_file_is_open_error() {
        let err = Parser::default()
            .parse_file(Path::new("/definitely/not/here.sh"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Open { .. }));
    }
}
