//! Line reader with one-line pushback, plus continuation collection.
//!
//! Continuation consumes comment lines as long as they qualify and pushes the
//! first rejected line back, so the caller's next read sees it again.

use super::classify;
use std::io::{self, BufRead};
use tracing::trace;

/// Position-tracked line reader over any buffered source.
pub struct LineCursor<R> {
    reader: R,
    pending: Option<String>,
    line_no: usize,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R) -> Self {
        LineCursor {
            reader,
            pending: None,
            line_no: 0,
        }
    }

    /// Next line without its terminator, or `None` at end of input.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            self.line_no += 1;
            return Ok(Some(line));
        }
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        self.line_no += 1;
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Un-read `line`; the next call to [`next_line`](Self::next_line) returns it.
    pub fn push_back(&mut self, line: String) {
        debug_assert!(self.pending.is_none(), "only one line of pushback");
        self.line_no = self.line_no.saturating_sub(1);
        self.pending = Some(line);
    }

    /// 1-based number of the last line returned.
    pub fn line_number(&self) -> usize {
        self.line_no
    }
}

/// How a tag consumes the comment lines that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Single-line content only.
    None,
    /// Append lines with `#` and following whitespace stripped.
    Trimmed,
    /// Append everything after `#` verbatim, keeping indentation.
    Raw,
}

/// True if `line` extends the content of the preceding tag.
pub fn is_continuation_line(line: &str) -> bool {
    classify::is_comment(line)
        && !classify::is_tag_line(line)
        && !classify::is_special_annotation(line)
}

/// Greedily append qualifying comment lines to `initial`, joined by `"\n"`.
///
/// Stops at the first line that does not qualify and pushes it back.
pub fn collect_continuation<R: BufRead>(
    cursor: &mut LineCursor<R>,
    initial: &str,
    mode: Continuation,
) -> io::Result<String> {
    let mut acc = initial.to_string();
    if mode == Continuation::None {
        return Ok(acc);
    }
    while let Some(line) = cursor.next_line()? {
        if !is_continuation_line(&line) {
            trace!(line = cursor.line_number(), "continuation ends");
            cursor.push_back(line);
            break;
        }
        let text = match mode {
            Continuation::Raw => classify::comment_body_raw(&line),
            _ => classify::comment_body(&line),
        };
        if !acc.is_empty() || mode == Continuation::Raw {
            acc.push('\n');
        }
        acc.push_str(text);
    }
    Ok(acc)
}
