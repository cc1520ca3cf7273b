//! `@stdin`, `@stdout`, `@stderr`.
//!
//! Only `@stdout` collects continuation lines.

use super::TagRegistry;
use crate::error::TagResult;
use crate::model::DocBlock;
use crate::parser::cursor::Continuation;

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(&["stdin"], stdin, Continuation::None);
    registry.register(&["stdout"], stdout, Continuation::Trimmed);
    registry.register(&["stderr"], stderr, Continuation::None);
}

fn stdin(block: &mut DocBlock, _tag: &str, content: &str) -> TagResult {
    block.stdin_doc = Some(content.to_string());
    Ok(())
}

fn stdout(block: &mut DocBlock, _tag: &str, content: &str) -> TagResult {
    block.stdout_doc = Some(content.to_string());
    Ok(())
}

fn stderr(block: &mut DocBlock, _tag: &str, content: &str) -> TagResult {
    block.stderr_doc = Some(content.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_overwrite() {
        let registry = TagRegistry::new();
        let mut block = DocBlock::default();
        registry.dispatch(&mut block, "stdout", "first").unwrap();
        registry.dispatch(&mut block, "stdout", "The greeting").unwrap();
        registry.dispatch(&mut block, "stderr", "Errors").unwrap();
        registry.dispatch(&mut block, "stdin", "Names, one per line").unwrap();
        assert_eq!(block.stdout_doc.as_deref(), Some("The greeting"));
        assert_eq!(block.stderr_doc.as_deref(), Some("Errors"));
        assert_eq!(block.stdin_doc.as_deref(), Some("Names, one per line"));
    }
}
