//! Alert family: `@note`, `@tip`, `@warning`, ...

use super::{append, TagRegistry};
use crate::error::TagResult;
use crate::model::{Alert, AlertKind, DocBlock};
use crate::parser::cursor::Continuation;

pub const ALERT_TAGS: &[&str] = &[
    "note", "tip", "important", "warning", "caution", "info", "danger", "hint",
];

pub(super) fn register(registry: &mut TagRegistry) {
    registry.register(ALERT_TAGS, alert, Continuation::None);
}

fn alert(block: &mut DocBlock, tag: &str, content: &str) -> TagResult {
    let alert = Alert {
        kind: AlertKind::from_tag(tag),
        content: content.to_string(),
    };
    append(&mut block.alerts, alert, tag)
}
