use thiserror::Error;

use super::field::Tag;

/// Errors detected while validating a static field table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate tag {tag}: '{first}' and '{second}'")]
    DuplicateTag {
        tag: Tag,
        first: &'static str,
        second: &'static str,
    },
    #[error("field '{field}' declares width {width} (expected 1..={max})")]
    InvalidWidth {
        field: &'static str,
        width: usize,
        max: usize,
    },
    #[error("field '{field}': value '{key}' reads bytes {start}..{end} outside width {width}")]
    ExtractOutOfBounds {
        field: &'static str,
        key: &'static str,
        start: usize,
        end: usize,
        width: usize,
    },
    #[error("field '{field}': sentinel pattern lies outside width {width}")]
    SentinelOutOfBounds { field: &'static str, width: usize },
    #[error("field '{field}': transform on non-numeric value '{key}'")]
    TransformOnText {
        field: &'static str,
        key: &'static str,
    },
    #[error("field '{field}' uses tag {tag}, which does not match the table's tag layout")]
    MixedTagLayout { field: &'static str, tag: Tag },
    #[error("field '{field}' uses tag {tag}, which the {grammar} grammar cannot read")]
    GrammarMismatch {
        field: &'static str,
        tag: Tag,
        grammar: &'static str,
    },
}
