use chunkwise_layout::LayoutError;
use thiserror::Error;

use crate::parser::StateKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: {source}")]
    Layout {
        line: usize,
        #[source]
        source: LayoutError,
    },
    #[error("line {line}: expected a row of the chunk table, got {text:?}")]
    MalformedReport { line: usize, text: String },
    #[error("report ended while in state {state:?} ({chunks_parsed} chunks parsed)")]
    TruncatedReport { state: StateKind, chunks_parsed: u64 },
    #[error("line {line}: chunk row past the last declared chunk: {text:?}")]
    UnexpectedTrailingLine { line: usize, text: String },
}
