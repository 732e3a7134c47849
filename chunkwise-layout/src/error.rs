use thiserror::Error;

/// Violation of one of the container layout invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("data size {data_size} is out of range (compressed file is {compressed_size} bytes)")]
    SizeOutOfRange { data_size: u64, compressed_size: u64 },
    #[error("chunk count {0} is invalid; a container has at least one chunk")]
    InvalidChunkCount(u64),

    #[error("expected chunk index {expected}, got {actual}")]
    IndexMismatch { expected: u64, actual: u64 },
    #[error("chunk {index}: expected start {expected}, got {actual}")]
    StartMismatch { index: u64, expected: u64, actual: u64 },
    #[error("chunk {index}: compressed size overflow: {end} > {total}")]
    CompressedSizeOverflow { index: u64, end: u64, total: u64 },
    #[error("chunk {index}: original size overflow: {end} >= {total}")]
    OriginalSizeOverflow { index: u64, end: u64, total: u64 },
    #[error("chunk {index}: compressed size mismatch: {end} != {total}")]
    CompressedSizeMismatch { index: u64, end: u64, total: u64 },
    #[error("chunk {index}: original size mismatch: {end} != {total}")]
    OriginalSizeMismatch { index: u64, end: u64, total: u64 },

    #[error("no chunk starts past the beginning of the original data ({chunk_count} chunks)")]
    NoWitnessChunk { chunk_count: usize },
}

/// Failure to match a witness chunk against the original file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("original data is {actual} bytes long, expected {expected}")]
    OriginalLengthMismatch { expected: u64, actual: u64 },
    #[error("witness chunk data is {actual} bytes long, expected {expected}")]
    WitnessLengthMismatch { expected: u64, actual: u64 },
    #[error("witness range {start}..{end} lies outside the original data ({len} bytes)")]
    WitnessOutOfBounds { start: u64, end: u64, len: u64 },
    #[error("witness data differs from original range {original_start}..{original_end} (first difference at original offset {first_difference})")]
    WitnessMismatch {
        original_start: u64,
        original_end: u64,
        first_difference: u64,
    },
}

/// The compressed file fails a basic sanity check before it is even described.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("container does not start with the zchunk magic (found {found:02x?})")]
    BadMagic { found: Vec<u8> },
    #[error("compressed file is {compressed} bytes, not smaller than the original {original} bytes")]
    NotSmaller { compressed: u64, original: u64 },
}
