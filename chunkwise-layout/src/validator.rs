use tracing::debug;

use crate::{
    error::LayoutError,
    layout::{ChunkDescriptor, ChunkLayout, ContainerSizes, LayoutParams},
};

/// Checks the declared data size against the compressed file size and returns the header
/// overhead (`size_diff`) derived from it.
pub fn validate_data_size(sizes: ContainerSizes, data_size: u64) -> Result<u64, LayoutError> {
    if data_size < 1 || data_size > sizes.compressed {
        return Err(LayoutError::SizeOutOfRange {
            data_size,
            compressed_size: sizes.compressed,
        });
    }
    Ok(sizes.compressed - data_size)
}

pub fn validate_chunk_count(chunk_count: u64) -> Result<u64, LayoutError> {
    if chunk_count < 1 {
        return Err(LayoutError::InvalidChunkCount(chunk_count));
    }
    Ok(chunk_count)
}

/// A single chunk as declared by the report, before it is positioned in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkEntry<'a> {
    pub index: u64,
    pub checksum: &'a str,
    /// Offset of the chunk in the compressed stream.
    pub start: u64,
    pub compressed_size: u64,
    /// Size of the chunk's data once decompressed.
    pub size: u64,
}

/// Outcome of appending a chunk to a [`LayoutBuilder`].
#[derive(Debug)]
pub enum Progress {
    /// More chunks are declared; keep feeding the builder.
    More(LayoutBuilder),
    /// The last declared chunk was appended and the layout checked out.
    Complete(ChunkLayout),
}

/// Builds a [`ChunkLayout`] one chunk at a time, enforcing the layout invariants on every
/// appended chunk.
///
/// Each chunk must start exactly where the previous one ended (the first one right after the
/// header) in both streams. The last declared chunk must end exactly at the end of both files.
#[derive(Debug, Clone)]
pub struct LayoutBuilder {
    sizes: ContainerSizes,
    params: LayoutParams,
    chunks: Vec<ChunkDescriptor>,
}

impl LayoutBuilder {
    // Chunk counts come straight from the report, so don't trust them for preallocation.
    const MAX_PREALLOCATED_CHUNKS: u64 = 1024;

    pub fn new(sizes: ContainerSizes, params: LayoutParams) -> Self {
        let capacity = params.chunk_count.min(Self::MAX_PREALLOCATED_CHUNKS) as usize;
        Self {
            sizes,
            params,
            chunks: Vec::with_capacity(capacity),
        }
    }

    pub fn sizes(&self) -> ContainerSizes {
        self.sizes
    }

    pub fn params(&self) -> LayoutParams {
        self.params
    }

    /// Number of chunks accepted so far.
    pub fn accepted(&self) -> u64 {
        self.chunks.len() as u64
    }

    /// Where the next chunk must start in the compressed and the original stream.
    fn next_starts(&self) -> (u64, u64) {
        match self.chunks.last() {
            Some(last) => (last.compressed_end(), last.original_end()),
            None => (self.params.size_diff, 0),
        }
    }

    pub fn push(mut self, entry: ChunkEntry<'_>) -> Result<Progress, LayoutError> {
        let expected_index = self.accepted();
        if entry.index != expected_index {
            return Err(LayoutError::IndexMismatch {
                expected: expected_index,
                actual: entry.index,
            });
        }
        let index = entry.index;

        let (compressed_start, original_start) = self.next_starts();
        if entry.start != compressed_start {
            return Err(LayoutError::StartMismatch {
                index,
                expected: compressed_start,
                actual: entry.start,
            });
        }

        let chunk = ChunkDescriptor {
            compressed_start,
            compressed_size: entry.compressed_size,
            original_start,
            original_size: entry.size,
            checksum: entry.checksum.to_owned(),
        };

        let total = self.sizes;
        if chunk.compressed_end() > total.compressed {
            return Err(LayoutError::CompressedSizeOverflow {
                index,
                end: chunk.compressed_end(),
                total: total.compressed,
            });
        }

        let is_last = index.saturating_add(1) == self.params.chunk_count;
        if is_last {
            if chunk.compressed_end() != total.compressed {
                return Err(LayoutError::CompressedSizeMismatch {
                    index,
                    end: chunk.compressed_end(),
                    total: total.compressed,
                });
            }
            if chunk.original_end() != total.original {
                return Err(LayoutError::OriginalSizeMismatch {
                    index,
                    end: chunk.original_end(),
                    total: total.original,
                });
            }
        } else if chunk.original_end() >= total.original {
            return Err(LayoutError::OriginalSizeOverflow {
                index,
                end: chunk.original_end(),
                total: total.original,
            });
        }

        debug!("Appending chunk {index}: {chunk}");
        self.chunks.push(chunk);

        if is_last {
            Ok(Progress::Complete(ChunkLayout::new(
                self.sizes,
                self.params,
                self.chunks,
            )))
        } else {
            Ok(Progress::More(self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chunk_builder() -> LayoutBuilder {
        let sizes = ContainerSizes::new(5000, 4900);
        let size_diff = validate_data_size(sizes, 4900).unwrap();
        LayoutBuilder::new(
            sizes,
            LayoutParams {
                data_size: 4900,
                size_diff,
                chunk_count: 2,
            },
        )
    }

    fn entry(index: u64, start: u64, compressed_size: u64, size: u64) -> ChunkEntry<'static> {
        ChunkEntry {
            index,
            checksum: "deadbeef",
            start,
            compressed_size,
            size,
        }
    }

    fn more(progress: Progress) -> LayoutBuilder {
        match progress {
            Progress::More(builder) => builder,
            Progress::Complete(layout) => panic!("layout completed too early: {layout:?}"),
        }
    }

    #[test]
    fn data_size_bounds() {
        let sizes = ContainerSizes::new(5000, 4900);
        assert_eq!(validate_data_size(sizes, 4900), Ok(100));
        assert_eq!(validate_data_size(sizes, 5000), Ok(0));
        assert_eq!(
            validate_data_size(sizes, 0),
            Err(LayoutError::SizeOutOfRange {
                data_size: 0,
                compressed_size: 5000
            })
        );
        assert!(matches!(
            validate_data_size(sizes, 5001),
            Err(LayoutError::SizeOutOfRange { .. })
        ));
    }

    #[test]
    fn chunk_count_must_be_positive() {
        assert_eq!(validate_chunk_count(1), Ok(1));
        assert_eq!(
            validate_chunk_count(0),
            Err(LayoutError::InvalidChunkCount(0))
        );
    }

    #[test]
    fn two_chunks_complete() {
        let builder = more(two_chunk_builder().push(entry(0, 100, 2400, 2000)).unwrap());
        assert_eq!(builder.accepted(), 1);
        let Progress::Complete(layout) = builder.push(entry(1, 2500, 2500, 2900)).unwrap() else {
            panic!("layout should be complete after the last chunk");
        };
        let chunks = layout.chunks();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].compressed_range(), 100..2500);
        assert_eq!(chunks[0].original_range(), 0..2000);
        assert_eq!(chunks[1].compressed_range(), 2500..5000);
        assert_eq!(chunks[1].original_range(), 2000..4900);
    }

    #[test]
    fn first_chunk_must_start_after_header() {
        let error = two_chunk_builder().push(entry(0, 0, 2500, 2000)).unwrap_err();
        assert_eq!(
            error,
            LayoutError::StartMismatch {
                index: 0,
                expected: 100,
                actual: 0
            }
        );
    }

    #[test]
    fn index_out_of_order() {
        let error = two_chunk_builder().push(entry(1, 100, 2400, 2000)).unwrap_err();
        assert_eq!(
            error,
            LayoutError::IndexMismatch {
                expected: 0,
                actual: 1
            }
        );
    }

    #[test]
    fn compressed_overflow_is_caught_before_terminal_checks() {
        let error = two_chunk_builder().push(entry(0, 100, 4901, 2000)).unwrap_err();
        assert_eq!(
            error,
            LayoutError::CompressedSizeOverflow {
                index: 0,
                end: 5001,
                total: 5000
            }
        );
    }

    #[test]
    fn saturating_compressed_end() {
        let error = two_chunk_builder()
            .push(entry(0, 100, u64::MAX, 2000))
            .unwrap_err();
        assert!(matches!(
            error,
            LayoutError::CompressedSizeOverflow { end: u64::MAX, .. }
        ));
    }

    #[test]
    fn non_terminal_chunk_must_leave_data() {
        let error = two_chunk_builder().push(entry(0, 100, 2400, 4900)).unwrap_err();
        assert_eq!(
            error,
            LayoutError::OriginalSizeOverflow {
                index: 0,
                end: 4900,
                total: 4900
            }
        );
    }

    #[test]
    fn terminal_chunk_must_end_at_totals() {
        let builder = more(two_chunk_builder().push(entry(0, 100, 2400, 2000)).unwrap());
        assert_eq!(
            builder.clone().push(entry(1, 2500, 2499, 2900)).unwrap_err(),
            LayoutError::CompressedSizeMismatch {
                index: 1,
                end: 4999,
                total: 5000
            }
        );
        assert_eq!(
            builder.push(entry(1, 2500, 2500, 2899)).unwrap_err(),
            LayoutError::OriginalSizeMismatch {
                index: 1,
                end: 4899,
                total: 4900
            }
        );
    }
}
