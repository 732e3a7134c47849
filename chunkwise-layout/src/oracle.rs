//! Byte-level correspondence check between a single chunk and the original file.
//!
//! The chunk-extraction tool decodes one chunk of the container on its own. If the layout we
//! reconstructed from the report is right, its output must be exactly the bytes found at that
//! chunk's original-space range in the file that was compressed.

use tracing::debug;

use crate::{
    error::{LayoutError, VerifyError},
    layout::{ChunkDescriptor, ChunkLayout},
};

/// Picks the chunk to verify: the first one that does not start at the very beginning of the
/// original data.
///
/// A layout without such a chunk (eg. a single-chunk container) cannot be verified this way,
/// which is reported as [`LayoutError::NoWitnessChunk`] rather than silently skipped.
pub fn select_witness(layout: &ChunkLayout) -> Result<&ChunkDescriptor, LayoutError> {
    layout
        .iter()
        .find(|chunk| chunk.original_start > 0)
        .ok_or(LayoutError::NoWitnessChunk {
            chunk_count: layout.len(),
        })
}

pub fn verify_slice(
    witness: &ChunkDescriptor,
    total_original_size: u64,
    original_bytes: &[u8],
    produced_bytes: &[u8],
) -> Result<(), VerifyError> {
    let original_len = original_bytes.len() as u64;
    if original_len != total_original_size {
        return Err(VerifyError::OriginalLengthMismatch {
            expected: total_original_size,
            actual: original_len,
        });
    }

    let produced_len = produced_bytes.len() as u64;
    if produced_len != witness.original_size {
        return Err(VerifyError::WitnessLengthMismatch {
            expected: witness.original_size,
            actual: produced_len,
        });
    }

    let (start, end) = (witness.original_start, witness.original_end());
    let expected = usize::try_from(start)
        .ok()
        .zip(usize::try_from(end).ok())
        .and_then(|(start, end)| original_bytes.get(start..end))
        .ok_or(VerifyError::WitnessOutOfBounds {
            start,
            end,
            len: original_len,
        })?;

    debug!("Comparing {produced_len} bytes against original range {start}..{end}");
    if let Some(offset) = expected
        .iter()
        .zip(produced_bytes)
        .position(|(a, b)| a != b)
    {
        return Err(VerifyError::WitnessMismatch {
            original_start: start,
            original_end: end,
            first_difference: start + offset as u64,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        layout::{ContainerSizes, LayoutParams},
        validator::{ChunkEntry, LayoutBuilder, Progress},
    };

    use super::*;

    fn build(sizes: ContainerSizes, size_diff: u64, chunks: &[(u64, u64)]) -> ChunkLayout {
        let mut builder = LayoutBuilder::new(
            sizes,
            LayoutParams {
                data_size: sizes.compressed - size_diff,
                size_diff,
                chunk_count: chunks.len() as u64,
            },
        );
        let mut start = size_diff;
        for (index, &(compressed_size, size)) in chunks.iter().enumerate() {
            let entry = ChunkEntry {
                index: index as u64,
                checksum: "-",
                start,
                compressed_size,
                size,
            };
            start += compressed_size;
            match builder.push(entry).unwrap() {
                Progress::More(next) => builder = next,
                Progress::Complete(layout) => return layout,
            }
        }
        unreachable!("builder never completed")
    }

    fn original() -> Vec<u8> {
        (0..4900u32).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn witness_is_second_chunk() {
        let layout = build(ContainerSizes::new(5000, 4900), 100, &[(2400, 2000), (2500, 2900)]);
        let witness = select_witness(&layout).unwrap();
        assert_eq!(witness, &layout.chunks()[1]);
    }

    #[test]
    fn witness_skips_empty_leading_chunks() {
        let layout = build(
            ContainerSizes::new(5000, 4900),
            100,
            &[(10, 0), (2390, 2000), (2500, 2900)],
        );
        let witness = select_witness(&layout).unwrap();
        assert_eq!(witness.original_start, 2000);
        assert_eq!(witness.compressed_start, 2500);
    }

    #[test]
    fn single_chunk_has_no_witness() {
        let layout = build(ContainerSizes::new(5000, 4900), 100, &[(4900, 4900)]);
        assert_eq!(
            select_witness(&layout),
            Err(LayoutError::NoWitnessChunk { chunk_count: 1 })
        );
    }

    #[test]
    fn matching_slice_verifies() {
        let layout = build(ContainerSizes::new(5000, 4900), 100, &[(2400, 2000), (2500, 2900)]);
        let witness = select_witness(&layout).unwrap();
        let original = original();
        verify_slice(witness, 4900, &original, &original[2000..]).unwrap();
    }

    #[test]
    fn length_checks() {
        let layout = build(ContainerSizes::new(5000, 4900), 100, &[(2400, 2000), (2500, 2900)]);
        let witness = select_witness(&layout).unwrap();
        let original = original();
        assert_eq!(
            verify_slice(witness, 4900, &original[1..], &original[2000..]),
            Err(VerifyError::OriginalLengthMismatch {
                expected: 4900,
                actual: 4899
            })
        );
        assert_eq!(
            verify_slice(witness, 4900, &original, &original[2001..]),
            Err(VerifyError::WitnessLengthMismatch {
                expected: 2900,
                actual: 2899
            })
        );
    }

    #[test]
    fn witness_outside_original() {
        let witness = ChunkDescriptor {
            compressed_start: 0,
            compressed_size: 1,
            original_start: 10,
            original_size: 5,
            checksum: String::new(),
        };
        assert_eq!(
            verify_slice(&witness, 12, &[0; 12], &[0; 5]),
            Err(VerifyError::WitnessOutOfBounds {
                start: 10,
                end: 15,
                len: 12
            })
        );
    }

    #[test]
    fn mismatch_reports_first_difference() {
        let layout = build(ContainerSizes::new(5000, 4900), 100, &[(2400, 2000), (2500, 2900)]);
        let witness = select_witness(&layout).unwrap();
        let original = original();
        let mut produced = original[2000..].to_vec();
        produced[17] ^= 0xff;
        assert_eq!(
            verify_slice(witness, 4900, &original, &produced),
            Err(VerifyError::WitnessMismatch {
                original_start: 2000,
                original_end: 4900,
                first_difference: 2017,
            })
        );
    }
}
