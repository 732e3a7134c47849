use std::{fmt, ops::Range};

/// The two totals known independently of the report: the sizes of the compressed container and
/// of the original file it was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSizes {
    pub compressed: u64,
    pub original: u64,
}

impl ContainerSizes {
    pub fn new(compressed: u64, original: u64) -> Self {
        Self {
            compressed,
            original,
        }
    }
}

/// Global scalars declared by the report before the chunk table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// Size of the data section as declared by the report.
    pub data_size: u64,
    /// Header overhead. This is where the first chunk starts in the compressed stream.
    pub size_diff: u64,
    pub chunk_count: u64,
}

/// One region of the container, positioned in both the compressed and the original stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDescriptor {
    pub compressed_start: u64,
    pub compressed_size: u64,
    pub original_start: u64,
    pub original_size: u64,
    /// Checksum column of the chunk row. Opaque; only kept so that the layout can be written
    /// back out.
    pub checksum: String,
}

impl ChunkDescriptor {
    pub fn compressed_end(&self) -> u64 {
        self.compressed_start.saturating_add(self.compressed_size)
    }

    pub fn original_end(&self) -> u64 {
        self.original_start.saturating_add(self.original_size)
    }

    pub fn compressed_range(&self) -> Range<u64> {
        self.compressed_start..self.compressed_end()
    }

    pub fn original_range(&self) -> Range<u64> {
        self.original_start..self.original_end()
    }
}

impl fmt::Display for ChunkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compressed {}..{} ({} bytes), original {}..{} ({} bytes)",
            self.compressed_start,
            self.compressed_end(),
            self.compressed_size,
            self.original_start,
            self.original_end(),
            self.original_size,
        )
    }
}

/// Fully validated chunk layout of a container.
///
/// The only way to obtain one is through [`LayoutBuilder`][crate::validator::LayoutBuilder],
/// which checks every chunk as it is appended. Once built the layout cannot be modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkLayout {
    sizes: ContainerSizes,
    params: LayoutParams,
    chunks: Vec<ChunkDescriptor>,
}

impl ChunkLayout {
    pub(crate) fn new(
        sizes: ContainerSizes,
        params: LayoutParams,
        chunks: Vec<ChunkDescriptor>,
    ) -> Self {
        Self {
            sizes,
            params,
            chunks,
        }
    }

    pub fn sizes(&self) -> ContainerSizes {
        self.sizes
    }

    pub fn params(&self) -> LayoutParams {
        self.params
    }

    pub fn chunks(&self) -> &[ChunkDescriptor] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Always `false` for a layout that passed validation, since at least one chunk is required.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChunkDescriptor> {
        self.chunks.iter()
    }
}

impl<'a> IntoIterator for &'a ChunkLayout {
    type Item = &'a ChunkDescriptor;
    type IntoIter = std::slice::Iter<'a, ChunkDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
