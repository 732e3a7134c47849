use std::fmt::Write;

use chunkwise_layout::{ChunkDescriptor, ChunkLayout};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
    #[error("checksum {1:?} of chunk {0} cannot be written as a single table column")]
    UnrepresentableChecksum(usize, String),
}

/// Writes layouts out in the same shape as the report they are parsed from, so that the output
/// can be fed back into the parser.
#[derive(Debug, Clone)]
pub struct ReportWriter<W> {
    writer: W,
}

impl<W> ReportWriter<W>
where
    W: Write,
{
    const COLUMN_WIDTH: usize = 12;

    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn write_layout(&mut self, layout: &ChunkLayout) -> Result<(), WriteError> {
        let params = layout.params();
        writeln!(self.writer, "Data size: {}", params.data_size)?;
        writeln!(self.writer, "Chunk count: {}", params.chunk_count)?;
        writeln!(
            self.writer,
            "{:>w$} Checksum {:>w$} {:>w$} {:>w$}",
            "Chunk",
            "Start",
            "Comp size",
            "Size",
            w = Self::COLUMN_WIDTH
        )?;
        for (index, chunk) in layout.iter().enumerate() {
            self.write_chunk(index, chunk)?;
        }
        Ok(())
    }

    fn write_chunk(&mut self, index: usize, chunk: &ChunkDescriptor) -> Result<(), WriteError> {
        let checksum = &chunk.checksum;
        if checksum.is_empty() || checksum.contains(char::is_whitespace) {
            return Err(WriteError::UnrepresentableChecksum(index, checksum.clone()));
        }
        writeln!(
            self.writer,
            "{index:>w$} {checksum} {:>w$} {:>w$} {:>w$}",
            chunk.compressed_start,
            chunk.compressed_size,
            chunk.original_size,
            w = Self::COLUMN_WIDTH
        )?;
        Ok(())
    }
}

/// Renders `layout` into report text.
pub fn render_report(layout: &ChunkLayout) -> Result<String, WriteError> {
    let mut writer = ReportWriter::new(String::new());
    writer.write_layout(layout)?;
    Ok(writer.into_inner())
}
