use chunkwise_layout::{
    validator::{validate_chunk_count, validate_data_size, LayoutBuilder, Progress},
    ChunkLayout, ContainerSizes, LayoutError, LayoutParams,
};
use tracing::{debug, trace};

use crate::{error::ParseError, lexer::Line, shape};

/// What the parser has learned so far. Each state carries exactly the data that is known once
/// the state is reached.
#[derive(Debug, Clone)]
enum State {
    AwaitDataSize,
    AwaitChunkCount { data_size: u64, size_diff: u64 },
    AwaitChunkTableHeader { params: LayoutParams },
    ParseChunk { builder: LayoutBuilder },
    Drain { layout: ChunkLayout },
}

/// Data-less mirror of the parser's state, for inspection and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    AwaitDataSize,
    AwaitChunkCount,
    AwaitChunkTableHeader,
    ParseChunk,
    Drain,
}

/// Line-at-a-time parser for the structural report of a zchunk container.
///
/// Until the chunk table begins, lines that don't carry the awaited declaration are skipped, as
/// the report is interleaved with human-readable lines the parser has no use for. Inside the
/// chunk table every line must be a chunk row. After the last declared chunk, the rest of the
/// report is ignored, except for stray chunk rows, which are an error.
///
/// Feeding a line consumes the parser and hands it back on success, so a parser that has failed
/// can never be fed again.
#[derive(Debug, Clone)]
pub struct ReportParser {
    sizes: ContainerSizes,
    state: State,
}

impl ReportParser {
    pub fn new(sizes: ContainerSizes) -> Self {
        Self {
            sizes,
            state: State::AwaitDataSize,
        }
    }

    pub fn state(&self) -> StateKind {
        match &self.state {
            State::AwaitDataSize => StateKind::AwaitDataSize,
            State::AwaitChunkCount { .. } => StateKind::AwaitChunkCount,
            State::AwaitChunkTableHeader { .. } => StateKind::AwaitChunkTableHeader,
            State::ParseChunk { .. } => StateKind::ParseChunk,
            State::Drain { .. } => StateKind::Drain,
        }
    }

    fn chunks_parsed(&self) -> u64 {
        match &self.state {
            State::ParseChunk { builder } => builder.accepted(),
            State::Drain { layout } => layout.len() as u64,
            _ => 0,
        }
    }

    pub fn feed(self, line: Line<'_>) -> Result<Self, ParseError> {
        trace!("Read line {line}");

        let sizes = self.sizes;
        let at_line = |source: LayoutError| ParseError::Layout {
            line: line.number,
            source,
        };

        let state = match self.state {
            State::AwaitDataSize => match shape::data_size(line.text) {
                Some(data_size) => {
                    let size_diff = validate_data_size(sizes, data_size).map_err(at_line)?;
                    debug!("Data size is {data_size} (header overhead {size_diff})");
                    State::AwaitChunkCount {
                        data_size,
                        size_diff,
                    }
                }
                None => State::AwaitDataSize,
            },

            State::AwaitChunkCount {
                data_size,
                size_diff,
            } => match shape::chunk_count(line.text) {
                Some(chunk_count) => {
                    let chunk_count = validate_chunk_count(chunk_count).map_err(at_line)?;
                    debug!("Chunk count is {chunk_count}");
                    State::AwaitChunkTableHeader {
                        params: LayoutParams {
                            data_size,
                            size_diff,
                            chunk_count,
                        },
                    }
                }
                None => State::AwaitChunkCount {
                    data_size,
                    size_diff,
                },
            },

            State::AwaitChunkTableHeader { params } => {
                if shape::is_chunk_table_header(line.text) {
                    debug!("Chunk table begins at line {}", line.number);
                    State::ParseChunk {
                        builder: LayoutBuilder::new(sizes, params),
                    }
                } else {
                    State::AwaitChunkTableHeader { params }
                }
            }

            State::ParseChunk { builder } => {
                let entry =
                    shape::chunk_row(line.text).ok_or_else(|| ParseError::MalformedReport {
                        line: line.number,
                        text: line.text.to_owned(),
                    })?;
                match builder.push(entry).map_err(at_line)? {
                    Progress::More(builder) => State::ParseChunk { builder },
                    Progress::Complete(layout) => {
                        debug!("All {} chunks parsed", layout.len());
                        State::Drain { layout }
                    }
                }
            }

            State::Drain { layout } => {
                if shape::chunk_row(line.text).is_some() {
                    return Err(ParseError::UnexpectedTrailingLine {
                        line: line.number,
                        text: line.text.to_owned(),
                    });
                }
                State::Drain { layout }
            }
        };

        Ok(Self { sizes, state })
    }

    /// Ends the report. Succeeds only if every declared chunk has been parsed.
    pub fn finish(self) -> Result<ChunkLayout, ParseError> {
        let state = self.state();
        let chunks_parsed = self.chunks_parsed();
        match self.state {
            State::Drain { layout } => Ok(layout),
            _ => Err(ParseError::TruncatedReport {
                state,
                chunks_parsed,
            }),
        }
    }
}

pub fn parse_report_lines<'a>(
    lines: impl IntoIterator<Item = Line<'a>>,
    sizes: ContainerSizes,
) -> Result<ChunkLayout, ParseError> {
    lines
        .into_iter()
        .try_fold(ReportParser::new(sizes), ReportParser::feed)?
        .finish()
}
