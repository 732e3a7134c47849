//! Parser for the structural report `zck_read_header -c` prints for a zchunk container.

use chunkwise_layout::{ChunkLayout, ContainerSizes};

pub mod error;
pub mod lexer;
pub mod parser;
pub mod shape;
pub mod writer;

pub use error::ParseError;
pub use lexer::{Line, ReportLexer};
pub use parser::{parse_report_lines, ReportParser, StateKind};
pub use writer::{render_report, ReportWriter, WriteError};

/// Parses a whole report into a validated [`ChunkLayout`].
///
/// `sizes` are the actual sizes of the compressed and the original file, which the layout
/// declared by the report is checked against.
pub fn parse_report(text: &str, sizes: ContainerSizes) -> Result<ChunkLayout, ParseError> {
    parse_report_lines(ReportLexer::new(text), sizes)
}
