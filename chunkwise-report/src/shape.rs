//! Recognizers for the line shapes the parser anchors on.
//!
//! Keywords are matched ASCII case-insensitively and any run of whitespace is accepted between
//! them. Numbers are plain base-10 with no leading zeros (other than `0` itself); anything else,
//! including numbers that do not fit in a `u64`, means the line does not have the shape.

use chunkwise_layout::validator::ChunkEntry;

struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn space0(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn space1(&mut self) -> Option<()> {
        let trimmed = self.rest.trim_start();
        (trimmed.len() < self.rest.len()).then(|| self.rest = trimmed)
    }

    fn keyword(&mut self, keyword: &str) -> Option<()> {
        let head = self.rest.get(..keyword.len())?;
        head.eq_ignore_ascii_case(keyword)
            .then(|| self.rest = &self.rest[keyword.len()..])
    }

    fn number(&mut self) -> Option<u64> {
        let len = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        let digits = &self.rest[..len];
        let number = parse_number(digits)?;
        self.rest = &self.rest[len..];
        Some(number)
    }

    fn end(&mut self) -> Option<()> {
        self.space0();
        self.rest.is_empty().then_some(())
    }

    /// Matches `keywords` separated by whitespace, followed by `:` and a number.
    fn declaration(mut self, keywords: &[&str]) -> Option<u64> {
        self.space0();
        for (i, keyword) in keywords.iter().enumerate() {
            if i != 0 {
                self.space1()?;
            }
            self.keyword(keyword)?;
        }
        self.space0();
        self.keyword(":")?;
        self.space0();
        let number = self.number()?;
        self.end()?;
        Some(number)
    }
}

/// Parses a base-10 number, rejecting signs, leading zeros, and empty input.
fn parse_number(digits: &str) -> Option<u64> {
    if digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return None;
    }
    digits.parse().ok()
}

/// `Data size: <n>`
pub fn data_size(text: &str) -> Option<u64> {
    Scanner::new(text).declaration(&["Data", "size"])
}

/// `Chunk count: <n>`
pub fn chunk_count(text: &str) -> Option<u64> {
    Scanner::new(text).declaration(&["Chunk", "count"])
}

pub const CHUNK_TABLE_COLUMNS: [&str; 6] = ["Chunk", "Checksum", "Start", "Comp", "size", "Size"];

/// The column header line that introduces the chunk table.
pub fn is_chunk_table_header(text: &str) -> bool {
    let mut words = text.split_whitespace();
    CHUNK_TABLE_COLUMNS
        .iter()
        .all(|column| words.next().is_some_and(|word| word.eq_ignore_ascii_case(column)))
        && words.next().is_none()
}

/// A row of the chunk table: index, checksum, start, compressed size, and size.
pub fn chunk_row(text: &str) -> Option<ChunkEntry<'_>> {
    let mut fields = text.split_whitespace();
    let index = parse_number(fields.next()?)?;
    let checksum = fields.next()?;
    let start = parse_number(fields.next()?)?;
    let compressed_size = parse_number(fields.next()?)?;
    let size = parse_number(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }
    Some(ChunkEntry {
        index,
        checksum,
        start,
        compressed_size,
        size,
    })
}
