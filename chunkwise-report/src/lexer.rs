use std::fmt;

/// A single physical line of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number, for diagnostics.
    pub number: usize,
    /// Text of the line without its terminator.
    pub text: &'a str,
}

impl<'a> fmt::Display for Line<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.number, self.text)
    }
}

/// Splits report text into [`Line`]s.
///
/// `\n`, `\r\n`, and a lone `\r` all end a line. A terminator at the very end of the input does
/// not start another, empty line.
#[derive(Debug, Clone)]
pub struct ReportLexer<'a> {
    rest: &'a str,
    number: usize,
}

impl<'a> ReportLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            number: 0,
        }
    }
}

impl<'a> Iterator for ReportLexer<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let (text, rest) = match self.rest.find(['\n', '\r']) {
            Some(end) => {
                let terminator_len = if self.rest[end..].starts_with("\r\n") {
                    2
                } else {
                    1
                };
                (&self.rest[..end], &self.rest[end + terminator_len..])
            }
            None => (self.rest, ""),
        };
        self.rest = rest;
        self.number += 1;

        Some(Line {
            number: self.number,
            text,
        })
    }
}
