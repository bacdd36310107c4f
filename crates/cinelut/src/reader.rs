//! Cursor over an in-memory LUT source.
//!
//! All five formats are line-oriented, but CSP shaper curves are streams of
//! whitespace-separated floats that may or may not share a line. The reader
//! therefore serves both granularities over the same position.

use std::str::FromStr;

use crate::error::{LutError, LutResult};

/// Returns true for lines a parser may skip: blank or `#` comments.
pub(crate) fn skip_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Sequential reader over the source text.
pub(crate) struct LutReader<'a> {
    rest: &'a str,
}

impl<'a> LutReader<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { rest: source }
    }

    /// Next raw line, without its terminator. `None` at end of input.
    pub(crate) fn next_line(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let (line, rest) = match self.rest.find('\n') {
            Some(at) => (&self.rest[..at], &self.rest[at + 1..]),
            None => (self.rest, ""),
        };
        self.rest = rest;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Next raw line, where running out of input is a data error.
    pub(crate) fn require_line(&mut self) -> LutResult<&'a str> {
        self.next_line()
            .ok_or_else(|| LutError::MalformedData("unexpected end of input".into()))
    }

    /// Next line that is neither blank nor a comment.
    pub(crate) fn require_content_line(&mut self) -> LutResult<&'a str> {
        loop {
            let line = self.require_line()?;
            if !skip_line(line) {
                return Ok(line);
            }
        }
    }

    /// Next whitespace-delimited token, crossing line boundaries.
    pub(crate) fn next_word(&mut self) -> LutResult<&'a str> {
        let trimmed = self.rest.trim_start();
        if trimmed.is_empty() {
            self.rest = trimmed;
            return Err(LutError::MalformedData("unexpected end of input".into()));
        }
        let end = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(end);
        self.rest = rest;
        Ok(word)
    }

    /// Next token parsed as a float.
    pub(crate) fn next_f32(&mut self) -> LutResult<f32> {
        let word = self.next_word()?;
        word.parse()
            .map_err(|_| LutError::MalformedData(format!("bad numeric literal: `{word}`")))
    }
}

/// Parses the first `N` whitespace-separated fields of `line`.
///
/// Trailing tokens are ignored, matching the tolerance of the tools that
/// produce these files; missing or unparseable fields are a data error.
pub(crate) fn parse_fields<T, const N: usize>(line: &str) -> LutResult<[T; N]>
where
    T: FromStr + Default + Copy,
{
    let mut words = line.split_whitespace();
    let mut out = [T::default(); N];
    for slot in &mut out {
        let word = words
            .next()
            .ok_or_else(|| LutError::MalformedData(format!("expected {N} fields: `{line}`")))?;
        *slot = word
            .parse()
            .map_err(|_| LutError::MalformedData(format!("bad numeric literal: `{word}`")))?;
    }
    Ok(out)
}

/// Parses the first whitespace-separated token of `text` as an integer.
pub(crate) fn first_int<T>(text: &str) -> LutResult<T>
where
    T: FromStr + Default + Copy,
{
    let [value] = parse_fields::<T, 1>(text)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_and_crlf() {
        let mut reader = LutReader::new("one\r\ntwo\nthree");
        assert_eq!(reader.next_line(), Some("one"));
        assert_eq!(reader.next_line(), Some("two"));
        assert_eq!(reader.next_line(), Some("three"));
        assert_eq!(reader.next_line(), None);
    }

    #[test]
    fn content_lines_skip_comments_and_blanks() {
        let mut reader = LutReader::new("# header\n\n  \ndata 1 2\n");
        assert_eq!(reader.require_content_line().unwrap(), "data 1 2");
        assert!(reader.require_content_line().is_err());
    }

    #[test]
    fn words_cross_line_boundaries() {
        let mut reader = LutReader::new("0.0 0.5\n1.0\n");
        assert_eq!(reader.next_f32().unwrap(), 0.0);
        assert_eq!(reader.next_f32().unwrap(), 0.5);
        assert_eq!(reader.next_f32().unwrap(), 1.0);
        assert!(reader.next_word().is_err());
    }

    #[test]
    fn word_then_line_resumes_after_token() {
        let mut reader = LutReader::new("1.0 2.0\nnext line\n");
        assert_eq!(reader.next_f32().unwrap(), 1.0);
        assert_eq!(reader.next_f32().unwrap(), 2.0);
        // Remainder of the consumed line is blank and gets skipped.
        assert_eq!(reader.require_content_line().unwrap(), "next line");
    }

    #[test]
    fn fields_ignore_trailing_tokens() {
        let [r, g, b] = parse_fields::<f32, 3>("0.1 0.2 0.3 extra").unwrap();
        assert_eq!((r, g, b), (0.1, 0.2, 0.3));
        assert!(parse_fields::<f32, 3>("0.1 0.2").is_err());
        assert!(parse_fields::<f32, 3>("0.1 0.2 zap").is_err());
    }
}
