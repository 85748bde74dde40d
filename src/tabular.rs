//! Streaming reader for tab-delimited interval files.

use memchr::memchr_iter;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors that stop a run.
#[derive(Error, Debug)]
pub enum FlankError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unable to open input file '{}': {source}", path.display())]
    InputOpen { path: PathBuf, source: io::Error },

    #[error("Unable to open output file '{}': {source}", path.display())]
    OutputOpen { path: PathBuf, source: io::Error },

    #[error("Invalid columns: {0}")]
    InvalidColumns(String),

    #[error("Invalid direction: {0}")]
    InvalidDirection(String),
}

pub type Result<T> = std::result::Result<T, FlankError>;

/// A data line handed out by [`TabReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLine<'a> {
    /// 1-based physical line number, counting skipped lines.
    pub number: usize,
    /// Line content with surrounding whitespace removed.
    pub text: &'a [u8],
}

/// Line reader that skips blank and `#` comment lines.
///
/// Works on raw bytes so pass-through columns are never re-encoded.
pub struct TabReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl TabReader<File> {
    /// Open a file for reading.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FlankError::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<R: Read> TabReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(256 * 1024, reader),
            line_number: 0,
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Number of physical lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next data line, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<DataLine<'_>>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let (start, end) = trimmed_bounds(&self.buffer);
            if start == end || self.buffer[start] == b'#' {
                continue;
            }

            return Ok(Some(DataLine {
                number: self.line_number,
                text: &self.buffer[start..end],
            }));
        }
    }
}

/// Byte range of `buf` without leading and trailing ASCII whitespace.
fn trimmed_bounds(buf: &[u8]) -> (usize, usize) {
    let start = buf
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(buf.len());
    let end = buf
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    (start, end)
}

/// Split a line into its tab-separated fields.
pub fn split_fields(line: &[u8]) -> Vec<&[u8]> {
    let mut fields = Vec::with_capacity(12);
    let mut last = 0;
    for tab in memchr_iter(b'\t', line) {
        fields.push(&line[last..tab]);
        last = tab + 1;
    }
    fields.push(&line[last..]);
    fields
}

/// Parse a coordinate field as a signed integer.
///
/// Surrounding whitespace and a leading sign are accepted.
#[inline]
pub fn parse_coordinate(field: &[u8]) -> Option<i64> {
    std::str::from_utf8(field.trim_ascii()).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(content: &str) -> Vec<(usize, String)> {
        let mut reader = TabReader::new(content.as_bytes());
        let mut out = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            out.push((line.number, String::from_utf8_lossy(line.text).into_owned()));
        }
        out
    }

    #[test]
    fn test_skip_blank_and_comment_lines() {
        let lines = collect("# header\n\nchr1\t1\t2\n   \n#chr2\t3\t4\nchr3\t5\t6\n");
        assert_eq!(
            lines,
            vec![(3, "chr1\t1\t2".to_string()), (6, "chr3\t5\t6".to_string())]
        );
    }

    #[test]
    fn test_trims_line_endings() {
        let lines = collect("chr1\t1\t2\r\n  chr2\t3\t4  \n");
        assert_eq!(lines[0].1, "chr1\t1\t2");
        assert_eq!(lines[1].1, "chr2\t3\t4");
    }

    #[test]
    fn test_last_line_without_newline() {
        let lines = collect("chr1\t1\t2\nchr2\t3\t4");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], (2, "chr2\t3\t4".to_string()));
    }

    #[test]
    fn test_line_number_counts_everything() {
        let mut reader = TabReader::new("#a\n\n#b\n".as_bytes());
        assert!(reader.next_line().unwrap().is_none());
        assert_eq!(reader.line_number(), 3);
    }

    #[test]
    fn test_split_fields_keeps_empty_fields() {
        let fields = split_fields(b"chr1\t\t200\t");
        assert_eq!(fields, vec![&b"chr1"[..], &b""[..], &b"200"[..], &b""[..]]);
        assert_eq!(split_fields(b"single"), vec![&b"single"[..]]);
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate(b"100"), Some(100));
        assert_eq!(parse_coordinate(b"0"), Some(0));
        assert_eq!(parse_coordinate(b"-25"), Some(-25));
        assert_eq!(parse_coordinate(b"+7"), Some(7));
        assert_eq!(parse_coordinate(b" 42 "), Some(42));
        assert_eq!(parse_coordinate(b""), None);
        assert_eq!(parse_coordinate(b"1e3"), None);
        assert_eq!(parse_coordinate(b"abc"), None);
        assert_eq!(parse_coordinate(b"12.5"), None);
    }

    #[test]
    fn test_missing_input_file() {
        let err = TabReader::from_path("/nonexistent/dir/input.bed")
            .err()
            .unwrap();
        assert!(matches!(err, FlankError::InputOpen { .. }));
        assert!(err.to_string().starts_with("Unable to open input file"));
    }
}
