//! Buffered row output.
//!
//! Rewritten coordinates are formatted with itoa; every other field is
//! copied through as raw bytes.

use crate::row::{OutputField, Row};
use crate::tabular::FlankError;
use std::io::{BufWriter, Write};

/// Buffer size for RowWriter (256KB).
const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// Tab-joined row writer.
pub struct RowWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    rows_written: usize,
}

impl<W: Write> RowWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, output),
            itoa_buf: itoa::Buffer::new(),
            rows_written: 0,
        }
    }

    /// Write one row followed by a newline.
    pub fn write_row(&mut self, row: &Row<'_>) -> Result<(), FlankError> {
        for (i, field) in row.fields().enumerate() {
            if i > 0 {
                self.writer.write_all(b"\t")?;
            }
            match field {
                OutputField::Coord(n) => {
                    self.writer.write_all(self.itoa_buf.format(n).as_bytes())?
                }
                OutputField::Raw(bytes) => self.writer.write_all(bytes)?,
            }
        }
        self.writer.write_all(b"\n")?;
        self.rows_written += 1;
        Ok(())
    }

    /// Rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> Result<(), FlankError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSpec;

    #[test]
    fn test_write_rows() {
        let cols: ColumnSpec = "1,2,3,6".parse().unwrap();
        let row = Row::parse(b"chr1\t100\t200\tg\t0\t+", &cols).unwrap();

        let mut out = Vec::new();
        {
            let mut writer = RowWriter::new(&mut out);
            writer.write_row(&row).unwrap();
            writer.write_row(&row.with_coords(-5, 100)).unwrap();
            assert_eq!(writer.rows_written(), 2);
            writer.flush().unwrap();
        }

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "chr1\t100\t200\tg\t0\t+\nchr1\t-5\t100\tg\t0\t+\n"
        );
    }

    #[test]
    fn test_raw_fields_pass_through_unchanged() {
        let cols: ColumnSpec = "1,2,3".parse().unwrap();
        let line = b"chr1\t 7 \t9\tna\xffme\t";
        let row = Row::parse(line, &cols).unwrap();

        let mut out = Vec::new();
        {
            let mut writer = RowWriter::new(&mut out);
            writer.write_row(&row).unwrap();
            writer.flush().unwrap();
        }

        assert_eq!(out, b"chr1\t7\t9\tna\xffme\t\n".to_vec());
    }
}
