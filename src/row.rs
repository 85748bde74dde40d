//! Row model: one validated input line with its parsed coordinates.

use crate::config::ColumnSpec;
use crate::tabular::{parse_coordinate, split_fields};
use std::fmt;
use thiserror::Error;

/// Reasons a single input row is rejected.
///
/// These never stop a run; the row is dropped and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("missing {column} column {index} (row has {found} fields)")]
    MissingField {
        column: &'static str,
        index: usize,
        found: usize,
    },

    #[error("invalid {column} coordinate '{value}'")]
    InvalidCoordinate { column: &'static str, value: String },

    #[error("invalid strand '{0}' (expected '+' or '-')")]
    InvalidStrand(String),

    #[error("coordinate overflow computing flank of {start}-{end}")]
    CoordinateOverflow { start: i64, end: i64 },
}

/// Strand orientation. Rows only ever carry `+` or `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    /// Exact match on `+` / `-`; anything else is rejected.
    pub fn from_field(field: &[u8]) -> Option<Self> {
        match field {
            b"+" => Some(Strand::Plus),
            b"-" => Some(Strand::Minus),
            _ => None,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// An immutable, validated row.
///
/// `fields` borrows the original line; the start/end columns are
/// substituted with `start`/`end` on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    fields: Vec<&'a [u8]>,
    start_col: usize,
    end_col: usize,
    pub start: i64,
    pub end: i64,
    pub strand: Strand,
}

impl<'a> Row<'a> {
    /// Split and validate a data line against the configured columns.
    pub fn parse(line: &'a [u8], columns: &ColumnSpec) -> Result<Self, RowError> {
        let fields = split_fields(line);

        let field = |column: &'static str, index: usize| {
            fields
                .get(index)
                .copied()
                .ok_or(RowError::MissingField {
                    column,
                    index: index + 1,
                    found: fields.len(),
                })
        };

        field("chrom", columns.chrom)?;
        let start = coordinate("start", field("start", columns.start)?)?;
        let end = coordinate("end", field("end", columns.end)?)?;

        let strand = match columns.strand {
            None => Strand::Plus,
            Some(index) => {
                let raw = field("strand", index)?;
                Strand::from_field(raw).ok_or_else(|| {
                    RowError::InvalidStrand(String::from_utf8_lossy(raw).into_owned())
                })?
            }
        };

        Ok(Self {
            fields,
            start_col: columns.start,
            end_col: columns.end,
            start,
            end,
            strand,
        })
    }

    /// Copy of this row with new coordinates; all other fields are shared.
    pub fn with_coords(&self, start: i64, end: i64) -> Self {
        Self {
            fields: self.fields.clone(),
            start,
            end,
            ..*self
        }
    }

    /// Fields in output order, with the start/end columns replaced by
    /// `OutputField::Coord`.
    pub fn fields(&self) -> impl Iterator<Item = OutputField<'a>> + '_ {
        self.fields.iter().enumerate().map(move |(i, &raw)| {
            if i == self.start_col {
                OutputField::Coord(self.start)
            } else if i == self.end_col {
                OutputField::Coord(self.end)
            } else {
                OutputField::Raw(raw)
            }
        })
    }
}

/// One output column: a rewritten coordinate or an untouched input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputField<'a> {
    Coord(i64),
    Raw(&'a [u8]),
}

fn coordinate(column: &'static str, raw: &[u8]) -> Result<i64, RowError> {
    parse_coordinate(raw).ok_or_else(|| RowError::InvalidCoordinate {
        column,
        value: String::from_utf8_lossy(raw).into_owned(),
    })
}
