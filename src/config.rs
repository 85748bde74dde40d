//! Run configuration for the flank command.
//!
//! Column positions are given on the command line as a 1-based
//! `chrom,start,end,strand` list and stored 0-based. A missing strand
//! column means every row is treated as `+`.

use crate::tabular::FlankError;
use std::fmt;
use std::str::FromStr;

/// Default column layout (BED6: chrom, start, end, strand in column 6).
pub const DEFAULT_COLUMNS: &str = "1,2,3,6";

/// Which side(s) of an interval to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// 5' of the feature relative to its strand.
    Upstream,
    /// 3' of the feature relative to its strand.
    Downstream,
    /// Both sides, independent of strand.
    Both,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Upstream => "Upstream",
            Direction::Downstream => "Downstream",
            Direction::Both => "Both",
        }
    }
}

impl FromStr for Direction {
    type Err = FlankError;

    /// Case-sensitive: only `Upstream`, `Downstream` and `Both` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Upstream" => Ok(Direction::Upstream),
            "Downstream" => Ok(Direction::Downstream),
            "Both" => Ok(Direction::Both),
            other => Err(FlankError::InvalidDirection(format!(
                "'{}' (expected one of: Upstream, Downstream, Both)",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 0-based positions of the coordinate columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub chrom: usize,
    pub start: usize,
    pub end: usize,
    /// `None` when the input has no strand column.
    pub strand: Option<usize>,
}

impl ColumnSpec {
    /// Build a spec from 0-based indices.
    pub fn new(
        chrom: usize,
        start: usize,
        end: usize,
        strand: Option<usize>,
    ) -> Result<Self, FlankError> {
        if start == end {
            return Err(FlankError::InvalidColumns(format!(
                "start and end cannot share column {}",
                start + 1
            )));
        }
        Ok(Self {
            chrom,
            start,
            end,
            strand,
        })
    }

    /// Minimum number of fields a row needs to hold every configured column.
    #[inline]
    pub fn min_fields(&self) -> usize {
        let max = self.chrom.max(self.start).max(self.end);
        self.strand.map_or(max, |s| max.max(s)) + 1
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            chrom: 0,
            start: 1,
            end: 2,
            strand: Some(5),
        }
    }
}

/// Parse one 1-based column entry, accepting an optional `c` prefix.
fn parse_column(entry: &str, name: &str) -> Result<usize, FlankError> {
    let digits = entry.trim();
    let digits = digits.strip_prefix('c').unwrap_or(digits);
    match digits.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(FlankError::InvalidColumns(format!(
            "invalid {} column '{}'",
            name, entry
        ))),
    }
}

impl FromStr for ColumnSpec {
    type Err = FlankError;

    /// Parse `chrom,start,end[,strand]`.
    ///
    /// A strand entry of `0`, an empty entry (`1,2,3,`) or no entry at all
    /// means there is no strand column.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() < 3 || parts.len() > 4 {
            return Err(FlankError::InvalidColumns(format!(
                "expected chrom,start,end[,strand], got '{}'",
                s
            )));
        }

        let chrom = parse_column(parts[0], "chrom")?;
        let start = parse_column(parts[1], "start")?;
        let end = parse_column(parts[2], "end")?;

        let strand = match parts.get(3).map(|p| p.trim()) {
            None | Some("") | Some("0") | Some("c0") => None,
            Some(entry) => Some(parse_column(entry, "strand")?),
        };

        ColumnSpec::new(chrom, start, end, strand)
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},", self.chrom + 1, self.start + 1, self.end + 1)?;
        match self.strand {
            Some(s) => write!(f, "{}", s + 1),
            None => write!(f, "0"),
        }
    }
}

/// Immutable settings for one flank run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlankConfig {
    pub columns: ColumnSpec,
    /// Flank length in bases.
    pub size: i64,
    pub direction: Direction,
}

impl FlankConfig {
    pub fn new(columns: ColumnSpec, size: i64, direction: Direction) -> Self {
        Self {
            columns,
            size,
            direction,
        }
    }
}
