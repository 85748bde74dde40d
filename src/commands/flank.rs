//! Flank command implementation.
//!
//! Replaces each valid interval with the region of `size` bases immediately
//! upstream, downstream, or on both sides of it. Strand decides which end
//! is upstream. Coordinates are not clamped and may go negative.

use crate::config::{Direction, FlankConfig};
use crate::output::RowWriter;
use crate::row::{Row, RowError, Strand};
use crate::tabular::{FlankError, TabReader};
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Compute the flanking rows for one validated row.
///
/// `Upstream`/`Downstream` yield one row; `Both` yields the left flank then
/// the right flank, each computed from the original coordinates.
pub fn compute_flanks<'a>(
    row: &Row<'a>,
    config: &FlankConfig,
) -> Result<Vec<Row<'a>>, RowError> {
    let size = config.size;
    let overflow = || RowError::CoordinateOverflow {
        start: row.start,
        end: row.end,
    };
    let left = || {
        row.start
            .checked_sub(size)
            .map(|s| row.with_coords(s, row.start))
            .ok_or_else(overflow)
    };
    let right = || {
        row.end
            .checked_add(size)
            .map(|e| row.with_coords(row.end, e))
            .ok_or_else(overflow)
    };

    let flanks = match (config.direction, row.strand) {
        (Direction::Upstream, Strand::Plus) | (Direction::Downstream, Strand::Minus) => {
            vec![left()?]
        }
        (Direction::Upstream, Strand::Minus) | (Direction::Downstream, Strand::Plus) => {
            vec![right()?]
        }
        (Direction::Both, _) => vec![left()?, right()?],
    };
    Ok(flanks)
}

/// The first rejected line of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLine {
    pub line_number: usize,
    pub text: String,
    pub reason: RowError,
}

/// Run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlankStats {
    /// Non-blank, non-comment lines seen.
    pub lines_considered: usize,
    pub lines_skipped: usize,
    pub rows_written: usize,
    pub first_invalid: Option<InvalidLine>,
}

impl FlankStats {
    fn record_skip(&mut self, line_number: usize, text: &[u8], reason: RowError) {
        self.lines_skipped += 1;
        if self.first_invalid.is_none() {
            self.first_invalid = Some(InvalidLine {
                line_number,
                text: String::from_utf8_lossy(text).into_owned(),
                reason,
            });
        }
    }

    /// True when no considered line was usable, including when there were
    /// no data lines at all.
    pub fn all_skipped(&self) -> bool {
        self.lines_skipped == self.lines_considered
    }

    /// Data-quality notice for a partially skipped input, if any.
    pub fn skipped_notice(&self) -> Option<String> {
        if self.lines_skipped == 0 || self.all_skipped() {
            return None;
        }
        let first = self.first_invalid.as_ref()?;
        Some(format!(
            "(Data issue: skipped {} invalid lines starting at line #{} which is \"{}\")",
            self.lines_skipped, first.line_number, first.text
        ))
    }
}

impl fmt::Display for FlankStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Considered: {}, Skipped: {}, Written: {}",
            self.lines_considered, self.lines_skipped, self.rows_written
        )
    }
}

/// Flank command.
#[derive(Debug, Clone)]
pub struct FlankCommand {
    pub config: FlankConfig,
}

impl FlankCommand {
    pub fn new(config: FlankConfig) -> Self {
        Self { config }
    }

    /// Notice printed when every considered line was rejected.
    pub fn all_skipped_notice(&self) -> String {
        format!(
            "Data issue: skipped all lines in your input. Check that the chrom/start/end/strand columns ({}) match the input file.",
            self.config.columns
        )
    }

    /// Final status line.
    pub fn status_line(&self) -> String {
        format!(
            "Flank length : {} and location : {}",
            self.config.size, self.config.direction
        )
    }

    /// Run on files. `-` selects stdin/stdout.
    ///
    /// The input is opened before the output, so a missing input never
    /// creates or truncates the output file.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<FlankStats, FlankError> {
        let input = input.as_ref();
        if input == Path::new("-") {
            let stdin = io::stdin();
            self.run_to_path(TabReader::new(stdin.lock()), output.as_ref())
        } else {
            self.run_to_path(TabReader::from_path(input)?, output.as_ref())
        }
    }

    fn run_to_path<R: Read>(
        &self,
        reader: TabReader<R>,
        output: &Path,
    ) -> Result<FlankStats, FlankError> {
        if output == Path::new("-") {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            self.flank_streaming(reader, &mut handle)
        } else {
            let mut file = File::create(output).map_err(|source| FlankError::OutputOpen {
                path: output.to_path_buf(),
                source,
            })?;
            self.flank_streaming(reader, &mut file)
        }
    }

    /// Run over any readable source.
    pub fn run_reader<R: Read, W: Write>(
        &self,
        input: R,
        output: &mut W,
    ) -> Result<FlankStats, FlankError> {
        self.flank_streaming(TabReader::new(input), output)
    }

    /// Single pass over `reader`, writing flanks to `output`.
    pub fn flank_streaming<R: Read, W: Write>(
        &self,
        mut reader: TabReader<R>,
        output: &mut W,
    ) -> Result<FlankStats, FlankError> {
        let mut writer = RowWriter::new(output);
        let mut stats = FlankStats::default();

        while let Some(line) = reader.next_line()? {
            stats.lines_considered += 1;

            let flanks = Row::parse(line.text, &self.config.columns)
                .and_then(|row| compute_flanks(&row, &self.config));

            match flanks {
                Ok(rows) => {
                    for row in &rows {
                        writer.write_row(row)?;
                    }
                }
                Err(reason) => {
                    log::debug!("skipping line {}: {}", line.number, reason);
                    stats.record_skip(line.number, line.text, reason);
                }
            }
        }

        writer.flush()?;
        stats.rows_written = writer.rows_written();
        log::debug!(
            "flank: {} lines read, {} considered",
            reader.line_number(),
            stats.lines_considered
        );
        Ok(stats)
    }
}
