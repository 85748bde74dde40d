//! GRIT flank: flanking intervals for tab-delimited genomic regions.
//!
//! Reads an interval file with configurable chrom/start/end/strand columns
//! and writes, for every valid row, the region of a fixed size upstream,
//! downstream, or on both sides of it. Extra columns are carried through
//! untouched. Rows that fail validation are skipped and summarised.
//!
//! # Example
//!
//! ```rust
//! use grit_flank::{ColumnSpec, Direction, FlankCommand, FlankConfig};
//!
//! let columns: ColumnSpec = "1,2,3,4".parse().unwrap();
//! let cmd = FlankCommand::new(FlankConfig::new(columns, 10, Direction::Upstream));
//!
//! let mut output = Vec::new();
//! let stats = cmd.run_reader(&b"chr1\t100\t200\t+\n"[..], &mut output).unwrap();
//!
//! assert_eq!(output, b"chr1\t90\t100\t+\n");
//! assert_eq!(stats.rows_written, 1);
//! ```

pub mod commands;
pub mod config;
pub mod output;
pub mod row;
pub mod tabular;

// Re-export commonly used types
pub use commands::{compute_flanks, FlankCommand, FlankStats};
pub use config::{ColumnSpec, Direction, FlankConfig};
pub use row::{Row, RowError, Strand};
pub use tabular::{FlankError, TabReader};
