//! Command implementations for grit-flank.

pub mod flank;

pub use flank::{compute_flanks, FlankCommand, FlankStats, InvalidLine};
