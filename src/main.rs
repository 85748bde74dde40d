//! GRIT flank: flanking intervals for tab-delimited genomic regions.
//!
//! Usage: grit-flank [OPTIONS] <INPUT> <OUTPUT> <SIZE> <DIRECTION>

use clap::Parser;
use log::{info, Level};
use std::path::{Path, PathBuf};
use std::process;

use grit_flank::config::DEFAULT_COLUMNS;
use grit_flank::{ColumnSpec, Direction, FlankCommand, FlankConfig, FlankError};

#[derive(Parser, Debug)]
#[command(name = "grit-flank")]
#[command(author = "Manish Kumar Bobbili")]
#[command(version)]
#[command(about = "Get flanking regions upstream and/or downstream of genomic intervals", long_about = None)]
struct Cli {
    /// Input tab-delimited interval file (use - for stdin)
    input: PathBuf,

    /// Output file (use - for stdout)
    output: PathBuf,

    /// Flank length in bases
    #[arg(value_parser = clap::value_parser!(i64).range(0..))]
    size: i64,

    /// Flank location: Upstream, Downstream or Both
    direction: Direction,

    /// Columns for chrom, start, end, strand (1-based; strand 0 or empty if absent)
    #[arg(short = 'l', long, default_value = DEFAULT_COLUMNS)]
    cols: ColumnSpec,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "warn")]
    level: Level,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = simple_logger::init_with_level(cli.level) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run_flank(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_flank(cli: Cli) -> Result<(), FlankError> {
    info!(
        "flank: input={}, output={}, size={}, direction={}, cols={}",
        cli.input.display(),
        cli.output.display(),
        cli.size,
        cli.direction,
        cli.cols
    );

    let cmd = FlankCommand::new(FlankConfig::new(cli.cols, cli.size, cli.direction));
    let stats = cmd.run(&cli.input, &cli.output)?;

    if cli.stats {
        eprintln!("Flank stats: {}", stats);
    }
    info!("flank: done ({} rows written)", stats.rows_written);

    // Keep the summary out of the data stream when writing rows to stdout.
    let data_on_stdout = cli.output == Path::new("-");
    let report = |message: String| {
        if data_on_stdout {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    };

    // An input where nothing parsed usually means the columns are wrong;
    // this is a notice, not a failure.
    if stats.all_skipped() {
        report(cmd.all_skipped_notice());
        return Ok(());
    }
    if let Some(notice) = stats.skipped_notice() {
        report(notice);
    }
    report(cmd.status_line());

    Ok(())
}
