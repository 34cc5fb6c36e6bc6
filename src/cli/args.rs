use crate::processors::MaskMode;
use crate::utils::constants::COMPRESSION_SNAPPY;
use crate::utils::dates::parse_date_arg;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ghcn-snod")]
#[command(about = "Convert GHCN-Daily snow depth observations into a per-station Parquet array set")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, help = "GHCN-Daily observation extract (CSV)")]
    pub input: PathBuf,

    #[arg(short, long, help = "GHCN station catalog (ghcnd-stations.txt)")]
    pub fixfile: PathBuf,

    #[arg(short, long, help = "Output Parquet file path")]
    pub output: PathBuf,

    #[arg(short, long, value_parser = parse_date_arg, help = "Target date (YYYYMMDD)")]
    pub date: NaiveDate,

    #[arg(short, long, value_enum, help = "Drop stations without a report (maskout) or keep all (default)")]
    pub mask: MaskMode,

    #[arg(short, long, default_value = COMPRESSION_SNAPPY)]
    pub compression: String,

    #[arg(long, help = "Memory-map the observation extract")]
    pub mmap: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, conflicts_with = "verbose", help = "Only log warnings and errors")]
    pub quiet: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
