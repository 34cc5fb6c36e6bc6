use crate::cli::args::Cli;
use crate::error::{ProcessingError, Result};
use crate::processors::{Densifier, MaskFilter, OutputAssembler};
use crate::readers::ConcurrentReader;
use crate::utils::progress::ProgressReporter;
use crate::writers::ParquetWriter;
use std::fs::File;
use std::sync::Arc;
use tracing::{debug, info};

const CONVERTER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Counts reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub stations: usize,
    pub observations: usize,
    pub reported: usize,
    pub rows_written: usize,
}

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(&cli)?;
    execute(&cli).await?;
    Ok(())
}

/// Run the conversion described by `cli` without touching global logging state
pub async fn execute(cli: &Cli) -> Result<ConversionSummary> {
    // Reject a bad codec before reading any input
    let writer = ParquetWriter::new().with_compression(&cli.compression)?;

    info!("Converting snow depth for {}", cli.date);
    info!("Observations: {}", cli.input.display());
    info!("Stations: {}", cli.fixfile.display());

    let progress = ProgressReporter::new_spinner("Reading inputs...", cli.quiet);

    let source = ConcurrentReader::new()
        .with_mmap(cli.mmap)
        .read_inputs(&cli.input, &cli.fixfile)
        .await?;

    progress.set_message("Densifying...");
    let records = Densifier::new().densify(&source.stations, &source.observations, cli.date)?;
    let reported = records.iter().filter(|r| !r.is_missing()).count();

    let records = MaskFilter::new(cli.mask).apply(records);
    debug!("{} rows after {:?} masking", records.len(), cli.mask);

    let bundle = OutputAssembler::new()
        .with_global_attribute("converter", CONVERTER)
        .with_global_attribute("observationDate", &cli.date.format("%Y-%m-%d").to_string())
        .assemble(&records);

    progress.set_message("Writing output...");
    let file_info = writer.write_bundle(&bundle, &cli.output)?;
    progress.finish_with_message(&format!("Wrote {} rows", bundle.num_rows()));
    progress.println(&file_info.summary());

    Ok(ConversionSummary {
        stations: source.stations.len(),
        observations: source.observations.len(),
        reported,
        rows_written: bundle.num_rows(),
    })
}

/// Set up structured logging based on CLI arguments
fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = cli.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ghcn_snod={}", log_level)));

    let file_layer = match &cli.log_file {
        Some(path) => {
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
