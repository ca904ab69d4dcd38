//! bagstat: kind-tag statistics for a corpus of container files.
//!
//! Pipeline: discover files → decode and aggregate → bias → Huffman → report.
//! Listings go to stdout; logs go to stderr.

mod config;

use anyhow::Context;
use bagstat_core::corpus::{collect_inputs, Aggregator};
use bagstat_core::report::Report;
use bagstat_core::{Codebook, FrequencyTable};
use clap::Parser;
use config::{Cli, Config};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;

    init_logging(config.log_level);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run(&config, &mut stdout.lock(), &mut stderr.lock())
}

/// Initialize tracing, writing to stderr. `RUST_LOG` wins over `default_level`.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the whole pipeline and write the report to `out`.
///
/// The resolved configuration, if asked for, goes to `diag` so that `out`
/// holds nothing but the report.
fn run<W: Write, D: Write>(config: &Config, out: &mut W, diag: &mut D) -> anyhow::Result<()> {
    if config.print_config {
        writeln!(diag, "{}", config.describe())?;
    }

    let files = collect_inputs(&config.inputs, &config.extension)
        .context("failed to collect container files")?;

    info!(
        files = files.len(),
        signature = config.grammar.signature(),
        tag_table = %config.dialect,
        "scanning corpus"
    );

    let mut aggregator = Aggregator::new(config.grammar.clone());
    aggregator
        .add_files(&files)
        .context("corpus scan aborted")?;
    let (counts, metrics) = aggregator.finish();

    let table = FrequencyTable::biased(&counts, &config.bias);
    let codebook = Codebook::for_table(&table)?;
    let report = Report::new(&counts, &table, &codebook);

    info!(
        fields = counts.total(),
        max_code_len = codebook.max_code_len(),
        "code built"
    );

    if config.export {
        write!(out, "{}", report.export_text())?;
        write!(out, "{}", metrics.export_text())?;
    } else {
        writeln!(out, "{}", report.render())?;
        if config.print_metrics {
            write!(out, "{}", metrics.summary())?;
        }
    }

    Ok(())
}
