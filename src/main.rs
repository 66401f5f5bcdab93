use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use gexf_convert::convert::{self, ConversionReport, ConvertConfig};
use gexf_convert::graph_io::ExportOptions;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Directory containing the .graphml files
    #[clap(default_value = "../OUT/")]
    source: PathBuf,
    /// Directory receiving the .gexf files
    #[clap(default_value = "../GEXF")]
    dest: PathBuf,
    #[clap(short, long)]
    log_level: Option<String>,
    /// Write colour, size and position attributes as viz elements
    #[clap(long)]
    viz: bool,
    /// Omit the meta block
    #[clap(long)]
    no_meta: bool,
    /// Print the report as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let config = ConvertConfig {
        source_dir: args.source,
        dest_dir: args.dest,
        export: ExportOptions {
            include_metadata: !args.no_meta,
            viz: args.viz,
            ..Default::default()
        },
    };

    info!(
        "Converting {} into {}",
        config.source_dir.display(),
        config.dest_dir.display()
    );

    let report = match convert::convert(&config) {
        Ok(report) => report,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    print_report(&report, args.json)?;

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(report: &ConversionReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for failure in &report.failures {
            println!("{} ({}): {}", failure.file.display(), failure.stage, failure.message);
        }
        println!(
            "Converted {} file(s), {} failed",
            report.succeeded(),
            report.failed()
        );
    }
    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_deref()
        .unwrap_or("info")
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("handlebars=off,{}", log_level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
