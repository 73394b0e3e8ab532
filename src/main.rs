//! pkgfetch - CLI entry point.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use pkgfetch::{
    cli::{Args, DEFAULT_CONFIG},
    config::{validate_config, Config},
    download::JobSequencer,
    error::{exit_codes, Error, Result},
    output::{
        print_batch_stats, print_batch_summary, print_error, print_success, print_warning,
        ConsoleDisplay,
    },
    transport::HttpTransport,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::InvalidUrl(_)
                | Error::EmptyBatch
                | Error::Transport { .. }
                | Error::UnexpectedResponse { .. } => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                Error::Filesystem { .. } | Error::Io(_) | Error::InvalidFilename(_) => {
                    ExitCode::from(exit_codes::FILESYSTEM_ERROR as u8)
                }
            }
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they never land on the progress line.
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        if args.config != Path::new(DEFAULT_CONFIG) {
            print_warning(&format!(
                "Configuration file not found: {}",
                args.config.display()
            ));
        }
        tracing::debug!("Using default configuration");
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let batch = args.batch();
    let output_directory = config.output_directory();

    if !config.output.quiet {
        print_batch_summary(batch.len(), &output_directory.display().to_string());
    }

    let transport = HttpTransport::from_config(&config)?;
    let sequencer = JobSequencer::new(transport, output_directory)
        .with_display(Arc::new(ConsoleDisplay::new(config.output.ansi)))
        .quiet(config.output.quiet)
        .line_width(config.output.line_width);

    let report = sequencer.run_batch(&batch).await?;

    if !config.output.quiet {
        print_batch_stats(&report);
        print_success(&format!(
            "{} file(s) saved to {}",
            report.files.len(),
            sequencer.destination_dir().display()
        ));
    }

    Ok(())
}
