//! certcheck - bulk certification status lookup
//!
//! Reads a roster workbook, looks up every identity in order, and saves the
//! results to a new artifact. Ctrl+C stops after the record in flight and
//! still saves what was finished.

use certcheck::config::Config;
use certcheck::core::{BatchOrchestrator, HttpQuerySession, Interrupt, LogObserver, RecordSource};
use certcheck::storage::{ResultSink, recent_artifacts};
use certcheck::utils::logging::init_logging;
use certcheck::utils::net::{build_client, probe};
use certcheck::{CertError, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

/// Exit status after an interrupted run whose partial results were saved
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "certcheck", version, about = "Bulk pension certification status lookup")]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "CERTCHECK_CONFIG",
        help = "Configuration file (default: config/certcheck.yaml when present)"
    )]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up every record of a roster workbook
    Run {
        /// Workbook with names in column C and identity numbers in column E
        input: PathBuf,
        #[arg(long, help = "Directory for the result artifact")]
        output_dir: Option<String>,
        #[arg(long, help = "Attempts per record before it is marked Failed")]
        max_attempts: Option<u32>,
        #[arg(long, help = "Per-query timeout in seconds")]
        timeout_secs: Option<u64>,
        #[arg(long, default_value_t = false, help = "Skip the network reachability check")]
        skip_probe: bool,
    },
    /// List the most recent result artifacts
    History {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Check network reachability and exit
    Probe,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            if e.is_input_error() {
                eprintln!(
                    "Check the workbook: row 1 is a header, data starts at row 2, \
                     and the name and identity-number columns match the configured layout."
                );
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref()).await?;
    config.apply_env()?;

    if let Commands::Run {
        output_dir,
        max_attempts,
        timeout_secs,
        ..
    } = &cli.command
    {
        if let Some(dir) = output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(attempts) = max_attempts {
            config.retry.max_attempts = *attempts;
        }
        if let Some(secs) = timeout_secs {
            config.query.timeout_secs = *secs;
        }
    }
    config.validate()?;

    let log_path = init_logging(&config.logging)?;
    info!("certcheck {} logging to {}", certcheck::VERSION, log_path.display());

    match cli.command {
        Commands::Run {
            input, skip_probe, ..
        } => run_batch(&config, &input, skip_probe).await,
        Commands::History { limit } => {
            let sink = ResultSink::new(&config.output);
            let entries = recent_artifacts(sink.dir(), sink.prefix(), limit)?;
            if entries.is_empty() {
                println!("No result files in {}", sink.dir().display());
            }
            for entry in entries {
                println!(
                    "{}\t{}\t{}",
                    entry.modified.format("%Y-%m-%d %H:%M:%S"),
                    entry.size,
                    entry.path.display()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Probe => {
            if check_network(&config).await? {
                println!("reachable: {}", config.probe.url);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("unreachable: {}", config.probe.url);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

async fn check_network(config: &Config) -> Result<bool> {
    let client = build_client(
        &config.query.user_agent,
        config.probe.timeout(),
        config.query.proxy.as_ref(),
    )?;
    Ok(probe(&client, &config.probe.url).await)
}

async fn run_batch(config: &Config, input: &Path, skip_probe: bool) -> Result<ExitCode> {
    if !input.is_file() {
        return Err(CertError::format(format!(
            "input file not found: {}",
            input.display()
        )));
    }
    let loaded = RecordSource::new(config.input.clone()).load(input)?;

    if config.probe.enabled && !skip_probe {
        if !check_network(config).await? {
            return Err(CertError::network(format!(
                "{} is unreachable; check the network or proxy settings",
                config.probe.url
            )));
        }
    } else {
        warn!("Network reachability check skipped");
    }

    let session = HttpQuerySession::new(&config.query)?;
    let interrupt = Interrupt::new();
    let listener = interrupt.listen_for_signals();

    let run = BatchOrchestrator::from_config(config, interrupt)
        .run(loaded.records, session, &mut LogObserver)
        .await;
    listener.abort();

    // Persist before reporting an interrupt so partial work is never lost.
    let artifact = ResultSink::new(&config.output).persist(&run, input)?;
    println!(
        "Saved {} of {} results to {}",
        artifact.rows,
        run.total,
        artifact.table.display()
    );

    if run.interrupted {
        warn!("{} records were not queried", run.remaining());
        Ok(ExitCode::from(EXIT_INTERRUPTED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
