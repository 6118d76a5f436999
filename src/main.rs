use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use copymind::config::Config;
use copymind::similarity::gate::validate_pair;

/// copymind: check that a rewritten article is original enough to publish.
///
/// Compares a rewrite against its source on three axes (character n-gram
/// overlap, vocabulary overlap, embedding similarity) and fails it if any
/// axis is too close.
#[derive(Parser)]
#[command(name = "copymind", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (POST /check_similarity)
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: PORT env var, then 4000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: COPYMIND_BIND env var, then 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Check one rewrite against its original
    Check {
        /// File containing the original text
        #[arg(long)]
        original: PathBuf,

        /// File containing the rewritten text
        #[arg(long)]
        rewritten: PathBuf,

        /// Print the report as JSON instead of a colored summary
        #[arg(long)]
        json: bool,
    },

    /// Check many pairs from a JSON Lines file
    Batch {
        /// JSONL file with one {"original", "rewritten"} object per line
        #[arg(long)]
        input: PathBuf,

        /// Number of pairs to check in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("copymind=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let gate = config.build_gate()?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            info!(
                model = %config.embedding_model,
                ngram_size = config.gate.ngram_size,
                "Starting originality gate service"
            );
            copymind::web::run_server(gate, port, &bind).await?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check {
            original,
            rewritten,
            json,
        } => {
            let original = read_text(&original)?;
            let rewritten = read_text(&rewritten)?;
            validate_pair(&original, &rewritten)?;

            let gate = config.build_gate()?;
            let report = gate.evaluate(&original, &rewritten).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                copymind::output::terminal::display_report(&report, &config.gate.thresholds);
            }

            // Exit 2 on a failed gate so scripts can branch on it.
            Ok(if report.pass {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }

        Commands::Batch { input, concurrency } => {
            let contents = read_text(&input)?;
            let gate = config.build_gate()?;

            let outcomes =
                copymind::pipeline::batch::run(&gate, &contents, concurrency, true).await?;

            let mut passed = 0usize;
            let mut failed = 0usize;
            let mut errors = 0usize;
            for outcome in &outcomes {
                match outcome {
                    copymind::pipeline::batch::BatchOutcome::Report { report, .. } => {
                        if report.pass {
                            passed += 1;
                        } else {
                            failed += 1;
                        }
                    }
                    copymind::pipeline::batch::BatchOutcome::Error { .. } => errors += 1,
                }
                println!("{}", serde_json::to_string(outcome)?);
            }

            eprintln!(
                "\n{} {} passed, {} failed, {} invalid",
                "Batch complete:".bold(),
                passed.to_string().green(),
                failed.to_string().red(),
                errors.to_string().yellow(),
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
