//! pkce-s256 CLI entry point

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pkce_s256::config::{self, Settings, ENTROPY_ENV};
use pkce_s256::pkce::{derive, validate, CodeChallenge, PkcePair, DEFAULT_ENTROPY_BYTES};
use pkce_s256::shell::{Outcome, Shell};
use pkce_s256::ui;

#[derive(Parser)]
#[command(name = "pkce-s256")]
#[command(about = "Generate PKCE code verifiers and S256 code challenges (RFC 7636)")]
#[command(version)]
struct Cli {
    /// Random bytes per generated verifier (32-96)
    #[arg(long, global = true, env = ENTROPY_ENV, default_value_t = DEFAULT_ENTROPY_BYTES)]
    entropy: usize,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Menu driven session (default)
    Interactive,

    /// Generate a code verifier and its S256 challenge
    Generate {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive the S256 challenge of a code verifier
    Derive {
        /// Code verifier (43-128 chars of [A-Za-z0-9-._~])
        verifier: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that a challenge is the S256 transform of a verifier
    Verify {
        verifier: String,
        challenge: String,
    },
}

/// Process exit status of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

fn main() -> Result<ExitCode> {
    // Initialize logging; stdout is reserved for output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    ctrlc::set_handler(|| {
        eprintln!("\nBye!");
        std::process::exit(0);
    })
    .ok();

    let cli = Cli::parse();
    config::apply_color(!cli.no_color);

    // Unlocked handles: the Ctrl+C handler writes to stderr from another thread
    let status = run(cli, &mut io::stdout(), &mut io::stderr())?;
    Ok(status.into())
}

fn run<O: Write, E: Write>(cli: Cli, out: &mut O, err: &mut E) -> Result<Status> {
    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let settings = Settings::new(cli.entropy)?;
            run_interactive(settings, out)
        }

        Commands::Generate { json } => {
            let settings = Settings::new(cli.entropy)?;
            let pair = PkcePair::generate_with_entropy(settings.entropy_bytes)
                .context("failed to generate code verifier")?;
            print_pair(out, &pair, json)?;
            Ok(Status::Success)
        }

        Commands::Derive { verifier, json } => match validate(&verifier) {
            Ok(verifier) => {
                print_pair(out, &PkcePair::from_verifier(verifier), json)?;
                Ok(Status::Success)
            }
            Err(e) => {
                ui::print_error(err, &e.to_string())?;
                Ok(Status::Failure)
            }
        },

        Commands::Verify {
            verifier,
            challenge,
        } => {
            let verifier = match validate(&verifier) {
                Ok(verifier) => verifier,
                Err(e) => {
                    ui::print_error(err, &e.to_string())?;
                    return Ok(Status::Failure);
                }
            };
            if CodeChallenge::from(challenge).is_derived_from(&verifier) {
                ui::print_success(out, "match")?;
                Ok(Status::Success)
            } else {
                ui::print_warning(err, "mismatch")?;
                writeln!(out, "expected {}", derive(&verifier))?;
                Ok(Status::Failure)
            }
        }
    }
}

fn run_interactive<O: Write>(settings: Settings, out: &mut O) -> Result<Status> {
    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), out, settings);

    match shell.run().context("interactive session failed")? {
        Outcome::Exited => tracing::debug!("Session exited"),
        Outcome::Completed(pair) => {
            tracing::debug!(verifier_len = pair.verifier.len(), "Session completed")
        }
    }
    Ok(Status::Success)
}

fn print_pair<O: Write>(out: &mut O, pair: &PkcePair, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(pair)?)?;
    } else {
        ui::print_pair(out, pair)?;
    }
    Ok(())
}
