//! Ecocert CLI - runs certification registry operations against a journal file.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod path;
mod session;

use commands::{authority, history, issue, lifecycle, query, verify, Actor};
use error::CliError;
use session::Session;

#[derive(Parser)]
#[command(name = "ecocert")]
#[command(version, about = "Sustainability certification registry CLI")]
struct Cli {
    /// Path to journal file
    #[arg(long, global = true, default_value = "registry.ecj")]
    journal: PathBuf,
    /// Registry config (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the authority principal (once)
    SetAuthority {
        principal: String,
        #[command(flatten)]
        actor: Actor,
    },
    /// Change the issuance fee
    SetFee {
        fee: u64,
        #[command(flatten)]
        actor: Actor,
    },
    /// Issue a certification
    Issue(issue::IssueArgs),
    /// Revoke a certification
    Revoke {
        business: String,
        /// Reason for revocation (1 to 200 characters)
        #[arg(long)]
        reason: String,
        #[command(flatten)]
        actor: Actor,
    },
    /// Update score and expiry
    Update {
        business: String,
        #[arg(long)]
        score: u32,
        #[arg(long)]
        expiry: u64,
        #[command(flatten)]
        actor: Actor,
    },
    /// Show a certification
    Get {
        business: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether a certification is active and unexpired
    Validity {
        business: String,
        #[arg(long)]
        height: u64,
    },
    /// Number of certifications ever issued
    Count,
    /// Check whether a business has a certification record
    IsCertified { business: String },
    /// List journal entries
    History {
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Verify the journal chain and replay it
    Verify {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let session = Session::open(&cli.journal, cli.config.as_deref())?;

    match cli.command {
        Commands::SetAuthority { principal, actor } => authority::set_authority(&session, principal, actor),
        Commands::SetFee { fee, actor } => authority::set_fee(&session, fee, actor),
        Commands::Issue(args) => issue::run(&session, args),
        Commands::Revoke {
            business,
            reason,
            actor,
        } => lifecycle::revoke(&session, business, reason, actor),
        Commands::Update {
            business,
            score,
            expiry,
            actor,
        } => lifecycle::update(&session, business, score, expiry, actor),
        Commands::Get { business, json } => query::get(&session, business, json),
        Commands::Validity { business, height } => query::validity(&session, business, height),
        Commands::Count => query::count(&session),
        Commands::IsCertified { business } => query::is_certified(&session, business),
        Commands::History { json } => history::run(&session, json),
        Commands::Verify { json } => verify::run(&session, json),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => {}
        Err(e @ CliError::Registry(_)) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
