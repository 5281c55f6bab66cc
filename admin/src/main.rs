//! PsyReports activation admin tool
//!
//! On the administrator's machine:
//!   psyreports-admin issue --device DEV-X9Y2Z1 --credits 100
//!
//! On the client:
//!   psyreports-admin device-id
//!   psyreports-admin redeem <CODE>
//!   psyreports-admin balance
//!
//! No network access; codes travel out-of-band.

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use psyreports_activation::{ActivationConfig, CreditPackage};
use psyreports_admin::{issue_for_device, resolve_credits, share_message, Installation};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "psyreports-admin")]
#[command(about = "Issue and redeem PsyReports activation codes")]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue an activation code for a client device
    Issue {
        /// Client device id, as shown on the client's screen
        #[arg(short, long)]
        device: String,

        /// Credits to grant: 10, 50, 100, INF, or any positive count
        #[arg(long, default_value_t = CreditPackage::Hundred.credits().to_string())]
        credits: String,

        /// Shared salt (overrides config and environment)
        #[arg(short, long)]
        salt: Option<String>,
    },
    /// Print this installation's device id
    DeviceId,
    /// Redeem an activation code on this installation
    Redeem {
        /// The activation code
        code: String,

        /// Shared salt (overrides config and environment)
        #[arg(short, long)]
        salt: Option<String>,
    },
    /// Print the current credit balance
    Balance,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = ActivationConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;
    debug!(data_dir = %config.data_dir.display(), "Configuration loaded");

    match args.command {
        Command::Issue { device, credits, salt } => {
            if let Some(salt) = salt {
                config.salt = salt;
            }
            let credits = resolve_credits(&credits)?;
            let code = issue_for_device(&credits, &config.salt, &device)?;
            println!("{code}");
            println!();
            println!("{}", share_message(&code, &device, &credits));
        }
        Command::DeviceId => {
            let mut installation = Installation::open(config)?;
            println!("{}", installation.device_id());
        }
        Command::Redeem { code, salt } => {
            if let Some(salt) = salt {
                config.salt = salt;
            }
            let mut installation = Installation::open(config)?;
            let (entitlement, balance) = installation.redeem(&code)?;
            println!("Activated: {entitlement} credits. Balance: {balance}");
        }
        Command::Balance => {
            let installation = Installation::open(config)?;
            println!("{}", installation.balance()?);
        }
    }

    Ok(())
}
