use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use splitkeys::cli::{Cli, Commands};
use splitkeys::codec::{self, Share};
use splitkeys::commands;
use splitkeys::domain::{Entropy, SplitConfig};

/// Read entropy securely from stdin (hidden input when TTY available)
fn read_entropy() -> Result<Entropy> {
    let text = if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter entropy:");
        Zeroizing::new(rpassword::read_password().context("Failed to read entropy from stdin")?)
    } else {
        let mut line = Zeroizing::new(String::new());
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read entropy from stdin")?;
        line
    };

    Ok(Entropy::new(text.trim_end_matches(['\r', '\n']))?)
}

/// Read shares from stdin, one per line, until an empty line or EOF
fn read_shares() -> Result<Vec<Share>> {
    let mut lines = Vec::new();

    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter shares (one per line, empty line to finish):");

        loop {
            let share = Zeroizing::new(
                rpassword::read_password().context("Failed to read share from stdin")?,
            );
            if share.trim().is_empty() {
                break;
            }
            lines.push(Zeroizing::new(share.trim().to_string()));
        }
    } else {
        for line in io::stdin().lock().lines() {
            let line = Zeroizing::new(line.context("Failed to read line from stdin")?);
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            lines.push(Zeroizing::new(trimmed.to_string()));
        }
    }

    if lines.is_empty() {
        anyhow::bail!("No shares provided");
    }

    let lines: Vec<&str> = lines.iter().map(|line| line.as_str()).collect();
    Ok(codec::parse_shares(&lines)?)
}

fn shares_from(files: &[PathBuf]) -> Result<Vec<Share>> {
    if files.is_empty() {
        read_shares()
    } else {
        commands::read_share_files(files)
    }
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Create {
            wallet_name,
            shares,
            threshold,
            root,
        } => {
            let config = SplitConfig::new(threshold, shares)?;
            let entropy = read_entropy()?;

            let address = commands::create_split_keys(&entropy, config, &root, &wallet_name)?;
            println!("{address}");
        }
        Commands::Drill {
            address,
            threshold,
            rounds,
            files,
        } => {
            commands::verification_drill(&files, threshold, &address, rounds)?;
        }
        Commands::Verify { address, files } => {
            let shares = shares_from(&files)?;
            commands::verify(&shares, &address)?;
            println!("Shares verified for {address}");
        }
        Commands::Sign { message, files } => {
            let shares = shares_from(&files)?;
            println!("{}", commands::sign(&shares, &message)?);
        }
    }

    Ok(())
}
