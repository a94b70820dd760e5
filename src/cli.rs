use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{ShareCount, Threshold};
use crate::keys::Address;

fn parse_threshold(s: &str) -> Result<Threshold, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    Threshold::new(value).map_err(|e| e.to_string())
}

fn parse_share_count(s: &str) -> Result<ShareCount, String> {
    let range = format!("between {} and {}", ShareCount::MIN, ShareCount::MAX);
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number {range}"))?;

    ShareCount::new(value).map_err(|e| e.to_string())
}

fn parse_address(s: &str) -> Result<Address, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

#[derive(Parser)]
#[command(name = "splitkeys")]
#[command(about = "Create Ethereum wallets whose key only exists as Shamir shares")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a wallet and write one share per volume
    Create {
        /// Prefix of the per-share directories (`<NAME>-0`, `<NAME>-1`, ...)
        #[arg(short, long)]
        wallet_name: String,

        /// Number of shares to create
        #[arg(short, long, value_parser = parse_share_count)]
        shares: ShareCount,

        /// Minimum number of shares needed to use the wallet
        #[arg(short, long, value_parser = parse_threshold)]
        threshold: Threshold,

        /// Directory the share directories are created under
        #[arg(long, default_value = "/Volumes")]
        root: PathBuf,
    },
    /// Repeatedly verify random threshold-sized subsets of share files
    Drill {
        #[arg(short, long, value_parser = parse_address)]
        address: Address,

        #[arg(short, long, value_parser = parse_threshold)]
        threshold: Threshold,

        #[arg(short, long, default_value_t = 10)]
        rounds: usize,

        /// Share files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Check that shares reconstruct the key behind an address
    Verify {
        #[arg(short, long, value_parser = parse_address)]
        address: Address,

        /// Share files; shares are read from stdin when omitted
        files: Vec<PathBuf>,
    },
    /// Sign a message with the key reconstructed from shares
    ///
    /// Every `{address}` in the message is replaced with the wallet address.
    Sign {
        #[arg(short, long)]
        message: String,

        /// Share files; shares are read from stdin when omitted
        files: Vec<PathBuf>,
    },
}
