use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rand::seq::IndexedRandom;
use zeroize::Zeroizing;

use crate::codec::Share;
use crate::domain::{Entropy, SplitConfig, Threshold};
use crate::keys::Address;
use crate::signing::SignedMessage;
use crate::wallet::{self, Wallet};

/// File holding one share inside a share directory
pub const SHARE_FILE: &str = "split.txt";

/// File holding the wallet address inside a share directory
pub const ADDRESS_FILE: &str = "address.txt";

/// Directory that receives share `position` of wallet `wallet_name`
#[must_use]
pub fn share_directory(root: &Path, wallet_name: &str, position: usize) -> PathBuf {
    root.join(format!("{wallet_name}-{position}"))
}

/// Writes every share of `wallet` to its own directory under `root`
///
/// Returns the paths of the written share files, in share order.
///
/// # Errors
/// Returns an error if the wallet name is unusable as a directory prefix or
/// if any directory or file cannot be written
pub fn write_wallet(wallet: &Wallet, root: &Path, wallet_name: &str) -> Result<Vec<PathBuf>> {
    if wallet_name.is_empty() || wallet_name.chars().any(std::path::is_separator) {
        bail!("Wallet name '{wallet_name}' cannot be used as a directory name");
    }

    let address = wallet.address().to_string();
    let mut files = Vec::with_capacity(wallet.shares().len());

    for (position, share) in wallet.shares().iter().enumerate() {
        let dir = share_directory(root, wallet_name, position);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

        let share_path = dir.join(SHARE_FILE);
        let text = Zeroizing::new(share.to_string());
        fs::write(&share_path, text.as_bytes())
            .with_context(|| format!("Failed to write {}", share_path.display()))?;

        let address_path = dir.join(ADDRESS_FILE);
        fs::write(&address_path, &address)
            .with_context(|| format!("Failed to write {}", address_path.display()))?;

        files.push(share_path);
    }

    Ok(files)
}

/// Reads and decodes one share per file
///
/// # Errors
/// Returns an error naming the first file that cannot be read or decoded
pub fn read_share_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Share>> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let text = Zeroizing::new(
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            );
            text.parse::<Share>()
                .with_context(|| format!("Failed to decode share in {}", path.display()))
        })
        .collect()
}

/// Verifies random `threshold`-sized subsets of `files` against `address`
///
/// Subsets are drawn independently for each round, so rounds may repeat a
/// subset.
///
/// # Errors
/// Returns an error if there are fewer files than `threshold`, if a file
/// cannot be read, or on the first round whose shares do not verify
pub fn verification_drill(
    files: &[PathBuf],
    threshold: Threshold,
    address: &Address,
    rounds: usize,
) -> Result<()> {
    let take = usize::from(*threshold);
    if take > files.len() {
        bail!(
            "Threshold {take} needs more share files than the {} provided",
            files.len()
        );
    }

    let mut rng = rand::rng();
    for round in 0..rounds {
        let chosen: Vec<&PathBuf> = files.choose_multiple(&mut rng, take).collect();
        let shares = read_share_files(&chosen)?;

        if !wallet::verify_shares(&shares, address)? {
            tracing::warn!(round, "verification drill failed");
            bail!("Unable to verify shares in round {round}");
        }
        eprintln!("verification {round} completed");
    }

    Ok(())
}

/// Creates a wallet, writes its shares under `root` and drills them
///
/// The drill runs one round per share.
///
/// # Errors
/// Returns an error if writing fails or any drill round fails
pub fn create_split_keys(
    entropy: &Entropy,
    config: SplitConfig,
    root: &Path,
    wallet_name: &str,
) -> Result<Address> {
    let wallet = wallet::create_wallet(entropy, config).context("Failed to create wallet")?;
    let files = write_wallet(&wallet, root, wallet_name)?;

    let rounds = usize::from(*config.share_count());
    verification_drill(&files, config.threshold(), wallet.address(), rounds)?;

    Ok(*wallet.address())
}

/// Fails unless `shares` reconstruct the key behind `address`
///
/// # Errors
/// Returns an error if the shares are malformed or belong to another key
pub fn verify(shares: &[Share], address: &Address) -> Result<()> {
    if !wallet::verify_shares(shares, address).context("Failed to verify shares")? {
        bail!("Shares do not reconstruct the key for {address}");
    }
    Ok(())
}

/// Signs `message` and returns the result as pretty-printed JSON
///
/// # Errors
/// Returns an error if the shares cannot be combined into a key
pub fn sign(shares: &[Share], message: &str) -> Result<String> {
    let signed: SignedMessage =
        wallet::sign_message(shares, message).context("Failed to sign message")?;
    serde_json::to_string_pretty(&signed).context("Failed to serialize signed message")
}
