//! apns-token - prints a signed APNs provider token.
//!
//! Reads the `.p8` key named in the config, signs `{iss, iat}` with ES256,
//! and writes the compact token as a single line on stdout.

use anyhow::{Context, Result};
use apns_live::{logging, token, ApnsConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "apns-token")]
#[command(version)]
#[command(about = "Mint an ES256 provider authentication token for APNs")]
struct Cli {
    /// JSON config file (defaults to APNS_CONFIG or the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Path to the .p8 signing key
    #[arg(long)]
    key_path: Option<PathBuf>,
    /// Key ID from the developer portal (token header `kid`)
    #[arg(long)]
    key_id: Option<String>,
    /// Developer team ID (token claim `iss`)
    #[arg(long)]
    team_id: Option<String>,
    /// Verify the token against the key's public half before printing
    #[arg(long)]
    verify: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<ApnsConfig> {
        let mut config = ApnsConfig::load(self.config.as_deref())?;
        if let Some(key_path) = &self.key_path {
            config.key_path.clone_from(key_path);
        }
        if let Some(key_id) = &self.key_id {
            config.key_id.clone_from(key_id);
        }
        if let Some(team_id) = &self.team_id {
            config.team_id.clone_from(team_id);
        }
        config.validate_signing()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = cli.resolve_config().context("Failed to load configuration")?;

    let auth_token = token::mint(&config, chrono::Utc::now()).context("Failed to mint token")?;

    if cli.verify {
        let pem = std::fs::read(&config.key_path)
            .with_context(|| format!("Failed to re-read {}", config.key_path.display()))?;
        let key = token::decode_key(&pem)?;
        anyhow::ensure!(
            auth_token.verify(key.verifying_key()),
            "Token signature did not verify against the signing key"
        );
        log::info!("[Token] Signature verified");
    }

    println!("{auth_token}");
    Ok(())
}
