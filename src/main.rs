//! apns-live - sends one Live Activity update through APNs.
//!
//! The bearer token comes from `--jwt` / `APNS_JWT` when given; otherwise
//! one is minted from the configured `.p8` key. Exactly one request is
//! sent; a non-200 answer is reported with the APNs body and a non-zero
//! exit.

use anyhow::{Context, Result};
use apns_live::activity::{self, LiveActivityEvent};
use apns_live::{logging, push, token, ApnsConfig, HttpTransport};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Event type accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum EventArg {
    Update,
    End,
}

impl From<EventArg> for LiveActivityEvent {
    fn from(arg: EventArg) -> Self {
        match arg {
            EventArg::Update => Self::Update,
            EventArg::End => Self::End,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "apns-live")]
#[command(version)]
#[command(about = "Send a Live Activity update push through APNs")]
struct Cli {
    /// APNs device token for the target device
    #[arg(long)]
    token: String,
    /// Live Activity ID to update
    #[arg(long)]
    activity: String,
    /// Status (approved, rejected, cancelled, finished)
    #[arg(long, default_value = "approved")]
    status: String,
    /// Name of the staff member who responded
    #[arg(long, default_value = "Staff Member")]
    responder: String,
    /// Live Activity event
    #[arg(long, value_enum, default_value_t = EventArg::Update)]
    event: EventArg,
    /// Pre-minted provider token; minted from the configured key when absent
    #[arg(long, env = "APNS_JWT", hide_env_values = true)]
    jwt: Option<String>,
    /// Use the development (sandbox) APNs host
    #[arg(long)]
    sandbox: bool,
    /// Request timeout in seconds (0 disables)
    #[arg(long)]
    timeout: Option<u64>,
    /// JSON config file (defaults to APNS_CONFIG or the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> Result<ApnsConfig> {
        let mut config = ApnsConfig::load(self.config.as_deref())?;
        if self.sandbox {
            config = config.sandbox();
        }
        if let Some(secs) = self.timeout {
            config.timeout_secs = secs;
        }
        config.validate_delivery()?;
        Ok(config)
    }

    fn bearer_token(&self, config: &ApnsConfig) -> Result<String> {
        if let Some(jwt) = &self.jwt {
            return Ok(jwt.clone());
        }
        config.validate_signing()?;
        let minted = token::mint(config, chrono::Utc::now())
            .context("No --jwt given and minting from the configured key failed")?;
        Ok(minted.to_string())
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config().context("Failed to load configuration")?;

    if !activity::is_known_status(&cli.status) {
        log::warn!(
            "Status {:?} is not one of {:?}; the device may fail to decode it",
            cli.status,
            activity::KNOWN_STATUSES
        );
    }

    let jwt = cli.bearer_token(&config)?;

    let payload = activity::build_payload(
        &cli.status,
        chrono::Utc::now(),
        &cli.responder,
        &cli.activity,
    )
    .with_event(cli.event.into());
    let body = activity::serialize(&payload).map_err(apns_live::PushError::Serialize)?;

    let transport = HttpTransport::new(config.timeout())?;
    let response = push::send(&transport, &config, &jwt, &cli.token, body)?;

    println!("Response status: {}", response.status_line);
    if !response.body.is_empty() {
        println!("Response body: {}", response.body_text());
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    run(&cli)
}
