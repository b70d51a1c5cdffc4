//! tessera — run a ledger-native token vote phase by phase.

mod config;
mod phases;

use clap::Parser;
use config::Config;
use std::path::PathBuf;
use tessera_client::HorizonClient;
use tessera_types::NetworkId;

#[derive(Parser)]
#[command(name = "tessera", about = "Ledger-native governance and voting protocol driver")]
struct Cli {
    /// Path to the election TOML configuration.
    #[arg(long, default_value = "tessera.toml", env = "TESSERA_CONFIG")]
    config: PathBuf,

    /// Ledger endpoint (overrides the config file).
    #[arg(long, env = "TESSERA_HORIZON_URL")]
    horizon_url: Option<String>,

    /// Faucet endpoint (overrides the config file).
    #[arg(long, env = "TESSERA_FRIENDBOT_URL")]
    friendbot_url: Option<String>,

    /// Network: "live", "test", or "dev" (overrides the config file).
    #[arg(long, env = "TESSERA_NETWORK")]
    network: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Request test funds for every roster account (best-effort).
    Fund,
    /// Phase 1: configure the three governance accounts as 4-of-4
    /// multi-sig and disable their master keys.
    Setup,
    /// Phase 2a: open ballot trustlines, distribute one ballot per voter,
    /// lock the ballot issuer.
    IssueBallots,
    /// Phase 2b: mint the receipt supply to the collection account, lock
    /// the receipt issuer.
    IssueReceipts,
    /// Phase 3: post collection offers, pre-authorize the time-locked
    /// close, lock the collection account, print the finalization envelope.
    Open,
    /// Cast (or change) a vote.
    Vote {
        /// Voter name as configured.
        voter: String,
        /// Candidate name as configured.
        candidate: String,
    },
    /// Retract an open vote offer that has not executed yet.
    Retract {
        /// Voter name as configured.
        voter: String,
    },
    /// Submit a published finalization envelope (valid at/after the close
    /// time; needs no signatures).
    Finalize {
        /// Envelope hex as printed by `open`.
        envelope: String,
    },
    /// Read and print the vote counts.
    Tally,
}

fn parse_network(s: &str) -> NetworkId {
    match s.to_lowercase().as_str() {
        "live" => NetworkId::Live,
        "test" => NetworkId::Test,
        _ => NetworkId::Dev,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tessera_utils::init_tracing();

    let cli = Cli::parse();

    let mut config = Config::from_toml_file(&cli.config)?;
    if let Some(url) = cli.horizon_url {
        config.horizon_url = url;
    }
    if let Some(url) = cli.friendbot_url {
        config.friendbot_url = url;
    }
    if let Some(network) = cli.network.as_deref() {
        config.network = parse_network(network);
    }

    let roster = config.build_roster()?;
    let client = HorizonClient::new(&config.horizon_url);

    tracing::info!(
        network = config.network.as_str(),
        horizon = %config.horizon_url,
        voters = roster.voters.len(),
        candidates = config.candidates.len(),
        "tessera starting"
    );

    match cli.command {
        Command::Fund => phases::fund(&config, &roster).await,
        Command::Setup => phases::setup(&client, &config, &roster).await?,
        Command::IssueBallots => phases::issue_ballots(&client, &config, &roster).await?,
        Command::IssueReceipts => phases::issue_receipts(&client, &config, &roster).await?,
        Command::Open => phases::open(&client, &config, &roster).await?,
        Command::Vote { voter, candidate } => {
            phases::vote(&client, &config, &roster, &voter, &candidate).await?
        }
        Command::Retract { voter } => phases::retract(&client, &config, &roster, &voter).await?,
        Command::Finalize { envelope } => phases::finalize(&client, &envelope).await?,
        Command::Tally => phases::print_tally(&client, &config, &roster).await?,
    }

    Ok(())
}
