//! Election configuration with TOML file support.
//!
//! The TOML file names every actor and token; secret seeds are never stored
//! in it — each actor entry names the environment variable its hex seed is
//! read from when the roster is built.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::Path;
use tessera_crypto::keypair_from_secret_hex;
use tessera_protocol::{Candidate, Identity, Roster};
use tessera_types::{Amount, AssetCode, NetworkId, Timestamp};

/// One named actor and the environment variable holding its secret seed.
#[derive(Clone, Debug, Deserialize)]
pub struct ActorConfig {
    pub name: String,
    pub secret_env: String,
}

/// One candidate: display name and receipt-token code.
#[derive(Clone, Debug, Deserialize)]
pub struct CandidateConfig {
    pub name: String,
    pub code: String,
}

/// Full election configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Which network transactions are bound to.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Horizon-style ledger endpoint.
    #[serde(default = "default_horizon_url")]
    pub horizon_url: String,

    /// Test-network faucet endpoint (used by the `fund` phase only).
    #[serde(default = "default_friendbot_url")]
    pub friendbot_url: String,

    /// Unix timestamp at which voting closes irrevocably.
    pub vote_close_time: u64,

    /// Ballot token code.
    #[serde(default = "default_ballot_code")]
    pub ballot_code: String,

    /// Receipt supply minted per candidate (also the tally denominator).
    #[serde(default = "default_receipt_supply")]
    pub receipt_supply: u64,

    /// Receipts offered for ballots per candidate while voting is open.
    #[serde(default = "default_offer_size")]
    pub offer_size: u64,

    /// Ballot capacity of the collection account.
    #[serde(default = "default_collector_ballot_limit")]
    pub collector_ballot_limit: u64,

    pub candidates: Vec<CandidateConfig>,
    pub voters: Vec<ActorConfig>,
    pub admins: Vec<ActorConfig>,
    pub ballot_issuer: ActorConfig,
    pub receipt_issuer: ActorConfig,
    pub collector: ActorConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> NetworkId {
    NetworkId::Test
}

fn default_horizon_url() -> String {
    "http://localhost:8000".into()
}

fn default_friendbot_url() -> String {
    "http://localhost:8000/friendbot".into()
}

fn default_ballot_code() -> String {
    "VOTE".into()
}

fn default_receipt_supply() -> u64 {
    1_000
}

fn default_offer_size() -> u64 {
    100
}

fn default_collector_ballot_limit() -> u64 {
    100_000
}

impl Config {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        if config.candidates.len() < 2 {
            bail!("need at least 2 candidates, got {}", config.candidates.len());
        }
        Ok(config)
    }

    pub fn ballot_asset_code(&self) -> anyhow::Result<AssetCode> {
        AssetCode::new(self.ballot_code.clone()).context("ballot token code")
    }

    pub fn candidate_list(&self) -> anyhow::Result<Vec<Candidate>> {
        self.candidates
            .iter()
            .map(|c| {
                let code = AssetCode::new(c.code.clone())
                    .with_context(|| format!("candidate {} token code", c.name))?;
                Ok(Candidate::new(c.name.clone(), code))
            })
            .collect()
    }

    pub fn receipt_supply(&self) -> Amount {
        Amount::new(self.receipt_supply)
    }

    pub fn offer_size(&self) -> Amount {
        Amount::new(self.offer_size)
    }

    pub fn collector_ballot_limit(&self) -> Amount {
        Amount::new(self.collector_ballot_limit)
    }

    pub fn close_time(&self) -> Timestamp {
        Timestamp::new(self.vote_close_time)
    }

    /// Build the identity registry: read each actor's secret seed from its
    /// configured environment variable. Fails before any network call if a
    /// variable is missing or malformed.
    pub fn build_roster(&self) -> anyhow::Result<Roster> {
        let voters = self
            .voters
            .iter()
            .map(load_identity)
            .collect::<anyhow::Result<Vec<_>>>()?;
        let admins = self
            .admins
            .iter()
            .map(load_identity)
            .collect::<anyhow::Result<Vec<_>>>()?;
        let roster = Roster::new(
            voters,
            admins,
            load_identity(&self.ballot_issuer)?,
            load_identity(&self.receipt_issuer)?,
            load_identity(&self.collector)?,
        )?;
        Ok(roster)
    }
}

fn load_identity(actor: &ActorConfig) -> anyhow::Result<Identity> {
    let secret = std::env::var(&actor.secret_env).with_context(|| {
        format!(
            "secret seed for {} expected in ${}",
            actor.name, actor.secret_env
        )
    })?;
    let keys = keypair_from_secret_hex(&secret)
        .with_context(|| format!("secret seed for {} (${})", actor.name, actor.secret_env))?;
    Ok(Identity::new(actor.name.clone(), keys))
}
