//! Phase drivers: each CLI subcommand maps to exactly one of these.
//!
//! Phases are independent entry points with documented preconditions; the
//! only ordering enforcement is what the ledger itself imposes (missing
//! trustlines, thresholds, locks).

use crate::config::Config;
use anyhow::{bail, Context};
use tessera_client::{Friendbot, LedgerClient};
use tessera_protocol::{
    submit_finalization, tally, BallotExchange, Finalizer, IssuanceController, MultiSigController,
    Roster, COMMITTEE_THRESHOLD,
};
use tessera_tx::TransactionEnvelope;
use tessera_types::{AccountFlags, Amount, Asset, Thresholds, Timestamp};

fn ballot_asset(config: &Config, roster: &Roster) -> anyhow::Result<Asset> {
    Ok(Asset::credit(
        config.ballot_asset_code()?,
        roster.ballot_issuer.account_id.clone(),
    ))
}

fn receipt_assets(config: &Config, roster: &Roster) -> anyhow::Result<Vec<Asset>> {
    Ok(config
        .candidate_list()?
        .into_iter()
        .map(|c| Asset::credit(c.code, roster.receipt_issuer.account_id.clone()))
        .collect())
}

/// Best-effort test funding of every roster account. Failures are logged
/// and dropped on purpose: funding is outside the protocol's correctness.
pub async fn fund(config: &Config, roster: &Roster) {
    let friendbot = Friendbot::new(&config.friendbot_url);
    for id in roster.all_account_ids() {
        if let Err(err) = friendbot.fund(id).await {
            tracing::warn!(account = %id, %err, "friendbot funding failed; continuing");
        }
    }
}

/// Phase 1: configure all three governance accounts as 4-of-4 multi-sig
/// and disable their master keys. The ballot issuer gets the
/// authorization-required/revocable flags; the other two stay flagless.
pub async fn setup<C: LedgerClient>(
    client: &C,
    config: &Config,
    roster: &Roster,
) -> anyhow::Result<()> {
    let multisig = MultiSigController::new(client, config.network);
    let committee = roster.committee();
    let thresholds = Thresholds::uniform(COMMITTEE_THRESHOLD);

    multisig
        .configure_multi_sig(
            &roster.ballot_issuer,
            &committee,
            thresholds,
            AccountFlags::required_and_revocable(),
        )
        .await
        .context("configuring ballot issuer")?;
    multisig
        .configure_multi_sig(&roster.receipt_issuer, &committee, thresholds, AccountFlags::NONE)
        .await
        .context("configuring receipt issuer")?;
    multisig
        .configure_multi_sig(&roster.collector, &committee, thresholds, AccountFlags::NONE)
        .await
        .context("configuring collection account")?;

    println!("governance accounts configured: 4-of-4 committee, master keys disabled");
    Ok(())
}

/// Phase 2a: ballot trustlines, distribution of one ballot per voter, and
/// the permanent lock of the ballot issuer. Precondition: `setup` ran.
pub async fn issue_ballots<C: LedgerClient>(
    client: &C,
    config: &Config,
    roster: &Roster,
) -> anyhow::Result<()> {
    let issuance = IssuanceController::new(client, config.network);
    let multisig = MultiSigController::new(client, config.network);
    let committee = roster.committee_keys();
    let ballot = ballot_asset(config, roster)?;
    let ballot_code = config.ballot_asset_code()?;

    for voter in &roster.voters {
        issuance
            .create_trustline(voter, ballot.clone(), Amount::ONE)
            .await
            .with_context(|| format!("ballot trustline for {}", voter.name))?;
    }
    issuance
        .create_trustline(&roster.collector, ballot.clone(), config.collector_ballot_limit())
        .await
        .context("collector ballot trustline")?;

    let voter_ids: Vec<_> = roster.voters.iter().map(|v| &v.account_id).collect();
    issuance
        .distribute_ballots(
            &roster.ballot_issuer.account_id,
            &committee,
            &ballot_code,
            &ballot,
            &voter_ids,
        )
        .await
        .context("distributing ballots")?;
    issuance
        .set_authorization(
            &roster.ballot_issuer.account_id,
            &committee,
            &roster.collector.account_id,
            ballot_code,
            true,
        )
        .await
        .context("authorizing the collection account")?;

    multisig
        .lock_account(&roster.ballot_issuer.account_id, &committee, false)
        .await
        .context("locking ballot issuer")?;

    println!(
        "issued 1 ballot to each of {} voters; ballot issuer locked, no further ballots can exist",
        roster.voters.len()
    );
    Ok(())
}

/// Phase 2b: receipt trustlines on the collection account, supply mint,
/// and the permanent lock of the receipt issuer. Precondition: `setup` ran.
pub async fn issue_receipts<C: LedgerClient>(
    client: &C,
    config: &Config,
    roster: &Roster,
) -> anyhow::Result<()> {
    let issuance = IssuanceController::new(client, config.network);
    let multisig = MultiSigController::new(client, config.network);
    let committee = roster.committee_keys();
    let receipts = receipt_assets(config, roster)?;

    for receipt in &receipts {
        issuance
            .create_trustline(&roster.collector, receipt.clone(), config.receipt_supply())
            .await
            .with_context(|| format!("collector trustline for {receipt}"))?;
        issuance
            .issue(
                &roster.receipt_issuer.account_id,
                &committee,
                &roster.collector.account_id,
                receipt.clone(),
                config.receipt_supply(),
            )
            .await
            .with_context(|| format!("minting {receipt}"))?;
    }

    multisig
        .lock_account(&roster.receipt_issuer.account_id, &committee, false)
        .await
        .context("locking receipt issuer")?;

    println!(
        "minted {} receipts per candidate to the collection account; receipt issuer locked",
        config.receipt_supply
    );
    Ok(())
}

/// Phase 3: open voting. Posts the collection counter-offers, builds the
/// time-locked finalization, installs its hash as a pre-authorized signer
/// and locks the collection account — all before the first vote, so the
/// close needs nobody online. Prints the unsigned finalization envelope
/// for out-of-band publication. Precondition: both issue phases ran.
pub async fn open<C: LedgerClient>(
    client: &C,
    config: &Config,
    roster: &Roster,
) -> anyhow::Result<()> {
    let exchange = BallotExchange::new(client, config.network);
    let committee = roster.committee_keys();
    let ballot = ballot_asset(config, roster)?;
    let receipts = receipt_assets(config, roster)?;

    exchange
        .create_collection_offers(
            &roster.collector.account_id,
            &committee,
            &ballot,
            &receipts,
            config.offer_size(),
        )
        .await
        .context("posting collection offers")?;

    let mut finalizer = Finalizer::new(client, config.network, roster.collector.account_id.clone());
    finalizer
        .build(config.close_time())
        .await
        .context("building finalization transaction")?;
    finalizer
        .install_and_lock(&committee)
        .await
        .context("installing pre-authorization and locking the collection account")?;

    let envelope = finalizer.envelope().expect("locked implies built");
    println!("voting is open; collection account locked");
    println!(
        "closes in {} (at unix {})",
        tessera_utils::format_duration(config.close_time().remaining_from(Timestamp::now())),
        config.vote_close_time
    );
    println!("finalization envelope (publish; submit at/after close time):");
    println!("{}", envelope.to_hex().context("encoding envelope")?);
    Ok(())
}

/// Cast or change a vote. Precondition: voting is open.
pub async fn vote<C: LedgerClient>(
    client: &C,
    config: &Config,
    roster: &Roster,
    voter_name: &str,
    candidate_name: &str,
) -> anyhow::Result<()> {
    let exchange = BallotExchange::new(client, config.network);
    let voter = roster
        .voter(voter_name)
        .with_context(|| format!("unknown voter {voter_name}"))?;
    let candidates = config.candidate_list()?;
    let index = candidates
        .iter()
        .position(|c| c.name == candidate_name)
        .with_context(|| format!("unknown candidate {candidate_name}"))?;
    let ballot = ballot_asset(config, roster)?;
    let receipts = receipt_assets(config, roster)?;

    exchange
        .place_vote(voter, &ballot, &receipts[index])
        .await
        .with_context(|| format!("placing {voter_name}'s vote"))?;
    println!("{voter_name} voted for {candidate_name}");
    Ok(())
}

/// Retract a voter's open vote offer, if the trade has not executed yet.
pub async fn retract<C: LedgerClient>(
    client: &C,
    config: &Config,
    roster: &Roster,
    voter_name: &str,
) -> anyhow::Result<()> {
    let exchange = BallotExchange::new(client, config.network);
    let voter = roster
        .voter(voter_name)
        .with_context(|| format!("unknown voter {voter_name}"))?;
    let ballot = ballot_asset(config, roster)?;

    match exchange.retract_vote(voter, &ballot).await? {
        Some(_) => println!("{voter_name}'s open vote offer was canceled"),
        None => println!("{voter_name} has no open vote offer (nothing to retract)"),
    }
    Ok(())
}

/// Submit a published finalization envelope. Anyone can run this at or
/// after the close time; the envelope needs no signatures.
pub async fn finalize<C: LedgerClient>(client: &C, envelope_hex: &str) -> anyhow::Result<()> {
    let envelope =
        TransactionEnvelope::from_hex(envelope_hex).context("decoding finalization envelope")?;
    let result = submit_finalization(client, &envelope)
        .await
        .context("submitting finalization")?;
    println!("vote closed; finalization applied in ledger {}", result.ledger);
    Ok(())
}

/// Read and print the result.
pub async fn print_tally<C: LedgerClient>(
    client: &C,
    config: &Config,
    roster: &Roster,
) -> anyhow::Result<()> {
    let candidates = config.candidate_list()?;
    let counts = tally(
        client,
        &roster.collector.account_id,
        &roster.receipt_issuer.account_id,
        &candidates,
    )
    .await
    .context("reading tally")?;

    if counts.is_empty() {
        bail!("no candidates configured");
    }
    for count in &counts {
        println!("{}: {} vote{}", count.candidate.name, count.votes, plural(count.votes));
    }
    Ok(())
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
