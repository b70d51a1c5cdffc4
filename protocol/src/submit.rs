//! Envelope assembly and the one sanctioned retry.

use crate::ProtocolError;
use tessera_client::{AccountRecord, LedgerClient, SubmitResult};
use tessera_tx::{Transaction, TransactionEnvelope, TxError};
use tessera_types::{AccountId, KeyPair, NetworkId};

/// Fully assemble an envelope (every signature attached) and submit it.
///
/// A partially signed envelope is never a valid intermediate state; this is
/// the only place the protocol crosses from transaction to envelope.
pub async fn sign_and_submit<C: LedgerClient>(
    client: &C,
    network: NetworkId,
    tx: Transaction,
    signers: &[&KeyPair],
) -> Result<SubmitResult, ProtocolError> {
    let mut envelope = TransactionEnvelope::new(tx);
    for keys in signers {
        envelope.sign(network, keys)?;
    }
    client.submit(&envelope).await.map_err(ProtocolError::classify)
}

/// Build from live account state, submit, and — only on a stale-sequence
/// rejection — reload and rebuild exactly once.
///
/// Sequence races are the one rejection class where a blind state refresh
/// is safe: the transaction content is recomputed from the reloaded
/// account, so the retry is a fresh transaction, not a replay. Every other
/// rejection needs remediation and is surfaced to the caller.
pub async fn submit_with_rebuild<C, F>(
    client: &C,
    network: NetworkId,
    source: &AccountId,
    signers: &[&KeyPair],
    build: F,
) -> Result<SubmitResult, ProtocolError>
where
    C: LedgerClient,
    F: Fn(&AccountRecord) -> Result<Transaction, TxError>,
{
    let record = client.load_account(source).await.map_err(ProtocolError::classify)?;
    let tx = build(&record)?;
    match sign_and_submit(client, network, tx, signers).await {
        Err(err) if err.is_sequence_race() => {
            tracing::warn!(account = %source, "sequence race; reloading and rebuilding once");
            let record = client.load_account(source).await.map_err(ProtocolError::classify)?;
            let tx = build(&record)?;
            sign_and_submit(client, network, tx, signers).await
        }
        other => other,
    }
}
