//! Time-locked finalization: deferred, unattended vote closing.
//!
//! The finalizer builds an unsigned transaction that cancels every open
//! collection offer, valid only from the vote-end time onward, and pins its
//! content hash onto the collection account as a weight-255 signer — in the
//! same transaction that raises the thresholds to 255. From that moment the
//! only thing the ledger will ever accept from the account is that exact
//! transaction, and only once the clock passes the bound. Nobody needs to
//! be online when the vote ends.
//!
//! Sequence arithmetic is the single most safety-critical step here. The
//! finalization transaction must carry sequence N+2, where N is the
//! account's sequence when `build` ran: N+1 is consumed by the install+lock
//! transaction itself. If the account moves between `build` and
//! `install_and_lock`, the pinned hash is wrong and can never be satisfied
//! — so installation re-verifies the live sequence and refuses on drift
//! rather than bricking the vote.

use crate::submit::sign_and_submit;
use crate::{ProtocolError, PRE_AUTH_WEIGHT};
use tessera_client::{AccountRecord, LedgerClient, SubmitResult};
use tessera_tx::manage_offer::ManageOfferOp;
use tessera_tx::set_options::SetOptionsOp;
use tessera_tx::{tx_hash, Operation, TransactionBuilder, TransactionEnvelope};
use tessera_types::{
    AccountId, KeyPair, NetworkId, SequenceNumber, Signer, SignerKey, TimeBounds, Timestamp,
    TxHash,
};

/// Local lifecycle of the finalizer. `PreAuthInstalled` and `Locked`
/// collapse into one state because installation and lock are a single
/// atomic transaction; `Executable`/`Executed` are ledger-side facts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalizeState {
    Active,
    Built,
    Locked,
}

struct BuiltFinalization {
    envelope: TransactionEnvelope,
    hash: TxHash,
    /// The collection account's sequence when `build` captured it.
    base_sequence: SequenceNumber,
}

/// Builds, pre-authorizes and locks in the end-of-vote transaction for one
/// collection account.
pub struct Finalizer<'a, C> {
    client: &'a C,
    network: NetworkId,
    collector: AccountId,
    state: FinalizeState,
    built: Option<BuiltFinalization>,
}

impl<'a, C: LedgerClient> Finalizer<'a, C> {
    pub fn new(client: &'a C, network: NetworkId, collector: AccountId) -> Self {
        Self {
            client,
            network,
            collector,
            state: FinalizeState::Active,
            built: None,
        }
    }

    pub fn state(&self) -> FinalizeState {
        self.state
    }

    /// The unsigned finalization envelope, once built. Publish it anywhere;
    /// it needs no signature to execute after its time bound.
    pub fn envelope(&self) -> Option<&TransactionEnvelope> {
        self.built.as_ref().map(|b| &b.envelope)
    }

    /// Hash the pre-authorization commits to, once built.
    pub fn pre_auth_hash(&self) -> Option<TxHash> {
        self.built.as_ref().map(|b| b.hash)
    }

    /// Build the unsigned cancel-all transaction, valid from `close_time`
    /// onward, at sequence N+2 (N = live sequence now, N+1 belongs to the
    /// install+lock transaction).
    pub async fn build(&mut self, close_time: Timestamp) -> Result<&TransactionEnvelope, ProtocolError> {
        if self.state != FinalizeState::Active {
            return Err(ProtocolError::State(format!(
                "finalization already {:?}",
                self.state
            )));
        }

        let offers = self
            .client
            .offers(&self.collector)
            .await
            .map_err(ProtocolError::classify)?;
        if offers.is_empty() {
            return Err(ProtocolError::State(
                "no open collection offers to finalize".into(),
            ));
        }

        let record = self
            .client
            .load_account(&self.collector)
            .await
            .map_err(ProtocolError::classify)?;
        let base_sequence = record.sequence;

        let mut builder = TransactionBuilder::new(self.collector.clone(), base_sequence)
            .at_sequence(base_sequence.next().next())
            .with_time_bounds(TimeBounds::from(close_time));
        for offer in &offers {
            builder = builder.add_operation(Operation::ManageOffer(ManageOfferOp::cancel(
                offer.id,
                offer.selling.clone(),
                offer.buying.clone(),
                offer.price,
            )));
        }
        let tx = builder.build()?;
        let hash = tx_hash(self.network, &tx)?;

        tracing::info!(
            collector = %self.collector,
            offers = offers.len(),
            close_time = %close_time,
            hash = %hash,
            "built finalization transaction"
        );
        self.built = Some(BuiltFinalization {
            envelope: TransactionEnvelope::new(tx),
            hash,
            base_sequence,
        });
        self.state = FinalizeState::Built;
        Ok(&self.built.as_ref().expect("just set").envelope)
    }

    /// Install the pre-authorized hash signer and lock the account, as one
    /// committee-signed transaction at sequence N+1.
    ///
    /// Re-verifies that the live sequence still equals the one `build`
    /// captured; any drift means the built hash is already unsatisfiable
    /// and installation must not proceed.
    pub async fn install_and_lock(
        &mut self,
        committee_keys: &[&KeyPair],
    ) -> Result<SubmitResult, ProtocolError> {
        if self.state != FinalizeState::Built {
            return Err(ProtocolError::State(format!(
                "finalization is {:?}, expected Built",
                self.state
            )));
        }
        let built = self.built.as_ref().expect("state Built implies built");

        let record = self
            .client
            .load_account(&self.collector)
            .await
            .map_err(ProtocolError::classify)?;
        if record.sequence != built.base_sequence {
            // The built hash is already unsatisfiable; drop it so the
            // caller restarts from `build` with fresh state.
            let err = ProtocolError::SequencePrecondition {
                built_at: built.base_sequence.value(),
                live: record.sequence.value(),
            };
            self.built = None;
            self.state = FinalizeState::Active;
            return Err(err);
        }

        let tx = TransactionBuilder::new(self.collector.clone(), built.base_sequence)
            .add_operation(Operation::SetOptions(SetOptionsOp::with_signer(
                Signer::pre_auth(built.hash, PRE_AUTH_WEIGHT),
            )))
            .add_operation(Operation::SetOptions(SetOptionsOp::lock()))
            .build()?;

        tracing::info!(
            collector = %self.collector,
            hash = %built.hash,
            "installing pre-authorization and locking account"
        );
        match sign_and_submit(self.client, self.network, tx, committee_keys).await {
            Ok(result) => {
                self.state = FinalizeState::Locked;
                Ok(result)
            }
            Err(err) if err.is_sequence_race() => {
                // The account moved after our check; the built hash is dead.
                // Drop it and make the caller start over from `build`.
                self.built = None;
                self.state = FinalizeState::Active;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

/// Whether a pre-authorized hash signer is installed on the account.
pub fn has_pre_auth_signer(record: &AccountRecord) -> bool {
    record
        .signers
        .iter()
        .any(|s| matches!(s.key, SignerKey::PreAuthTx(_)))
}

/// Submit a published finalization envelope. Anyone may call this at or
/// after the vote-end time; before it, the ledger rejects with `TooEarly`.
pub async fn submit_finalization<C: LedgerClient>(
    client: &C,
    envelope: &TransactionEnvelope,
) -> Result<SubmitResult, ProtocolError> {
    client.submit(envelope).await.map_err(ProtocolError::classify)
}
