//! Token issuance controller: trustlines, authorization, and issuance
//! payments.

use crate::submit::submit_with_rebuild;
use crate::ProtocolError;
use tessera_client::{LedgerClient, SubmitResult};
use tessera_tx::allow_trust::AllowTrustOp;
use tessera_tx::change_trust::ChangeTrustOp;
use tessera_tx::payment::PaymentOp;
use tessera_tx::{Operation, TransactionBuilder};
use tessera_types::{AccountId, Amount, Asset, AssetCode, KeyPair, NetworkId};

use crate::registry::Identity;

/// Drives trustline creation, issuer authorization, and issuance payments.
pub struct IssuanceController<'a, C> {
    client: &'a C,
    network: NetworkId,
}

impl<'a, C: LedgerClient> IssuanceController<'a, C> {
    pub fn new(client: &'a C, network: NetworkId) -> Self {
        Self { client, network }
    }

    /// Holder opts in to `asset` up to `limit`. Must precede any payment of
    /// the asset; the limit doubles as the tally denominator on the
    /// collection account's receipt trustlines.
    pub async fn create_trustline(
        &self,
        holder: &Identity,
        asset: Asset,
        limit: Amount,
    ) -> Result<SubmitResult, ProtocolError> {
        submit_with_rebuild(
            self.client,
            self.network,
            &holder.account_id,
            &[&holder.keys],
            |record| {
                TransactionBuilder::new(holder.account_id.clone(), record.sequence)
                    .add_operation(Operation::ChangeTrust(ChangeTrustOp::new(
                        asset.clone(),
                        limit,
                    )))
                    .build()
            },
        )
        .await
    }

    /// Grant or revoke a holder's permission for an issuer-gated token.
    /// Requires the full committee; revocation is the offline freeze lever.
    pub async fn set_authorization(
        &self,
        issuer_id: &AccountId,
        committee_keys: &[&KeyPair],
        trustor: &AccountId,
        asset_code: AssetCode,
        authorize: bool,
    ) -> Result<SubmitResult, ProtocolError> {
        let op = if authorize {
            AllowTrustOp::grant(trustor.clone(), asset_code)
        } else {
            AllowTrustOp::revoke(trustor.clone(), asset_code)
        };
        submit_with_rebuild(self.client, self.network, issuer_id, committee_keys, |record| {
            TransactionBuilder::new(issuer_id.clone(), record.sequence)
                .add_operation(Operation::AllowTrust(op.clone()))
                .build()
        })
        .await
    }

    /// Committee-signed issuance payment: mints `amount` of `asset` from
    /// the issuer to `destination`. Fails if the destination's trustline or
    /// authorization is missing.
    pub async fn issue(
        &self,
        issuer_id: &AccountId,
        committee_keys: &[&KeyPair],
        destination: &AccountId,
        asset: Asset,
        amount: Amount,
    ) -> Result<SubmitResult, ProtocolError> {
        submit_with_rebuild(self.client, self.network, issuer_id, committee_keys, |record| {
            TransactionBuilder::new(issuer_id.clone(), record.sequence)
                .add_operation(Operation::Payment(PaymentOp::new(
                    destination.clone(),
                    asset.clone(),
                    amount,
                )))
                .build()
        })
        .await
    }

    /// One transaction that authorizes every voter's ballot trustline and
    /// pays each voter exactly one ballot — the distribution step, batched
    /// so it lands atomically.
    pub async fn distribute_ballots(
        &self,
        issuer_id: &AccountId,
        committee_keys: &[&KeyPair],
        ballot_code: &AssetCode,
        ballot: &Asset,
        voters: &[&AccountId],
    ) -> Result<SubmitResult, ProtocolError> {
        tracing::info!(voters = voters.len(), "distributing ballots");
        submit_with_rebuild(self.client, self.network, issuer_id, committee_keys, |record| {
            let mut builder = TransactionBuilder::new(issuer_id.clone(), record.sequence);
            for voter in voters {
                builder = builder
                    .add_operation(Operation::AllowTrust(AllowTrustOp::grant(
                        (*voter).clone(),
                        ballot_code.clone(),
                    )))
                    .add_operation(Operation::Payment(PaymentOp::new(
                        (*voter).clone(),
                        ballot.clone(),
                        Amount::ONE,
                    )));
            }
            builder.build()
        })
        .await
    }
}
