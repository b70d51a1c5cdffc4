//! Governance account controller: multi-signature setup and the
//! irreversible lock.

use crate::finalize::has_pre_auth_signer;
use crate::submit::{sign_and_submit, submit_with_rebuild};
use crate::{ProtocolError, SIGNER_WEIGHT};
use tessera_client::{LedgerClient, SubmitResult};
use tessera_tx::set_options::SetOptionsOp;
use tessera_tx::{Operation, TransactionBuilder};
use tessera_types::{AccountFlags, AccountId, KeyPair, NetworkId, Signer, Thresholds};

use crate::registry::Identity;

/// Configures jointly-owned accounts: signer set, thresholds, capability
/// flags, master-key revocation.
pub struct MultiSigController<'a, C> {
    client: &'a C,
    network: NetworkId,
}

impl<'a, C: LedgerClient> MultiSigController<'a, C> {
    pub fn new(client: &'a C, network: NetworkId) -> Self {
        Self { client, network }
    }

    /// Turn `account` into a jointly controlled account: add each committee
    /// member as a weight-1 signer, then in the same transaction set the
    /// thresholds, set any issuer flags, and zero the master weight.
    ///
    /// This is the only time the account's own key signs anything. The call
    /// is deliberately not retried: a rejection here means the whole run is
    /// misconfigured and must be aborted, not nudged.
    pub async fn configure_multi_sig(
        &self,
        account: &Identity,
        committee: &[&Identity],
        thresholds: Thresholds,
        flags: AccountFlags,
    ) -> Result<SubmitResult, ProtocolError> {
        let record = self
            .client
            .load_account(&account.account_id)
            .await
            .map_err(ProtocolError::classify)?;

        let mut builder = TransactionBuilder::new(account.account_id.clone(), record.sequence);
        for member in committee {
            builder = builder.add_operation(Operation::SetOptions(SetOptionsOp::with_signer(
                Signer::ed25519(member.keys.public, SIGNER_WEIGHT),
            )));
        }
        let closing = SetOptionsOp {
            master_weight: Some(0),
            thresholds: Some(thresholds),
            set_flags: (flags != AccountFlags::NONE).then_some(flags),
            ..SetOptionsOp::default()
        };
        let tx = builder
            .add_operation(Operation::SetOptions(closing))
            .build()?;

        tracing::info!(
            account = %account.account_id,
            signers = committee.len(),
            "configuring multi-sig and disabling master key"
        );
        sign_and_submit(self.client, self.network, tx, &[&account.keys]).await
    }

    /// Raise every threshold to 255, signed by the full committee. After
    /// this no signer combination can authorize anything — the account is
    /// permanently inert except for a pre-authorized hash signer installed
    /// beforehand.
    ///
    /// `expect_pre_auth` is the ordering assertion: when locking the
    /// collection account it must be `true`, and the call refuses to
    /// proceed unless the finalization hash signer is already installed
    /// (locking first would strand the vote with no way to ever close it).
    /// Issuer accounts carry no pre-authorization by design and pass
    /// `false`.
    pub async fn lock_account(
        &self,
        account_id: &AccountId,
        committee_keys: &[&KeyPair],
        expect_pre_auth: bool,
    ) -> Result<SubmitResult, ProtocolError> {
        if expect_pre_auth {
            let record = self
                .client
                .load_account(account_id)
                .await
                .map_err(ProtocolError::classify)?;
            if !has_pre_auth_signer(&record) {
                return Err(ProtocolError::MissingPreAuth);
            }
        }

        tracing::info!(account = %account_id, "locking account (thresholds 255)");
        submit_with_rebuild(self.client, self.network, account_id, committee_keys, |record| {
            TransactionBuilder::new(account_id.clone(), record.sequence)
                .add_operation(Operation::SetOptions(SetOptionsOp::lock()))
                .build()
        })
        .await
    }
}
