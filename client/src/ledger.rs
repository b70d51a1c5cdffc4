//! The `LedgerClient` trait and the record types it returns.

use crate::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tessera_tx::TransactionEnvelope;
use tessera_types::{
    AccountFlags, AccountId, Amount, Asset, Price, SequenceNumber, Signer, Thresholds, TxHash,
};

/// One asset position on an account: balance, holder-set limit, and the
/// issuer-controlled authorization flag.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub asset: Asset,
    pub balance: Amount,
    pub limit: Amount,
    pub authorized: bool,
}

/// A loaded account: everything the protocol needs to build and authorize
/// the next transaction against it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub sequence: SequenceNumber,
    pub master_weight: u8,
    pub thresholds: Thresholds,
    pub flags: AccountFlags,
    pub signers: Vec<Signer>,
    pub balances: Vec<BalanceRecord>,
}

impl AccountRecord {
    /// The account's position in `asset`, if a trustline (or native balance)
    /// exists.
    pub fn balance_of(&self, asset: &Asset) -> Option<&BalanceRecord> {
        self.balances.iter().find(|b| &b.asset == asset)
    }
}

/// A standing offer on the order book.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OfferRecord {
    pub id: u64,
    pub seller: AccountId,
    pub selling: Asset,
    pub buying: Asset,
    pub amount: Amount,
    pub price: Price,
}

/// Acknowledgement of an applied transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitResult {
    pub hash: TxHash,
    /// Ledger index the transaction was applied in.
    pub ledger: u64,
}

/// The narrow interface the protocol core drives the ledger through.
///
/// Implementations: `HorizonClient` (HTTP) and the in-memory `NullLedger`
/// in `tessera-nullables`.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Load full account state: sequence, signers, thresholds, balances,
    /// flags.
    async fn load_account(&self, id: &AccountId) -> Result<AccountRecord, ClientError>;

    /// Submit a fully assembled envelope. Partial-signature envelopes are
    /// never valid input — attach every required signature first.
    async fn submit(&self, envelope: &TransactionEnvelope) -> Result<SubmitResult, ClientError>;

    /// All open offers owned by an account, in placement order.
    async fn offers(&self, id: &AccountId) -> Result<Vec<OfferRecord>, ClientError>;

    /// Balance view of an account (the tally reader's only need).
    async fn balances(&self, id: &AccountId) -> Result<Vec<BalanceRecord>, ClientError> {
        Ok(self.load_account(id).await?.balances)
    }
}
