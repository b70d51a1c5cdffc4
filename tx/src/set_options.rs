//! SetOptions: account control surgery.
//!
//! Every field is optional; unset fields leave the account untouched. This
//! is the only operation that can add signers, change thresholds, zero the
//! master weight, or flip issuer flags — and therefore the operation that
//! performs both multi-sig setup and the irreversible account lock.

use serde::{Deserialize, Serialize};
use tessera_types::{AccountFlags, Signer, Thresholds};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SetOptionsOp {
    /// New weight for the account's own key; 0 revokes self-authorization.
    pub master_weight: Option<u8>,
    pub thresholds: Option<Thresholds>,
    pub set_flags: Option<AccountFlags>,
    pub clear_flags: Option<AccountFlags>,
    /// Signer to add or update; weight 0 removes the entry.
    pub signer: Option<Signer>,
}

impl SetOptionsOp {
    /// Add or update one signer, touching nothing else.
    pub fn with_signer(signer: Signer) -> Self {
        Self {
            signer: Some(signer),
            ..Self::default()
        }
    }

    /// Raise every threshold to 255 — the irreversible account lock.
    pub fn lock() -> Self {
        Self {
            thresholds: Some(Thresholds::UNREACHABLE),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.master_weight.is_none()
            && self.thresholds.is_none()
            && self.set_flags.is_none()
            && self.clear_flags.is_none()
            && self.signer.is_none()
    }
}
