//! Core drivers of the tessera voting protocol.
//!
//! The protocol runs in strict phases, each an independent entry point:
//!
//! 1. **Setup** — [`MultiSigController::configure_multi_sig`] turns each
//!    governance account into a 4-signer, n-of-n jointly controlled account
//!    and disables its master key.
//! 2. **Trust** — [`IssuanceController::create_trustline`] opts voters and
//!    the collection account into the tokens they will hold.
//! 3. **Issuance** — [`IssuanceController`] authorizes and distributes one
//!    ballot per voter, mints the receipt supply to the collection account,
//!    then the issuers are locked forever (no further supply can exist).
//! 4. **Voting** — [`BallotExchange`] places the 1:1 ballot-for-receipt
//!    offers that *are* the votes; the collection account's standing
//!    counter-offers execute them.
//! 5. **Finalization** — [`Finalizer`] pre-authorizes a time-locked
//!    cancel-everything transaction and locks the collection account; the
//!    ledger closes the vote by itself at the configured time.
//! 6. **Tally** — [`tally`] reads the result off the collection account's
//!    trustlines.
//!
//! Every operation against a single governance account is serialized by the
//! phase structure; a stale-sequence rejection is retried exactly once from
//! reloaded state (see [`submit::submit_with_rebuild`]), all other
//! rejections surface as unmet preconditions.

pub mod error;
pub mod exchange;
pub mod finalize;
pub mod issuance;
pub mod multisig;
pub mod registry;
pub mod submit;
pub mod tally;

pub use error::ProtocolError;
pub use exchange::BallotExchange;
pub use finalize::{submit_finalization, FinalizeState, Finalizer};
pub use issuance::IssuanceController;
pub use multisig::MultiSigController;
pub use registry::{Candidate, Identity, Roster};
pub use tally::{tally, VoteCount};

/// Weight of every committee signer on a governance account.
pub const SIGNER_WEIGHT: u8 = 1;

/// Required summed weight for any governance action: all four committee
/// members. Deliberately n-of-n, not a quorum — every party must agree.
pub const COMMITTEE_THRESHOLD: u8 = 4;

/// Weight of the pre-authorized finalization hash signer: above any
/// threshold, including the 255 lock.
pub const PRE_AUTH_WEIGHT: u8 = 255;
