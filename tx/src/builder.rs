//! Fluent construction of transactions.

use crate::{validation, Operation, Transaction, TxError, BASE_FEE};
use tessera_types::{AccountId, Amount, SequenceNumber, TimeBounds};

/// Builds a [`Transaction`] against a known account sequence number.
///
/// `new` takes the account's *current* sequence and assigns the transaction
/// the next one, which is what the ledger will demand at submission. The
/// time-locked finalizer instead pins an exact future sequence with
/// [`TransactionBuilder::at_sequence`]; getting that number wrong produces a
/// hash no pre-authorization can ever satisfy, so callers of `at_sequence`
/// must re-verify the live sequence before acting on the built transaction.
pub struct TransactionBuilder {
    source: AccountId,
    sequence: SequenceNumber,
    time_bounds: Option<TimeBounds>,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    pub fn new(source: AccountId, current_sequence: SequenceNumber) -> Self {
        Self {
            source,
            sequence: current_sequence.next(),
            time_bounds: None,
            operations: Vec::new(),
        }
    }

    /// Pin the exact sequence number the transaction will carry.
    pub fn at_sequence(mut self, sequence: SequenceNumber) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_time_bounds(mut self, time_bounds: TimeBounds) -> Self {
        self.time_bounds = Some(time_bounds);
        self
    }

    pub fn add_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Validate and produce the transaction. The fee is [`BASE_FEE`] per
    /// operation.
    pub fn build(self) -> Result<Transaction, TxError> {
        let tx = Transaction {
            source: self.source,
            sequence: self.sequence,
            fee: Amount::new(BASE_FEE * self.operations.len() as u64),
            time_bounds: self.time_bounds,
            operations: self.operations,
        };
        validation::validate(&tx)?;
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_trust::ChangeTrustOp;
    use tessera_types::{Asset, AssetCode};

    fn some_op() -> Operation {
        let asset = Asset::credit(
            AssetCode::new("VOTE").unwrap(),
            AccountId::new("tsr_issuer"),
        );
        Operation::ChangeTrust(ChangeTrustOp::new(asset, Amount::ONE))
    }

    #[test]
    fn builder_assigns_next_sequence() {
        let tx = TransactionBuilder::new(AccountId::new("tsr_a"), SequenceNumber::new(7))
            .add_operation(some_op())
            .build()
            .unwrap();
        assert_eq!(tx.sequence, SequenceNumber::new(8));
    }

    #[test]
    fn at_sequence_overrides() {
        let tx = TransactionBuilder::new(AccountId::new("tsr_a"), SequenceNumber::new(7))
            .at_sequence(SequenceNumber::new(9))
            .add_operation(some_op())
            .build()
            .unwrap();
        assert_eq!(tx.sequence, SequenceNumber::new(9));
    }

    #[test]
    fn fee_scales_with_operations() {
        let tx = TransactionBuilder::new(AccountId::new("tsr_a"), SequenceNumber::new(0))
            .add_operation(some_op())
            .add_operation(some_op())
            .build()
            .unwrap();
        assert_eq!(tx.fee, Amount::new(2 * crate::BASE_FEE));
    }

    #[test]
    fn empty_transaction_rejected() {
        let err = TransactionBuilder::new(AccountId::new("tsr_a"), SequenceNumber::new(0))
            .build()
            .unwrap_err();
        assert_eq!(err, TxError::NoOperations);
    }
}
