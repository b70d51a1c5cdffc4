//! Structural transaction validation.
//!
//! These checks hold no ledger state: they catch configuration-class
//! mistakes (malformed operations) before any network call is made.

use crate::{Operation, Transaction, TxError, MAX_OPERATIONS};

pub fn validate(tx: &Transaction) -> Result<(), TxError> {
    if tx.operations.is_empty() {
        return Err(TxError::NoOperations);
    }
    if tx.operations.len() > MAX_OPERATIONS {
        return Err(TxError::TooManyOperations(tx.operations.len()));
    }
    for op in &tx.operations {
        validate_operation(op)?;
    }
    Ok(())
}

fn validate_operation(op: &Operation) -> Result<(), TxError> {
    match op {
        Operation::SetOptions(so) => {
            if so.is_empty() {
                return Err(TxError::EmptySetOptions);
            }
        }
        Operation::Payment(p) => {
            if p.amount.is_zero() {
                return Err(TxError::ZeroAmountPayment);
            }
        }
        Operation::ManageOffer(mo) => {
            if mo.price.n == 0 || mo.price.d == 0 {
                return Err(TxError::ZeroPrice);
            }
            if mo.selling == mo.buying {
                return Err(TxError::SelfTrade);
            }
        }
        Operation::ChangeTrust(_) | Operation::AllowTrust(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manage_offer::ManageOfferOp;
    use crate::payment::PaymentOp;
    use crate::set_options::SetOptionsOp;
    use crate::TransactionBuilder;
    use tessera_types::{AccountId, Amount, Asset, AssetCode, Price, SequenceNumber};

    fn asset(code: &str) -> Asset {
        Asset::credit(AssetCode::new(code).unwrap(), AccountId::new("tsr_issuer"))
    }

    fn build_with(op: Operation) -> Result<Transaction, TxError> {
        TransactionBuilder::new(AccountId::new("tsr_a"), SequenceNumber::new(0))
            .add_operation(op)
            .build()
    }

    #[test]
    fn zero_amount_payment_rejected() {
        let op = Operation::Payment(PaymentOp::new(
            AccountId::new("tsr_b"),
            asset("VOTE"),
            Amount::ZERO,
        ));
        assert_eq!(build_with(op).unwrap_err(), TxError::ZeroAmountPayment);
    }

    #[test]
    fn empty_set_options_rejected() {
        let op = Operation::SetOptions(SetOptionsOp::default());
        assert_eq!(build_with(op).unwrap_err(), TxError::EmptySetOptions);
    }

    #[test]
    fn zero_price_offer_rejected() {
        let op = Operation::ManageOffer(ManageOfferOp::create(
            asset("VOTE"),
            asset("CANDA"),
            Amount::ONE,
            Price::new(0, 1),
        ));
        assert_eq!(build_with(op).unwrap_err(), TxError::ZeroPrice);
    }

    #[test]
    fn self_trade_rejected() {
        let op = Operation::ManageOffer(ManageOfferOp::create(
            asset("VOTE"),
            asset("VOTE"),
            Amount::ONE,
            Price::ONE,
        ));
        assert_eq!(build_with(op).unwrap_err(), TxError::SelfTrade);
    }

    #[test]
    fn cancel_offer_is_valid() {
        let op = Operation::ManageOffer(ManageOfferOp::cancel(
            17,
            asset("CANDA"),
            asset("VOTE"),
            Price::ONE,
        ));
        assert!(build_with(op).is_ok());
    }
}
