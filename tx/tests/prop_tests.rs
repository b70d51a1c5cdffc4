use proptest::prelude::*;

use tessera_tx::change_trust::ChangeTrustOp;
use tessera_tx::payment::PaymentOp;
use tessera_tx::{tx_hash, Operation, TransactionBuilder, TransactionEnvelope};
use tessera_types::{AccountId, Amount, Asset, AssetCode, NetworkId, SequenceNumber};

fn asset(code: &str) -> Asset {
    Asset::credit(
        AssetCode::new(code).unwrap(),
        AccountId::new("tsr_issuer_fixed"),
    )
}

fn build(seq: u64, amount: u64, dest: &str) -> tessera_tx::Transaction {
    TransactionBuilder::new(AccountId::new("tsr_source_fixed"), SequenceNumber::new(seq))
        .add_operation(Operation::Payment(PaymentOp::new(
            AccountId::new(dest),
            asset("VOTE"),
            Amount::new(amount),
        )))
        .build()
        .unwrap()
}

proptest! {
    /// Identical inputs always hash identically.
    #[test]
    fn hash_deterministic(seq in 0u64..1_000_000, amount in 1u64..1_000_000) {
        let a = build(seq, amount, "tsr_dest");
        let b = build(seq, amount, "tsr_dest");
        prop_assert_eq!(
            tx_hash(NetworkId::Test, &a).unwrap(),
            tx_hash(NetworkId::Test, &b).unwrap()
        );
    }

    /// Any change to the sequence number changes the hash.
    #[test]
    fn hash_sensitive_to_sequence(seq in 0u64..1_000_000, bump in 1u64..1000) {
        let a = build(seq, 1, "tsr_dest");
        let b = build(seq + bump, 1, "tsr_dest");
        prop_assert_ne!(
            tx_hash(NetworkId::Test, &a).unwrap(),
            tx_hash(NetworkId::Test, &b).unwrap()
        );
    }

    /// Any change to an operation changes the hash.
    #[test]
    fn hash_sensitive_to_operations(amount in 1u64..1_000_000, bump in 1u64..1000) {
        let a = build(5, amount, "tsr_dest");
        let b = build(5, amount + bump, "tsr_dest");
        prop_assert_ne!(
            tx_hash(NetworkId::Test, &a).unwrap(),
            tx_hash(NetworkId::Test, &b).unwrap()
        );
    }

    /// Envelope hex transport roundtrips for arbitrary trustline limits.
    #[test]
    fn envelope_roundtrip(limit in 0u64..u64::MAX, seq in 0u64..1_000_000) {
        let tx = TransactionBuilder::new(
            AccountId::new("tsr_holder"),
            SequenceNumber::new(seq),
        )
        .add_operation(Operation::ChangeTrust(ChangeTrustOp::new(
            asset("CANDA"),
            Amount::new(limit),
        )))
        .build()
        .unwrap();
        let env = TransactionEnvelope::new(tx);
        let decoded = TransactionEnvelope::from_hex(&env.to_hex().unwrap()).unwrap();
        prop_assert_eq!(
            decoded.hash(NetworkId::Test).unwrap(),
            env.hash(NetworkId::Test).unwrap()
        );
    }
}
