use proptest::prelude::*;

use tessera_types::{Amount, Price, SequenceNumber, Timestamp, TxHash};

proptest! {
    /// TxHash roundtrip: new -> as_bytes -> new produces identical hash.
    #[test]
    fn tx_hash_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        prop_assert_eq!(hash.as_bytes(), &bytes);
    }

    /// TxHash::is_zero is true only for all-zero bytes.
    #[test]
    fn tx_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        prop_assert_eq!(hash.is_zero(), bytes == [0u8; 32]);
    }

    /// TxHash bincode serialization roundtrip.
    #[test]
    fn tx_hash_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        let encoded = bincode::serialize(&hash).unwrap();
        let decoded: TxHash = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_bytes(), hash.as_bytes());
    }

    /// Amount checked_add agrees with u64 overflow behavior.
    #[test]
    fn amount_checked_add(a in 0u64.., b in 0u64..) {
        let sum = Amount::new(a).checked_add(Amount::new(b));
        prop_assert_eq!(sum.map(|s| s.units()), a.checked_add(b));
    }

    /// Amount saturating_sub never underflows.
    #[test]
    fn amount_saturating_sub(a in 0u64.., b in 0u64..) {
        let diff = Amount::new(a).saturating_sub(Amount::new(b));
        prop_assert_eq!(diff.units(), a.saturating_sub(b));
    }

    /// Price equality is symmetric under scaling.
    #[test]
    fn price_scaling_preserves_equality(n in 1u32..1000, d in 1u32..1000, k in 1u32..1000) {
        prop_assert_eq!(Price::new(n, d), Price::new(n * k, d * k));
    }

    /// A price always crosses its own inversion.
    #[test]
    fn price_crosses_inverse(n in 1u32..1000, d in 1u32..1000) {
        let p = Price::new(n, d);
        prop_assert!(p.crosses(&p.inverted()));
    }

    /// Sequence numbers are strictly increasing under next().
    #[test]
    fn sequence_next_strictly_increasing(n in 0u64..u64::MAX) {
        let seq = SequenceNumber::new(n);
        prop_assert!(seq.next() > seq);
        prop_assert_eq!(seq.next().value(), n + 1);
    }

    /// Timestamp ordering matches the underlying seconds.
    #[test]
    fn timestamp_ordering(a in 0u64.., b in 0u64..) {
        prop_assert_eq!(Timestamp::new(a) <= Timestamp::new(b), a <= b);
    }
}
