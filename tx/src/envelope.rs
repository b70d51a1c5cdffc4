//! Transaction envelopes: the transaction body plus its signatures.
//!
//! The content hash covers (network passphrase, body) and never the
//! signatures, so the hash a pre-authorized signer commits to is the hash of
//! the *unsigned* transaction — the finalization envelope is published and
//! later submitted with no signatures at all.

use crate::{Transaction, TxError};
use serde::{Deserialize, Serialize};
use tessera_crypto::{blake2b_256, blake2b_256_multi, sign_message};
use tessera_types::{KeyPair, NetworkId, PublicKey, Signature, TxHash};

/// Deterministic content hash of a transaction, bound to one network.
pub fn tx_hash(network: NetworkId, tx: &Transaction) -> Result<TxHash, TxError> {
    let body = bincode::serialize(tx).map_err(|e| TxError::Serialization(e.to_string()))?;
    let domain = blake2b_256(network.passphrase().as_bytes());
    Ok(TxHash::new(blake2b_256_multi(&[&domain, &body])))
}

/// A signature together with the public key that produced it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecoratedSignature {
    pub signer: PublicKey,
    pub signature: Signature,
}

/// A transaction plus any number of attached signatures (including zero —
/// a pre-authorized transaction authorizes itself by hash).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl TransactionEnvelope {
    pub fn new(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: Vec::new(),
        }
    }

    /// The envelope's content hash (signature-independent).
    pub fn hash(&self, network: NetworkId) -> Result<TxHash, TxError> {
        tx_hash(network, &self.tx)
    }

    /// Attach a signature over the content hash.
    pub fn sign(&mut self, network: NetworkId, keys: &KeyPair) -> Result<(), TxError> {
        let hash = self.hash(network)?;
        let signature = sign_message(hash.as_bytes(), &keys.secret);
        self.signatures.push(DecoratedSignature {
            signer: keys.public,
            signature,
        });
        Ok(())
    }

    /// Hex transport encoding (bincode inside).
    pub fn to_hex(&self) -> Result<String, TxError> {
        let bytes = bincode::serialize(self).map_err(|e| TxError::Serialization(e.to_string()))?;
        Ok(hex::encode(bytes))
    }

    /// Decode an envelope from its hex transport form.
    pub fn from_hex(encoded: &str) -> Result<Self, TxError> {
        let bytes =
            hex::decode(encoded.trim()).map_err(|e| TxError::BadEnvelopeHex(e.to_string()))?;
        bincode::deserialize(&bytes).map_err(|e| TxError::BadEnvelopeBytes(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_trust::ChangeTrustOp;
    use crate::{Operation, TransactionBuilder};
    use tessera_crypto::{keypair_from_seed, verify_signature};
    use tessera_types::{AccountId, Amount, Asset, AssetCode, SequenceNumber};

    fn sample_tx(seq: u64) -> Transaction {
        let asset = Asset::credit(
            AssetCode::new("VOTE").unwrap(),
            AccountId::new("tsr_issuer"),
        );
        TransactionBuilder::new(AccountId::new("tsr_source"), SequenceNumber::new(seq))
            .add_operation(Operation::ChangeTrust(ChangeTrustOp::new(
                asset,
                Amount::ONE,
            )))
            .build()
            .unwrap()
    }

    #[test]
    fn hash_is_deterministic() {
        let tx = sample_tx(1);
        let h1 = tx_hash(NetworkId::Test, &tx).unwrap();
        let h2 = tx_hash(NetworkId::Test, &tx).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn hash_depends_on_sequence() {
        let h1 = tx_hash(NetworkId::Test, &sample_tx(1)).unwrap();
        let h2 = tx_hash(NetworkId::Test, &sample_tx(2)).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn hash_depends_on_network() {
        let tx = sample_tx(1);
        let h1 = tx_hash(NetworkId::Test, &tx).unwrap();
        let h2 = tx_hash(NetworkId::Dev, &tx).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn signing_does_not_change_hash() {
        let mut env = TransactionEnvelope::new(sample_tx(1));
        let before = env.hash(NetworkId::Test).unwrap();
        env.sign(NetworkId::Test, &keypair_from_seed(&[1u8; 32]))
            .unwrap();
        env.sign(NetworkId::Test, &keypair_from_seed(&[2u8; 32]))
            .unwrap();
        assert_eq!(env.hash(NetworkId::Test).unwrap(), before);
        assert_eq!(env.signatures.len(), 2);
    }

    #[test]
    fn signatures_verify_over_hash() {
        let mut env = TransactionEnvelope::new(sample_tx(1));
        let kp = keypair_from_seed(&[9u8; 32]);
        env.sign(NetworkId::Test, &kp).unwrap();
        let hash = env.hash(NetworkId::Test).unwrap();
        let sig = &env.signatures[0];
        assert_eq!(sig.signer, kp.public);
        assert!(verify_signature(hash.as_bytes(), &sig.signature, &sig.signer));
    }

    #[test]
    fn hex_transport_roundtrip() {
        let mut env = TransactionEnvelope::new(sample_tx(3));
        env.sign(NetworkId::Test, &keypair_from_seed(&[4u8; 32]))
            .unwrap();
        let encoded = env.to_hex().unwrap();
        let decoded = TransactionEnvelope::from_hex(&encoded).unwrap();
        assert_eq!(
            decoded.hash(NetworkId::Test).unwrap(),
            env.hash(NetworkId::Test).unwrap()
        );
        assert_eq!(decoded.signatures.len(), 1);
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(TransactionEnvelope::from_hex("zz").is_err());
        assert!(TransactionEnvelope::from_hex("deadbeef").is_err());
    }
}
