//! Account-address derivation from public keys.
//!
//! Address format: `tsr_` + base32(public_key, 52 chars) + base32(checksum, 8 chars)
//!
//! Checksum: first 5 bytes of Blake2b-256(public_key).
//! Base32 alphabet: `13456789abcdefghijkmnopqrstuwxyz` (avoids ambiguous chars).
//! Total address length: 4 (prefix) + 52 + 8 = 64 characters.

use tessera_types::{AccountId, PublicKey};

/// Base32 alphabet (32 chars, avoids visually ambiguous 0/O, 2/Z, l/I, v).
const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Expected length of the encoded part (after `tsr_`): 52 pubkey + 8 checksum.
const ENCODED_LEN: usize = 60;
/// Prefix for all tessera account addresses.
const PREFIX: &str = "tsr_";
/// Number of base32 characters for the public key (256 bits → ceil(256/5) = 52).
const PUBKEY_CHARS: usize = 52;

/// Encode a byte slice as base32 using the tessera alphabet.
fn encode_base32(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    let num_chars = total_bits.div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    // Remaining bits (padded with zeros on the right).
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }

    result
}

/// Decode a base32 string into a fixed-size byte array. Returns `None` on
/// invalid characters or wrong length. Zero-allocation.
fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        if c >= 128 {
            return None;
        }
        let val = BASE32_DECODE[c as usize];
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    if pos < N {
        return None;
    }
    Some(result)
}

/// Derive a `tsr_`-prefixed account address from a public key.
///
/// Process:
/// 1. Compute checksum = Blake2b-256(public_key)[0..5]
/// 2. Encode public_key as 52 base32 characters
/// 3. Encode checksum as 8 base32 characters
/// 4. Address = "tsr_" + encoded_pubkey + encoded_checksum
pub fn derive_account_id(public_key: &PublicKey) -> AccountId {
    let pubkey_encoded = encode_base32(public_key.as_bytes());
    let hash = crate::blake2b_256(public_key.as_bytes());
    let checksum_encoded = encode_base32(&hash[..5]);
    AccountId::new(format!("{}{}{}", PREFIX, pubkey_encoded, checksum_encoded))
}

/// Extract the public key from a valid tessera account address.
///
/// Returns `None` if the address is malformed or has an invalid checksum.
pub fn decode_account_id(address: &str) -> Option<PublicKey> {
    if !address.starts_with(PREFIX) {
        return None;
    }
    let encoded = &address[PREFIX.len()..];
    if encoded.len() != ENCODED_LEN {
        return None;
    }

    let pubkey_bytes: [u8; 32] = decode_base32_fixed(&encoded[..PUBKEY_CHARS])?;
    let checksum: [u8; 5] = decode_base32_fixed(&encoded[PUBKEY_CHARS..])?;

    let hash = crate::blake2b_256(&pubkey_bytes);
    if hash[..5] != checksum {
        return None;
    }
    Some(PublicKey(pubkey_bytes))
}

/// Whether a string is a well-formed tessera account address.
pub fn validate_account_id(address: &str) -> bool {
    decode_account_id(address).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn derive_and_decode_roundtrip() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let id = derive_account_id(&kp.public);
        assert!(id.as_str().starts_with(PREFIX));
        assert_eq!(id.as_str().len(), PREFIX.len() + ENCODED_LEN);
        assert_eq!(decode_account_id(id.as_str()), Some(kp.public));
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let kp = keypair_from_seed(&[6u8; 32]);
        let id = derive_account_id(&kp.public);
        let mut chars: Vec<char> = id.as_str().chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == '1' { '3' } else { '1' };
        let corrupted: String = chars.into_iter().collect();
        assert_eq!(decode_account_id(&corrupted), None);
    }

    #[test]
    fn wrong_prefix_rejected() {
        let kp = keypair_from_seed(&[7u8; 32]);
        let id = derive_account_id(&kp.public);
        let wrong = id.as_str().replacen("tsr_", "brn_", 1);
        assert!(!validate_account_id(&wrong));
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(!validate_account_id("tsr_short"));
        assert!(!validate_account_id(""));
    }

    #[test]
    fn distinct_keys_distinct_addresses() {
        let a = derive_account_id(&keypair_from_seed(&[1u8; 32]).public);
        let b = derive_account_id(&keypair_from_seed(&[2u8; 32]).public);
        assert_ne!(a, b);
    }
}
