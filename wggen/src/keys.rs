//! X25519 key material in the text format used by WireGuard configs.
//!
//! Keys are 32 bytes, written as standard padded base64 (44 characters),
//! the same representation `wg genkey` and `wg pubkey` emit.

use base64::prelude::*;
use rand::rngs::OsRng;
use rand::RngCore;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::error::{KeyError, Result};

/// A freshly generated client keypair
#[derive(Clone)]
pub struct KeyPair {
    private_key: StaticSecret,
    public_key: PublicKey,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_base64())
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generate a new keypair from the OS random source
    pub fn generate() -> Self {
        Self::from_secret(generate_private_key())
    }

    pub fn from_secret(private_key: StaticSecret) -> Self {
        let public_key = derive_public_key(&private_key);
        Self {
            private_key,
            public_key,
        }
    }

    pub fn private_base64(&self) -> String {
        encode_key(&self.private_key.to_bytes())
    }

    pub fn public_base64(&self) -> String {
        encode_key(self.public_key.as_bytes())
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// Encode a key to base64
pub fn encode_key(key: &[u8; 32]) -> String {
    BASE64_STANDARD.encode(key)
}

/// Decode a base64 key, checking it is exactly 32 bytes
pub fn decode_key(s: &str, kind: &'static str) -> Result<[u8; 32]> {
    let bytes = BASE64_STANDARD
        .decode(s.trim())
        .map_err(|e| KeyError::InvalidBase64(e.to_string()))?;

    let key: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| KeyError::InvalidLength {
            kind,
            len: bytes.len(),
        })?;
    Ok(key)
}

/// Generate a new private key
pub fn generate_private_key() -> StaticSecret {
    StaticSecret::random_from_rng(OsRng)
}

/// Derive public key from private key
pub fn derive_public_key(private_key: &StaticSecret) -> PublicKey {
    PublicKey::from(private_key)
}

/// Derive the base64 public key for a base64 private key
pub fn public_key_from_base64(private_key: &str) -> Result<String> {
    let bytes = decode_key(private_key, "Private")?;
    let secret = StaticSecret::from(bytes);
    Ok(encode_key(derive_public_key(&secret).as_bytes()))
}

/// Generate a random 32-byte pre-shared key, base64 encoded
pub fn generate_preshared_key() -> String {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    encode_key(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WgError;

    #[test]
    fn test_generated_keys_are_44_chars() {
        let pair = KeyPair::generate();
        assert_eq!(pair.private_base64().len(), 44);
        assert_eq!(pair.public_base64().len(), 44);
        assert_ne!(pair.private_base64(), pair.public_base64());
    }

    #[test]
    fn test_pubkey_matches_generated_pair() {
        let pair = KeyPair::generate();
        let derived = public_key_from_base64(&pair.private_base64()).unwrap();
        assert_eq!(derived, pair.public_base64());
    }

    #[test]
    fn test_pubkey_accepts_trailing_newline() {
        let pair = KeyPair::generate();
        let input = format!("{}\n", pair.private_base64());
        assert_eq!(public_key_from_base64(&input).unwrap(), pair.public_base64());
    }

    #[test]
    fn test_known_vector() {
        // RFC 7748 section 6.1, Alice's keys
        let private = [
            0x77, 0x07, 0x6d, 0x0a, 0x73, 0x18, 0xa5, 0x7d, 0x3c, 0x16, 0xc1, 0x72, 0x51, 0xb2,
            0x66, 0x45, 0xdf, 0x4c, 0x2f, 0x87, 0xeb, 0xc0, 0x99, 0x2a, 0xb1, 0x77, 0xfb, 0xa5,
            0x1d, 0xb9, 0x2c, 0x2a,
        ];
        let public = [
            0x85, 0x20, 0xf0, 0x09, 0x89, 0x30, 0xa7, 0x54, 0x74, 0x8b, 0x7d, 0xdc, 0xb4, 0x3e,
            0xf7, 0x5a, 0x0d, 0xbf, 0x3a, 0x0d, 0x26, 0x38, 0x1a, 0xf4, 0xeb, 0xa4, 0xa9, 0x8e,
            0xaa, 0x9b, 0x4e, 0x6a,
        ];
        let derived = public_key_from_base64(&encode_key(&private)).unwrap();
        assert_eq!(derived, encode_key(&public));
    }

    #[test]
    fn test_decode_rejects_short_key() {
        let err = decode_key("AAAA", "Private").unwrap_err();
        assert!(matches!(
            err,
            WgError::Key(KeyError::InvalidLength { len: 3, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let err = decode_key("not base64!", "Private").unwrap_err();
        assert!(matches!(err, WgError::Key(KeyError::InvalidBase64(_))));
    }

    #[test]
    fn test_preshared_keys_differ() {
        let a = generate_preshared_key();
        let b = generate_preshared_key();
        assert_eq!(decode_key(&a, "Preshared").unwrap().len(), 32);
        assert_ne!(a, b);
    }
}
