use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::curve::{self, KeyMaterial};
use crate::error::Error;

/// A 32-byte account public key (packed Montgomery X of `k G`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Wraps raw bytes; fails when `bytes` is not exactly 32 long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let raw = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(PublicKey(raw))
    }

    /// Parses the conventional lowercase-hex encoding.
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let bytes = hex::decode(hex)?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Whether the packed value is below `2^255 - 19`.
    ///
    /// Keys published by [`KeyPair`] always are; foreign keys must be
    /// checked before use, as a non-canonical key aliases a canonical
    /// one under the curve arithmetic.
    pub fn is_canonical(&self) -> bool {
        curve::is_canonical_public_key(&self.0)
    }

    /// Verifies `signature` over `message`.
    ///
    /// ## Protocol
    ///
    /// The signer committed to `h = H(H(message) || Y)` where
    /// `Y = x G` for an ephemeral `x`. Verification reconstructs
    /// `Y' = v |P| + h G` from the signature halves and accepts when
    /// `H(H(message) || Y')` equals the committed `h`, comparing in
    /// constant time.
    ///
    /// Non-canonical signatures and non-canonical keys are rejected
    /// outright so that every accepted (message, signature, key) triple
    /// has exactly one byte representation.
    pub fn verify(&self, signature: &Signature, message: &[u8]) -> bool {
        if !signature.is_canonical() || !self.is_canonical() {
            return false;
        }

        let y = curve::verify(&signature.v, &signature.h, &self.0);

        let m = Sha256::digest(message);
        let expected = Sha256::new().chain_update(m).chain_update(y).finalize();
        expected[..].ct_eq(&signature.h[..]).into()
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A 64-byte signature: the scalar half `v` followed by the committed
/// hash `h`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Signature {
    pub(crate) v: [u8; 32],
    pub(crate) h: [u8; 32],
}

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 64 {
            return Err(Error::InvalidLength {
                expected: 64,
                actual: bytes.len(),
            });
        }
        let mut v = [0u8; 32];
        let mut h = [0u8; 32];
        v.copy_from_slice(&bytes[..32]);
        h.copy_from_slice(&bytes[32..]);
        Ok(Signature { v, h })
    }

    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let bytes = hex::decode(hex)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.v);
        out[32..].copy_from_slice(&self.h);
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Whether the `v` half is already reduced mod the group order.
    pub fn is_canonical(&self) -> bool {
        curve::is_canonical_signature(&self.to_bytes())
    }
}

/// Signing and agreement keys for one account.
///
/// Holds the full [`KeyMaterial`]; dropped copies are wiped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    keys: KeyMaterial,
}

impl KeyPair {
    /// Derives the keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, Error> {
        let keys = curve::keygen(seed)?;
        Ok(KeyPair { keys })
    }

    /// Derives the keypair from a passphrase, seeded by `H(passphrase)`.
    pub fn from_passphrase(passphrase: &str) -> Result<Self, Error> {
        let seed: Zeroizing<[u8; 32]> =
            Zeroizing::new(Sha256::digest(passphrase.as_bytes()).into());
        Self::from_seed(&seed)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.keys.public)
    }

    /// Signs `message` deterministically.
    ///
    /// ## Protocol
    ///
    /// 1. `m = H(message)`.
    /// 2. The ephemeral scalar is `x = H(m || s)`, clamped. Deriving it
    ///    from the message and the signing key makes signing
    ///    deterministic with no per-call randomness to mismanage.
    /// 3. `Y = x G`, `h = H(m || Y)`, `v = (x - h) s mod q`.
    /// 4. The signature is `v || h`.
    ///
    /// The only failure is the degenerate `v = 0` case, which for a
    /// fixed key requires finding a message with `x = h mod q`.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, Error> {
        let m = Sha256::digest(message);

        let mut x: Zeroizing<[u8; 32]> = Zeroizing::new(
            Sha256::new()
                .chain_update(m)
                .chain_update(self.keys.signing)
                .finalize()
                .into(),
        );
        curve::clamp(&mut x);

        let y = curve::scalar_mult(&x, None);
        let h: [u8; 32] = Sha256::new().chain_update(m).chain_update(y).finalize().into();

        let v = curve::sign(&h, &x, &self.keys.signing)?;
        Ok(Signature { v, h })
    }

    /// Raw key agreement with a peer: the packed X of `k P_peer`.
    ///
    /// Both sides arrive at the same bytes. The result is unhashed; a
    /// protocol on top decides how to turn it into session keys.
    pub fn shared_secret(&self, peer: &PublicKey) -> [u8; 32] {
        curve::scalar_mult(&self.keys.agreement, Some(&peer.0))
    }
}
