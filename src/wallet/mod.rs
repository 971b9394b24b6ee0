//! Account-level signing, verification and key agreement.
//!
//! This is the byte-facing API: [`KeyPair`] derives keys from a seed or
//! passphrase and produces 64-byte [`Signature`]s over arbitrary
//! messages; [`PublicKey`] checks them. The hashing convention is
//! SHA-256 throughout, and both halves of the protocol enforce
//! canonical encodings before touching the curve.

mod core;

pub use self::core::*;
