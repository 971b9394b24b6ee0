//! Curve25519 key agreement and EC-KCDSA signatures, from first
//! principles.
//!
//! This crate implements the signature and key-agreement scheme used by
//! NXT-family ledgers: Curve25519 scalar multiplication on the
//! Montgomery X line, deterministic EC-KCDSA signing, and the
//! three-slot verification ladder, all over hand-rolled fixed-size
//! integer arithmetic. No external big-integer or elliptic-curve
//! library is involved; the field and group code is self-contained and
//! allocation-free.
//!
//! # Module overview
//!
//! - `curve`
//!   The mathematical core: byte-radix big-integer helpers for
//!   arithmetic modulo the group order, radix-2^16 field elements of
//!   GF(2^255 - 19), Montgomery ladder steps, and the EC-KCDSA
//!   operations (`keygen`, `sign`, `verify`, `scalar_mult`) together
//!   with canonical-encoding checks.
//!
//! - `wallet`
//!   The account-facing layer: `KeyPair`, `PublicKey` and `Signature`
//!   types wrapping the curve operations into the SHA-256-based
//!   message-signing protocol, plus raw key agreement.
//!
//! - `node`
//!   A small blocking HTTP client for a ledger node's `requestType`
//!   API (behind the `node` feature, on by default).
//!
//! - `error`
//!   The crate-wide error type for the computational layers.
//!
//! # Design goals
//!
//! - No heap allocations in the curve core
//! - Deterministic signing, no per-call randomness
//! - Canonical encodings enforced at the wallet boundary
//! - Secret key material wiped on drop

pub mod curve;
pub mod error;
#[cfg(feature = "node")]
pub mod node;
pub mod wallet;

pub use error::Error;
