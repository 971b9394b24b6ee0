//! Crate-wide error type for the curve engine and wallet layer.
//!
//! The node client has its own error taxonomy (`node::NodeError`); the
//! variants here cover the deterministic, offline operations only.

use thiserror::Error;

/// Errors produced by key generation, signing and parsing.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A byte input had the wrong size for the target type.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Signing collapsed to the zero scalar (`v = 0`).
    ///
    /// Only possible when the nonce hash equals the message hash mod q.
    #[error("signature generation produced the zero scalar")]
    DegenerateSignature,

    /// A modular inverse of zero was requested.
    #[error("attempted to invert zero modulo the group order")]
    ZeroDivisor,

    /// Text input was not valid hex.
    #[error("invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),
}
