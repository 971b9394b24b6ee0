//! Curve25519 group arithmetic and the EC-KCDSA primitive layer.
//!
//! Everything in this module tree is self-contained integer and field
//! arithmetic over fixed-size buffers. The submodules split by radix:
//!
//! - [`bigint`]: byte-radix helpers for arithmetic modulo the group
//!   order (multiply-accumulate, division, extended gcd).
//! - [`field`]: radix-2^16 elements of GF(2^255 - 19).
//! - [`mont`]: Montgomery ladder step functions and base point
//!   constants.
//!
//! The flat re-exports carry the scheme itself: [`keygen`],
//! [`scalar_mult`], [`sign`], [`verify`] and the canonical-encoding
//! checks.

pub mod bigint;
pub mod field;
pub mod mont;

mod core;

pub use self::core::*;
