//! Blocking HTTP client for a ledger node's `requestType` API.
//!
//! Gated behind the `node` feature; everything else in the crate is
//! pure computation with no I/O.

mod client;

pub use self::client::*;
