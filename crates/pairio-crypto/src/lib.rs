//! Canonical hashing for Pairio.
//!
//! Keys and request descriptors are serialized to a canonical JSON form
//! (sorted object keys, compact separators, ASCII-only output) and hashed with
//! SHA-1. The canonical form is byte-compatible with the format existing
//! Pairio services verify signatures against, so it must not drift.

pub mod canonical;
pub mod hasher;

pub use canonical::to_canonical_json;
pub use hasher::CanonicalHasher;
