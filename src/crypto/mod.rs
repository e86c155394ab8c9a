//! Cryptographic primitives for credcache.
//!
//! Only a one-way digest is needed: the remembered record carries a
//! SHA-256 of the password next to the password itself.

pub mod digest;

pub use digest::sha256_hex;
