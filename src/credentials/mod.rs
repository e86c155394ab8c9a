//! The remember-me credential cache.
//!
//! - `record`: the single persisted record and its JSON layout
//! - `cache`: async load/save/clear over a `SecureStore`

pub mod cache;
pub mod record;

pub use cache::CredentialCache;
pub use record::StoredCredentialRecord;
