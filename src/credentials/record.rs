//! The remembered-credentials record.
//!
//! Stored as a JSON object with exactly three string fields:
//!
//! ```json
//! {"email":"user@example.com","password":"secret123","hashedPassword":"<sha256 hex>"}
//! ```
//!
//! Parsing is strict. A missing field, an unknown field or a wrong type
//! makes the whole value malformed.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::sha256_hex;
use crate::errors::{CacheError, Result};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(deny_unknown_fields)]
pub struct StoredCredentialRecord {
    email: String,

    password: String,

    /// SHA-256 of `password`. Written alongside it, never read back.
    #[serde(rename = "hashedPassword")]
    password_digest: String,
}

impl StoredCredentialRecord {
    /// Build a record from captured form input.
    ///
    /// The email is trimmed; the password is kept exactly as given and its
    /// digest is computed here, so the two can never drift apart.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
            password_digest: sha256_hex(password),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn password_digest(&self) -> &str {
        &self.password_digest
    }

    /// Serialize to the stored JSON layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| CacheError::SerializationError(format!("credential record: {e}")))
    }

    /// Parse the stored JSON layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::MalformedRecord(e.to_string()))
    }
}

impl fmt::Debug for StoredCredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentialRecord")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("password_digest", &"<redacted>")
            .finish()
    }
}
