//! # Persisted session credential
//!
//! A [`Credential`] is the `{token, user}` pair handed out by the auth service
//! on login or registration. It is persisted under the record name
//! [`CREDENTIAL_KEY`] and read back on every authenticated request.
//!
//! The token has the shape `<user_id>:<random>:<issued_at>`; clients only rely
//! on the prefix before the first `:`, which [`Credential::user_id`] extracts
//! and the `api` crate sends as the `X-User-Id` header.
//!
//! Persistence goes through the [`CredentialStore`] trait, implemented by
//! [`crate::MemoryCredentials`] and [`crate::FileCredentials`].

use serde::{Deserialize, Serialize};

use crate::models::UserProfile;
use crate::StoreError;

/// Name of the persisted credential record.
pub const CREDENTIAL_KEY: &str = "comic_auth";

const TOKEN_DELIMITER: char = ':';

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub user: UserProfile,
}

impl Credential {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Opaque user identifier encoded as the token prefix.
    ///
    /// Returns `None` for an empty token or an empty prefix.
    pub fn user_id(&self) -> Option<&str> {
        let prefix = self.token.split(TOKEN_DELIMITER).next()?.trim();
        if prefix.is_empty() {
            None
        } else {
            Some(prefix)
        }
    }
}

/// Storage for the single session credential.
pub trait CredentialStore {
    /// Read the stored credential. A missing or unreadable record is `Ok(None)`.
    fn load(&self) -> Result<Option<Credential>, StoreError>;
    /// Overwrite the stored credential.
    fn save(&self, credential: &Credential) -> Result<(), StoreError>;
    /// Remove the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
pub(crate) fn sample_credential(token: &str) -> Credential {
    Credential::new(
        token,
        UserProfile {
            id: 42,
            email: "rin@example.com".to_string(),
            name: "Rin".to_string(),
            created_at: Some("2026-02-15T10:00:00".to_string()),
            comics_count: None,
            characters_count: None,
        },
    )
}
