//! Session context wrapping the persisted credential.

use store::{Credential, CredentialStore, UserProfile};

/// Opaque user identifier sent as `X-User-Id`.
pub type UserId = String;

/// Explicit session context handed to [`crate::ApiClient`] at construction.
///
/// The credential is re-read from the store on every call, so a login or
/// logout through any handle sharing the store is seen immediately.
#[derive(Clone, Debug)]
pub struct Session<S: CredentialStore> {
    store: S,
}

impl<S: CredentialStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored credential, or `None` when signed out or unreadable.
    pub fn load(&self) -> Option<Credential> {
        match self.store.load() {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!("Failed to read credential: {}", e);
                None
            }
        }
    }

    /// Overwrite the stored credential.
    pub fn save(&self, credential: &Credential) -> Result<(), store::StoreError> {
        self.store.save(credential)
    }

    /// Remove the stored credential.
    pub fn clear(&self) -> Result<(), store::StoreError> {
        self.store.clear()
    }

    /// Derive the caller's identity from the stored token.
    ///
    /// `None` means "not signed in", not an error.
    pub fn identify(&self) -> Option<UserId> {
        self.load()?.user_id().map(str::to_string)
    }

    /// Profile saved alongside the token at login.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.load().map(|c| c.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.load().is_some()
    }
}
