use std::sync::{Arc, Mutex, PoisonError};

use crate::credential::{Credential, CredentialStore};
use crate::StoreError;

/// In-memory CredentialStore for testing and ephemeral sessions.
///
/// Clones share the same slot, so a test can keep a handle while the client owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryCredentials {
    slot: Arc<Mutex<Option<Credential>>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a credential already stored.
    pub fn with(credential: Credential) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(credential))),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn load(&self) -> Result<Option<Credential>, StoreError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}
