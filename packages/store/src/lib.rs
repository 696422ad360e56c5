pub mod config;
pub mod credential;
pub mod models;

mod memory;
pub use memory::MemoryCredentials;

mod file_store;
pub use file_store::{FileCredentials, APP_DIR};

pub use config::ComicConfig;
pub use credential::{Credential, CredentialStore, CREDENTIAL_KEY};
pub use models::{Character, Comic, EntityId, NewCharacter, NewComic, UserProfile};

/// Errors raised by credential persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
}
