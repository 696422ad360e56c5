//! # Filesystem-backed credential store
//!
//! [`FileCredentials`] persists the session [`Credential`] as a single JSON
//! file so that a signed-in user stays signed in across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── comic_auth.json    # {"token": "...", "user": {...}}
//! ```
//!
//! ## Platform data directories
//!
//! [`FileCredentials::default_location`] uses [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/comic-studio/` |
//! | Linux | `~/.local/share/comic-studio/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\comic-studio\` |
//!
//! A file that exists but does not parse is treated like a missing one: the
//! user is simply signed out.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::credential::{Credential, CredentialStore, CREDENTIAL_KEY};
use crate::StoreError;

/// Application directory name under the platform data dir.
pub const APP_DIR: &str = "comic-studio";

/// Filesystem-backed CredentialStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileCredentials {
    base: PathBuf,
}

impl FileCredentials {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store rooted at `<data_dir>/comic-studio`, or `./comic-studio` when no data dir exists.
    pub fn default_location() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::new(base)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn credential_path(&self) -> PathBuf {
        self.base.join(format!("{CREDENTIAL_KEY}.json"))
    }
}

impl CredentialStore for FileCredentials {
    fn load(&self) -> Result<Option<Credential>, StoreError> {
        let path = self.credential_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        match serde_json::from_str(&raw) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Ignoring unreadable credential: {}", e);
                Ok(None)
            }
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        let json = serde_json::to_string(credential)?;
        std::fs::write(self.credential_path(), json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(self.credential_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
