//! # Domain models shared by the client crates
//!
//! These are the records exchanged with the remote services. They derive
//! `Serialize + Deserialize` so the `api` crate can put them on the wire
//! unchanged and the credential stores can persist them.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserProfile`] | The signed-in user. `comics_count` / `characters_count` are computed by the server and only present on a profile fetch. |
//! | [`Character`] | A reusable character. The server assigns `id` and `color`. |
//! | [`NewCharacter`] | Payload for creating a [`Character`]. |
//! | [`Comic`] | A generated comic. `is_archived` selects its partition (active or archived). |
//! | [`NewComic`] | Payload for saving a freshly generated comic. |
//!
//! Ids are the server's integer primary keys.

use serde::{Deserialize, Serialize};

/// Server-assigned primary key.
pub type EntityId = i64;

/// Profile of the authenticated user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comics_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters_count: Option<u64>,
}

impl UserProfile {
    /// Name to greet the user with, falling back to the mailbox part of the email.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.email.split('@').next().unwrap_or(&self.email)
        } else {
            &self.name
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub style: String,
    /// Gradient preset picked by the server, e.g. "from-purple-500 to-cyan-400".
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    pub description: String,
    pub style: String,
}

impl NewCharacter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comic {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub panels: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub created_at: String,
}

fn default_status() -> String {
    "completed".to_string()
}

/// Titles are cut to this many characters when derived from a prompt.
pub const MAX_TITLE_CHARS: usize = 60;

/// Title used when the prompt is empty.
pub const UNTITLED: &str = "Untitled";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewComic {
    pub title: String,
    pub prompt: String,
    pub style: String,
    pub panels: Vec<String>,
}

impl NewComic {
    /// Build a save payload from a generation result, deriving the title from the prompt.
    pub fn from_generation(prompt: &str, style: &str, panels: Vec<String>) -> Self {
        Self {
            title: title_from_prompt(prompt),
            prompt: prompt.to_string(),
            style: style.to_string(),
            panels,
        }
    }

    /// Combine the payload with the id and timestamp returned by the server.
    pub fn into_comic(self, id: EntityId, created_at: String) -> Comic {
        Comic {
            id,
            title: self.title,
            prompt: self.prompt,
            style: self.style,
            panels: self.panels,
            status: default_status(),
            is_archived: false,
            created_at,
        }
    }
}

/// First [`MAX_TITLE_CHARS`] characters of the prompt, or [`UNTITLED`].
pub fn title_from_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return UNTITLED.to_string();
    }
    trimmed.chars().take(MAX_TITLE_CHARS).collect()
}
