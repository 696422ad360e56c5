//! # Wire format of the three remote functions
//!
//! Request and response bodies exactly as the services exchange them, plus
//! [`decode_body`], which turns a status code and raw body into either the
//! expected payload or an [`ApiError`].
//!
//! ## Endpoints
//!
//! | Service | Call | Body | Response |
//! |---------|------|------|----------|
//! | auth | `POST` | [`AuthRequest`] | [`AuthResponse`] |
//! | auth | `GET ?action=profile` | - | [`ProfileResponse`] |
//! | auth | `PUT ?action=profile` | [`ProfileUpdate`] | [`ProfileResponse`] |
//! | user-data | `GET ?entity=comics&archived=bool` | - | [`ComicsResponse`] |
//! | user-data | `POST ?entity=comics` | `NewComic` | [`SavedComic`] |
//! | user-data | `PUT ?entity=comics` | [`ArchiveRequest`] | `{ok}` |
//! | user-data | `GET ?entity=characters` | - | [`CharactersResponse`] |
//! | user-data | `POST ?entity=characters` | `NewCharacter` | [`CharacterResponse`] |
//! | user-data | `POST ?entity=characters` | [`RemoveRequest`] | `{ok}` |
//! | generate | `POST` | [`GenerationRequest`] | [`GenerationResponse`] |
//!
//! Every error response carries `{"error": "..."}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use store::{Character, Comic, EntityId, UserProfile};

use crate::ApiError;

/// Header carrying the caller's identity on authenticated calls.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Login or registration request. Serialises with an `action` tag.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AuthRequest<'a> {
    Register {
        email: &'a str,
        password: &'a str,
        name: &'a str,
    },
    Login {
        email: &'a str,
        password: &'a str,
    },
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdate<'a> {
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct ComicsResponse {
    #[serde(default)]
    pub comics: Vec<Comic>,
}

#[derive(Debug, Deserialize)]
pub struct SavedComic {
    pub id: EntityId,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ArchiveRequest {
    pub id: EntityId,
    pub is_archived: bool,
}

#[derive(Debug, Deserialize)]
pub struct CharactersResponse {
    #[serde(default)]
    pub characters: Vec<Character>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterResponse {
    pub character: Character,
}

#[derive(Debug, Serialize)]
pub struct RemoveRequest {
    pub action: &'static str,
    pub id: EntityId,
}

impl RemoveRequest {
    pub fn new(id: EntityId) -> Self {
        Self {
            action: "remove",
            id,
        }
    }
}

/// Prompt, style and panel count for one generation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: String,
    #[serde(rename = "panelCount")]
    pub panel_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    /// Image URLs; a panel the model failed to render comes back as `null`.
    #[serde(default)]
    pub panels: Vec<Option<String>>,
}

impl GenerationResponse {
    /// Rendered panel URLs with the failed ones dropped.
    pub fn into_panels(self) -> Vec<String> {
        self.panels
            .into_iter()
            .flatten()
            .filter(|url| !url.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// `error` field of a JSON body, if any.
pub fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
}

/// Decode a response body, mapping non-success statuses to [`ApiError::Request`].
///
/// The error message comes from the body's `error` field, or `fallback`.
pub fn decode_body<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
    fallback: &str,
) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Request {
            status,
            message: error_message(body).unwrap_or_else(|| fallback.to_string()),
        });
    }
    Ok(serde_json::from_slice(body)?)
}
