//! Async service traits consumed by the view layer.
//!
//! [`crate::ApiClient`] implements all three against the remote functions;
//! tests substitute in-memory fakes.

use std::future::Future;

use store::{Character, Comic, Credential, EntityId, NewCharacter, NewComic, UserProfile};

use crate::session::UserId;
use crate::wire::GenerationRequest;
use crate::ApiError;

/// Registration, login and profile management.
pub trait AuthService {
    /// Create an account and persist the returned credential.
    fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> impl Future<Output = Result<Credential, ApiError>>;

    /// Sign in and persist the returned credential.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Credential, ApiError>>;

    /// Drop the stored credential. Never fails for lack of a session.
    fn logout(&self) -> Result<(), ApiError>;

    /// Profile stored with the credential, without a network call.
    fn current_user(&self) -> Option<UserProfile>;

    /// Fresh profile including server-computed counts.
    fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>>;

    /// Rename the user; the stored credential picks up the new name.
    fn update_profile(&self, name: &str) -> impl Future<Output = Result<UserProfile, ApiError>>;
}

/// CRUD over the user's characters and comics.
///
/// Without an identity every method is a no-op: lists are empty, creates
/// return `None`, and removals succeed without a request.
pub trait LibraryService {
    fn identify(&self) -> Option<UserId>;

    fn list_characters(&self) -> impl Future<Output = Result<Vec<Character>, ApiError>>;

    fn create_character(
        &self,
        character: &NewCharacter,
    ) -> impl Future<Output = Result<Option<Character>, ApiError>>;

    /// Best effort; succeeding does not imply the character existed.
    fn remove_character(&self, id: EntityId) -> impl Future<Output = Result<(), ApiError>>;

    fn list_comics(&self, archived: bool) -> impl Future<Output = Result<Vec<Comic>, ApiError>>;

    fn save_comic(&self, comic: &NewComic) -> impl Future<Output = Result<Option<Comic>, ApiError>>;

    /// Idempotent: setting the current value again changes nothing.
    fn set_archived(
        &self,
        id: EntityId,
        archived: bool,
    ) -> impl Future<Output = Result<(), ApiError>>;
}

/// The hosted image-generation endpoint.
pub trait GenerationService {
    /// Render panels for a prompt, returning their image URLs.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<Vec<String>, ApiError>>;
}
