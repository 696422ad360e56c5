//! # `ApiClient`: HTTP implementation of the service traits
//!
//! One [`reqwest::Client`] shared by all three remote functions. Each call
//! resolves the caller's identity from the [`Session`] right before the
//! request, so nothing about the user is cached in the client itself.
//!
//! Data calls made without an identity short-circuit without touching the
//! network (see [`LibraryService`]). Auth failures are re-tagged as
//! [`ApiError::Auth`] so the login form can show the server's text verbatim.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use store::config::EndpointsConfig;
use store::{
    Character, Comic, ComicConfig, Credential, CredentialStore, EntityId, NewCharacter, NewComic,
    UserProfile,
};
use tracing::{debug, info};

use crate::service::{AuthService, GenerationService, LibraryService};
use crate::session::{Session, UserId};
use crate::wire::{
    decode_body, error_message, ArchiveRequest, AuthRequest, AuthResponse, CharacterResponse,
    CharactersResponse, ComicsResponse, GenerationRequest, GenerationResponse, ProfileResponse,
    ProfileUpdate, RemoveRequest, SavedComic, USER_ID_HEADER,
};
use crate::ApiError;

const ENTITY_COMICS: &str = "comics";
const ENTITY_CHARACTERS: &str = "characters";

/// HTTP client for the auth, user-data and generation services.
#[derive(Clone, Debug)]
pub struct ApiClient<S: CredentialStore> {
    http: reqwest::Client,
    endpoints: EndpointsConfig,
    request_timeout: Option<Duration>,
    generation_timeout: Option<Duration>,
    session: Session<S>,
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl<S: CredentialStore> ApiClient<S> {
    pub fn new(config: &ComicConfig, session: Session<S>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints: config.endpoints.clone(),
            request_timeout: timeout_from_secs(config.client.request_timeout_secs),
            generation_timeout: timeout_from_secs(config.client.generation_timeout_secs),
            session,
        }
    }

    /// Use a preconfigured HTTP client (proxies, TLS settings, ...).
    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn timed(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.request_timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        }
    }

    fn user_data(&self, method: Method, entity: &str, user_id: &str) -> RequestBuilder {
        debug!(entity, %method, "user-data request");
        self.timed(
            self.http
                .request(method, &self.endpoints.user_data)
                .query(&[("entity", entity)])
                .header(USER_ID_HEADER, user_id),
        )
    }

    fn profile(&self, method: Method, user_id: &str) -> RequestBuilder {
        debug!(%method, "profile request");
        self.timed(
            self.http
                .request(method, &self.endpoints.auth)
                .query(&[("action", "profile")])
                .header(USER_ID_HEADER, user_id),
        )
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder, fallback: &str) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        decode_body(status, &body, fallback)
    }

    /// Send a request whose success body carries nothing we need.
    async fn send_unit(request: RequestBuilder, fallback: &str) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(ApiError::Request {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| fallback.to_string()),
        })
    }

    async fn authenticate(
        &self,
        request: AuthRequest<'_>,
        fallback: &str,
    ) -> Result<Credential, ApiError> {
        let builder = self.timed(self.http.post(&self.endpoints.auth).json(&request));
        let response: AuthResponse = match Self::send(builder, fallback).await {
            Ok(response) => response,
            Err(ApiError::Request { message, .. }) => return Err(ApiError::Auth(message)),
            Err(e) => return Err(e),
        };

        let credential = Credential::new(response.token, response.user);
        self.session.save(&credential)?;
        info!(user_id = credential.user.id, "Signed in");
        Ok(credential)
    }
}

impl<S: CredentialStore> AuthService for ApiClient<S> {
    async fn register(&self, email: &str, password: &str, name: &str) -> Result<Credential, ApiError> {
        self.authenticate(
            AuthRequest::Register {
                email,
                password,
                name,
            },
            "Registration failed",
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        self.authenticate(AuthRequest::Login { email, password }, "Login failed")
            .await
    }

    fn logout(&self) -> Result<(), ApiError> {
        self.session.clear()?;
        info!("Signed out");
        Ok(())
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.session.current_user()
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let user_id = self.session.identify().ok_or(ApiError::NotAuthenticated)?;
        let response: ProfileResponse =
            Self::send(self.profile(Method::GET, &user_id), "Failed to load profile").await?;
        Ok(response.user)
    }

    async fn update_profile(&self, name: &str) -> Result<UserProfile, ApiError> {
        let user_id = self.session.identify().ok_or(ApiError::NotAuthenticated)?;
        let request = self
            .profile(Method::PUT, &user_id)
            .json(&ProfileUpdate { name });
        let response: ProfileResponse = Self::send(request, "Failed to update profile").await?;

        if let Some(mut credential) = self.session.load() {
            credential.user.name = response.user.name.clone();
            self.session.save(&credential)?;
        }
        Ok(response.user)
    }
}

impl<S: CredentialStore> LibraryService for ApiClient<S> {
    fn identify(&self) -> Option<UserId> {
        self.session.identify()
    }

    async fn list_characters(&self) -> Result<Vec<Character>, ApiError> {
        let Some(user_id) = self.identify() else {
            return Ok(Vec::new());
        };
        let request = self.user_data(Method::GET, ENTITY_CHARACTERS, &user_id);
        let response: CharactersResponse = Self::send(request, "Failed to load characters").await?;
        Ok(response.characters)
    }

    async fn create_character(&self, character: &NewCharacter) -> Result<Option<Character>, ApiError> {
        let Some(user_id) = self.identify() else {
            return Ok(None);
        };
        let request = self
            .user_data(Method::POST, ENTITY_CHARACTERS, &user_id)
            .json(character);
        let response: CharacterResponse = Self::send(request, "Failed to create character").await?;
        Ok(Some(response.character))
    }

    async fn remove_character(&self, id: EntityId) -> Result<(), ApiError> {
        let Some(user_id) = self.identify() else {
            return Ok(());
        };
        let request = self
            .user_data(Method::POST, ENTITY_CHARACTERS, &user_id)
            .json(&RemoveRequest::new(id));
        Self::send_unit(request, "Failed to remove character").await
    }

    async fn list_comics(&self, archived: bool) -> Result<Vec<Comic>, ApiError> {
        let Some(user_id) = self.identify() else {
            return Ok(Vec::new());
        };
        let request = self
            .user_data(Method::GET, ENTITY_COMICS, &user_id)
            .query(&[("archived", archived.to_string())]);
        let response: ComicsResponse = Self::send(request, "Failed to load comics").await?;
        Ok(response.comics)
    }

    async fn save_comic(&self, comic: &NewComic) -> Result<Option<Comic>, ApiError> {
        let Some(user_id) = self.identify() else {
            return Ok(None);
        };
        let request = self
            .user_data(Method::POST, ENTITY_COMICS, &user_id)
            .json(comic);
        let saved: SavedComic = Self::send(request, "Failed to save comic").await?;
        info!(comic_id = saved.id, "Saved comic");
        Ok(Some(comic.clone().into_comic(saved.id, saved.created_at)))
    }

    async fn set_archived(&self, id: EntityId, archived: bool) -> Result<(), ApiError> {
        let Some(user_id) = self.identify() else {
            return Ok(());
        };
        let request = self
            .user_data(Method::PUT, ENTITY_COMICS, &user_id)
            .json(&ArchiveRequest {
                id,
                is_archived: archived,
            });
        Self::send_unit(request, "Failed to update comic").await
    }
}

impl<S: CredentialStore> GenerationService for ApiClient<S> {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, ApiError> {
        debug!(style = %request.style, panels = request.panel_count, "generation request");
        let mut builder = self.http.post(&self.endpoints.generate).json(request);
        if let Some(t) = self.generation_timeout {
            builder = builder.timeout(t);
        }
        let response: GenerationResponse = Self::send(builder, "Generation failed").await?;
        Ok(response.into_panels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::MemoryCredentials;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ComicConfig {
        ComicConfig::new(
            format!("{}/auth", server.uri()),
            format!("{}/user-data", server.uri()),
            format!("{}/generate", server.uri()),
        )
    }

    fn user_json() -> serde_json::Value {
        json!({"id": 7, "email": "kira@example.com", "name": "Kira", "created_at": "2026-02-17T09:00:00"})
    }

    fn signed_in(server: &MockServer) -> (ApiClient<MemoryCredentials>, MemoryCredentials) {
        let creds = MemoryCredentials::new();
        creds
            .save(&Credential::new(
                "7:abcdef:1760000000",
                serde_json::from_value(user_json()).unwrap(),
            ))
            .unwrap();
        let client = ApiClient::new(&config_for(server), Session::new(creds.clone()));
        (client, creds)
    }

    fn signed_out(server: &MockServer) -> ApiClient<MemoryCredentials> {
        ApiClient::new(&config_for(server), Session::new(MemoryCredentials::new()))
    }

    #[tokio::test]
    async fn test_login_persists_credential_and_identifies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .and(body_json(json!({"action": "login", "email": "kira@example.com", "password": "hunter22"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"token": "7:abcdef:1760000000", "user": user_json()})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_out(&server);
        assert_eq!(client.identify(), None);

        let credential = client.login("kira@example.com", "hunter22").await.unwrap();
        assert_eq!(credential.user.name, "Kira");
        assert_eq!(client.identify().as_deref(), Some("7"));
        assert_eq!(client.current_user().unwrap().id, 7);
    }

    #[tokio::test]
    async fn test_register_conflict_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"error": "User with this email already exists"})),
            )
            .mount(&server)
            .await;

        let client = signed_out(&server);
        let err = client
            .register("kira@example.com", "hunter22", "Kira")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
        assert_eq!(err.to_string(), "User with this email already exists");
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_credential() {
        let server = MockServer::start().await;
        let (client, creds) = signed_in(&server);
        client.logout().unwrap();
        assert!(creds.load().unwrap().is_none());
        assert_eq!(client.identify(), None);
        // Logging out twice is harmless
        client.logout().unwrap();
    }

    #[tokio::test]
    async fn test_lists_are_empty_without_identity() {
        let server = MockServer::start().await;
        let client = signed_out(&server);

        assert!(client.list_comics(false).await.unwrap().is_empty());
        assert!(client.list_characters().await.unwrap().is_empty());
        assert!(client.create_character(&NewCharacter::new("Rin")).await.unwrap().is_none());
        client.set_archived(1, true).await.unwrap();
        client.remove_character(1).await.unwrap();

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_profile_requires_identity() {
        let server = MockServer::start().await;
        let client = signed_out(&server);
        assert!(matches!(
            client.fetch_profile().await,
            Err(ApiError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_list_comics_sends_identity_and_partition() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user-data"))
            .and(query_param("entity", "comics"))
            .and(query_param("archived", "true"))
            .and(header("X-User-Id", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "comics": [{
                    "id": 3, "title": "Old town", "prompt": "fog", "style": "Noir",
                    "panels": ["p1.png"], "status": "completed", "is_archived": true,
                    "created_at": "2026-02-16T12:00:00"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = signed_in(&server);
        let comics = client.list_comics(true).await.unwrap();
        assert_eq!(comics.len(), 1);
        assert!(comics[0].is_archived);
    }

    #[tokio::test]
    async fn test_create_character_error_message_from_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user-data"))
            .and(query_param("entity", "characters"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Name required"})))
            .mount(&server)
            .await;

        let (client, _) = signed_in(&server);
        let err = client
            .create_character(&NewCharacter::new(" "))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "Name required");
    }

    #[tokio::test]
    async fn test_create_character_returns_server_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user-data"))
            .and(body_json(json!({"name": "Rin", "description": "Young samurai", "style": "Manga"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "character": {
                    "id": 11, "name": "Rin", "description": "Young samurai", "style": "Manga",
                    "color": "from-blue-500 to-indigo-400", "created_at": "2026-02-17T10:00:00"
                }
            })))
            .mount(&server)
            .await;

        let (client, _) = signed_in(&server);
        let created = client
            .create_character(
                &NewCharacter::new("Rin")
                    .with_description("Young samurai")
                    .with_style("Manga"),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.id, 11);
        assert_eq!(created.color, "from-blue-500 to-indigo-400");
    }

    #[tokio::test]
    async fn test_remove_and_archive_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user-data"))
            .and(body_json(json!({"action": "remove", "id": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/user-data"))
            .and(query_param("entity", "comics"))
            .and(body_json(json!({"id": 9, "is_archived": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(2)
            .mount(&server)
            .await;

        let (client, _) = signed_in(&server);
        client.remove_character(5).await.unwrap();
        client.set_archived(9, true).await.unwrap();
        client.set_archived(9, true).await.unwrap();
    }

    #[tokio::test]
    async fn test_archive_failure_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user-data"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (client, _) = signed_in(&server);
        let err = client.set_archived(9, true).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Failed to update comic");
    }

    #[tokio::test]
    async fn test_save_comic_merges_server_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user-data"))
            .and(query_param("entity", "comics"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"id": 21, "created_at": "2026-02-17T11:00:00"})),
            )
            .mount(&server)
            .await;

        let (client, _) = signed_in(&server);
        let payload = NewComic::from_generation("Rooftop chase", "Noir", vec!["a.png".to_string()]);
        let comic = client.save_comic(&payload).await.unwrap().unwrap();
        assert_eq!(comic.id, 21);
        assert_eq!(comic.title, "Rooftop chase");
        assert!(!comic.is_archived);
    }

    #[tokio::test]
    async fn test_update_profile_rewrites_stored_name() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth"))
            .and(query_param("action", "profile"))
            .and(header("X-User-Id", "7"))
            .and(body_json(json!({"name": "Kira X"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"user": {"id": 7, "email": "kira@example.com", "name": "Kira X"}}),
            ))
            .mount(&server)
            .await;

        let (client, creds) = signed_in(&server);
        let user = client.update_profile("Kira X").await.unwrap();
        assert_eq!(user.name, "Kira X");

        let stored = creds.load().unwrap().unwrap();
        assert_eq!(stored.user.name, "Kira X");
        assert_eq!(stored.token, "7:abcdef:1760000000");
    }

    #[tokio::test]
    async fn test_generate_filters_missing_panels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_json(json!({"prompt": "Rooftop chase", "style": "Noir", "panelCount": 4})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"panels": ["a.png", null, "b.png", null], "style": "Noir", "prompt": "Rooftop chase"}),
            ))
            .mount(&server)
            .await;

        let client = signed_out(&server);
        let panels = client
            .generate(&GenerationRequest {
                prompt: "Rooftop chase".to_string(),
                style: "Noir".to_string(),
                panel_count: 4,
            })
            .await
            .unwrap();
        assert_eq!(panels, vec!["a.png", "b.png"]);
    }

    #[tokio::test]
    async fn test_generate_error_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({"error": "quota exceeded"})))
            .mount(&server)
            .await;

        let client = signed_out(&server);
        let err = client
            .generate(&GenerationRequest {
                prompt: "x".to_string(),
                style: "Noir".to_string(),
                panel_count: 1,
            })
            .await
            .unwrap_err();
        assert_eq!(err.generation_message(), "quota exceeded");
    }

    #[tokio::test]
    async fn test_generate_non_json_error_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let client = signed_out(&server);
        let err = client
            .generate(&GenerationRequest {
                prompt: "x".to_string(),
                style: "Noir".to_string(),
                panel_count: 1,
            })
            .await
            .unwrap_err();
        assert!(!err.is_network());
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.generation_message(), "Generation failed");
    }

    #[tokio::test]
    async fn test_generate_unreachable_is_network_error() {
        let config = ComicConfig::new(
            "http://127.0.0.1:9/auth".to_string(),
            "http://127.0.0.1:9/user-data".to_string(),
            "http://127.0.0.1:9/generate".to_string(),
        );
        let client = ApiClient::new(&config, Session::new(MemoryCredentials::new()));
        let err = client
            .generate(&GenerationRequest {
                prompt: "x".to_string(),
                style: "Noir".to_string(),
                panel_count: 1,
            })
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.generation_message(), "could not reach generation server");
    }
}
