//! In-memory backend for view tests.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use api::{
    ApiError, AuthService, Character, Comic, Credential, EntityId, GenerationRequest,
    GenerationService, LibraryService, NewCharacter, NewComic, UserId, UserProfile,
};

fn server_error() -> ApiError {
    ApiError::Request {
        status: 500,
        message: "Internal error".to_string(),
    }
}

pub(crate) fn user(id: EntityId) -> UserProfile {
    UserProfile {
        id,
        email: "kira@example.com".to_string(),
        name: "Kira".to_string(),
        created_at: None,
        comics_count: None,
        characters_count: None,
    }
}

pub(crate) fn comic(id: EntityId, title: &str, archived: bool) -> Comic {
    Comic {
        id,
        title: title.to_string(),
        prompt: title.to_lowercase(),
        style: "Noir".to_string(),
        panels: vec![format!("{id}.png")],
        status: "completed".to_string(),
        is_archived: archived,
        created_at: "2026-02-16T12:00:00".to_string(),
    }
}

pub(crate) fn character(id: EntityId, name: &str, description: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        description: description.to_string(),
        style: "Manga".to_string(),
        color: "from-purple-500 to-cyan-400".to_string(),
        created_at: None,
    }
}

/// Fake server state plus switches for injecting failures.
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub credential: RefCell<Option<Credential>>,
    pub characters: RefCell<Vec<Character>>,
    pub comics: RefCell<Vec<Comic>>,
    pub saved: RefCell<Vec<NewComic>>,
    pub generation: RefCell<Option<Result<Vec<String>, ApiError>>>,
    pub generation_delay: Cell<Duration>,
    pub save_delay: Cell<Duration>,
    pub generate_calls: Cell<usize>,
    pub archive_calls: Cell<usize>,
    pub next_id: Cell<EntityId>,
    pub fail_lists: Cell<bool>,
    pub fail_remove: Cell<bool>,
    /// Apply the removal server-side but still report failure.
    pub remove_then_fail: Cell<bool>,
    pub fail_archive: Cell<bool>,
    pub fail_save: Cell<bool>,
    pub fail_generate_network: Cell<bool>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.next_id.set(100);
        backend
    }

    pub fn signed_in(user_id: EntityId) -> Self {
        let backend = Self::new();
        backend
            .credential
            .replace(Some(Credential::new(format!("{user_id}:secret:1"), user(user_id))));
        backend
    }

    fn next_id(&self) -> EntityId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl AuthService for FakeBackend {
    async fn register(&self, email: &str, password: &str, name: &str) -> Result<Credential, ApiError> {
        if password.len() < 6 {
            return Err(ApiError::Auth("Password must be at least 6 characters".to_string()));
        }
        let id = self.next_id();
        let mut profile = user(id);
        profile.email = email.to_string();
        profile.name = name.to_string();
        let credential = Credential::new(format!("{id}:fresh:2"), profile);
        self.credential.replace(Some(credential.clone()));
        Ok(credential)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        if password != "hunter22" {
            return Err(ApiError::Auth("Invalid email or password".to_string()));
        }
        let mut profile = user(7);
        profile.email = email.to_string();
        let credential = Credential::new("7:fresh:2", profile);
        self.credential.replace(Some(credential.clone()));
        Ok(credential)
    }

    fn logout(&self) -> Result<(), ApiError> {
        self.credential.replace(None);
        Ok(())
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.credential.borrow().as_ref().map(|c| c.user.clone())
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let mut profile = self.current_user().ok_or(ApiError::NotAuthenticated)?;
        profile.comics_count = Some(
            self.comics.borrow().iter().filter(|c| !c.is_archived).count() as u64,
        );
        profile.characters_count = Some(self.characters.borrow().len() as u64);
        Ok(profile)
    }

    async fn update_profile(&self, name: &str) -> Result<UserProfile, ApiError> {
        let mut slot = self.credential.borrow_mut();
        let credential = slot.as_mut().ok_or(ApiError::NotAuthenticated)?;
        credential.user.name = name.to_string();
        Ok(credential.user.clone())
    }
}

impl LibraryService for FakeBackend {
    fn identify(&self) -> Option<UserId> {
        self.credential
            .borrow()
            .as_ref()
            .and_then(|c| c.user_id().map(str::to_string))
    }

    async fn list_characters(&self) -> Result<Vec<Character>, ApiError> {
        if self.identify().is_none() {
            return Ok(Vec::new());
        }
        if self.fail_lists.get() {
            return Err(server_error());
        }
        Ok(self.characters.borrow().clone())
    }

    async fn create_character(&self, character: &NewCharacter) -> Result<Option<Character>, ApiError> {
        if self.identify().is_none() {
            return Ok(None);
        }
        if character.name.trim().is_empty() {
            return Err(ApiError::Request {
                status: 400,
                message: "Name required".to_string(),
            });
        }
        let created = Character {
            id: self.next_id(),
            name: character.name.clone(),
            description: character.description.clone(),
            style: character.style.clone(),
            color: "from-pink-500 to-rose-400".to_string(),
            created_at: None,
        };
        self.characters.borrow_mut().push(created.clone());
        Ok(Some(created))
    }

    async fn remove_character(&self, id: EntityId) -> Result<(), ApiError> {
        if self.identify().is_none() {
            return Ok(());
        }
        if self.remove_then_fail.get() {
            self.characters.borrow_mut().retain(|c| c.id != id);
            return Err(server_error());
        }
        if self.fail_remove.get() {
            return Err(server_error());
        }
        self.characters.borrow_mut().retain(|c| c.id != id);
        Ok(())
    }

    async fn list_comics(&self, archived: bool) -> Result<Vec<Comic>, ApiError> {
        if self.identify().is_none() {
            return Ok(Vec::new());
        }
        if self.fail_lists.get() {
            return Err(server_error());
        }
        Ok(self
            .comics
            .borrow()
            .iter()
            .filter(|c| c.is_archived == archived)
            .cloned()
            .collect())
    }

    async fn save_comic(&self, comic: &NewComic) -> Result<Option<Comic>, ApiError> {
        if self.identify().is_none() {
            return Ok(None);
        }
        let delay = self.save_delay.get();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_save.get() {
            return Err(server_error());
        }
        self.saved.borrow_mut().push(comic.clone());
        let saved = comic
            .clone()
            .into_comic(self.next_id(), "2026-02-17T12:00:00".to_string());
        self.comics.borrow_mut().push(saved.clone());
        Ok(Some(saved))
    }

    async fn set_archived(&self, id: EntityId, archived: bool) -> Result<(), ApiError> {
        self.archive_calls.set(self.archive_calls.get() + 1);
        if self.identify().is_none() {
            return Ok(());
        }
        if self.fail_archive.get() {
            return Err(server_error());
        }
        for comic in self.comics.borrow_mut().iter_mut().filter(|c| c.id == id) {
            comic.is_archived = archived;
        }
        Ok(())
    }
}

impl GenerationService for FakeBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, ApiError> {
        self.generate_calls.set(self.generate_calls.get() + 1);
        let delay = self.generation_delay.get();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_generate_network.get() {
            // A real transport error from an unroutable request.
            let err = reqwest::Client::new()
                .get("http://127.0.0.1:9/")
                .send()
                .await
                .expect_err("nothing listens on the discard port");
            return Err(ApiError::Network(err));
        }
        match self.generation.borrow_mut().take() {
            Some(result) => result,
            None => Ok((0..request.panel_count)
                .map(|i| format!("panel-{i}.png"))
                .collect()),
        }
    }
}
