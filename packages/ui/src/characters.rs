//! Character library view.

use api::{ApiError, Character, EntityId, LibraryService, NewCharacter};

use crate::reconcile::{reconcile, Outcome, Rollback};

/// Style stored when the form leaves it blank.
pub const DEFAULT_STYLE: &str = "Custom style";

#[derive(Debug, Clone, Default)]
pub struct CharactersView {
    characters: Vec<Character>,
    pub search: String,
    error: Option<String>,
    pub loading: bool,
}

impl CharactersView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, library: &impl LibraryService) -> Result<(), ApiError> {
        self.loading = true;
        let result = library.list_characters().await;
        self.loading = false;
        match result {
            Ok(characters) => {
                self.characters = characters;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load characters: {}", e);
                Err(e)
            }
        }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn count(&self) -> usize {
        self.characters.len()
    }

    /// Error from the last failed create, shown inline in the form.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Characters whose name or description contains the search text.
    pub fn filtered(&self) -> Vec<&Character> {
        let needle = self.search.trim().to_lowercase();
        self.characters
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Create a character and append it once the server confirms.
    ///
    /// Returns `Ok(None)` when signed out.
    pub async fn add(
        &mut self,
        library: &impl LibraryService,
        name: &str,
        description: &str,
        style: &str,
    ) -> Result<Option<Character>, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            let err = ApiError::InvalidInput("Name is required".to_string());
            self.error = Some(err.to_string());
            return Err(err);
        }
        let style = match style.trim() {
            "" => DEFAULT_STYLE,
            s => s,
        };
        let new = NewCharacter::new(name)
            .with_description(description.trim())
            .with_style(style);

        match library.create_character(&new).await {
            Ok(created) => {
                self.error = None;
                if let Some(character) = &created {
                    self.characters.push(character.clone());
                }
                Ok(created)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Remove a character optimistically.
    ///
    /// On failure the list is reloaded from the server, so the character comes
    /// back only if it still exists there.
    pub async fn delete(
        &mut self,
        library: &impl LibraryService,
        id: EntityId,
    ) -> Outcome<ApiError> {
        let outcome = reconcile(
            &mut self.characters,
            |list| list.retain(|c| c.id != id),
            library.remove_character(id),
            Rollback::refetch(|| library.list_characters()),
        )
        .await;
        if let Some(e) = outcome.error() {
            tracing::warn!(character = id, "Failed to delete character: {}", e);
        }
        outcome
    }
}
