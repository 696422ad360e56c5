//! Comic history with active and archived partitions.
//!
//! A comic lives in exactly one of the two lists at any time. Archive and
//! restore move it optimistically between them; a failed call puts both lists
//! back as they were.

use api::{ApiError, Comic, EntityId, LibraryService};

use crate::reconcile::{reconcile, Outcome, Rollback};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Partition {
    Active,
    Archived,
}

/// Both partitions, mutated together so a move is atomic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shelf {
    pub active: Vec<Comic>,
    pub archived: Vec<Comic>,
}

impl Shelf {
    pub fn partition_of(&self, id: EntityId) -> Option<Partition> {
        if self.active.iter().any(|c| c.id == id) {
            Some(Partition::Active)
        } else if self.archived.iter().any(|c| c.id == id) {
            Some(Partition::Archived)
        } else {
            None
        }
    }

    /// Move a comic to the head of the target list.
    ///
    /// Returns `false` when it is not in the source list, including when it
    /// is already in the target.
    pub fn move_to(&mut self, id: EntityId, archived: bool) -> bool {
        let (from, to) = if archived {
            (&mut self.active, &mut self.archived)
        } else {
            (&mut self.archived, &mut self.active)
        };
        let Some(index) = from.iter().position(|c| c.id == id) else {
            return false;
        };
        let mut comic = from.remove(index);
        comic.is_archived = archived;
        to.insert(0, comic);
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    shelf: Shelf,
    pub show_archived: bool,
    pub search: String,
    pub loading: bool,
}

impl HistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch both partitions.
    pub async fn load(&mut self, library: &impl LibraryService) -> Result<(), ApiError> {
        self.loading = true;
        let result = async {
            let active = library.list_comics(false).await?;
            let archived = library.list_comics(true).await?;
            Ok::<_, ApiError>(Shelf { active, archived })
        }
        .await;
        self.loading = false;
        match result {
            Ok(shelf) => {
                tracing::debug!(
                    active = shelf.active.len(),
                    archived = shelf.archived.len(),
                    "Loaded history"
                );
                self.shelf = shelf;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load history: {}", e);
                Err(e)
            }
        }
    }

    pub fn shelf(&self) -> &Shelf {
        &self.shelf
    }

    pub fn active_count(&self) -> usize {
        self.shelf.active.len()
    }

    pub fn archived_count(&self) -> usize {
        self.shelf.archived.len()
    }

    pub fn toggle_archived(&mut self) {
        self.show_archived = !self.show_archived;
    }

    /// The partition currently on screen, filtered by title.
    pub fn filtered(&self) -> Vec<&Comic> {
        let list = if self.show_archived {
            &self.shelf.archived
        } else {
            &self.shelf.active
        };
        let needle = self.search.trim().to_lowercase();
        list.iter()
            .filter(|c| needle.is_empty() || c.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub async fn archive(
        &mut self,
        library: &impl LibraryService,
        id: EntityId,
    ) -> Outcome<ApiError> {
        self.set_archived(library, id, true).await
    }

    pub async fn restore(
        &mut self,
        library: &impl LibraryService,
        id: EntityId,
    ) -> Outcome<ApiError> {
        self.set_archived(library, id, false).await
    }

    async fn set_archived(
        &mut self,
        library: &impl LibraryService,
        id: EntityId,
        archived: bool,
    ) -> Outcome<ApiError> {
        let outcome = reconcile(
            &mut self.shelf,
            |shelf| {
                shelf.move_to(id, archived);
            },
            library.set_archived(id, archived),
            Rollback::restore(),
        )
        .await;
        if let Some(e) = outcome.error() {
            tracing::warn!(comic = id, archived, "Failed to update comic: {}", e);
        }
        outcome
    }
}
