//! # UI crate: headless view state
//!
//! Screens own plain Rust state and borrow a service from the `api` crate for
//! each call, so the same views run against [`api::ApiClient`] or an
//! in-memory fake.
//!
//! | Module | Screen |
//! |--------|--------|
//! | [`auth`] | Sign in, register, profile |
//! | [`characters`] | Character library with optimistic delete |
//! | [`history`] | Generated comics, active and archived |
//! | [`editor`] | Page drafting and generation with simulated progress |
//! | [`templates`] | Static template and art-style catalogue |
//! | [`reconcile`] | Optimistic apply, then commit or roll back |

pub mod auth;
pub mod characters;
pub mod editor;
pub mod history;
pub mod reconcile;
pub mod templates;

#[cfg(test)]
mod testing;

pub use auth::AuthState;
pub use characters::CharactersView;
pub use editor::{ComicPage, EditorView, GenerationStatus, Layout, LAYOUTS};
pub use history::{HistoryView, Partition, Shelf};
pub use reconcile::{reconcile, MutationState, Outcome, Pending, Rollback};
pub use templates::{filter_templates, ArtStyle, Category, CategoryFilter, Template, ART_STYLES};
