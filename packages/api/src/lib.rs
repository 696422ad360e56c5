//! # API crate: remote client for the comic studio services
//!
//! This crate is the only place that talks to the network. It wraps the three
//! remote functions the product is built on (auth, user data, comic
//! generation) behind typed service traits, and owns the [`Session`] that
//! carries the persisted credential.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`], the `reqwest` implementation of every service trait |
//! | [`error`] | [`ApiError`] taxonomy: auth, request, network, not-authenticated, decode |
//! | [`service`] | [`AuthService`], [`LibraryService`], [`GenerationService`], the seams views depend on |
//! | [`session`] | [`Session`], explicit load/save/clear lifecycle around a [`store::CredentialStore`] |
//! | [`settings`] | Loading `comic.toml` with `dotenvy` + environment overrides |
//! | [`wire`] | Request/response bodies and status-aware decoding |
//!
//! ## Identity
//!
//! Authenticated calls carry `X-User-Id`, the prefix of the stored token before
//! its first `:`. When no credential is stored, data calls degrade to no-ops
//! (empty lists, `None` on create) instead of failing.

pub mod client;
pub mod error;
pub mod service;
pub mod session;
pub mod settings;
pub mod wire;

pub use client::ApiClient;
pub use error::{ApiError, GENERATION_UNREACHABLE};
pub use service::{AuthService, GenerationService, LibraryService};
pub use session::{Session, UserId};
pub use wire::GenerationRequest;

pub use store::{Character, Comic, Credential, EntityId, NewCharacter, NewComic, UserProfile};
