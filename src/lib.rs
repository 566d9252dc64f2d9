//! Category catalog and user preference service.
//!
//! An authenticated caller pages through a fixed, name-sorted catalog of
//! product categories, sees which ones they picked, and replaces their pick
//! list. Names that are not in the catalog are dropped on write and reported
//! back in the response.
//!
//! # Layout
//! - `domain`: models and ports (`UserStore`, `Authenticator`, `Storage`)
//! - `core`: catalog, fixture generation, pagination, reconciliation
//! - `adapters`: in-memory and REST user stores, static token auth, local files
//! - `http`: axum router and handlers
//!
//! # Routes
//! - `GET /api/categories?page=<n>`
//! - `GET /api/categories/user`
//! - `PUT /api/categories/user-preferences`

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod state;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    auth::StaticTokenAuthenticator, memory_store::InMemoryUserStore, rest_store::RestUserStore,
    storage::LocalStorage,
};
pub use config::ServerConfig;
pub use crate::core::{catalog::Catalog, fixture::FixtureGenerator, service::CategoryService};
pub use http::{build_router, serve, serve_on};
pub use state::AppState;
pub use utils::error::{AppError, Result};
