//! HTTP layer of folio, a minimal file-backed CMS.
//!
//! Routes, session cookies, and HTML views live here; document storage,
//! credential checks, and markdown rendering come from `folio-core`.

pub mod config;
pub mod handlers;
pub mod session;
pub mod views;

use axum::Router;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use folio_core::{CredentialStore, DocumentStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub documents: DocumentStore,
    pub credentials: CredentialStore,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.cookie_key.clone()
    }
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    handlers::router(state).layer(TraceLayer::new_for_http())
}
