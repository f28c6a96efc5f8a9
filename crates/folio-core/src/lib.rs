//! Core library for folio, a minimal file-backed CMS.
//!
//! Provides the three collaborators the HTTP layer is built on:
//! - [`documents`] - filesystem-backed document storage
//! - [`credentials`] - YAML credential file loading and password verification
//! - [`markdown`] - markdown to HTML rendering

pub mod credentials;
pub mod documents;
pub mod markdown;

pub use credentials::{CredentialError, CredentialStore};
pub use documents::{Document, DocumentError, DocumentFormat, DocumentStore};
