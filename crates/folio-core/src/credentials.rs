//! Credential file loading and password verification.
//!
//! Credentials live in a YAML file mapping usernames to PHC-format password
//! hash strings. The file is re-read on every check so edits take effect
//! without a restart.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to read credential file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse credential file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Verifies passwords against a YAML credential file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    users_file: PathBuf,
}

impl CredentialStore {
    pub fn new(users_file: PathBuf) -> Self {
        Self { users_file }
    }

    pub fn users_file(&self) -> &Path {
        &self.users_file
    }

    /// Load the username -> password-hash mapping from the credential file.
    pub fn load(&self) -> Result<HashMap<String, String>, CredentialError> {
        let path = self.users_file.display().to_string();
        let raw = std::fs::read_to_string(&self.users_file)
            .map_err(|source| CredentialError::Read {
                path: path.clone(),
                source,
            })?;
        serde_yaml::from_str(&raw).map_err(|source| CredentialError::Parse { path, source })
    }

    /// Check a username/password pair against the stored hashes.
    ///
    /// Unknown usernames, an unreadable credential file, and malformed
    /// hashes all verify as false rather than erroring.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let Ok(users) = self.load() else {
            return false;
        };
        let Some(stored) = users.get(username) else {
            return false;
        };
        let Ok(hash) = PasswordHash::new(stored) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok()
    }
}
