//! Signed-cookie session state.
//!
//! The whole per-browser session (signed-in username plus a one-shot flash
//! message) travels in a single signed cookie, so clients can inspect it but
//! cannot forge it without the signing key.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "folio_session";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Session {
    /// Decode the session from the signed jar. A missing, tampered, or
    /// unparseable cookie yields a fresh empty session.
    pub fn from_jar(jar: &SignedCookieJar) -> Self {
        jar.get(SESSION_COOKIE)
            .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
            .unwrap_or_default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.username.is_some()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn clear_username(&mut self) {
        self.username = None;
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(text.into());
    }

    /// Read and clear the flash message in one step.
    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    /// Serialize the session into the jar, replacing the previous cookie.
    pub fn store(self, jar: SignedCookieJar) -> SignedCookieJar {
        let payload =
            serde_json::to_string(&self).expect("session state serializes to JSON");
        let cookie = Cookie::build((SESSION_COOKIE, payload))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        jar.add(cookie)
    }
}
