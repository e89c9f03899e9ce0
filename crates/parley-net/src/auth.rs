//! Magic-link identity client and the persisted sign-in session.
//!
//! The identity service owns the actual authentication protocol; this module
//! only requests a sign-in link for an email address, redeems the emailed
//! one-time code for a session, and keeps the resulting [`AuthSession`] on
//! disk so the app can react to session-present/absent transitions at
//! startup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use parley_core::error::{ParleyError, Result};

// ── AuthSession ───────────────────────────────────────────────────────────────

/// A redeemed sign-in session, persisted to `~/.parley/session.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// User identifier assigned by the identity service.
    pub user_id: String,
    /// Email the session was issued for.
    pub email: String,
    /// Bearer token for backend calls.
    pub access_token: String,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Return the default path to the persisted session file.
    /// Uses `~/.parley/session.json`.
    pub fn session_path() -> PathBuf {
        Self::session_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the session path rooted at `base_dir` (used for testing).
    pub fn session_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".parley").join("session.json")
    }

    /// Load the persisted session from the default path.
    ///
    /// Returns `None` when the file is absent, unparseable, or expired – the
    /// caller treats all three as "signed out".
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::session_path())
    }

    /// Load the persisted session from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let session: AuthSession = serde_json::from_str(&content).ok()?;
        if session.is_expired(Utc::now()) {
            tracing::info!("stored session expired; treating as signed out");
            return None;
        }
        Some(session)
    }

    /// Atomically write the session to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::session_path())
    }

    /// Atomically write the session to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the default session file if it exists (sign-out).
    pub fn clear() -> Result<()> {
        Self::clear_at(&Self::session_path())
    }

    /// Delete the session file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// `true` once `now` has passed the token expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MagicLinkRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct RedeemRequest<'a> {
    email: &'a str,
    code: &'a str,
}

/// Error body the identity service returns on rejection.
#[derive(Deserialize)]
struct AuthErrorBody {
    error: String,
}

// ── AuthClient ────────────────────────────────────────────────────────────────

/// HTTP client for the external identity service.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client rooted at the identity service endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Ask the identity service to email a sign-in link to `email`.
    ///
    /// Rejections are returned as [`ParleyError::Auth`] so the sign-in form
    /// can render them inline.
    pub async fn request_magic_link(&self, email: &str) -> Result<()> {
        let url = format!("{}/magic-link", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .json(&MagicLinkRequest { email })
            .send()
            .await
            .map_err(|e| ParleyError::Auth(e.to_string()))?;

        Self::check(response).await?;
        tracing::info!(email, "magic link requested");
        Ok(())
    }

    /// Exchange the emailed one-time code for a session.
    pub async fn redeem_code(&self, email: &str, code: &str) -> Result<AuthSession> {
        let url = format!("{}/redeem", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .json(&RedeemRequest { email, code })
            .send()
            .await
            .map_err(|e| ParleyError::Auth(e.to_string()))?;

        let response = Self::check(response).await?;
        let session: AuthSession = response
            .json()
            .await
            .map_err(|e| ParleyError::Auth(format!("malformed session response: {e}")))?;
        tracing::info!(user_id = %session.user_id, "sign-in code redeemed");
        Ok(session)
    }

    /// Map non-success responses to [`ParleyError::Auth`], preferring the
    /// service's own error message when the body carries one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<AuthErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("identity service returned {status}"),
        };
        Err(ParleyError::Auth(message))
    }
}
