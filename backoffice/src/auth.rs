//! Admin sign-in and bearer sessions

use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use common::error::{Error, Result};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};
#[cfg(feature = "utoipa")]
use utoipa::ToSchema;
use uuid::Uuid;

/// Default session lifetime, one working day
pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 480;

/// Admin credentials and session settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_email: String,
    /// Sign-in is refused for everyone while unset
    pub admin_password: Option<String>,
    pub session_ttl_minutes: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@localhost".to_string(),
            admin_password: None,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}

impl AuthConfig {
    /// Load from ADMIN_EMAIL, ADMIN_PASSWORD and SESSION_TTL_MINUTES
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let admin_email = env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email);
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());
        let session_ttl_minutes = env::var("SESSION_TTL_MINUTES")
            .ok()
            .and_then(|ttl| ttl.parse().ok())
            .unwrap_or(defaults.session_ttl_minutes);

        Self {
            admin_email,
            admin_password,
            session_ttl_minutes,
        }
    }

    pub fn new(admin_email: impl Into<String>, admin_password: impl Into<String>, session_ttl_minutes: u32) -> Self {
        Self {
            admin_email: admin_email.into(),
            admin_password: Some(admin_password.into()),
            session_ttl_minutes,
        }
    }
}

/// Signed-in admin session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token
    pub token: Uuid,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Identity provider guarding the admin screens
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Check credentials and open a session
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// End a session; unknown tokens are ignored
    async fn sign_out(&self, token: Uuid) -> Result<()>;

    /// Live session for a token, if any
    async fn current_session(&self, token: Uuid) -> Result<Option<Session>>;
}

/// Single-admin provider checking the configured credentials
pub struct InMemorySessionProvider {
    config: AuthConfig,
    sessions: DashMap<Uuid, Session>,
}

impl InMemorySessionProvider {
    pub fn new(config: AuthConfig) -> Self {
        if config.admin_password.is_none() {
            warn!("ADMIN_PASSWORD is not set, admin sign-in is disabled");
        }
        Self {
            config,
            sessions: DashMap::new(),
        }
    }

    /// Number of sessions currently held, expired ones included
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop every session expired at `now`, returning how many went
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }
        purged
    }

    fn password_matches(&self, password: &str) -> bool {
        match self.config.admin_password.as_deref() {
            Some(expected) => bool::from(expected.as_bytes().ct_eq(password.as_bytes())),
            None => false,
        }
    }
}

#[async_trait]
impl SessionProvider for InMemorySessionProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email_matches = email.trim().eq_ignore_ascii_case(&self.config.admin_email);
        let password_matches = self.password_matches(password);
        if !email_matches || !password_matches {
            warn!("Rejected admin sign-in for {}", email);
            return Err(Error::AuthorizationError("Invalid email or password".to_string()));
        }

        let issued_at = Utc::now();
        self.purge_expired(issued_at);
        let session = Session {
            token: Uuid::new_v4(),
            email: self.config.admin_email.clone(),
            issued_at,
            expires_at: issued_at + Duration::minutes(i64::from(self.config.session_ttl_minutes)),
        };
        self.sessions.insert(session.token, session.clone());
        info!("Admin {} signed in", session.email);
        Ok(session)
    }

    async fn sign_out(&self, token: Uuid) -> Result<()> {
        if let Some((_, session)) = self.sessions.remove(&token) {
            info!("Admin {} signed out", session.email);
        }
        Ok(())
    }

    async fn current_session(&self, token: Uuid) -> Result<Option<Session>> {
        let session = match self.sessions.get(&token) {
            Some(session) => session.clone(),
            None => return Ok(None),
        };

        if session.is_expired_at(Utc::now()) {
            debug!("Session for {} expired", session.email);
            self.sessions.remove(&token);
            return Ok(None);
        }
        Ok(Some(session))
    }
}
