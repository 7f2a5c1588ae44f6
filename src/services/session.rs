//! Explicit per-request session context.
//!
//! A [`Session`] is built once at the edge (HTTP extractor or CLI flag)
//! and passed to whatever needs the current user. Signing out consumes it.

use crate::models::{UpdateProfile, User};
use crate::services::auth;
use crate::Database;
use anyhow::Result;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("sign in required")]
    SignInRequired,
    #[error("admin access required")]
    AdminRequired,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user: User) -> Self {
        Self {
            user: Some(user),
            token: None,
        }
    }

    /// Resolves `token` against the store. A missing, unknown or expired
    /// token produces an anonymous session.
    pub fn resolve(db: &Database, token: Option<&str>) -> Result<Self> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(Self::anonymous());
        };
        match auth::validate_session(db, token)? {
            Some(user) => Ok(Self {
                user: Some(user),
                token: Some(token.to_string()),
            }),
            None => {
                tracing::debug!("Ignoring unknown or expired session token");
                Ok(Self::anonymous())
            }
        }
    }

    /// Session for the user registered under `email`, if any.
    pub fn for_email(db: &Database, email: &str) -> Result<Self> {
        Ok(match auth::get_user_by_email(db, email)? {
            Some(user) => Self::for_user(user),
            None => Self::anonymous(),
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(|u| u.is_admin).unwrap_or(false)
    }

    pub fn require_user(&self) -> Result<&User, AccessError> {
        self.user.as_ref().ok_or(AccessError::SignInRequired)
    }

    pub fn require_admin(&self) -> Result<&User, AccessError> {
        let user = self.require_user()?;
        if user.is_admin {
            Ok(user)
        } else {
            Err(AccessError::AdminRequired)
        }
    }

    /// Writes profile changes through to the store and refreshes the
    /// cached user.
    pub fn update_profile(&mut self, db: &Database, update: &UpdateProfile) -> Result<&User> {
        let id = self.require_user()?.id.clone();
        let user = auth::update_profile(db, &id, update)?;
        Ok(self.user.insert(user))
    }

    /// Revokes the session token, if this session was created from one.
    pub fn sign_out(self, db: &Database) -> Result<()> {
        if let Some(token) = &self.token {
            auth::delete_session(db, token)?;
            tracing::info!("Session signed out");
        }
        Ok(())
    }
}
