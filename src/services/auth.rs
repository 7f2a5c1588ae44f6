//! Local identity store: user records and bearer session tokens.
//!
//! Credentials are not handled here. Tokens are issued by an operator
//! (`inkshelf user token`) and resolved per request.

use crate::models::{UpdateProfile, User};
use crate::Database;
use anyhow::Result;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use rusqlite::{OptionalExtension, Row};

const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_AVATAR_LENGTH: usize = 2048;

const USER_COLUMNS: &str = "id, email, name, avatar, is_admin, created_at, updated_at";

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Name cannot be empty");
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        anyhow::bail!("Name must be {} characters or less", MAX_NAME_LENGTH);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        anyhow::bail!("Email cannot be empty");
    }
    if email.len() > MAX_EMAIL_LENGTH {
        anyhow::bail!("Email must be {} characters or less", MAX_EMAIL_LENGTH);
    }
    if !email.contains('@') || !email.contains('.') {
        anyhow::bail!("Invalid email format");
    }
    Ok(())
}

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        avatar: row.get(3)?,
        is_admin: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn create_user(db: &Database, email: &str, name: &str, is_admin: bool) -> Result<String> {
    validate_email(email)?;
    validate_name(name)?;
    let id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now();
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO users (id, email, name, is_admin, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        rusqlite::params![id, email.to_lowercase(), name.trim(), is_admin, now],
    )?;
    Ok(id)
}

pub fn get_user(db: &Database, id: &str) -> Result<Option<User>> {
    let conn = db.get()?;
    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
            [id],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

pub fn get_user_by_email(db: &Database, email: &str) -> Result<Option<User>> {
    let conn = db.get()?;
    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS),
            [email.to_lowercase()],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

pub fn list_users(db: &Database) -> Result<Vec<User>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM users ORDER BY created_at DESC",
        USER_COLUMNS
    ))?;
    let users = stmt
        .query_map([], row_to_user)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

pub fn count_users(db: &Database) -> Result<i64> {
    let conn = db.get()?;
    let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    Ok(count)
}

pub fn set_admin(db: &Database, id: &str, is_admin: bool) -> Result<()> {
    let conn = db.get()?;
    let changed = conn.execute(
        "UPDATE users SET is_admin = ?1, updated_at = ?2 WHERE id = ?3",
        rusqlite::params![is_admin, Utc::now(), id],
    )?;
    if changed == 0 {
        anyhow::bail!("User not found");
    }
    Ok(())
}

/// Applies the given profile fields and returns the refreshed record.
/// An empty avatar clears it.
pub fn update_profile(db: &Database, id: &str, update: &UpdateProfile) -> Result<User> {
    let current = get_user(db, id)?.ok_or_else(|| anyhow::anyhow!("User not found"))?;

    let name = match update.name.as_deref() {
        Some(name) => {
            validate_name(name)?;
            name.trim().to_string()
        }
        None => current.name,
    };
    let avatar = match update.avatar.as_deref() {
        Some(a) if a.trim().is_empty() => None,
        Some(a) => {
            if a.len() > MAX_AVATAR_LENGTH {
                anyhow::bail!("Avatar URL must be {} characters or less", MAX_AVATAR_LENGTH);
            }
            Some(a.trim().to_string())
        }
        None => current.avatar,
    };

    let conn = db.get()?;
    conn.execute(
        "UPDATE users SET name = ?1, avatar = ?2, updated_at = ?3 WHERE id = ?4",
        rusqlite::params![name, avatar, Utc::now(), id],
    )?;
    drop(conn);

    get_user(db, id)?.ok_or_else(|| anyhow::anyhow!("User not found"))
}

pub fn delete_user(db: &Database, id: &str) -> Result<()> {
    let conn = db.get()?;
    conn.execute("DELETE FROM users WHERE id = ?", [id])?;
    Ok(())
}

pub fn create_session(db: &Database, user_id: &str, lifetime: Duration) -> Result<String> {
    let token = generate_session_token();
    let now = Utc::now();
    let expires_at = (now + lifetime).timestamp();
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![token, user_id, now, expires_at],
    )?;
    Ok(token)
}

/// Resolves a token to its user. Unknown and expired tokens yield `None`.
pub fn validate_session(db: &Database, token: &str) -> Result<Option<User>> {
    let conn = db.get()?;
    let user = conn
        .query_row(
            r#"
            SELECT u.id, u.email, u.name, u.avatar, u.is_admin, u.created_at, u.updated_at
            FROM users u
            JOIN sessions s ON s.user_id = u.id
            WHERE s.token = ?1 AND s.expires_at > ?2
            "#,
            rusqlite::params![token, Utc::now().timestamp()],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

pub fn delete_session(db: &Database, token: &str) -> Result<()> {
    let conn = db.get()?;
    conn.execute("DELETE FROM sessions WHERE token = ?", [token])?;
    Ok(())
}

pub fn cleanup_expired_sessions(db: &Database) -> Result<usize> {
    let conn = db.get()?;
    let removed = conn.execute(
        "DELETE FROM sessions WHERE expires_at <= ?",
        [Utc::now().timestamp()],
    )?;
    Ok(removed)
}

/// Parses lifetimes such as `"12h"`, `"30d"` or `"2w"`.
pub fn parse_lifetime(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    let Some((split, _)) = raw.char_indices().last() else {
        anyhow::bail!("Lifetime cannot be empty");
    };
    let (digits, unit) = raw.split_at(split);
    let amount: i64 = digits
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid lifetime '{}': expected e.g. 12h, 30d, 2w", raw))?;
    if amount <= 0 {
        anyhow::bail!("Lifetime '{}' must be positive", raw);
    }
    let lifetime = match unit {
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        _ => anyhow::bail!("Invalid lifetime unit in '{}': use h, d or w", raw),
    };
    lifetime.ok_or_else(|| anyhow::anyhow!("Lifetime '{}' is too large", raw))
}
