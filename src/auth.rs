use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// The signed-in identity, or absent. Access-layer operations take this
/// explicitly; the IPC session is the only place it is held as state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Principal {
    pub uid: String,
    pub email: String,
}

#[derive(Debug)]
pub enum AuthError {
    EmailTaken,
    InvalidCredentials,
    Db(anyhow::Error),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::EmailTaken => write!(f, "email already registered"),
            AuthError::InvalidCredentials => write!(f, "invalid email or password"),
            AuthError::Db(e) => write!(f, "auth query failed: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

/// Minimal shape check, mirroring the dashboard form's regex: something,
/// an '@', something, a '.', something.
pub fn looks_like_email(s: &str) -> bool {
    let s = s.trim();
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty()
                && !tld.is_empty()
                && !domain.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn sign_up(conn: &Connection, email: &str, password: &str) -> Result<Principal, AuthError> {
    let email = email.trim().to_ascii_lowercase();

    let taken: Option<i64> = conn
        .query_row("SELECT 1 FROM users WHERE email = ?", [&email], |r| r.get(0))
        .optional()
        .map_err(|e| AuthError::Db(e.into()))?;
    if taken.is_some() {
        return Err(AuthError::EmailTaken);
    }

    let uid = Uuid::new_v4().to_string();
    let salt = Uuid::new_v4().to_string();
    let hash = hash_password(password, &salt);
    let created_at = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO users(id, email, password_hash, salt, created_at)
         VALUES(?, ?, ?, ?, ?)",
        (&uid, &email, &hash, &salt, &created_at),
    )
    .map_err(|e| AuthError::Db(e.into()))?;

    Ok(Principal { uid, email })
}

pub fn sign_in(conn: &Connection, email: &str, password: &str) -> Result<Principal, AuthError> {
    let email = email.trim().to_ascii_lowercase();

    let row: Option<(String, String, String)> = conn
        .query_row(
            "SELECT id, password_hash, salt FROM users WHERE email = ?",
            [&email],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()
        .map_err(|e| AuthError::Db(e.into()))?;

    let Some((uid, stored_hash, salt)) = row else {
        return Err(AuthError::InvalidCredentials);
    };
    if hash_password(password, &salt) != stored_hash {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(Principal { uid, email })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn temp_workspace(tag: &str) -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("rosterd-{}-{}-{}", tag, std::process::id(), nanos))
    }

    #[test]
    fn sign_up_then_sign_in_round_trip() {
        let conn = db::open_db(&temp_workspace("auth-roundtrip")).expect("open db");
        let p = sign_up(&conn, "Teacher@Example.com", "hunter22").expect("sign up");
        assert_eq!(p.email, "teacher@example.com");

        let again = sign_in(&conn, "teacher@example.com", "hunter22").expect("sign in");
        assert_eq!(again.uid, p.uid);

        match sign_in(&conn, "teacher@example.com", "wrong") {
            Err(AuthError::InvalidCredentials) => {}
            other => panic!("expected InvalidCredentials, got {:?}", other.map(|p| p.uid)),
        }
    }

    #[test]
    fn duplicate_email_rejected() {
        let conn = db::open_db(&temp_workspace("auth-dup")).expect("open db");
        sign_up(&conn, "a@b.co", "password1").expect("first sign up");
        match sign_up(&conn, "A@B.CO", "password2") {
            Err(AuthError::EmailTaken) => {}
            other => panic!("expected EmailTaken, got {:?}", other.map(|p| p.uid)),
        }
    }

    #[test]
    fn email_shape_checks() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last@school.edu"));
        assert!(!looks_like_email("no-at-sign"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@nodot"));
        assert!(!looks_like_email("a b@c.de"));
    }
}
