use chrono::Utc;

use crate::auth::Principal;
use crate::model::{placeholder_avatar, seed_students, Student, StudentForm};
use crate::store::StudentStore;

/// Result of a roster fetch. `degraded` marks the fail-open path: the store
/// could not be reached and only the seed roster is present. Callers can
/// surface that instead of mistaking it for a complete roster.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub students: Vec<Student>,
    pub degraded: bool,
}

#[derive(Debug)]
pub enum AccessError {
    NotFound,
    Unauthorized,
    Unauthenticated,
    Store(anyhow::Error),
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessError::NotFound => write!(f, "student not found"),
            AccessError::Unauthorized => write!(f, "record belongs to another user"),
            AccessError::Unauthenticated => write!(f, "sign in to create records"),
            AccessError::Store(e) => write!(f, "store operation failed: {}", e),
        }
    }
}

impl std::error::Error for AccessError {}

impl AccessError {
    /// Stable IPC error code.
    pub fn code(&self) -> &'static str {
        match self {
            AccessError::NotFound => "not_found",
            AccessError::Unauthorized => "unauthorized",
            AccessError::Unauthenticated => "unauthenticated",
            AccessError::Store(_) => "store_failed",
        }
    }
}

/// Seed roster first, then the principal's own records. Never fails: a store
/// fault degrades to the seed roster alone, flagged on the snapshot. With no
/// principal the store is skipped entirely.
pub fn fetch_all(store: &dyn StudentStore, principal: Option<&Principal>) -> RosterSnapshot {
    let mut students = seed_students();

    let Some(principal) = principal else {
        return RosterSnapshot {
            students,
            degraded: false,
        };
    };

    match store.query_by_owner(&principal.uid) {
        Ok(owned) => {
            students.extend(owned);
            RosterSnapshot {
                students,
                degraded: false,
            }
        }
        Err(_) => RosterSnapshot {
            students: seed_students(),
            degraded: true,
        },
    }
}

/// Two-tier lookup, seed roster first. Seed hits are public and skip the
/// ownership check. A persisted record owned by someone else is never
/// returned while a principal is signed in.
pub fn fetch_by_id(
    store: &dyn StudentStore,
    principal: Option<&Principal>,
    id: &str,
) -> Result<Student, AccessError> {
    if let Some(seeded) = seed_students().into_iter().find(|s| s.id == id) {
        return Ok(seeded);
    }

    let record = store
        .get(id)
        .map_err(AccessError::Store)?
        .ok_or(AccessError::NotFound)?;

    if let Some(principal) = principal {
        if record.user_id != principal.uid {
            return Err(AccessError::Unauthorized);
        }
    }

    Ok(record)
}

/// Requires a principal; the store is not touched without one. Stamps
/// `created_at`, fills a blank avatar from the name, and stamps ownership.
/// Field validation happened at the caller.
pub fn create(
    store: &dyn StudentStore,
    principal: Option<&Principal>,
    mut form: StudentForm,
) -> Result<Student, AccessError> {
    let principal = principal.ok_or(AccessError::Unauthenticated)?;

    if form.avatar.trim().is_empty() {
        form.avatar = placeholder_avatar(&form.name);
    }
    let created_at = Utc::now().to_rfc3339();

    let id = store
        .insert(&form, &principal.uid, &created_at)
        .map_err(AccessError::Store)?;

    Ok(Student {
        id,
        name: form.name,
        email: form.email,
        course: form.course,
        grade: form.grade,
        enrollment_date: form.enrollment_date,
        avatar: form.avatar,
        user_id: principal.uid.clone(),
        created_at: Some(created_at),
    })
}
