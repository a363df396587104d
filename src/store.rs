use rusqlite::{Connection, OptionalExtension};

use crate::model::{Student, StudentForm};

/// Persistence seam for non-seed records. The store owns id assignment:
/// `insert` takes the caller-prepared fields and returns the new id.
pub trait StudentStore {
    fn query_by_owner(&self, user_id: &str) -> anyhow::Result<Vec<Student>>;
    fn get(&self, id: &str) -> anyhow::Result<Option<Student>>;
    fn insert(
        &self,
        form: &StudentForm,
        user_id: &str,
        created_at: &str,
    ) -> anyhow::Result<String>;
}

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteStore { conn }
    }
}

const STUDENT_COLUMNS: &str =
    "id, name, email, course, grade, enrollment_date, avatar, user_id, created_at";

fn row_to_student(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        course: row.get(3)?,
        grade: row.get(4)?,
        enrollment_date: row.get(5)?,
        avatar: row.get(6)?,
        user_id: row.get(7)?,
        created_at: row.get(8)?,
    })
}

impl StudentStore for SqliteStore<'_> {
    fn query_by_owner(&self, user_id: &str) -> anyhow::Result<Vec<Student>> {
        let sql = format!(
            "SELECT {} FROM students WHERE user_id = ? ORDER BY created_at, id",
            STUDENT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([user_id], row_to_student)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<Student>> {
        let sql = format!("SELECT {} FROM students WHERE id = ?", STUDENT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, [id], row_to_student)
            .optional()?;
        Ok(row)
    }

    fn insert(
        &self,
        form: &StudentForm,
        user_id: &str,
        created_at: &str,
    ) -> anyhow::Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO students(id, name, email, course, grade, enrollment_date,
                                  avatar, user_id, created_at)
             VALUES(?, ?, ?, ?, ?, ?, ?, ?, ?)",
            (
                &id,
                &form.name,
                &form.email,
                &form.course,
                &form.grade,
                &form.enrollment_date,
                &form.avatar,
                user_id,
                created_at,
            ),
        )?;
        Ok(id)
    }
}
