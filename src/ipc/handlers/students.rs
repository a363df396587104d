use crate::access;
use crate::filter::filter_students;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{is_known_course, StudentForm};
use crate::store::SqliteStore;
use chrono::NaiveDate;
use serde_json::json;

fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    let value = req
        .params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))?;
    if value.is_empty() {
        return Err(err(
            &req.id,
            "bad_params",
            format!("{} must not be empty", key),
            None,
        ));
    }
    Ok(value)
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let course = req
        .params
        .get("course")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let search = req
        .params
        .get("search")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let store = SqliteStore::new(conn);
    let snapshot = access::fetch_all(&store, state.session.as_ref());
    let filtered = filter_students(&snapshot.students, course.as_deref(), search);

    ok(
        &req.id,
        json!({
            "students": filtered,
            "totalStudents": snapshot.students.len(),
            "degraded": snapshot.degraded
        }),
    )
}

fn handle_students_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let store = SqliteStore::new(conn);
    match access::fetch_by_id(&store, state.session.as_ref(), &id) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => err(&req.id, e.code(), e.to_string(), None),
    }
}

fn parse_form(req: &Request) -> Result<StudentForm, serde_json::Value> {
    let name = required_str(req, "name")?;
    let email = required_str(req, "email")?;
    let course = required_str(req, "course")?;
    let grade = required_str(req, "grade")?;
    let enrollment_date = required_str(req, "enrollmentDate")?;

    if !crate::auth::looks_like_email(&email) {
        return Err(err(&req.id, "bad_params", "invalid email address", None));
    }
    if !is_known_course(&course) {
        return Err(err(
            &req.id,
            "bad_params",
            format!("unknown course: {}", course),
            Some(json!({ "course": course })),
        ));
    }
    if NaiveDate::parse_from_str(&enrollment_date, "%Y-%m-%d").is_err() {
        return Err(err(
            &req.id,
            "bad_params",
            "enrollmentDate must be YYYY-MM-DD",
            None,
        ));
    }

    let avatar = req
        .params
        .get("avatar")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string();

    Ok(StudentForm {
        name,
        email,
        course,
        grade,
        enrollment_date,
        avatar,
    })
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let form = match parse_form(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let store = SqliteStore::new(conn);
    match access::create(&store, state.session.as_ref(), form) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => err(&req.id, e.code(), e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.get" => Some(handle_students_get(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        _ => None,
    }
}
