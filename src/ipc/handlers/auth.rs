use crate::auth::{self, AuthError};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

const MIN_PASSWORD_LEN: usize = 6;

fn credentials(req: &Request) -> Result<(String, String), serde_json::Value> {
    let email = match req.params.get("email").and_then(|v| v.as_str()) {
        Some(v) => v.trim().to_string(),
        None => return Err(err(&req.id, "bad_params", "missing email", None)),
    };
    let password = match req.params.get("password").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return Err(err(&req.id, "bad_params", "missing password", None)),
    };
    if !auth::looks_like_email(&email) {
        return Err(err(&req.id, "bad_params", "invalid email address", None));
    }
    Ok((email, password))
}

fn auth_error(req: &Request, e: AuthError) -> serde_json::Value {
    match e {
        AuthError::EmailTaken => err(&req.id, "email_taken", e.to_string(), None),
        AuthError::InvalidCredentials => err(&req.id, "invalid_credentials", e.to_string(), None),
        AuthError::Db(inner) => err(&req.id, "db_query_failed", inner.to_string(), None),
    }
}

fn handle_sign_up(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let (email, password) = match credentials(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if password.len() < MIN_PASSWORD_LEN {
        return err(
            &req.id,
            "bad_params",
            format!("password must be at least {} characters", MIN_PASSWORD_LEN),
            None,
        );
    }

    match auth::sign_up(conn, &email, &password) {
        Ok(principal) => {
            state.session = Some(principal.clone());
            ok(&req.id, json!({ "principal": principal }))
        }
        Err(e) => auth_error(req, e),
    }
}

fn handle_sign_in(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let (email, password) = match credentials(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match auth::sign_in(conn, &email, &password) {
        Ok(principal) => {
            state.session = Some(principal.clone());
            ok(&req.id, json!({ "principal": principal }))
        }
        Err(e) => auth_error(req, e),
    }
}

fn handle_sign_out(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.session = None;
    ok(&req.id, json!({ "signedOut": true }))
}

fn handle_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "principal": &state.session }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.signUp" => Some(handle_sign_up(state, req)),
        "auth.signIn" => Some(handle_sign_in(state, req)),
        "auth.signOut" => Some(handle_sign_out(state, req)),
        "auth.current" => Some(handle_current(state, req)),
        _ => None,
    }
}
