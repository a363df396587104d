
use serde_json::json;
use test_support::{request_err, request_ok, spawn_sidecar, temp_dir};

#[test]
fn health_reports_version_and_workspace() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(
        health.get("version").and_then(|v| v.as_str()),
        Some(env!("CARGO_PKG_VERSION"))
    );
    assert!(health.get("workspacePath").map(|v| v.is_null()).unwrap_or(false));

    let workspace = temp_dir("rosterd-smoke");
    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(
        selected.get("workspacePath").and_then(|v| v.as_str()),
        Some(workspace.to_string_lossy().as_ref())
    );

    let health = request_ok(&mut stdin, &mut reader, "3", "health", json!({}));
    assert_eq!(
        health.get("workspacePath").and_then(|v| v.as_str()),
        Some(workspace.to_string_lossy().as_ref())
    );
}

#[test]
fn bad_json_reply_is_well_formed() {
    use std::io::{BufRead, Write};

    let (_child, mut stdin, mut reader) = spawn_sidecar();

    // A bare string parses as JSON but not as a request, and the resulting
    // serde message quotes the input; the reply must still be valid JSON.
    writeln!(stdin, "\"hello\"").expect("write malformed request");
    stdin.flush().expect("flush");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read reply");
    let reply: serde_json::Value = serde_json::from_str(&line).expect("reply must parse");
    assert_eq!(reply.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        reply.get("error").and_then(|e| e.get("code")).and_then(|c| c.as_str()),
        Some("bad_json")
    );

    // The loop keeps serving after a malformed line.
    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert!(health.get("version").is_some());
}

#[test]
fn unknown_method_is_not_implemented() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let code = request_err(&mut stdin, &mut reader, "1", "students.delete", json!({}));
    assert_eq!(code, "not_implemented");
}

#[test]
fn roster_methods_require_a_workspace() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    for (i, method) in ["students.list", "students.get", "students.create", "dashboard.stats"]
        .iter()
        .enumerate()
    {
        let code = request_err(
            &mut stdin,
            &mut reader,
            &format!("{}", i + 1),
            method,
            json!({ "id": "1" }),
        );
        assert_eq!(code, "no_workspace", "method {} without workspace", method);
    }
}
