use crate::access;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::stats::{course_distribution, total_count};
use crate::store::SqliteStore;
use serde_json::json;

const TOP_COURSES: usize = 5;

fn handle_dashboard_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let store = SqliteStore::new(conn);
    let snapshot = access::fetch_all(&store, state.session.as_ref());
    let distribution = course_distribution(&snapshot.students, TOP_COURSES);

    ok(
        &req.id,
        json!({
            "totalStudents": total_count(&snapshot.students),
            "degraded": snapshot.degraded,
            "courseDistribution": distribution
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.stats" => Some(handle_dashboard_stats(state, req)),
        _ => None,
    }
}
