use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = &state.session;
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "weekCount": session.config().weeks.count,
            "paletteSize": session.config().palette.colors.len(),
            "records": session.merged().len(),
            "customCourses": session.custom_entries().len(),
            "revision": session.revision(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        _ => None,
    }
}
