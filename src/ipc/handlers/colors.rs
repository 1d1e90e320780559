use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn colors_get(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    let session = &state.session;
    let colors: serde_json::Map<String, serde_json::Value> = session
        .colors()
        .iter()
        .map(|(name, index)| {
            (
                name.to_string(),
                json!({ "index": index, "hex": session.color_hex(name) }),
            )
        })
        .collect();
    Ok(json!({
        "colors": colors,
        "palette": session.config().palette.colors,
        "revision": session.revision(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "colors.get" => Some(respond(&req.id, colors_get(state))),
        _ => None,
    }
}
