use crate::custom::CustomCourseInput;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{required_str, typed_param};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn course_input(req: &Request) -> Result<CustomCourseInput, HandlerErr> {
    typed_param(req, "course")?
        .ok_or_else(|| HandlerErr::bad_params("missing params.course", None))
}

fn custom_list(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({ "courses": state.session.custom_entries() }))
}

fn custom_add(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let input = course_input(req)?;
    let id = state.session.add_custom(input)?;
    Ok(json!({ "id": id, "revision": state.session.revision() }))
}

fn custom_update(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let id = required_str(req, "id")?;
    let input = course_input(req)?;
    state.session.update_custom(id, input)?;
    Ok(json!({ "id": id, "revision": state.session.revision() }))
}

fn custom_delete(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let id = required_str(req, "id")?;
    let removed = state.session.delete_custom(id)?;
    Ok(json!({ "deleted": removed, "revision": state.session.revision() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "custom.list" => custom_list(state),
        "custom.add" => custom_add(state, req),
        "custom.update" => custom_update(state, req),
        "custom.delete" => custom_delete(state, req),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
