use serde::de::DeserializeOwned;
use serde_json::json;

use crate::ipc::error::HandlerErr;
use crate::ipc::types::Request;

pub fn required_str<'a>(req: &'a Request, key: &str) -> Result<&'a str, HandlerErr> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing params.{key}"), None))
}

pub fn optional_str<'a>(req: &'a Request, key: &str) -> Option<&'a str> {
    req.params.get(key).and_then(|v| v.as_str())
}

pub fn optional_bool(req: &Request, key: &str) -> Result<Option<bool>, HandlerErr> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v.as_bool().map(Some).ok_or_else(|| {
            HandlerErr::bad_params(format!("params.{key} must be a boolean"), Some(json!({ key: v })))
        }),
    }
}

pub fn optional_i32(req: &Request, key: &str) -> Result<Option<i32>, HandlerErr> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                HandlerErr::bad_params(format!("params.{key} must be an integer"), Some(json!({ key: v })))
            }),
    }
}

pub fn required_i32(req: &Request, key: &str) -> Result<i32, HandlerErr> {
    optional_i32(req, key)?.ok_or_else(|| HandlerErr::bad_params(format!("missing params.{key}"), None))
}

/// Integer parameter that must fall in `range` (weekday, slot).
pub fn required_u8_in(
    req: &Request,
    key: &str,
    range: std::ops::RangeInclusive<u8>,
) -> Result<u8, HandlerErr> {
    let n = required_i32(req, key)?;
    u8::try_from(n)
        .ok()
        .filter(|v| range.contains(v))
        .ok_or_else(|| {
            HandlerErr::bad_params(
                format!("params.{key} must be in {}..={}", range.start(), range.end()),
                Some(json!({ key: n })),
            )
        })
}

/// Deserializes one params field into a typed value.
pub fn typed_param<T: DeserializeOwned>(req: &Request, key: &str) -> Result<Option<T>, HandlerErr> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| HandlerErr::bad_params(format!("invalid params.{key}: {e}"), None)),
    }
}
