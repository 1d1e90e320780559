use crate::calendar::{current_week, parse_date, week_date_labels, week_dates, DATE_FORMAT};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{optional_str, required_i32, required_str};
use crate::ipc::types::{AppState, Request};
use chrono::NaiveDate;
use serde_json::json;

fn date_param(key: &str, value: &str) -> Result<NaiveDate, HandlerErr> {
    parse_date(value).ok_or_else(|| {
        HandlerErr::bad_params(
            format!("params.{key} must be a YYYY-MM-DD date"),
            Some(json!({ key: value })),
        )
    })
}

fn calendar_current_week(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let term_start = date_param("termStart", required_str(req, "termStart")?)?;
    let today = match optional_str(req, "today") {
        Some(v) => date_param("today", v)?,
        None => chrono::Local::now().date_naive(),
    };
    let week_count = state.session.config().weeks.count;
    Ok(json!({
        "week": current_week(term_start, today, week_count),
        "weekCount": week_count,
        "today": today.format(DATE_FORMAT).to_string(),
    }))
}

fn calendar_week_dates(req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let term_start = date_param("termStart", required_str(req, "termStart")?)?;
    let week = required_i32(req, "week")?;
    let days = week_dates(term_start, week).ok_or_else(|| {
        HandlerErr::bad_params("params.week is out of range", Some(json!({ "week": week })))
    })?;
    let dates: Vec<String> = days
        .iter()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect();
    Ok(json!({
        "week": week,
        "dates": dates,
        "labels": week_date_labels(&days),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "calendar.currentWeek" => calendar_current_week(state, req),
        "calendar.weekDates" => calendar_week_dates(req),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
