use crate::course::CourseRecord;
use crate::display::{strip_facility_annotations, CellText};
use crate::grid::{resolve_cell, resolve_day, resolve_grid, GridCell, WeekFilter};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{optional_bool, optional_i32, required_i32, required_u8_in};
use crate::ipc::types::{AppState, Request};
use crate::parse::{slot_name, SLOT_COUNT, WEEKDAY_COUNT};
use crate::session::TimetableSession;
use serde_json::json;

fn course_json(session: &TimetableSession, record: &CourseRecord) -> serde_json::Value {
    let mut v = serde_json::to_value(record).unwrap_or_else(|_| json!({}));
    v["color"] = json!(session.color_hex(&record.name));
    v["colorIndex"] = json!(session.colors().get(&record.name));
    v
}

fn cell_json(session: &TimetableSession, cell: &GridCell<'_>, with_courses: bool) -> serde_json::Value {
    let mut v = json!({
        "weekday": cell.weekday,
        "slot": cell.slot,
        "active": cell.is_active(),
        "hasOverlap": cell.has_overlap(),
        "courseCount": cell.active.len(),
    });
    if let Some(primary) = cell.primary {
        v["primary"] = course_json(session, primary);
        v["text"] = json!(CellText::for_record(primary, &session.config().display));
        v["color"] = json!(session.color_hex(&primary.name));
    }
    if with_courses {
        v["courses"] = json!(cell
            .active
            .iter()
            .map(|r| course_json(session, r))
            .collect::<Vec<_>>());
    }
    v
}

fn week_filter(req: &Request) -> Result<WeekFilter, HandlerErr> {
    let show_all = optional_bool(req, "showAllWeeks")?.unwrap_or(false);
    if show_all {
        let week = optional_i32(req, "week")?.unwrap_or(1);
        return Ok(WeekFilter::new(week, true));
    }
    Ok(WeekFilter::Week(required_i32(req, "week")?))
}

fn filter_json(filter: WeekFilter) -> serde_json::Value {
    match filter {
        WeekFilter::Week(w) => json!({ "week": w, "showAllWeeks": false }),
        WeekFilter::AllWeeks => json!({ "week": null, "showAllWeeks": true }),
    }
}

fn grid_get(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let filter = week_filter(req)?;
    let session = &state.session;
    let grid = resolve_grid(session.merged(), filter);

    let rows: Vec<serde_json::Value> = grid
        .rows()
        .zip(1..=SLOT_COUNT)
        .map(|(cells, slot)| {
            json!({
                "slot": slot,
                "slotName": slot_name(slot),
                "cells": cells.iter().map(|c| cell_json(session, c, true)).collect::<Vec<_>>(),
            })
        })
        .collect();

    let colors: serde_json::Map<String, serde_json::Value> = session
        .colors()
        .iter()
        .map(|(name, _)| (name.to_string(), json!(session.color_hex(name))))
        .collect();

    let mut out = filter_json(filter);
    out["rows"] = json!(rows);
    out["activeCells"] = json!(grid.active_count());
    out["colors"] = json!(colors);
    out["revision"] = json!(session.revision());
    Ok(out)
}

fn grid_cell(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let weekday = required_u8_in(req, "weekday", 1..=WEEKDAY_COUNT)?;
    let slot = required_u8_in(req, "slot", 1..=SLOT_COUNT)?;
    let filter = week_filter(req)?;
    let session = &state.session;
    let cell = resolve_cell(session.merged(), weekday, slot, filter);

    let mut out = cell_json(session, &cell, true);
    out["slotName"] = json!(slot_name(slot));
    out["filter"] = filter_json(filter);
    Ok(out)
}

/// Compact per-slot listing of one weekday, as shown by the home-screen widget.
fn day_get(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let weekday = required_u8_in(req, "weekday", 1..=WEEKDAY_COUNT)?;
    let week = required_i32(req, "week")?;
    let session = &state.session;
    let annotations = &session.config().display.facility_annotations;

    let slots: Vec<serde_json::Value> = resolve_day(session.merged(), weekday, week)
        .iter()
        .map(|cell| {
            let course = cell.primary.map(|r| {
                json!({
                    "name": r.name,
                    "location": strip_facility_annotations(&r.location, annotations),
                    "teacher": r.teacher,
                    "color": session.color_hex(&r.name),
                })
            });
            json!({
                "slot": cell.slot,
                "slotName": slot_name(cell.slot),
                "course": course,
                "hasOverlap": cell.has_overlap(),
            })
        })
        .collect();

    Ok(json!({ "weekday": weekday, "week": week, "slots": slots }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "grid.get" => grid_get(state, req),
        "grid.cell" => grid_cell(state, req),
        "day.get" => day_get(state, req),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
