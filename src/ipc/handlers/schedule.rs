use crate::course::{CourseRecord, RawCourse};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::typed_param;
use crate::ipc::types::{AppState, Request};
use crate::merge::{group_by_weekday, WeekBuckets};
use crate::parse::WEEKDAY_COUNT;
use crate::session::RebuildSummary;
use serde_json::json;

fn summary_json(
    state: &AppState,
    records: usize,
    inert: usize,
    summary: RebuildSummary,
) -> serde_json::Value {
    json!({
        "records": records,
        "inertRecords": inert,
        "mergedRecords": summary.merged_records,
        "newlyColored": summary.newly_colored,
        "revision": state.session.revision(),
    })
}

/// Records that can never occupy a cell of the bucket they were placed in.
fn count_inert(buckets: &WeekBuckets) -> usize {
    buckets
        .iter_days()
        .map(|(weekday, records)| {
            records
                .iter()
                .filter(|r| r.weekday != Some(weekday) || r.slots.is_empty())
                .count()
        })
        .sum()
}

fn buckets_from_params(req: &Request) -> Result<(WeekBuckets, usize), HandlerErr> {
    let days: Option<Vec<Vec<RawCourse>>> = typed_param(req, "days")?;
    let courses: Option<Vec<RawCourse>> = typed_param(req, "courses")?;

    match (days, courses) {
        (Some(days), None) => {
            if days.len() > usize::from(WEEKDAY_COUNT) {
                return Err(HandlerErr::bad_params(
                    "params.days must have at most 7 weekday lists",
                    Some(json!({ "days": days.len() })),
                ));
            }
            let count = days.iter().map(Vec::len).sum();
            let buckets = WeekBuckets::from_days(
                days.iter()
                    .map(|day| day.iter().map(CourseRecord::from_raw).collect::<Vec<_>>()),
            );
            Ok((buckets, count))
        }
        (None, Some(courses)) => {
            let count = courses.len();
            let buckets = group_by_weekday(courses.iter().map(CourseRecord::from_raw));
            Ok((buckets, count))
        }
        (Some(_), Some(_)) => Err(HandlerErr::bad_params(
            "pass either params.days or params.courses, not both",
            None,
        )),
        (None, None) => Err(HandlerErr::bad_params(
            "missing params.days or params.courses",
            None,
        )),
    }
}

fn schedule_load(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let (buckets, count) = buckets_from_params(req)?;
    // grouping a flat list drops records without a weekday
    let inert = count_inert(&buckets) + (count - buckets.len());
    let summary = state.session.load_institutional(buckets);
    Ok(summary_json(state, count, inert, summary))
}

fn schedule_clear(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let summary = state.session.clear_institutional();
    Ok(summary_json(state, 0, 0, summary))
}

fn schedule_get(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    let session = &state.session;
    Ok(json!({
        "institutional": session.institutional(),
        "merged": session.merged(),
        "revision": session.revision(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "schedule.load" => schedule_load(state, req),
        "schedule.clear" => schedule_clear(state),
        "schedule.get" => schedule_get(state),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
