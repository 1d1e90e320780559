mod test_support;

use serde_json::json;
use test_support::{feed_course, grid_cell, request_ok, spawn_sidecar, week_list};

fn primary_name(cell: &serde_json::Value) -> Option<&str> {
    cell.get("primary")
        .and_then(|p| p.get("name"))
        .and_then(|v| v.as_str())
}

#[test]
fn overlapping_courses_pick_the_earliest_starting_one() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let load = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "schedule.load",
        json!({
            "courses": [
                feed_course("线性代数", "2", "第三大节", "5-10", Some(&week_list(5, 10))),
                feed_course("高等数学", "20304", "第三大节,第四大节", "1-16", Some(&week_list(1, 16))),
            ]
        }),
    );
    assert_eq!(load.get("records").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(load.get("inertRecords").and_then(|v| v.as_u64()), Some(0));

    let grid = request_ok(&mut stdin, &mut reader, "2", "grid.get", json!({ "week": 6 }));
    let cell = grid_cell(&grid, 2, 3);
    assert_eq!(cell.get("courseCount").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(cell.get("hasOverlap").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(primary_name(cell), Some("高等数学"));
    assert_eq!(
        cell.get("text").and_then(|t| t.get("location")).and_then(|v| v.as_str()),
        Some("A101")
    );
    assert!(cell.get("color").and_then(|v| v.as_str()).is_some());

    let below = grid_cell(&grid, 2, 4);
    assert_eq!(below.get("courseCount").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(below.get("hasOverlap").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(grid.get("activeCells").and_then(|v| v.as_u64()), Some(2));

    let later = request_ok(&mut stdin, &mut reader, "3", "grid.get", json!({ "week": 12 }));
    let cell = grid_cell(&later, 2, 3);
    assert_eq!(cell.get("courseCount").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(primary_name(cell), Some("高等数学"));

    let after_term = request_ok(&mut stdin, &mut reader, "4", "grid.get", json!({ "week": 17 }));
    assert_eq!(after_term.get("activeCells").and_then(|v| v.as_u64()), Some(0));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn all_weeks_mode_and_cell_lookup() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "schedule.load",
        json!({
            "courses": [
                feed_course("体育", "4", "第五大节", "1-15", Some("1,3,5,7,9,11,13,15")),
            ]
        }),
    );

    let even = request_ok(&mut stdin, &mut reader, "2", "grid.get", json!({ "week": 2 }));
    assert_eq!(even.get("activeCells").and_then(|v| v.as_u64()), Some(0));

    let all = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "grid.get",
        json!({ "week": 2, "showAllWeeks": true }),
    );
    assert_eq!(all.get("showAllWeeks").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(primary_name(grid_cell(&all, 4, 5)), Some("体育"));

    let cell = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "grid.cell",
        json!({ "weekday": 4, "slot": 5, "week": 3 }),
    );
    assert_eq!(cell.get("slotName").and_then(|v| v.as_str()), Some("第五大节"));
    assert_eq!(cell.get("active").and_then(|v| v.as_bool()), Some(true));
    let courses = cell.get("courses").and_then(|v| v.as_array()).expect("courses");
    assert_eq!(courses.len(), 1);
    assert_eq!(
        courses[0].get("weekMembership").and_then(|v| v.as_array()).map(|a| a.len()),
        Some(8)
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn day_view_strips_facility_annotations() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "schedule.load",
        json!({
            "courses": [
                feed_course("线性代数", "2", "第三大节", "5-10", None),
                feed_course("高等数学", "2", "第三大节", "1-16", None),
            ]
        }),
    );

    let day = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "day.get",
        json!({ "weekday": 2, "week": 6 }),
    );
    let slots = day.get("slots").and_then(|v| v.as_array()).expect("slots");
    assert_eq!(slots.len(), 5);
    assert!(slots[0].get("course").map(|v| v.is_null()).unwrap_or(false));
    let third = slots[2].get("course").expect("course");
    assert_eq!(third.get("name").and_then(|v| v.as_str()), Some("高等数学"));
    assert_eq!(third.get("location").and_then(|v| v.as_str()), Some("A101"));
    assert_eq!(slots[2].get("hasOverlap").and_then(|v| v.as_bool()), Some(true));

    drop(stdin);
    let _ = child.wait();
}
