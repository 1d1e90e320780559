#![allow(dead_code)]

use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn(args: &[&str]) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_timetabled");
    let mut child = Command::new(exe)
        .args(args)
        .env_remove("TIMETABLED_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn timetabled");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

pub fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    spawn(&[])
}

pub fn spawn_sidecar_with_config(path: &Path) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let path = path.to_string_lossy().to_string();
    spawn(&["--config", &path])
}

pub fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

pub fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

pub fn error_code(value: &serde_json::Value) -> Option<&str> {
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
}

/// One institutional feed entry in the feed's own key layout.
pub fn feed_course(
    name: &str,
    class_time: &str,
    slots: &str,
    class_week: &str,
    details: Option<&str>,
) -> serde_json::Value {
    let mut v = json!({
        "dayLabel": "",
        "classTime": class_time,
        "courseName": name,
        "location": "A101(多媒体)",
        "teacherName": "王老师",
        "classWeek": class_week,
        "maxClassTime": slots,
    });
    if let Some(d) = details {
        v["classWeekDetails"] = json!(d);
    }
    v
}

/// `"from,from+1,...,to"`
pub fn week_list(from: i32, to: i32) -> String {
    (from..=to)
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// The cell at `weekday`/`slot` from a `grid.get` result.
pub fn grid_cell<'a>(grid: &'a serde_json::Value, weekday: u8, slot: u8) -> &'a serde_json::Value {
    let row = grid
        .get("rows")
        .and_then(|v| v.as_array())
        .and_then(|rows| rows.get(usize::from(slot) - 1))
        .expect("grid row");
    row.get("cells")
        .and_then(|v| v.as_array())
        .and_then(|cells| cells.get(usize::from(weekday) - 1))
        .expect("grid cell")
}
