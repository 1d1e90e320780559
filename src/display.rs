use serde::Serialize;

use crate::config::DisplaySettings;
use crate::course::CourseRecord;

const ELLIPSIS: &str = "...";
const TEACHER_SEPARATORS: [char; 5] = [',', '，', '、', ';', '；'];

fn is_ascii_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Width of one char in half units: ASCII letters are half as wide as
/// everything else.
fn half_units(c: char) -> usize {
    if is_ascii_letter(c) {
        1
    } else {
        2
    }
}

/// Visual length in whole units: every non-letter char is 1, ASCII letters
/// count 0.5 each with the letter total rounded up.
pub fn visual_length(text: &str) -> usize {
    let (letters, others) = text.chars().fold((0usize, 0usize), |(l, o), c| {
        if is_ascii_letter(c) {
            (l + 1, o)
        } else {
            (l, o + 1)
        }
    });
    others + (letters + 1) / 2
}

/// Keeps about `front` units from the start and `back` units from the end,
/// joined by `...`, when the text is longer than `front + back`.
pub fn truncate_visual(text: &str, front: usize, back: usize) -> String {
    if visual_length(text) <= front + back {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();

    let mut taken = 0usize;
    let mut head = 0usize;
    while taken < front * 2 && head < chars.len() {
        taken += half_units(chars[head]);
        head += 1;
    }

    let mut taken = 0usize;
    let mut tail = chars.len();
    while taken < back * 2 && tail > 0 {
        tail -= 1;
        taken += half_units(chars[tail]);
    }

    let mut out: String = chars[..head].iter().collect();
    out.push_str(ELLIPSIS);
    out.extend(chars[tail..].iter());
    out
}

fn fit(text: &str, max_units: usize, rules: &DisplaySettings) -> String {
    if visual_length(text) > max_units {
        truncate_visual(text, rules.keep_prefix_units, rules.keep_suffix_units)
    } else {
        text.to_string()
    }
}

/// Removes facility-type annotations such as `(多媒体)` or `（多媒体）`.
pub fn strip_facility_annotations(location: &str, annotations: &[String]) -> String {
    let mut out = location.to_string();
    for a in annotations {
        out = out
            .replace(&format!("({a})"), "")
            .replace(&format!("（{a}）"), "");
    }
    out.trim().to_string()
}

/// One teacher per line.
pub fn normalize_teacher(teacher: &str) -> String {
    teacher.replace(&TEACHER_SEPARATORS[..], "\n")
}

/// Compact strings for a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellText {
    pub name: String,
    pub location: String,
    pub teacher: String,
}

impl CellText {
    pub fn for_record(record: &CourseRecord, rules: &DisplaySettings) -> Self {
        let location = strip_facility_annotations(&record.location, &rules.facility_annotations);
        let teacher = normalize_teacher(&record.teacher);
        Self {
            name: fit(&record.name, rules.name_max_units, rules),
            location: fit(&location, rules.location_max_units, rules),
            teacher: fit(&teacher, rules.teacher_max_units, rules),
        }
    }
}
