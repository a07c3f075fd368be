//! Course extraction from registrar transcript text.
//!
//! A course line looks like `CS 201 Introduction to Computing UG A- 3.0`. Lines whose
//! trailing context marks them `Excluded` or `Registered` (not yet completed) are skipped.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

const TRAILING_CONTEXT_CHARS: usize = 50;
const SKIP_MARKERS: [&str; 2] = ["Excluded", "Registered"];

static COURSE_LINE: OnceLock<Regex> = OnceLock::new();

fn course_line() -> &'static Regex {
    COURSE_LINE.get_or_init(|| {
        Regex::new(
            r"([A-Z]+)\s+(\d{3,4}[A-Z]?)\s+([\p{L}\s\.&\-']+?)\s+(UG|GR|FDY)\s+(A\+|A-|A|B\+|B-|B|C\+|C-|C|D\+|D-|D|F|S|U|W|I)\s+\d+\.\d+",
        )
        .expect("valid regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptCourse {
    pub code: String,
    pub title: String,
    pub grade: String,
}

/// Extract completed courses in order of first appearance. A repeated code keeps its
/// first position but takes the title and grade of its last occurrence.
pub fn extract_courses(text: &str) -> Vec<TranscriptCourse> {
    let mut courses: Vec<TranscriptCourse> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for captures in course_line().captures_iter(text) {
        let (Some(whole), Some(subject), Some(number), Some(title), Some(grade)) = (
            captures.get(0),
            captures.get(1),
            captures.get(2),
            captures.get(3),
            captures.get(5),
        ) else {
            continue;
        };

        let trailing: String = text[whole.end()..]
            .chars()
            .take(TRAILING_CONTEXT_CHARS)
            .collect();
        if SKIP_MARKERS.iter().any(|marker| trailing.contains(marker)) {
            tracing::debug!(course = whole.as_str(), "skipping unfinished transcript course");
            continue;
        }

        let course = TranscriptCourse {
            code: format!("{}{}", subject.as_str(), number.as_str()),
            title: title.as_str().trim().to_string(),
            grade: grade.as_str().to_string(),
        };

        match positions.get(&course.code) {
            Some(&slot) => courses[slot] = course,
            None => {
                positions.insert(course.code.clone(), courses.len());
                courses.push(course);
            }
        }
    }

    courses
}

/// Codes of [`extract_courses`], ready to feed into an audit.
pub fn course_codes(text: &str) -> Vec<String> {
    extract_courses(text)
        .into_iter()
        .map(|course| course.code)
        .collect()
}
