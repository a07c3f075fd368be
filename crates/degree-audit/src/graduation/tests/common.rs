use serde_json::json;

use crate::graduation::catalog::{CatalogRow, ElectiveType, Faculty};
use crate::graduation::rules::{RuleDocument, SharedUniversityRules};

pub(super) fn course(
    major: &str,
    code: &str,
    credit: i64,
    el_type: ElectiveType,
    faculty: Faculty,
) -> CatalogRow {
    CatalogRow {
        major: major.to_string(),
        code: code.to_string(),
        credit,
        engineering_ects: 0.0,
        basic_science_ects: 0.0,
        ects: (credit * 2) as f64,
        el_type,
        faculty,
    }
}

pub(super) fn with_ects(mut row: CatalogRow, engineering: f64, basic_science: f64) -> CatalogRow {
    row.engineering_ects = engineering;
    row.basic_science_ects = basic_science;
    row
}

/// Small computer science catalog covering every category and faculty.
pub(super) fn cs_catalog() -> Vec<CatalogRow> {
    vec![
        with_ects(
            course("CS", "201", 3, ElectiveType::Core, Faculty::Fens),
            6.0,
            0.0,
        ),
        with_ects(
            course("CS", "204", 3, ElectiveType::Required, Faculty::Fens),
            6.0,
            0.0,
        ),
        with_ects(
            course("CS", "308", 4, ElectiveType::Required, Faculty::Fens),
            8.0,
            0.0,
        ),
        course("CS", "395", 1, ElectiveType::Required, Faculty::Fens),
        with_ects(
            course("CS", "412", 3, ElectiveType::Core, Faculty::Fens),
            6.0,
            0.0,
        ),
        with_ects(
            course("MATH", "101", 3, ElectiveType::Required, Faculty::Fens),
            0.0,
            6.0,
        ),
        with_ects(
            course("MAT", "204", 3, ElectiveType::Area, Faculty::Fens),
            0.0,
            6.0,
        ),
        with_ects(
            course("NS", "101", 4, ElectiveType::University, Faculty::Fens),
            0.0,
            8.0,
        ),
        course("HIST", "191", 2, ElectiveType::University, Faculty::Fass),
        course("HUM", "201", 3, ElectiveType::University, Faculty::Fass),
        course("SPS", "101", 3, ElectiveType::University, Faculty::Fass),
        course("PROJ", "201", 1, ElectiveType::University, Faculty::Other),
        course("ECON", "201", 3, ElectiveType::Free, Faculty::Fass),
        course("ORG", "301", 3, ElectiveType::Area, Faculty::Sbs),
        course("LAB", "001", 0, ElectiveType::Unrecognized, Faculty::Other),
    ]
}

pub(super) fn rules_from(value: serde_json::Value) -> RuleDocument {
    serde_json::from_value(value).expect("rule document parses")
}

pub(super) fn shared_rules() -> SharedUniversityRules {
    serde_json::from_value(json!({
        "freshman_all": ["NS101", "SPS101"],
        "must_all": ["PROJ201"],
        "hum_any": ["HUM201", "HUM202"],
        "totals": { "min_courses": 3, "min_su": 8 }
    }))
    .expect("shared rules parse")
}

pub(super) fn codes(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
