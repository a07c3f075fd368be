use super::catalog::{normalize_code, CatalogIndex, CatalogRow, ElectiveType, Faculty};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Courses matched per faculty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct FacultyCounts {
    pub fens: i64,
    pub fass: i64,
    pub sbs: i64,
    pub other: i64,
}

impl FacultyCounts {
    pub fn get(&self, faculty: Faculty) -> i64 {
        match faculty {
            Faculty::Fens => self.fens,
            Faculty::Fass => self.fass,
            Faculty::Sbs => self.sbs,
            Faculty::Other => self.other,
        }
    }

    fn record(&mut self, faculty: Faculty) {
        match faculty {
            Faculty::Fens => self.fens += 1,
            Faculty::Fass => self.fass += 1,
            Faculty::Sbs => self.sbs += 1,
            Faculty::Other => self.other += 1,
        }
    }

    pub fn total(&self) -> i64 {
        Faculty::ordered().iter().map(|faculty| self.get(*faculty)).sum()
    }
}

/// Per-transcript aggregate. Built fresh by [`aggregate`]; never shared between audits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_credit: i64,
    pub total_core: i64,
    pub total_area: i64,
    pub total_free: i64,
    pub total_university: i64,
    pub total_university_count: i64,
    pub total_required: i64,
    pub total_engineering_ects: f64,
    pub total_science_ects: f64,
    pub total_ects: f64,
    pub faculty_counts: FacultyCounts,
    pub math_count: i64,
    pub taken_keys: BTreeSet<String>,
    pub unknown_codes: Vec<String>,
}

impl Totals {
    /// Credit summed into one of the five recognized categories.
    pub fn category_credit(&self, kind: ElectiveType) -> i64 {
        match kind {
            ElectiveType::Free => self.total_free,
            ElectiveType::Area => self.total_area,
            ElectiveType::Core => self.total_core,
            ElectiveType::University => self.total_university,
            ElectiveType::Required => self.total_required,
            ElectiveType::Unrecognized => 0,
        }
    }

    /// Membership test against matched courses; `code` is normalized first.
    pub fn has_taken(&self, code: &str) -> bool {
        self.taken_keys.contains(&normalize_code(code))
    }

    fn add_course(&mut self, key: String, row: &CatalogRow) {
        let credit = row.credit;

        self.total_credit = self.total_credit.saturating_add(credit);
        self.total_engineering_ects += row.engineering_ects;
        self.total_science_ects += row.basic_science_ects;
        self.total_ects += row.ects;

        match row.el_type {
            ElectiveType::Free => self.total_free = self.total_free.saturating_add(credit),
            ElectiveType::Area => self.total_area = self.total_area.saturating_add(credit),
            ElectiveType::Core => self.total_core = self.total_core.saturating_add(credit),
            ElectiveType::University => {
                self.total_university = self.total_university.saturating_add(credit);
                self.total_university_count += 1;
            }
            ElectiveType::Required => {
                self.total_required = self.total_required.saturating_add(credit);
            }
            ElectiveType::Unrecognized => {}
        }

        self.faculty_counts.record(row.faculty);

        if row.is_math() {
            self.math_count += 1;
        }

        self.taken_keys.insert(key);
    }
}

/// Aggregate taken course codes against a catalog, indexing it for this call only.
pub fn aggregate<S: AsRef<str>>(taken_codes: &[S], catalog: &[CatalogRow]) -> Totals {
    let index = CatalogIndex::build(catalog);
    aggregate_indexed(taken_codes, &index)
}

/// Aggregate against a prebuilt index. Unmatched codes are kept verbatim in
/// `unknown_codes` and excluded from every sum.
pub fn aggregate_indexed<S: AsRef<str>>(taken_codes: &[S], index: &CatalogIndex<'_>) -> Totals {
    let mut totals = Totals::default();

    for raw_code in taken_codes {
        let raw_code = raw_code.as_ref();
        let key = normalize_code(raw_code);
        match index.get(&key) {
            Some(row) => totals.add_course(key, row),
            None => {
                tracing::debug!(code = raw_code, "course code not found in catalog");
                totals.unknown_codes.push(raw_code.to_string());
            }
        }
    }

    totals
}
