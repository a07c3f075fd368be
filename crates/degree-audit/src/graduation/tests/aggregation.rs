use super::common::*;
use crate::graduation::catalog::{ElectiveType, Faculty};
use crate::graduation::totals::aggregate;
use std::collections::BTreeSet;

#[test]
fn single_core_course_is_credited_and_keyed() {
    let catalog = vec![course("CS", "201", 3, ElectiveType::Core, Faculty::Fens)];

    let totals = aggregate(&["cs201"], &catalog);

    assert_eq!(totals.total_core, 3);
    assert_eq!(totals.total_credit, 3);
    assert_eq!(totals.total_ects, 6.0);
    assert_eq!(
        totals.taken_keys,
        BTreeSet::from(["CS201".to_string()])
    );
    assert!(totals.unknown_codes.is_empty());
}

#[test]
fn codes_are_trimmed_and_case_folded() {
    let totals = aggregate(&["  Math101 ", "cs308"], &cs_catalog());

    assert!(totals.has_taken("MATH101"));
    assert!(totals.has_taken("cs308 "));
    assert_eq!(totals.total_required, 7);
    assert!(totals.unknown_codes.is_empty());
}

#[test]
fn unknown_codes_change_nothing_but_the_unknown_list() {
    let catalog = cs_catalog();
    let baseline = aggregate(&["CS201", "HUM201"], &catalog);
    let with_unknown = aggregate(&["CS201", " xyz999", "HUM201"], &catalog);

    assert_eq!(with_unknown.unknown_codes, vec![" xyz999".to_string()]);

    let mut stripped = with_unknown.clone();
    stripped.unknown_codes.clear();
    assert_eq!(stripped, baseline);
}

#[test]
fn category_buckets_sum_to_recognized_credit() {
    let catalog = cs_catalog();
    let taken: Vec<String> = catalog
        .iter()
        .map(|row| format!("{}{}", row.major, row.code))
        .collect();

    let totals = aggregate(&taken, &catalog);

    let recognized: i64 = catalog
        .iter()
        .filter(|row| row.el_type != ElectiveType::Unrecognized)
        .map(|row| row.credit)
        .sum();
    let bucket_sum: i64 = ElectiveType::recognized()
        .iter()
        .map(|kind| totals.category_credit(*kind))
        .sum();

    assert_eq!(bucket_sum, recognized);
    assert_eq!(
        totals.total_credit,
        catalog.iter().map(|row| row.credit).sum::<i64>()
    );
}

#[test]
fn unrecognized_type_counts_toward_grand_totals_only() {
    let mut catalog = cs_catalog();
    catalog.push(course("CS", "499", 5, ElectiveType::Unrecognized, Faculty::Fens));

    let totals = aggregate(&["CS499"], &catalog);

    assert_eq!(totals.total_credit, 5);
    assert_eq!(totals.total_ects, 10.0);
    assert!(ElectiveType::recognized()
        .iter()
        .all(|kind| totals.category_credit(*kind) == 0));
    assert_eq!(totals.faculty_counts.fens, 1);
}

#[test]
fn university_courses_are_counted_and_credited() {
    let totals = aggregate(&["NS101", "HIST191", "PROJ201"], &cs_catalog());

    assert_eq!(totals.total_university, 7);
    assert_eq!(totals.total_university_count, 3);
}

#[test]
fn faculties_and_math_majors_are_tallied() {
    let totals = aggregate(
        &["MATH101", "MAT204", "HUM201", "ORG301", "PROJ201", "LAB001"],
        &cs_catalog(),
    );

    assert_eq!(totals.faculty_counts.fens, 2);
    assert_eq!(totals.faculty_counts.fass, 1);
    assert_eq!(totals.faculty_counts.sbs, 1);
    assert_eq!(totals.faculty_counts.other, 2);
    assert_eq!(totals.faculty_counts.total(), 6);
    assert_eq!(totals.math_count, 2);
}

#[test]
fn ects_buckets_accumulate_per_course() {
    let totals = aggregate(&["CS201", "CS308", "MATH101", "NS101"], &cs_catalog());

    assert_eq!(totals.total_engineering_ects, 14.0);
    assert_eq!(totals.total_science_ects, 14.0);
    assert_eq!(totals.total_ects, 28.0);
}

#[test]
fn repeated_codes_accumulate_credit_but_key_once() {
    let totals = aggregate(&["CS201", "cs201"], &cs_catalog());

    assert_eq!(totals.total_core, 6);
    assert_eq!(totals.taken_keys.len(), 1);
}

#[test]
fn each_call_builds_fresh_totals() {
    let catalog = cs_catalog();
    let first = aggregate(&["CS201", "nope"], &catalog);
    let second = aggregate(&["CS204"], &catalog);

    assert_eq!(first.total_core, 3);
    assert_eq!(second.total_core, 0);
    assert!(second.unknown_codes.is_empty());
    assert!(!second.has_taken("CS201"));
}
