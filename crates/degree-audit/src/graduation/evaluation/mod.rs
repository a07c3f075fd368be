mod gates;
mod report;

pub use report::{
    BlockingReason, Breakdown, DecisionReport, ElectivesSection, FacultyMetric, FacultySection,
    FacultyTally, OverallCredits, RequiredCoursesSection, UniversityCoursesSection,
    UniversityShortfall,
};

use super::rules::{RuleDocument, SharedUniversityRules};
use super::totals::Totals;
use gates::GateLog;

/// GPA below this blocks graduation.
pub const MIN_GPA: f64 = 2.0;

/// Stateless evaluator that applies a major's rules (and optional university rules)
/// to aggregated totals.
#[derive(Debug, Clone, Default)]
pub struct GraduationEvaluator {
    rules: RuleDocument,
    shared: Option<SharedUniversityRules>,
}

impl GraduationEvaluator {
    pub fn new(rules: RuleDocument, shared: Option<SharedUniversityRules>) -> Self {
        Self { rules, shared }
    }

    pub fn rules(&self) -> &RuleDocument {
        &self.rules
    }

    pub fn shared(&self) -> Option<&SharedUniversityRules> {
        self.shared.as_ref()
    }

    pub fn evaluate(&self, totals: &Totals, gpa: Option<f64>) -> DecisionReport {
        evaluate_against_rules(totals, &self.rules, gpa, self.shared.as_ref())
    }
}

/// Run every gate in order and collect all blocking reasons. Gate order only affects
/// the order of reasons, never the decision.
pub fn evaluate_against_rules(
    totals: &Totals,
    rules: &RuleDocument,
    gpa: Option<f64>,
    shared: Option<&SharedUniversityRules>,
) -> DecisionReport {
    let mut log = GateLog::default();

    gates::check_gpa(gpa, &mut log);
    let required_courses = gates::check_required(totals, rules, &mut log);
    let electives = gates::check_electives(totals, rules, &mut log);
    let faculty = gates::check_faculty(totals, rules, &mut log);
    let buckets = gates::check_buckets(totals, rules, &mut log);
    let university_courses = shared
        .map(|shared| gates::check_university(totals, shared, &mut log))
        .unwrap_or_default();
    let overall = gates::check_overall(totals, rules, &mut log);

    DecisionReport {
        can_graduate: log.reasons.is_empty(),
        blocking_reasons: log.reasons,
        required_courses,
        university_courses,
        electives,
        buckets,
        faculty,
        overall,
        unknown_codes: totals.unknown_codes.clone(),
    }
}
