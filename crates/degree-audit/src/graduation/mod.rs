//! Graduation rule engine.
//!
//! Data flows one way: taken course codes and a catalog produce [`Totals`], which are
//! checked against a [`RuleDocument`] (plus optional [`SharedUniversityRules`] and GPA)
//! to yield a [`DecisionReport`]. Nothing here performs I/O or keeps state between calls.

pub mod catalog;
pub mod coercion;
pub mod evaluation;
pub mod rules;
pub mod spillover;
pub mod totals;

#[cfg(test)]
mod tests;

pub use catalog::{normalize_code, CatalogIndex, CatalogRow, ElectiveType, Faculty};
pub use evaluation::{
    evaluate_against_rules, BlockingReason, DecisionReport, GraduationEvaluator, MIN_GPA,
};
pub use rules::{RuleDocument, SharedUniversityRules};
pub use spillover::{ElectiveCredits, SpilloverResolution, SpilloverThresholds};
pub use totals::{aggregate, aggregate_indexed, FacultyCounts, Totals};

use serde::Serialize;

/// Totals and decision for one transcript. Serializes as the report's fields plus `totals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEvaluation {
    pub totals: Totals,
    #[serde(flatten)]
    pub report: DecisionReport,
}

/// One program's catalog and rules, indexed once and reusable across transcripts.
#[derive(Debug, Clone)]
pub struct GraduationAudit {
    index: CatalogIndex<'static>,
    evaluator: GraduationEvaluator,
}

impl GraduationAudit {
    pub fn new(
        catalog: Vec<CatalogRow>,
        rules: RuleDocument,
        shared: Option<SharedUniversityRules>,
    ) -> Self {
        Self {
            index: CatalogIndex::from_rows(catalog),
            evaluator: GraduationEvaluator::new(rules, shared),
        }
    }

    pub fn catalog(&self) -> &[CatalogRow] {
        self.index.rows()
    }

    pub fn evaluator(&self) -> &GraduationEvaluator {
        &self.evaluator
    }

    pub fn evaluate<S: AsRef<str>>(
        &self,
        taken_codes: &[S],
        gpa: Option<f64>,
    ) -> TranscriptEvaluation {
        let totals = aggregate_indexed(taken_codes, &self.index);
        let report = self.evaluator.evaluate(&totals, gpa);
        TranscriptEvaluation { totals, report }
    }
}
