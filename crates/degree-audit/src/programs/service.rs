use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::directory::catalog_from_entries;
use super::{canonical_major, ProgramRepository, ProgramStoreError};
use crate::graduation::{
    DecisionReport, GraduationAudit, RuleDocument, SharedUniversityRules, Totals,
    TranscriptEvaluation,
};
use crate::transcript;

/// Audit request as accepted over HTTP and assembled by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub major: String,
    #[serde(default)]
    pub taken_courses: Vec<String>,
    #[serde(default)]
    pub gpa: Option<f64>,
    /// Raw transcript text; extracted codes are appended after `taken_courses`.
    #[serde(default)]
    pub transcript: Option<String>,
}

impl AuditRequest {
    pub fn course_codes(&self) -> Vec<String> {
        let mut codes = self.taken_courses.clone();
        if let Some(text) = self.transcript.as_deref() {
            codes.extend(transcript::course_codes(text));
        }
        codes
    }
}

/// Totals and report for one major, flattened into a single JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditOutcome {
    pub major: String,
    pub gpa: Option<f64>,
    pub totals: Totals,
    #[serde(flatten)]
    pub report: DecisionReport,
}

impl AuditOutcome {
    pub fn from_evaluation(
        major: String,
        gpa: Option<f64>,
        evaluation: TranscriptEvaluation,
    ) -> Self {
        Self {
            major,
            gpa,
            totals: evaluation.totals,
            report: evaluation.report,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Program documents supplied inline instead of being read from a repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InlineEvaluationRequest {
    #[serde(default)]
    pub catalog: Vec<Value>,
    #[serde(default)]
    pub rules: Value,
    #[serde(default)]
    pub shared_university: Option<Value>,
    #[serde(default)]
    pub taken_courses: Vec<String>,
    #[serde(default)]
    pub gpa: Option<f64>,
}

impl InlineEvaluationRequest {
    pub fn evaluate(self) -> TranscriptEvaluation {
        let catalog = catalog_from_entries(self.catalog, "request");
        let rules = RuleDocument::from_json_value(self.rules);
        let shared = self
            .shared_university
            .filter(|value| !value.is_null())
            .map(SharedUniversityRules::from_json_value);

        GraduationAudit::new(catalog, rules, shared).evaluate(&self.taken_courses, self.gpa)
    }
}

/// Loads a major's documents and runs the graduation engine against a transcript.
pub struct AuditService<R>
where
    R: ProgramRepository,
{
    repository: Arc<R>,
}

impl<R> AuditService<R>
where
    R: ProgramRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn audit(&self, request: &AuditRequest) -> Result<AuditOutcome, AuditServiceError> {
        let major = canonical_major(&request.major)?;
        let documents = self.repository.load(&major)?;
        let codes = request.course_codes();

        let evaluation = documents.into_audit().evaluate(&codes, request.gpa);

        tracing::info!(
            %major,
            courses = codes.len(),
            can_graduate = evaluation.report.can_graduate,
            blocking = evaluation.report.blocking_reasons.len(),
            "graduation audit completed"
        );

        Ok(AuditOutcome::from_evaluation(major, request.gpa, evaluation))
    }
}

/// Error raised by the audit service.
#[derive(Debug, thiserror::Error)]
pub enum AuditServiceError {
    #[error(transparent)]
    Store(#[from] ProgramStoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graduation::{CatalogRow, ElectiveType, Faculty};
    use crate::programs::ProgramDocuments;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryRepository {
        programs: HashMap<String, ProgramDocuments>,
    }

    impl ProgramRepository for MemoryRepository {
        fn load(&self, major: &str) -> Result<ProgramDocuments, ProgramStoreError> {
            self.programs
                .get(major)
                .cloned()
                .ok_or_else(|| ProgramStoreError::UnknownProgram(major.to_string()))
        }
    }

    fn row(code: &str, credit: i64, el_type: ElectiveType) -> CatalogRow {
        CatalogRow {
            major: "CS".to_string(),
            code: code.to_string(),
            credit,
            engineering_ects: 0.0,
            basic_science_ects: 0.0,
            ects: (credit * 2) as f64,
            el_type,
            faculty: Faculty::Fens,
        }
    }

    fn service() -> AuditService<MemoryRepository> {
        let rules = RuleDocument::from_json_value(json!({
            "required": { "must_all": ["CS201"] },
            "totals": { "min_su": 6 }
        }));
        let documents = ProgramDocuments {
            catalog: vec![
                row("201", 3, ElectiveType::Required),
                row("301", 3, ElectiveType::Core),
            ],
            rules,
            shared_university: None,
        };

        let mut repository = MemoryRepository::default();
        repository.programs.insert("CS".to_string(), documents);
        AuditService::new(Arc::new(repository))
    }

    #[test]
    fn audit_reports_eligible_transcript() {
        let outcome = service()
            .audit(&AuditRequest {
                major: "cs".to_string(),
                taken_courses: vec!["CS201".to_string(), "cs301".to_string()],
                gpa: Some(3.1),
                transcript: None,
            })
            .expect("audit succeeds");

        assert_eq!(outcome.major, "CS");
        assert!(outcome.report.can_graduate);
        assert_eq!(outcome.totals.total_credit, 6);
    }

    #[test]
    fn transcript_codes_follow_explicit_codes() {
        let request = AuditRequest {
            major: "CS".to_string(),
            taken_courses: vec!["CS201".to_string()],
            gpa: None,
            transcript: Some("CS 301 Algorithms UG A- 3.0\n".to_string()),
        };

        assert_eq!(request.course_codes(), vec!["CS201", "CS301"]);

        let outcome = service().audit(&request).expect("audit succeeds");
        assert!(outcome.report.can_graduate);
    }

    #[test]
    fn unknown_major_surfaces_store_error() {
        let err = service()
            .audit(&AuditRequest {
                major: "EE".to_string(),
                ..AuditRequest::default()
            })
            .expect_err("no EE program");

        assert!(matches!(
            err,
            AuditServiceError::Store(ProgramStoreError::UnknownProgram(major)) if major == "EE"
        ));
    }

    #[test]
    fn outcome_flattens_report_sections() {
        let outcome = service()
            .audit(&AuditRequest {
                major: "CS".to_string(),
                taken_courses: vec!["CS999".to_string()],
                gpa: Some(1.5),
                transcript: None,
            })
            .expect("audit succeeds");

        let value: Value =
            serde_json::from_str(&outcome.to_json_pretty().expect("serializes")).expect("json");
        assert_eq!(value["major"], "CS");
        assert_eq!(value["can_graduate"], false);
        assert_eq!(value["blocking_reasons"][0], "GPA 1.50 (< 2.00)");
        assert_eq!(value["unknown_codes"], json!(["CS999"]));
        assert!(value["totals"]["faculty_counts"].is_object());
        assert!(value.get("report").is_none());
    }

    #[test]
    fn inline_documents_are_evaluated_without_a_store() {
        let request: InlineEvaluationRequest = serde_json::from_value(json!({
            "catalog": [
                { "Major": "CS", "Code": "201", "SU_credit": 3, "EL_Type": "required" },
                "not a row"
            ],
            "rules": { "required": { "must_all": ["CS201"] } },
            "shared_university": null,
            "taken_courses": ["CS201"]
        }))
        .expect("request parses");

        let evaluation = request.evaluate();
        assert!(evaluation.report.can_graduate);
        assert_eq!(evaluation.totals.total_required, 3);
    }
}
