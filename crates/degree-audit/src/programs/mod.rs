//! Program documents (catalog, major rules, university rules) and the audit service
//! that runs the graduation engine against them.

mod directory;
pub mod router;
pub mod service;

pub use directory::DirectoryProgramRepository;
pub use router::{audit_router, TranscriptParseRequest, TranscriptParseResponse};
pub use service::{
    AuditOutcome, AuditRequest, AuditService, AuditServiceError, InlineEvaluationRequest,
};

use crate::graduation::{CatalogRow, GraduationAudit, RuleDocument, SharedUniversityRules};
use std::path::PathBuf;

/// Everything needed to audit one major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramDocuments {
    pub catalog: Vec<CatalogRow>,
    pub rules: RuleDocument,
    pub shared_university: Option<SharedUniversityRules>,
}

impl ProgramDocuments {
    pub fn into_audit(self) -> GraduationAudit {
        GraduationAudit::new(self.catalog, self.rules, self.shared_university)
    }
}

/// Source of program documents, keyed by major code.
pub trait ProgramRepository: Send + Sync {
    fn load(&self, major: &str) -> Result<ProgramDocuments, ProgramStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProgramStoreError {
    #[error("major code must be non-empty ASCII letters or digits, got '{0}'")]
    InvalidMajor(String),
    #[error("no catalog found for major '{0}'")]
    UnknownProgram(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Validate a major code and return its canonical upper-case form.
pub fn canonical_major(major: &str) -> Result<String, ProgramStoreError> {
    let trimmed = major.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return Err(ProgramStoreError::InvalidMajor(major.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}
