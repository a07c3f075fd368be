use chrono::{DateTime, Utc};
use degree_audit::config::AppConfig;
use degree_audit::error::AppError;
use degree_audit::programs::{AuditOutcome, AuditService, DirectoryProgramRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Audit outcome stamped with the time it was produced.
#[derive(Debug, Serialize)]
pub(crate) struct AuditEnvelope<'a> {
    pub(crate) evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub(crate) outcome: &'a AuditOutcome,
}

impl<'a> AuditEnvelope<'a> {
    pub(crate) fn now(outcome: &'a AuditOutcome) -> Self {
        Self {
            evaluated_at: Utc::now(),
            outcome,
        }
    }
}

/// Data root from the flag when given, otherwise from `DEGREE_DATA_DIR`.
pub(crate) fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match flag {
        Some(path) => Ok(path),
        None => Ok(AppConfig::load()?.data.root),
    }
}

pub(crate) fn directory_audit_service(root: PathBuf) -> AuditService<DirectoryProgramRepository> {
    AuditService::new(Arc::new(DirectoryProgramRepository::new(root)))
}

/// Course codes separated by whitespace or commas; `#` starts a comment.
pub(crate) fn parse_course_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(|ch: char| ch == ',' || ch.is_whitespace()))
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn read_course_list(path: &Path) -> Result<Vec<String>, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(parse_course_list(&raw))
}
