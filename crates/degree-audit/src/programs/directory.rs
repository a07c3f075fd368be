use super::{canonical_major, ProgramDocuments, ProgramRepository, ProgramStoreError};
use crate::graduation::{CatalogRow, RuleDocument, SharedUniversityRules};
use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const SHARED_RULES_FILE: &str = "shared_university_rule.json";

/// Filesystem layout:
///
/// ```text
/// <root>/catalog/<MAJOR>.json   (or <MAJOR>.csv)
/// <root>/rules/<major>_rule.json
/// <root>/rules/shared_university_rule.json   (optional)
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryProgramRepository {
    root: PathBuf,
}

impl DirectoryProgramRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_catalog(&self, major: &str) -> Result<Vec<CatalogRow>, ProgramStoreError> {
        let catalog_dir = self.root.join("catalog");
        let json_path = catalog_dir.join(format!("{major}.json"));
        if json_path.is_file() {
            return read_json(&json_path).and_then(|value| catalog_from_json(&json_path, value));
        }

        let csv_path = catalog_dir.join(format!("{major}.csv"));
        if csv_path.is_file() {
            let file = fs::File::open(&csv_path).map_err(|source| ProgramStoreError::Io {
                path: csv_path.clone(),
                source,
            })?;
            return catalog_from_csv(file).map_err(|source| ProgramStoreError::Csv {
                path: csv_path,
                source,
            });
        }

        Err(ProgramStoreError::UnknownProgram(major.to_string()))
    }
}

impl ProgramRepository for DirectoryProgramRepository {
    fn load(&self, major: &str) -> Result<ProgramDocuments, ProgramStoreError> {
        let major = canonical_major(major)?;
        let catalog = self.load_catalog(&major)?;

        let rules_dir = self.root.join("rules");
        let rules_path = rules_dir.join(format!("{}_rule.json", major.to_ascii_lowercase()));
        let rules = RuleDocument::from_json_value(read_json(&rules_path)?);

        let shared_path = rules_dir.join(SHARED_RULES_FILE);
        let shared_university = if shared_path.is_file() {
            let value = read_json(&shared_path)?;
            Some(SharedUniversityRules::from_json_value(value))
        } else {
            None
        };

        tracing::debug!(
            %major,
            rows = catalog.len(),
            shared = shared_university.is_some(),
            "loaded program documents"
        );

        Ok(ProgramDocuments {
            catalog,
            rules,
            shared_university,
        })
    }
}

fn read_json(path: &Path) -> Result<Value, ProgramStoreError> {
    let raw = fs::read(path).map_err(|source| ProgramStoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| ProgramStoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// The document must be a list.
fn catalog_from_json(path: &Path, value: Value) -> Result<Vec<CatalogRow>, ProgramStoreError> {
    let entries: Vec<Value> =
        serde_json::from_value(value).map_err(|source| ProgramStoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(catalog_from_entries(entries, &path.display().to_string()))
}

/// Parse catalog entries one by one; entries that are not rows are logged and skipped.
pub(crate) fn catalog_from_entries(entries: Vec<Value>, source: &str) -> Vec<CatalogRow> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<CatalogRow>(entry) {
            Ok(row) => Some(row),
            Err(err) => {
                tracing::warn!(%source, %err, "skipping catalog entry");
                None
            }
        })
        .collect()
}

/// CSV cells are handed to the row parser as text so codes such as `0201` keep their
/// leading zeros; numeric columns go through the usual coercion.
pub(crate) fn catalog_from_csv<R: Read>(reader: R) -> Result<Vec<CatalogRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let fields: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();

        match serde_json::from_value::<CatalogRow>(Value::Object(fields)) {
            Ok(row) => rows.push(row),
            Err(err) => {
                let position = record.position().map(|pos| pos.line()).unwrap_or_default();
                tracing::warn!(line = position, %err, "skipping catalog record");
            }
        }
    }

    Ok(rows)
}
