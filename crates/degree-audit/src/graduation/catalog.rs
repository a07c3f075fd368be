use super::coercion::{coerce_string, lenient_f64, lenient_i64, lenient_string};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// Elective category a catalog course credits toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElectiveType {
    Free,
    Area,
    Core,
    University,
    Required,
    /// Blank or unknown `el_type`; counts toward grand totals only.
    #[default]
    Unrecognized,
}

impl ElectiveType {
    pub const fn recognized() -> [Self; 5] {
        [
            Self::Free,
            Self::Area,
            Self::Core,
            Self::University,
            Self::Required,
        ]
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "free" => Self::Free,
            "area" => Self::Area,
            "core" => Self::Core,
            "university" => Self::University,
            "required" => Self::Required,
            _ => Self::Unrecognized,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Area => "area",
            Self::Core => "core",
            Self::University => "university",
            Self::Required => "required",
            Self::Unrecognized => "",
        }
    }
}

impl Serialize for ElectiveType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElectiveType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::parse(&coerce_string(&value)))
    }
}

/// Faculty offering a course; anything outside the three named faculties is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Faculty {
    Fens,
    Fass,
    Sbs,
    #[default]
    Other,
}

impl Faculty {
    pub const fn ordered() -> [Self; 4] {
        [Self::Fens, Self::Fass, Self::Sbs, Self::Other]
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FENS" => Self::Fens,
            "FASS" => Self::Fass,
            "SBS" => Self::Sbs,
            _ => Self::Other,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fens => "FENS",
            Self::Fass => "FASS",
            Self::Sbs => "SBS",
            Self::Other => "OTHER",
        }
    }
}

impl Serialize for Faculty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Faculty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::parse(&coerce_string(&value)))
    }
}

/// One offered course. Accepts both snake_case fields and the registrar export columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    #[serde(alias = "Major", default, deserialize_with = "lenient_string")]
    pub major: String,
    #[serde(alias = "Code", default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(alias = "SU_credit", default, deserialize_with = "lenient_i64")]
    pub credit: i64,
    #[serde(alias = "Engineering", default, deserialize_with = "lenient_f64")]
    pub engineering_ects: f64,
    #[serde(alias = "Basic_Science", default, deserialize_with = "lenient_f64")]
    pub basic_science_ects: f64,
    #[serde(alias = "ECTS", default, deserialize_with = "lenient_f64")]
    pub ects: f64,
    #[serde(alias = "EL_Type", default)]
    pub el_type: ElectiveType,
    #[serde(alias = "Faculty", default)]
    pub faculty: Faculty,
}

impl CatalogRow {
    /// Lookup key `MAJOR ++ CODE`; rows with a blank major or code are not indexable.
    pub fn key(&self) -> Option<String> {
        let major = normalize_code(&self.major);
        let code = normalize_code(&self.code);
        if major.is_empty() || code.is_empty() {
            return None;
        }
        Some(format!("{major}{code}"))
    }

    pub fn is_math(&self) -> bool {
        matches!(normalize_code(&self.major).as_str(), "MATH" | "MAT")
    }
}

/// Trim and upper-case a course code or major for catalog matching.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Read-only lookup over a catalog, either borrowed for one call or owned for reuse.
/// Later rows win on duplicate keys.
#[derive(Debug, Clone)]
pub struct CatalogIndex<'a> {
    rows: Cow<'a, [CatalogRow]>,
    positions: HashMap<String, usize>,
}

impl<'a> CatalogIndex<'a> {
    pub fn build(catalog: &'a [CatalogRow]) -> Self {
        Self::index(Cow::Borrowed(catalog))
    }

    pub fn from_rows(catalog: Vec<CatalogRow>) -> CatalogIndex<'static> {
        CatalogIndex::index(Cow::Owned(catalog))
    }

    fn index(rows: Cow<'a, [CatalogRow]>) -> Self {
        let mut positions = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            if let Some(key) = row.key() {
                positions.insert(key, position);
            }
        }
        Self { rows, positions }
    }

    /// `key` must already be normalized (see [`normalize_code`]).
    pub fn get(&self, key: &str) -> Option<&CatalogRow> {
        self.positions
            .get(key)
            .and_then(|position| self.rows.get(*position))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(major: &str, code: &str, credit: i64) -> CatalogRow {
        CatalogRow {
            major: major.to_string(),
            code: code.to_string(),
            credit,
            engineering_ects: 0.0,
            basic_science_ects: 0.0,
            ects: 0.0,
            el_type: ElectiveType::Unrecognized,
            faculty: Faculty::Other,
        }
    }

    #[test]
    fn index_keys_are_normalized_concatenations() {
        let catalog = vec![row(" cs", "201 ", 3), row("math", "101", 4)];
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("CS201").map(|row| row.credit), Some(3));
        assert_eq!(index.get("MATH101").map(|row| row.credit), Some(4));
        assert!(index.get("cs201").is_none());
    }

    #[test]
    fn later_rows_win_on_duplicate_keys() {
        let catalog = vec![row("CS", "201", 3), row("cs", "201", 4)];
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("CS201").map(|row| row.credit), Some(4));
    }

    #[test]
    fn rows_with_blank_major_or_code_are_skipped() {
        let catalog = vec![row("", "201", 3), row("CS", "  ", 3)];
        assert!(CatalogIndex::build(&catalog).is_empty());
    }

    #[test]
    fn registrar_columns_deserialize_with_lenient_values() {
        let parsed: CatalogRow = serde_json::from_value(json!({
            "Major": "CS",
            "Code": 301,
            "SU_credit": "3",
            "Engineering": "4,5",
            "Basic_Science": null,
            "ECTS": 6,
            "EL_Type": " Core ",
            "Faculty": "fens",
            "Name": "Algorithms"
        }))
        .expect("row parses");

        assert_eq!(parsed.key().as_deref(), Some("CS301"));
        assert_eq!(parsed.credit, 3);
        assert_eq!(parsed.engineering_ects, 4.5);
        assert_eq!(parsed.basic_science_ects, 0.0);
        assert_eq!(parsed.el_type, ElectiveType::Core);
        assert_eq!(parsed.faculty, Faculty::Fens);
    }

    #[test]
    fn unknown_categories_fall_into_catch_all_arms() {
        assert_eq!(ElectiveType::parse("capstone"), ElectiveType::Unrecognized);
        assert_eq!(ElectiveType::parse(""), ElectiveType::Unrecognized);
        assert_eq!(Faculty::parse("school of languages"), Faculty::Other);
        assert!(ElectiveType::recognized()
            .iter()
            .all(|kind| ElectiveType::parse(kind.as_str()) == *kind));
    }

    #[test]
    fn math_majors_are_detected() {
        assert!(row(" math ", "101", 3).is_math());
        assert!(row("MAT", "204", 3).is_math());
        assert!(!row("MATHS", "101", 3).is_math());
    }
}
