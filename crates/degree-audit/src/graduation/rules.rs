//! Declarative graduation policy documents.
//!
//! Every section and field is optional. Absent or malformed values fall back to zero or
//! empty, which disables the corresponding gate rather than rejecting the document.

use super::coercion::{
    lenient_bool, lenient_code_list, lenient_f64, lenient_i64, lenient_i64_or, lenient_section,
};
use super::spillover::{
    ElectiveCredits, SpilloverThresholds, AREA_MIN_FOR_SPILLOVER, CORE_MIN_FOR_SPILLOVER,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Major-specific rule document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleDocument {
    #[serde(deserialize_with = "lenient_section")]
    pub required: RequiredRules,
    #[serde(deserialize_with = "lenient_section")]
    pub electives: ElectiveRules,
    #[serde(deserialize_with = "lenient_section")]
    pub faculty: FacultyRules,
    #[serde(deserialize_with = "lenient_section")]
    pub buckets: EctsBuckets,
    #[serde(deserialize_with = "lenient_section")]
    pub totals: OverallRules,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredRules {
    #[serde(deserialize_with = "lenient_code_list")]
    pub must_all: Vec<String>,
    #[serde(deserialize_with = "lenient_section")]
    pub totals: CourseTotals,
}

/// Course-count and credit minimums shared by the required and university sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseTotals {
    #[serde(deserialize_with = "lenient_i64")]
    pub min_courses: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub min_su: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectiveRules {
    #[serde(deserialize_with = "lenient_i64")]
    pub core_su: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub area_su: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub free_su: i64,
    #[serde(deserialize_with = "lenient_bool")]
    pub spillover: bool,
    #[serde(deserialize_with = "core_spillover_threshold")]
    pub core_min_for_spillover: i64,
    #[serde(deserialize_with = "area_spillover_threshold")]
    pub area_min_for_spillover: i64,
}

fn core_spillover_threshold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_i64_or(deserializer, CORE_MIN_FOR_SPILLOVER)
}

fn area_spillover_threshold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_i64_or(deserializer, AREA_MIN_FOR_SPILLOVER)
}

impl Default for ElectiveRules {
    fn default() -> Self {
        Self {
            core_su: 0,
            area_su: 0,
            free_su: 0,
            spillover: false,
            core_min_for_spillover: CORE_MIN_FOR_SPILLOVER,
            area_min_for_spillover: AREA_MIN_FOR_SPILLOVER,
        }
    }
}

impl ElectiveRules {
    pub fn required(&self) -> ElectiveCredits {
        ElectiveCredits::new(self.core_su, self.area_su, self.free_su)
    }

    pub fn thresholds(&self) -> SpilloverThresholds {
        SpilloverThresholds {
            core_min: self.core_min_for_spillover,
            area_min: self.area_min_for_spillover,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacultyRules {
    #[serde(deserialize_with = "lenient_i64")]
    pub min_count: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub min_math: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub min_fens: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub min_fass: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub min_sbs: i64,
}

/// Engineering and basic-science ECTS amounts; used for minimums and report figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EctsBuckets {
    #[serde(deserialize_with = "lenient_f64")]
    pub engineering_ects: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub basic_science_ects: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallRules {
    #[serde(deserialize_with = "lenient_i64")]
    pub min_su: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub min_ects: i64,
}

/// University-wide requirements applied on top of every major's rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedUniversityRules {
    #[serde(deserialize_with = "lenient_code_list")]
    pub freshman_all: Vec<String>,
    #[serde(deserialize_with = "lenient_code_list")]
    pub must_all: Vec<String>,
    /// At least one of these must be taken.
    #[serde(deserialize_with = "lenient_code_list")]
    pub hum_any: Vec<String>,
    #[serde(deserialize_with = "lenient_section")]
    pub totals: CourseTotals,
}

impl RuleDocument {
    /// Build from an already-parsed document; anything but a mapping yields the empty policy.
    pub fn from_json_value(value: Value) -> Self {
        from_document(value)
    }
}

impl SharedUniversityRules {
    pub fn from_json_value(value: Value) -> Self {
        from_document(value)
    }
}

fn from_document<T: DeserializeOwned + Default>(value: Value) -> T {
    if !value.is_object() {
        return T::default();
    }
    serde_json::from_value(value).unwrap_or_default()
}
