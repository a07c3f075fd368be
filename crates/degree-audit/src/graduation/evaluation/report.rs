use super::super::rules::{EctsBuckets, FacultyRules};
use super::super::spillover::ElectiveCredits;
use serde::{Serialize, Serializer};
use std::fmt;

/// One unmet graduation constraint. Serializes as its human-readable summary.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockingReason {
    LowGpa {
        gpa: f64,
    },
    MissingRequiredCourses(Vec<String>),
    RequiredCourseCount {
        taken: i64,
        required: i64,
    },
    RequiredCredits {
        have: i64,
        required: i64,
    },
    ElectivesMissing(ElectiveCredits),
    /// Only the faculty metrics with a positive shortfall.
    FacultyMissing(Vec<(FacultyMetric, i64)>),
    EctsBucketsMissing(EctsBuckets),
    /// All failing university sub-checks, reported as a single reason.
    UniversityRequirements(Vec<UniversityShortfall>),
    OverallTotalsMissing(OverallCredits),
}

impl BlockingReason {
    pub fn summary(&self) -> String {
        match self {
            BlockingReason::LowGpa { gpa } => format!("GPA {gpa:.2} (< {:.2})", super::MIN_GPA),
            BlockingReason::MissingRequiredCourses(codes) => {
                format!("Missing required courses: {}", codes.join(", "))
            }
            BlockingReason::RequiredCourseCount { taken, required } => {
                format!("Required course count {taken}/{required}")
            }
            BlockingReason::RequiredCredits { have, required } => {
                format!("Required SU credits {have}/{required}")
            }
            BlockingReason::ElectivesMissing(missing) => format!(
                "Electives missing: core {}, area {}, free {}",
                missing.core, missing.area, missing.free
            ),
            BlockingReason::FacultyMissing(metrics) => {
                let parts = metrics
                    .iter()
                    .map(|(metric, gap)| format!("{} {gap}", metric.as_str()))
                    .collect::<Vec<_>>();
                format!("Faculty constraints missing: {}", parts.join(", "))
            }
            BlockingReason::EctsBucketsMissing(missing) => format!(
                "ECTS buckets missing: engineering_ects {:.1}, basic_science_ects {:.1}",
                missing.engineering_ects, missing.basic_science_ects
            ),
            BlockingReason::UniversityRequirements(shortfalls) => shortfalls
                .iter()
                .map(UniversityShortfall::summary)
                .collect::<Vec<_>>()
                .join(" | "),
            BlockingReason::OverallTotalsMissing(missing) => format!(
                "Overall totals missing: su {}, ects {}",
                missing.su, missing.ects
            ),
        }
    }
}

impl fmt::Display for BlockingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl Serialize for BlockingReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacultyMetric {
    Count,
    Math,
    Fens,
    Fass,
    Sbs,
}

impl FacultyMetric {
    pub const fn ordered() -> [Self; 5] {
        [Self::Count, Self::Math, Self::Fens, Self::Fass, Self::Sbs]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Math => "math",
            Self::Fens => "fens",
            Self::Fass => "fass",
            Self::Sbs => "sbs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniversityShortfall {
    Freshman(Vec<String>),
    MustAll(Vec<String>),
    HumanitiesAny(Vec<String>),
    CourseCount(i64),
    Credits(i64),
}

impl UniversityShortfall {
    pub fn summary(&self) -> String {
        match self {
            UniversityShortfall::Freshman(codes) => {
                format!("University freshman missing: {}", codes.join(", "))
            }
            UniversityShortfall::MustAll(codes) => {
                format!("University must_all missing: {}", codes.join(", "))
            }
            UniversityShortfall::HumanitiesAny(codes) => {
                format!("Take at least one of HUM-any: {}", codes.join(", "))
            }
            UniversityShortfall::CourseCount(need) => {
                format!("University course count missing: need {need}")
            }
            UniversityShortfall::Credits(need) => {
                format!("University SU credits missing: need {need}")
            }
        }
    }
}

/// Have / required / missing triad for one report category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown<T> {
    pub have: T,
    pub required: T,
    pub missing: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverallCredits {
    pub su: i64,
    pub ects: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FacultyTally {
    pub count: i64,
    pub math: i64,
    pub fens: i64,
    pub fass: i64,
    pub sbs: i64,
}

impl FacultyTally {
    pub fn get(&self, metric: FacultyMetric) -> i64 {
        match metric {
            FacultyMetric::Count => self.count,
            FacultyMetric::Math => self.math,
            FacultyMetric::Fens => self.fens,
            FacultyMetric::Fass => self.fass,
            FacultyMetric::Sbs => self.sbs,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequiredCoursesSection {
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UniversityCoursesSection {
    pub missing_freshman: Vec<String>,
    pub missing_must: Vec<String>,
    pub missing_hum_any: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElectivesSection {
    /// Spillover-adjusted credit view.
    pub have: ElectiveCredits,
    pub required: ElectiveCredits,
    pub missing: ElectiveCredits,
    pub spillover: bool,
}

/// Faculty requirements keep their `min_*` names while have/missing use metric names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacultySection {
    pub have: FacultyTally,
    pub required: FacultyRules,
    pub missing: FacultyTally,
}

/// Itemized graduation decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionReport {
    pub can_graduate: bool,
    pub blocking_reasons: Vec<BlockingReason>,
    pub required_courses: RequiredCoursesSection,
    pub university_courses: UniversityCoursesSection,
    pub electives: ElectivesSection,
    pub buckets: Breakdown<EctsBuckets>,
    pub faculty: FacultySection,
    pub overall: Breakdown<OverallCredits>,
    pub unknown_codes: Vec<String>,
}

impl DecisionReport {
    pub fn reason_messages(&self) -> Vec<String> {
        self.blocking_reasons
            .iter()
            .map(BlockingReason::summary)
            .collect()
    }

    pub fn summary(&self) -> String {
        if self.can_graduate {
            "eligible to graduate".to_string()
        } else {
            format!("not eligible: {}", self.reason_messages().join("; "))
        }
    }
}
