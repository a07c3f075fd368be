use super::super::rules::{CourseTotals, EctsBuckets, RuleDocument, SharedUniversityRules};
use super::super::spillover::{self, ElectiveCredits};
use super::super::totals::Totals;
use super::report::{
    BlockingReason, Breakdown, ElectivesSection, FacultyMetric, FacultySection, FacultyTally,
    OverallCredits, RequiredCoursesSection, UniversityCoursesSection, UniversityShortfall,
};
use super::MIN_GPA;

/// Accumulates blocking reasons; every gate appends, none short-circuits.
#[derive(Debug, Default)]
pub(crate) struct GateLog {
    pub reasons: Vec<BlockingReason>,
}

impl GateLog {
    fn block(&mut self, gate: &'static str, reason: BlockingReason) {
        tracing::debug!(gate, reason = %reason, "graduation gate failed");
        self.reasons.push(reason);
    }
}

fn missing_codes(codes: &[String], totals: &Totals) -> Vec<String> {
    codes
        .iter()
        .filter(|code| !totals.has_taken(code))
        .cloned()
        .collect()
}

pub(crate) fn check_gpa(gpa: Option<f64>, log: &mut GateLog) {
    if let Some(gpa) = gpa {
        if gpa < MIN_GPA {
            log.block("gpa", BlockingReason::LowGpa { gpa });
        }
    }
}

pub(crate) fn check_required(
    totals: &Totals,
    rules: &RuleDocument,
    log: &mut GateLog,
) -> RequiredCoursesSection {
    let must_all = &rules.required.must_all;
    let missing = missing_codes(must_all, totals);
    if !missing.is_empty() {
        log.block(
            "required",
            BlockingReason::MissingRequiredCourses(missing.clone()),
        );
    }

    let CourseTotals {
        min_courses,
        min_su,
    } = rules.required.totals;
    let taken = (must_all.len() - missing.len()) as i64;
    if min_courses > 0 && taken < min_courses {
        log.block(
            "required",
            BlockingReason::RequiredCourseCount {
                taken,
                required: min_courses,
            },
        );
    }
    if min_su > 0 && totals.total_required < min_su {
        log.block(
            "required",
            BlockingReason::RequiredCredits {
                have: totals.total_required,
                required: min_su,
            },
        );
    }

    RequiredCoursesSection { missing }
}

pub(crate) fn check_electives(
    totals: &Totals,
    rules: &RuleDocument,
    log: &mut GateLog,
) -> ElectivesSection {
    let electives = &rules.electives;
    let required = electives.required();
    let have = ElectiveCredits::new(totals.total_core, totals.total_area, totals.total_free);
    let raw_missing = ElectiveCredits::shortfall(required, have);

    let resolution = spillover::resolve(
        have,
        raw_missing,
        electives.spillover,
        electives.thresholds(),
    );

    if resolution.missing.total() > 0 {
        log.block(
            "electives",
            BlockingReason::ElectivesMissing(resolution.missing),
        );
    }

    ElectivesSection {
        have: resolution.effective_have,
        required,
        missing: resolution.missing,
        spillover: electives.spillover,
    }
}

pub(crate) fn check_faculty(
    totals: &Totals,
    rules: &RuleDocument,
    log: &mut GateLog,
) -> FacultySection {
    let required = rules.faculty;
    let counts = &totals.faculty_counts;
    let have = FacultyTally {
        count: counts.total(),
        math: totals.math_count,
        fens: counts.fens,
        fass: counts.fass,
        sbs: counts.sbs,
    };
    let missing = FacultyTally {
        count: required.min_count.saturating_sub(have.count).max(0),
        math: required.min_math.saturating_sub(have.math).max(0),
        fens: required.min_fens.saturating_sub(have.fens).max(0),
        fass: required.min_fass.saturating_sub(have.fass).max(0),
        sbs: required.min_sbs.saturating_sub(have.sbs).max(0),
    };

    let gaps = FacultyMetric::ordered()
        .into_iter()
        .map(|metric| (metric, missing.get(metric)))
        .filter(|(_, gap)| *gap > 0)
        .collect::<Vec<_>>();
    if !gaps.is_empty() {
        log.block("faculty", BlockingReason::FacultyMissing(gaps));
    }

    FacultySection {
        have,
        required,
        missing,
    }
}

pub(crate) fn check_buckets(
    totals: &Totals,
    rules: &RuleDocument,
    log: &mut GateLog,
) -> Breakdown<EctsBuckets> {
    let required = rules.buckets;
    let have = EctsBuckets {
        engineering_ects: totals.total_engineering_ects,
        basic_science_ects: totals.total_science_ects,
    };
    let missing = EctsBuckets {
        engineering_ects: (required.engineering_ects - have.engineering_ects).max(0.0),
        basic_science_ects: (required.basic_science_ects - have.basic_science_ects).max(0.0),
    };

    if missing.engineering_ects > 0.0 || missing.basic_science_ects > 0.0 {
        log.block("buckets", BlockingReason::EctsBucketsMissing(missing));
    }

    Breakdown {
        have,
        required,
        missing,
    }
}

pub(crate) fn check_university(
    totals: &Totals,
    shared: &SharedUniversityRules,
    log: &mut GateLog,
) -> UniversityCoursesSection {
    let missing_freshman = missing_codes(&shared.freshman_all, totals);
    let missing_must = missing_codes(&shared.must_all, totals);
    let hum_any_taken = shared.hum_any.iter().any(|code| totals.has_taken(code));
    let missing_hum_any = if hum_any_taken {
        Vec::new()
    } else {
        shared.hum_any.clone()
    };

    let need_courses = shared
        .totals
        .min_courses
        .saturating_sub(totals.total_university_count)
        .max(0);
    let need_su = shared
        .totals
        .min_su
        .saturating_sub(totals.total_university)
        .max(0);

    let mut shortfalls = Vec::new();
    if !missing_freshman.is_empty() {
        shortfalls.push(UniversityShortfall::Freshman(missing_freshman.clone()));
    }
    if !missing_must.is_empty() {
        shortfalls.push(UniversityShortfall::MustAll(missing_must.clone()));
    }
    if !missing_hum_any.is_empty() {
        shortfalls.push(UniversityShortfall::HumanitiesAny(missing_hum_any.clone()));
    }
    if need_courses > 0 {
        shortfalls.push(UniversityShortfall::CourseCount(need_courses));
    }
    if need_su > 0 {
        shortfalls.push(UniversityShortfall::Credits(need_su));
    }
    if !shortfalls.is_empty() {
        log.block(
            "university",
            BlockingReason::UniversityRequirements(shortfalls),
        );
    }

    UniversityCoursesSection {
        missing_freshman,
        missing_must,
        missing_hum_any,
    }
}

pub(crate) fn check_overall(
    totals: &Totals,
    rules: &RuleDocument,
    log: &mut GateLog,
) -> Breakdown<OverallCredits> {
    let required = OverallCredits {
        su: rules.totals.min_su,
        ects: rules.totals.min_ects,
    };
    let have = OverallCredits {
        su: totals.total_credit,
        ects: totals.total_ects as i64,
    };
    let missing = OverallCredits {
        su: required.su.saturating_sub(have.su).max(0),
        ects: required.ects.saturating_sub(have.ects).max(0),
    };

    if missing.su > 0 || missing.ects > 0 {
        log.block("overall", BlockingReason::OverallTotalsMissing(missing));
    }

    Breakdown {
        have,
        required,
        missing,
    }
}
