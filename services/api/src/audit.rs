use crate::infra::{directory_audit_service, read_course_list, resolve_data_dir, AuditEnvelope};
use clap::Args;
use degree_audit::error::AppError;
use degree_audit::graduation::{DecisionReport, MIN_GPA};
use degree_audit::programs::{AuditOutcome, AuditRequest};
use degree_audit::transcript;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct AuditArgs {
    /// Major code, e.g. CS
    #[arg(long)]
    pub(crate) major: String,
    /// Taken course code; repeat for each course
    #[arg(long = "course")]
    pub(crate) courses: Vec<String>,
    /// File listing course codes separated by commas or whitespace
    #[arg(long)]
    pub(crate) courses_file: Option<PathBuf>,
    /// Transcript text export to extract completed courses from
    #[arg(long)]
    pub(crate) transcript: Option<PathBuf>,
    /// Cumulative GPA
    #[arg(long)]
    pub(crate) gpa: Option<f64>,
    /// Directory holding catalog/ and rules/ (defaults to DEGREE_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
    /// Also write the JSON report to this file
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct TranscriptArgs {
    /// Transcript text export
    pub(crate) file: PathBuf,
}

pub(crate) fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let AuditArgs {
        major,
        courses,
        courses_file,
        transcript,
        gpa,
        data_dir,
        json,
        output,
    } = args;

    let mut taken_courses = courses;
    if let Some(path) = courses_file {
        taken_courses.extend(read_course_list(&path)?);
    }
    let transcript = transcript.map(fs::read_to_string).transpose()?;

    let service = directory_audit_service(resolve_data_dir(data_dir)?);
    let outcome = service.audit(&AuditRequest {
        major,
        taken_courses,
        gpa,
        transcript,
    })?;

    let rendered = serde_json::to_string_pretty(&AuditEnvelope::now(&outcome))?;
    if let Some(path) = output {
        fs::write(&path, &rendered)?;
    }

    if json {
        println!("{rendered}");
    } else {
        render_audit_report(&outcome);
    }

    Ok(())
}

pub(crate) fn run_transcript(args: TranscriptArgs) -> Result<(), AppError> {
    let text = fs::read_to_string(&args.file)?;
    let courses = transcript::extract_courses(&text);
    println!("{}", serde_json::to_string_pretty(&courses)?);
    Ok(())
}

fn render_audit_report(outcome: &AuditOutcome) {
    let report = &outcome.report;

    println!("Graduation audit: {}", outcome.major);
    match outcome.gpa {
        Some(gpa) => println!("GPA: {gpa:.2} (minimum {MIN_GPA:.2})"),
        None => println!("GPA: not provided"),
    }
    println!(
        "Credits: {} SU / {:.1} ECTS across {} matched courses",
        outcome.totals.total_credit,
        outcome.totals.total_ects,
        outcome.totals.taken_keys.len()
    );

    if !report.unknown_codes.is_empty() {
        println!("Not in catalog: {}", report.unknown_codes.join(", "));
    }

    println!();
    for line in section_lines(report) {
        println!("{line}");
    }

    println!();
    if report.can_graduate {
        println!("Result: eligible to graduate");
    } else {
        println!("Result: not eligible");
        for reason in report.reason_messages() {
            println!("- {reason}");
        }
    }
}

fn section_lines(report: &DecisionReport) -> Vec<String> {
    let electives = &report.electives;
    let faculty = &report.faculty;
    let spillover = if electives.spillover { "on" } else { "off" };

    vec![
        format!(
            "Electives (spillover {spillover}): core {}/{}, area {}/{}, free {}/{}",
            electives.have.core,
            electives.required.core,
            electives.have.area,
            electives.required.area,
            electives.have.free,
            electives.required.free
        ),
        format!(
            "Faculty: {} courses (min {}), math {}/{}, FENS {}/{}, FASS {}/{}, SBS {}/{}",
            faculty.have.count,
            faculty.required.min_count,
            faculty.have.math,
            faculty.required.min_math,
            faculty.have.fens,
            faculty.required.min_fens,
            faculty.have.fass,
            faculty.required.min_fass,
            faculty.have.sbs,
            faculty.required.min_sbs
        ),
        format!(
            "ECTS buckets: engineering {:.1}/{:.1}, basic science {:.1}/{:.1}",
            report.buckets.have.engineering_ects,
            report.buckets.required.engineering_ects,
            report.buckets.have.basic_science_ects,
            report.buckets.required.basic_science_ects
        ),
        format!(
            "Overall: SU {}/{}, ECTS {}/{}",
            report.overall.have.su,
            report.overall.required.su,
            report.overall.have.ects,
            report.overall.required.ects
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::Path;

    fn write_program(root: &Path) {
        fs::create_dir_all(root.join("catalog")).unwrap();
        fs::create_dir_all(root.join("rules")).unwrap();
        fs::write(
            root.join("catalog/CS.json"),
            r#"[
                {"major": "CS", "code": "201", "credit": 3, "ects": 6, "el_type": "core", "faculty": "FENS"},
                {"major": "HUM", "code": "201", "credit": 3, "ects": 5, "el_type": "university", "faculty": "FASS"}
            ]"#,
        )
        .unwrap();
        fs::write(
            root.join("rules/cs_rule.json"),
            r#"{"electives": {"core_su": 3}, "totals": {"min_su": 6}}"#,
        )
        .unwrap();
    }

    #[test]
    fn audit_writes_stamped_json_report() {
        let dir = tempfile::tempdir().unwrap();
        write_program(dir.path());
        let courses_file = dir.path().join("courses.txt");
        fs::write(&courses_file, "HUM201\n").unwrap();
        let output = dir.path().join("report.json");

        run_audit(AuditArgs {
            major: "cs".to_string(),
            courses: vec!["CS201".to_string()],
            courses_file: Some(courses_file),
            gpa: Some(2.4),
            data_dir: Some(dir.path().to_path_buf()),
            output: Some(output.clone()),
            ..AuditArgs::default()
        })
        .expect("audit runs");

        let report: Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).expect("json report");
        assert_eq!(report["major"], "CS");
        assert_eq!(report["can_graduate"], true);
        assert_eq!(report["totals"]["total_credit"], 6);
        assert!(report["evaluated_at"].is_string());
    }

    #[test]
    fn audit_reports_unknown_major() {
        let dir = tempfile::tempdir().unwrap();
        write_program(dir.path());

        let err = run_audit(AuditArgs {
            major: "EE".to_string(),
            data_dir: Some(dir.path().to_path_buf()),
            ..AuditArgs::default()
        })
        .expect_err("no EE catalog");

        assert!(err.to_string().contains("no catalog found for major 'EE'"));
    }

    #[test]
    fn missing_transcript_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_transcript(TranscriptArgs {
            file: dir.path().join("absent.txt"),
        })
        .expect_err("file missing");

        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn section_lines_cover_every_category() {
        let report = degree_audit::graduation::evaluate_against_rules(
            &Default::default(),
            &Default::default(),
            None,
            None,
        );
        let lines = section_lines(&report);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Electives (spillover off)"));
    }
}
