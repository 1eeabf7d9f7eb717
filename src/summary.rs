use crate::calc::{compute_median, round_off_1_decimal, PassStatus};
use crate::catalog::SubjectCatalog;
use crate::grading::{scale_labels, GradeLabel, Level};
use crate::roster::ProcessedStudent;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCount {
    pub grade: GradeLabel,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
    pub subject: String,
    pub name: String,
    pub sat_count: usize,
    pub absent_count: usize,
    pub mean: f64,
    pub median: f64,
    pub highest: i64,
    pub lowest: i64,
    pub grade_counts: Vec<GradeCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub student_count: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub mean_total: f64,
    pub per_subject: Vec<SubjectStats>,
}

pub fn class_summary(
    catalog: &SubjectCatalog,
    level: Level,
    students: &[ProcessedStudent],
) -> ClassSummary {
    let labels = scale_labels(level);

    let per_subject = catalog
        .active()
        .map(|def| {
            let scores: Vec<i64> = students
                .iter()
                .filter_map(|s| s.marks.get(&def.key).and_then(|m| m.score()))
                .collect();
            let values: Vec<f64> = scores.iter().map(|v| *v as f64).collect();
            let mean = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };

            let grade_counts = labels
                .iter()
                .map(|label| GradeCount {
                    grade: *label,
                    count: students
                        .iter()
                        .filter(|s| s.grades.get(&def.key).map(|g| g.grade) == Some(*label))
                        .count(),
                })
                .collect();

            SubjectStats {
                subject: def.key.clone(),
                name: def.name.clone(),
                sat_count: scores.len(),
                absent_count: students.len() - scores.len(),
                mean: round_off_1_decimal(mean),
                median: round_off_1_decimal(compute_median(&values)),
                highest: scores.iter().copied().max().unwrap_or(0),
                lowest: scores.iter().copied().min().unwrap_or(0),
                grade_counts,
            }
        })
        .collect();

    let pass_count = students
        .iter()
        .filter(|s| s.status == PassStatus::Pass)
        .count();
    let mean_total = if students.is_empty() {
        0.0
    } else {
        students.iter().map(|s| s.total as f64).sum::<f64>() / students.len() as f64
    };

    ClassSummary {
        student_count: students.len(),
        pass_count,
        fail_count: students.len() - pass_count,
        mean_total: round_off_1_decimal(mean_total),
        per_subject,
    }
}
