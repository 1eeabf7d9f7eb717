use crate::calc::{aggregate, Aggregate, AggregateRules, MarkSet, PassStatus};
use crate::catalog::SubjectCatalog;
use crate::grading::{classify, GradeLabel, Level};
use crate::marks::SubjectMark;
use crate::rank::{better_first, dense_rank_by, RankKey};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterContext {
    pub class_name: String,
    pub year: String,
    pub term: String,
}

/// A student as supplied by the upload parser: identity and marks only.
#[derive(Debug, Clone)]
pub struct StudentInput {
    pub id: String,
    pub name: String,
    pub sex: String,
    pub marks: MarkSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectGrade {
    pub grade: GradeLabel,
    /// 0 when the student has no mark for the subject.
    pub position: u32,
    pub remark: String,
}

/// A fully graded and ranked student. Only [`process_roster`] builds these.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedStudent {
    pub id: String,
    pub name: String,
    pub sex: String,
    pub marks: BTreeMap<String, SubjectMark>,
    pub grades: BTreeMap<String, SubjectGrade>,
    pub total: i64,
    pub average: i64,
    pub rank: u32,
    pub status: PassStatus,
    pub pass_count: usize,
    pub compulsory_pass: bool,
    pub selected_subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkWarning {
    pub student_id: String,
    pub student: String,
    pub subject: String,
    /// As entered, except beyond `MARK_LIMIT` where it reads as the limit.
    pub mark: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRoster {
    /// Rank order; tied students keep input order.
    pub students: Vec<ProcessedStudent>,
    pub warnings: Vec<MarkWarning>,
}

/// Competition positions for one subject, indexed like `students`.
/// Students without a mark get 0.
pub fn subject_positions(students: &[StudentInput], subject: &str) -> Vec<u32> {
    let sitters: Vec<(usize, i64)> = students
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.marks.get(subject).score().map(|v| (i, v)))
        .collect();

    let mut positions = vec![0_u32; students.len()];
    for ((i, _), position) in dense_rank_by(sitters, |(_, v)| *v, better_first) {
        positions[i] = position;
    }
    positions
}

/// Run the whole pipeline over one class/year/term roster.
///
/// Inputs are never modified; a new roster is built from scratch on every
/// call.
pub fn process_roster(
    catalog: &SubjectCatalog,
    level: Level,
    rules: &AggregateRules,
    students: &[StudentInput],
) -> ProcessedRoster {
    let aggregates: Vec<Aggregate> = students
        .iter()
        .map(|s| aggregate(catalog, &s.marks, rules))
        .collect();

    let positions: Vec<(String, Vec<u32>)> = catalog
        .active()
        .map(|s| (s.key.clone(), subject_positions(students, &s.key)))
        .collect();

    let ranked = dense_rank_by(
        (0..students.len()).collect::<Vec<usize>>(),
        |i| {
            let a = &aggregates[*i];
            RankKey {
                compulsory_pass: a.compulsory_pass,
                pass_count: a.pass_count,
                total: a.total,
            }
        },
        better_first,
    );

    let mut warnings: Vec<MarkWarning> = Vec::new();
    for s in students {
        for def in catalog.active() {
            let mark = s.marks.get(&def.key);
            if let Some(v) = mark.score().filter(|_| mark.is_out_of_range()) {
                warnings.push(MarkWarning {
                    student_id: s.id.clone(),
                    student: s.name.clone(),
                    subject: def.key.clone(),
                    mark: v,
                });
            }
        }
    }

    let processed = ranked
        .into_iter()
        .map(|(i, rank)| {
            let s = &students[i];
            let agg = &aggregates[i];
            let mut marks = BTreeMap::new();
            let mut grades = BTreeMap::new();
            for (key, by_student) in &positions {
                let mark = s.marks.get(key);
                let (grade, remark) = classify(mark, level);
                marks.insert(key.clone(), mark);
                grades.insert(
                    key.clone(),
                    SubjectGrade {
                        grade,
                        position: by_student[i],
                        remark: remark.to_string(),
                    },
                );
            }
            ProcessedStudent {
                id: s.id.clone(),
                name: s.name.clone(),
                sex: s.sex.clone(),
                marks,
                grades,
                total: agg.total,
                average: agg.average,
                rank,
                status: agg.status,
                pass_count: agg.pass_count,
                compulsory_pass: agg.compulsory_pass,
                selected_subjects: agg.selected.clone(),
            }
        })
        .collect();

    ProcessedRoster {
        students: processed,
        warnings,
    }
}
