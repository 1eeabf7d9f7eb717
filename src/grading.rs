use crate::marks::SubjectMark;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Junior,
    Senior,
}

impl Level {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "junior" => Some(Level::Junior),
            "senior" => Some(Level::Senior),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    A,
    B,
    C,
    D,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeLabel {
    Letter(Letter),
    Numeric(u8),
    Absent,
}

impl fmt::Display for GradeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeLabel::Letter(l) => write!(f, "{:?}", l),
            GradeLabel::Numeric(n) => write!(f, "{}", n),
            GradeLabel::Absent => f.write_str("Absent"),
        }
    }
}

impl Serialize for GradeLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct Band {
    min: i64,
    label: GradeLabel,
    remark: &'static str,
}

// Highest threshold first; the last band catches everything below.
const JUNIOR_BANDS: &[Band] = &[
    Band { min: 90, label: GradeLabel::Letter(Letter::A), remark: "Excellent" },
    Band { min: 80, label: GradeLabel::Letter(Letter::B), remark: "Very good" },
    Band { min: 60, label: GradeLabel::Letter(Letter::C), remark: "Good" },
    Band { min: 40, label: GradeLabel::Letter(Letter::D), remark: "Satisfactory" },
    Band { min: i64::MIN, label: GradeLabel::Letter(Letter::F), remark: "Fail" },
];

const SENIOR_BANDS: &[Band] = &[
    Band { min: 85, label: GradeLabel::Numeric(1), remark: "Distinction" },
    Band { min: 75, label: GradeLabel::Numeric(2), remark: "Distinction" },
    Band { min: 70, label: GradeLabel::Numeric(3), remark: "Strong Credit" },
    Band { min: 60, label: GradeLabel::Numeric(4), remark: "Strong Credit" },
    Band { min: 55, label: GradeLabel::Numeric(5), remark: "Credit" },
    Band { min: 50, label: GradeLabel::Numeric(6), remark: "Credit" },
    Band { min: 45, label: GradeLabel::Numeric(7), remark: "Pass" },
    Band { min: 40, label: GradeLabel::Numeric(8), remark: "Pass" },
    Band { min: i64::MIN, label: GradeLabel::Numeric(9), remark: "Fail" },
];

fn bands(level: Level) -> &'static [Band] {
    match level {
        Level::Junior => JUNIOR_BANDS,
        Level::Senior => SENIOR_BANDS,
    }
}

pub fn classify(mark: SubjectMark, level: Level) -> (GradeLabel, &'static str) {
    let SubjectMark::Score(v) = mark else {
        return (GradeLabel::Absent, "Absent");
    };
    let table = bands(level);
    let band = table
        .iter()
        .find(|b| v >= b.min)
        .unwrap_or(&table[table.len() - 1]);
    (band.label, band.remark)
}

/// Every label of a level's scale, best first, followed by `Absent`.
pub fn scale_labels(level: Level) -> Vec<GradeLabel> {
    bands(level)
        .iter()
        .map(|b| b.label)
        .chain(std::iter::once(GradeLabel::Absent))
        .collect()
}

/// Grading-scale key printed on report cards, e.g.
/// `A: 90-100 Excellent; B: 80-89 Very good; ...`.
pub fn legend(level: Level) -> String {
    let table = bands(level);
    let mut parts: Vec<String> = Vec::with_capacity(table.len());
    let mut upper = 100;
    for b in table {
        let range = if b.min == i64::MIN {
            format!("0-{}", upper)
        } else {
            format!("{}-{}", b.min, upper)
        };
        parts.push(format!("{}: {} {}", b.label, range, b.remark));
        upper = b.min.saturating_sub(1);
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn junior(v: i64) -> GradeLabel {
        classify(SubjectMark::Score(v), Level::Junior).0
    }

    fn senior(v: i64) -> (GradeLabel, &'static str) {
        classify(SubjectMark::Score(v), Level::Senior)
    }

    #[test]
    fn absent_is_absent_at_both_levels() {
        for level in [Level::Junior, Level::Senior] {
            assert_eq!(
                classify(SubjectMark::Absent, level),
                (GradeLabel::Absent, "Absent")
            );
        }
    }

    #[test]
    fn junior_thresholds() {
        assert_eq!(junior(100), GradeLabel::Letter(Letter::A));
        assert_eq!(junior(90), GradeLabel::Letter(Letter::A));
        assert_eq!(junior(89), GradeLabel::Letter(Letter::B));
        assert_eq!(junior(80), GradeLabel::Letter(Letter::B));
        assert_eq!(junior(79), GradeLabel::Letter(Letter::C));
        assert_eq!(junior(60), GradeLabel::Letter(Letter::C));
        assert_eq!(junior(59), GradeLabel::Letter(Letter::D));
        assert_eq!(junior(40), GradeLabel::Letter(Letter::D));
        assert_eq!(junior(39), GradeLabel::Letter(Letter::F));
        assert_eq!(
            classify(SubjectMark::Score(85), Level::Junior).1,
            "Very good"
        );
    }

    #[test]
    fn junior_pass_band_covers_forty_to_hundred() {
        for v in 40..=100 {
            assert_ne!(junior(v), GradeLabel::Letter(Letter::F), "mark {}", v);
        }
        for v in 0..40 {
            assert_eq!(junior(v), GradeLabel::Letter(Letter::F), "mark {}", v);
        }
    }

    #[test]
    fn senior_thresholds_and_remarks() {
        assert_eq!(senior(85), (GradeLabel::Numeric(1), "Distinction"));
        assert_eq!(senior(84), (GradeLabel::Numeric(2), "Distinction"));
        assert_eq!(senior(70), (GradeLabel::Numeric(3), "Strong Credit"));
        assert_eq!(senior(69), (GradeLabel::Numeric(4), "Strong Credit"));
        assert_eq!(senior(55), (GradeLabel::Numeric(5), "Credit"));
        assert_eq!(senior(50), (GradeLabel::Numeric(6), "Credit"));
        assert_eq!(senior(45), (GradeLabel::Numeric(7), "Pass"));
        assert_eq!(senior(40), (GradeLabel::Numeric(8), "Pass"));
        assert_eq!(senior(39), (GradeLabel::Numeric(9), "Fail"));
    }

    #[test]
    fn out_of_range_marks_still_classify() {
        assert_eq!(junior(150), GradeLabel::Letter(Letter::A));
        assert_eq!(senior(-5).0, GradeLabel::Numeric(9));
    }

    #[test]
    fn labels_serialize_as_strings() {
        assert_eq!(
            serde_json::to_value(GradeLabel::Letter(Letter::C)).unwrap(),
            serde_json::json!("C")
        );
        assert_eq!(
            serde_json::to_value(GradeLabel::Numeric(7)).unwrap(),
            serde_json::json!("7")
        );
        assert_eq!(GradeLabel::Absent.to_string(), "Absent");
    }

    #[test]
    fn legend_is_derived_from_bands() {
        assert_eq!(
            legend(Level::Junior),
            "A: 90-100 Excellent; B: 80-89 Very good; C: 60-79 Good; \
             D: 40-59 Satisfactory; F: 0-39 Fail"
        );
        let senior = legend(Level::Senior);
        assert!(senior.starts_with("1: 85-100 Distinction; 2: 75-84 Distinction"));
        assert!(senior.ends_with("8: 40-44 Pass; 9: 0-39 Fail"));
    }

    #[test]
    fn scale_labels_end_with_absent() {
        let labels = scale_labels(Level::Senior);
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0], GradeLabel::Numeric(1));
        assert_eq!(labels[9], GradeLabel::Absent);
    }
}
