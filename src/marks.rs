use serde::{Serialize, Serializer};

/// Largest magnitude a mark is stored with. Entries beyond it are kept at
/// the bound so totals stay representable.
pub const MARK_LIMIT: i64 = 1_000_000;

/// One subject cell after normalization.
///
/// Zero is never a real score here: blank cells, `AB` and `0` all mean the
/// student has no mark for the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectMark {
    Absent,
    Score(i64),
}

impl SubjectMark {
    pub fn score(self) -> Option<i64> {
        match self {
            SubjectMark::Score(v) => Some(v),
            SubjectMark::Absent => None,
        }
    }

    pub fn is_out_of_range(self) -> bool {
        matches!(self, SubjectMark::Score(v) if !(0..=100).contains(&v))
    }
}

impl Serialize for SubjectMark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SubjectMark::Score(v) => serializer.serialize_i64(*v),
            SubjectMark::Absent => serializer.serialize_str("Absent"),
        }
    }
}

/// Normalize a raw cell from an upload/paste grid.
///
/// Never fails: anything that is not a usable number is `Absent`.
pub fn normalize_mark(raw: &serde_json::Value) -> SubjectMark {
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => parse_mark_text(s),
        _ => None,
    };
    match parsed {
        Some(v) => from_float(v),
        None => SubjectMark::Absent,
    }
}

fn parse_mark_text(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() || t.eq_ignore_ascii_case("ab") || t.eq_ignore_ascii_case("absent") {
        return None;
    }
    t.parse::<f64>().ok()
}

fn from_float(v: f64) -> SubjectMark {
    if !v.is_finite() {
        return SubjectMark::Absent;
    }
    // f64::round is half away from zero.
    let rounded = v.round();
    if rounded == 0.0 {
        return SubjectMark::Absent;
    }
    let limit = MARK_LIMIT as f64;
    SubjectMark::Score(rounded.clamp(-limit, limit) as i64)
}
