use crate::catalog::SubjectCatalog;
use crate::marks::SubjectMark;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// VB6-style 1-decimal rounding used for displayed statistics:
/// `Int(10*x + 0.5) / 10`
pub fn round_off_1_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

pub fn compute_median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[(n / 2) - 1] + sorted[n / 2]) / 2.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalcError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CalcError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CalcError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateRules {
    pub best_of: usize,
    pub pass_mark: i64,
}

impl Default for AggregateRules {
    fn default() -> Self {
        Self {
            best_of: 6,
            pass_mark: 40,
        }
    }
}

/// One student's marks keyed by catalog subject key.
///
/// Built through [`MarkSet::from_entries`] so every enabled subject has an
/// entry; lookups for unknown keys read as `Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkSet {
    marks: HashMap<String, SubjectMark>,
}

impl MarkSet {
    pub fn from_entries<I>(catalog: &SubjectCatalog, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, SubjectMark)>,
    {
        let mut marks: HashMap<String, SubjectMark> = catalog
            .active()
            .map(|s| (s.key.clone(), SubjectMark::Absent))
            .collect();
        for (key, mark) in entries {
            if let Some(def) = catalog.find(&key) {
                marks.insert(def.key.clone(), mark);
            }
        }
        Self { marks }
    }

    pub fn get(&self, key: &str) -> SubjectMark {
        self.marks.get(key).copied().unwrap_or(SubjectMark::Absent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub total: i64,
    pub average: i64,
    /// Subjects at or above the pass mark within the best-N selection.
    pub pass_count: usize,
    pub compulsory_pass: bool,
    pub status: PassStatus,
    /// Subject keys that make up `total`, compulsory first.
    pub selected: Vec<String>,
}

/// Best-N-with-compulsory aggregation.
///
/// With the compulsory subject present the selection is that subject plus
/// the best N-1 others; without it, the best N of the rest. A Pass needs N
/// passed subjects in the selection and a passed compulsory subject.
pub fn aggregate(catalog: &SubjectCatalog, marks: &MarkSet, rules: &AggregateRules) -> Aggregate {
    let compulsory_key = catalog.compulsory().map(|s| s.key.as_str());

    let mut scored: Vec<(&str, i64)> = Vec::new();
    for s in catalog.active() {
        if let Some(v) = marks.get(&s.key).score() {
            scored.push((s.key.as_str(), v));
        }
    }

    let average = if scored.is_empty() {
        0
    } else {
        let sum = scored
            .iter()
            .fold(0_i64, |acc, (_, v)| acc.saturating_add(*v));
        (sum as f64 / scored.len() as f64).round() as i64
    };

    let compulsory_mark = compulsory_key.and_then(|k| marks.get(k).score());

    // Stable sort keeps catalog order among equal marks.
    let mut others: Vec<(&str, i64)> = scored
        .iter()
        .copied()
        .filter(|(k, _)| Some(*k) != compulsory_key)
        .collect();
    others.sort_by(|a, b| b.1.cmp(&a.1));

    let mut selection: Vec<(&str, i64)> = Vec::with_capacity(rules.best_of);
    match (compulsory_key, compulsory_mark) {
        (Some(k), Some(v)) => {
            selection.push((k, v));
            selection.extend(others.iter().take(rules.best_of.saturating_sub(1)));
        }
        _ => selection.extend(others.iter().take(rules.best_of)),
    }

    let total = selection
        .iter()
        .fold(0_i64, |acc, (_, v)| acc.saturating_add(*v));
    let pass_count = selection
        .iter()
        .filter(|(_, v)| *v >= rules.pass_mark)
        .count();
    let compulsory_pass = match compulsory_key {
        Some(_) => compulsory_mark.map(|v| v >= rules.pass_mark).unwrap_or(false),
        None => true,
    };
    let status = if compulsory_pass && pass_count >= rules.best_of {
        PassStatus::Pass
    } else {
        PassStatus::Fail
    };

    Aggregate {
        total,
        average,
        pass_count,
        compulsory_pass,
        status,
        selected: selection.iter().map(|(k, _)| k.to_string()).collect(),
    }
}
