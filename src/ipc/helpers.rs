use crate::calc::{CalcError, MarkSet};
use crate::catalog::{SubjectCatalog, SubjectDef};
use crate::grading::Level;
use crate::ipc::types::AppState;
use crate::marks::normalize_mark;
use crate::roster::{RosterContext, StudentInput};
use serde_json::json;
use std::collections::HashSet;
use uuid::Uuid;

pub struct ParsedRoster {
    pub context: RosterContext,
    pub level: Level,
    pub catalog: SubjectCatalog,
    pub students: Vec<StudentInput>,
}

/// Strings pass through trimmed, numbers are rendered; anything else is None.
pub fn scalar_text(v: Option<&serde_json::Value>) -> Option<String> {
    match v? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// An explicit `level` wins; otherwise the level is derived from `className`.
pub fn resolve_level(state: &AppState, params: &serde_json::Value) -> Result<Level, CalcError> {
    if let Some(raw) = params.get("level").filter(|v| !v.is_null()) {
        let Some(s) = raw.as_str() else {
            return Err(CalcError::new("bad_params", "level must be 'junior' or 'senior'"));
        };
        return Level::parse(s).ok_or_else(|| {
            CalcError::new("bad_params", "level must be 'junior' or 'senior'")
                .with_details(json!({ "level": s }))
        });
    }

    let Some(class_name) = params.get("className").and_then(|v| v.as_str()) else {
        return Err(CalcError::new("bad_params", "missing level or className"));
    };
    state.config.level_for_class(class_name).ok_or_else(|| {
        CalcError::new(
            "unknown_class_level",
            "class is not configured as junior or senior",
        )
        .with_details(json!({ "className": class_name }))
    })
}

pub fn parse_catalog(raw: &serde_json::Value) -> Result<SubjectCatalog, CalcError> {
    let subjects: Vec<SubjectDef> = serde_json::from_value(raw.clone()).map_err(|e| {
        CalcError::new("bad_params", format!("catalog must be a list of subjects: {e}"))
    })?;
    SubjectCatalog::new(subjects)
}

/// Per-request catalog override, or the configured catalog.
pub fn resolve_catalog(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<SubjectCatalog, CalcError> {
    match params.get("catalog").filter(|v| !v.is_null()) {
        Some(raw) => parse_catalog(raw),
        None => Ok(state.config.catalog.clone()),
    }
}

fn parse_student(
    catalog: &SubjectCatalog,
    idx: usize,
    raw: &serde_json::Value,
) -> Result<StudentInput, CalcError> {
    let Some(obj) = raw.as_object() else {
        return Err(CalcError::new("bad_params", "each student must be an object")
            .with_details(json!({ "index": idx })));
    };
    let Some(name) = obj
        .get("name")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Err(CalcError::new("bad_params", "student name is required")
            .with_details(json!({ "index": idx })));
    };
    let id = scalar_text(obj.get("id")).unwrap_or_else(|| Uuid::new_v4().to_string());
    let sex = scalar_text(obj.get("sex")).unwrap_or_default();

    let mut entries = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    match obj.get("marks") {
        None | Some(serde_json::Value::Null) => {}
        Some(serde_json::Value::Object(cells)) => {
            for (key, cell) in cells {
                let Some(def) = catalog.find(key) else {
                    return Err(CalcError::new("unknown_subject", "subject is not in the catalog")
                        .with_details(json!({ "index": idx, "subject": key })));
                };
                if !seen.insert(def.key.clone()) {
                    return Err(CalcError::new("bad_params", "subject given more than once")
                        .with_details(json!({ "index": idx, "subject": key })));
                }
                entries.push((def.key.clone(), normalize_mark(cell)));
            }
        }
        Some(_) => {
            return Err(CalcError::new("bad_params", "student marks must be an object")
                .with_details(json!({ "index": idx })));
        }
    }

    Ok(StudentInput {
        id,
        name,
        sex,
        marks: MarkSet::from_entries(catalog, entries),
    })
}

pub fn parse_roster(state: &AppState, params: &serde_json::Value) -> Result<ParsedRoster, CalcError> {
    let Some(class_name) = params.get("className").and_then(|v| v.as_str()) else {
        return Err(CalcError::new("bad_params", "missing className"));
    };
    let Some(year) = scalar_text(params.get("year")) else {
        return Err(CalcError::new("bad_params", "missing year"));
    };
    let Some(term) = scalar_text(params.get("term")) else {
        return Err(CalcError::new("bad_params", "missing term"));
    };
    let level = resolve_level(state, params)?;
    let catalog = resolve_catalog(state, params)?;

    let raw_students: &[serde_json::Value] = match params.get("students") {
        None | Some(serde_json::Value::Null) => &[],
        Some(serde_json::Value::Array(items)) => items,
        Some(_) => return Err(CalcError::new("bad_params", "students must be an array")),
    };
    let students = raw_students
        .iter()
        .enumerate()
        .map(|(idx, raw)| parse_student(&catalog, idx, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedRoster {
        context: RosterContext {
            class_name: class_name.trim().to_string(),
            year,
            term,
        },
        level,
        catalog,
        students,
    })
}
