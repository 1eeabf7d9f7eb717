use crate::ipc::error::{calc_err, err, ok};
use crate::ipc::helpers::parse_roster;
use crate::ipc::types::{AppState, Request};
use crate::roster::{process_roster, subject_positions};
use crate::summary::class_summary;
use serde_json::json;

fn handle_roster_process(state: &mut AppState, req: &Request) -> serde_json::Value {
    let parsed = match parse_roster(state, &req.params) {
        Ok(v) => v,
        Err(e) => return calc_err(&req.id, e),
    };

    let processed = process_roster(
        &parsed.catalog,
        parsed.level,
        &state.config.rules(),
        &parsed.students,
    );
    for w in &processed.warnings {
        tracing::warn!(
            student = %w.student,
            subject = %w.subject,
            mark = w.mark,
            "mark outside 0-100 kept as entered"
        );
    }
    let summary = class_summary(&parsed.catalog, parsed.level, &processed.students);

    ok(
        &req.id,
        json!({
            "context": parsed.context,
            "level": parsed.level,
            "processedAt": chrono::Utc::now().to_rfc3339(),
            "students": processed.students,
            "summary": summary,
            "warnings": processed.warnings,
        }),
    )
}

fn handle_roster_subject_positions(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(subject) = req.params.get("subject").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing subject", None);
    };
    let parsed = match parse_roster(state, &req.params) {
        Ok(v) => v,
        Err(e) => return calc_err(&req.id, e),
    };
    let Some(def) = parsed.catalog.find(subject) else {
        return err(
            &req.id,
            "unknown_subject",
            "subject is not in the catalog",
            Some(json!({ "subject": subject })),
        );
    };

    let positions = subject_positions(&parsed.students, &def.key);
    let rows: Vec<serde_json::Value> = parsed
        .students
        .iter()
        .zip(positions)
        .map(|(s, position)| {
            json!({
                "id": s.id,
                "name": s.name,
                "mark": s.marks.get(&def.key),
                "position": position,
            })
        })
        .collect();

    ok(&req.id, json!({ "subject": def.key, "positions": rows }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "roster.process" => Some(handle_roster_process(state, req)),
        "roster.subjectPositions" => Some(handle_roster_subject_positions(state, req)),
        _ => None,
    }
}
