use crate::grading::{classify, legend};
use crate::ipc::error::{calc_err, err, ok};
use crate::ipc::helpers::resolve_level;
use crate::ipc::types::{AppState, Request};
use crate::marks::normalize_mark;
use serde_json::json;

fn handle_marks_normalize(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(values) = req.params.get("values").and_then(|v| v.as_array()) else {
        return err(&req.id, "bad_params", "values must be an array", None);
    };
    let marks: Vec<_> = values.iter().map(normalize_mark).collect();
    ok(&req.id, json!({ "marks": marks }))
}

fn handle_grades_classify(state: &mut AppState, req: &Request) -> serde_json::Value {
    let level = match resolve_level(state, &req.params) {
        Ok(v) => v,
        Err(e) => return calc_err(&req.id, e),
    };
    let mark = normalize_mark(req.params.get("mark").unwrap_or(&serde_json::Value::Null));
    let (grade, remark) = classify(mark, level);
    ok(
        &req.id,
        json!({
            "mark": mark,
            "grade": grade,
            "remark": remark,
            "level": level,
        }),
    )
}

fn handle_grades_legend(state: &mut AppState, req: &Request) -> serde_json::Value {
    match resolve_level(state, &req.params) {
        Ok(level) => ok(&req.id, json!({ "level": level, "legend": legend(level) })),
        Err(e) => calc_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "marks.normalize" => Some(handle_marks_normalize(state, req)),
        "grades.classify" => Some(handle_grades_classify(state, req)),
        "grades.legend" => Some(handle_grades_legend(state, req)),
        _ => None,
    }
}
