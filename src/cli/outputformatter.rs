use serde_json::Value;

use terminal_size::{terminal_size, Width};

// Render a fetched page payload as an ASCII table.
// Returns true if a table was printed, false if the caller should fall back
// to raw JSON (forced via CLASSPORT_OUTPUT=json, or an untabular shape).
pub fn print_page(val: &Value) -> bool {
    // Honor env override to force JSON output
    if std::env::var("CLASSPORT_OUTPUT").map(|v| v.eq_ignore_ascii_case("json")).unwrap_or(false) {
        return false;
    }

    let (cols, rows) = match tabular_shape(val) {
        Some(t) => t,
        None => return false,
    };
    if rows.is_empty() { return false; }

    let termw = detect_terminal_width();

    let mut widths: Vec<usize> = cols.iter().map(|c| c.chars().count().min(termw)).collect();
    for r in &rows {
        for (i, cell) in r.iter().enumerate().take(cols.len()) {
            let w = cell.chars().count();
            if w > widths[i] { widths[i] = w.min(termw); }
        }
    }

    let sep = build_separator(&widths);
    println!("{}", fit(&sep, termw));
    println!("{}", fit(&build_row(&cols, &widths), termw));
    println!("{}", fit(&sep, termw));
    for r in &rows {
        println!("{}", fit(&build_row(r, &widths), termw));
    }
    println!("{}", fit(&sep, termw));
    println!("rows: {}", rows.len());

    true
}

/// Shapes the school endpoints actually return:
/// - array of objects (lists: students, timetable slots, assignments) →
///   union-of-keys columns;
/// - array of scalars → single "value" column;
/// - a single object (dashboards, summaries) → two-column field/value table.
fn tabular_shape(val: &Value) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    match val {
        Value::Array(arr) if !arr.is_empty() => {
            if arr.iter().all(|el| el.is_object()) {
                let mut keys: Vec<String> = Vec::new();
                for el in arr {
                    if let Value::Object(map) = el {
                        for k in map.keys() {
                            if !keys.contains(k) { keys.push(k.clone()); }
                        }
                    }
                }
                let rows = arr
                    .iter()
                    .filter_map(|el| el.as_object())
                    .map(|map| keys.iter().map(|k| cell(map.get(k).unwrap_or(&Value::Null))).collect())
                    .collect();
                Some((keys, rows))
            } else {
                let rows = arr.iter().map(|el| vec![cell(el)]).collect();
                Some((vec!["value".to_string()], rows))
            }
        }
        Value::Object(map) if !map.is_empty() => {
            let rows = map.iter().map(|(k, v)| vec![k.clone(), cell(v)]).collect();
            Some((vec!["field".to_string(), "value".to_string()], rows))
        }
        _ => None,
    }
}

fn cell(v: &Value) -> String {
    match v {
        Value::Null => String::from("NULL"),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // keep nested objects/arrays compact
        other => other.to_string(),
    }
}

fn detect_terminal_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => (w as usize).max(20),
        None => 120,
    }
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('+');
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('|');
    for (i, w) in widths.iter().enumerate() {
        let raw = cells.get(i).cloned().unwrap_or_default();
        let text = truncate(&raw, *w);
        let pad = w.saturating_sub(text.chars().count());
        s.push(' ');
        if is_numeric_like(&raw) {
            s.push_str(&" ".repeat(pad));
            s.push_str(&text);
        } else {
            s.push_str(&text);
            s.push_str(&" ".repeat(pad));
        }
        s.push(' ');
        s.push('|');
    }
    s
}

fn fit(line: &str, termw: usize) -> String {
    truncate(line, termw)
}

fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max { return s.to_string(); }
    if max <= 1 { return "…".to_string(); }
    s.chars().take(max - 1).collect::<String>() + "…"
}

fn is_numeric_like(s: &str) -> bool {
    // crude detection for aligning numbers to the right
    let st = s.trim();
    if st.is_empty() { return false; }
    let mut has_digit = false;
    for ch in st.chars() {
        if ch.is_ascii_digit() { has_digit = true; continue; }
        if ".-+eE,_%".contains(ch) { continue; }
        return false;
    }
    has_digit
}
