use serde::Serialize;

const MARKERS: [&str; 3] = ["<<<<<<<", "=======", ">>>>>>>"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Validation {
    Idle,
    Success,
    Error,
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn validate(merged: &str, expected: &str) -> Validation {
    if normalize(merged) == normalize(expected) {
        Validation::Success
    } else {
        Validation::Error
    }
}

pub fn has_conflict_markers(text: &str) -> bool {
    MARKERS.iter().any(|m| text.contains(m))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Added,
    Removed,
    Context,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffLine {
    pub number: usize,
    pub kind: LineKind,
    pub text: String,
}

/// Splits a `+`/`-` annotated snippet into numbered lines for the three-way view.
pub fn classify_lines(code: &str) -> Vec<DiffLine> {
    code.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let kind = if line.starts_with('+') {
                LineKind::Added
            } else if line.starts_with('-') {
                LineKind::Removed
            } else {
                LineKind::Context
            };
            DiffLine {
                number: i + 1,
                kind,
                text: line.to_string(),
            }
        })
        .collect()
}
