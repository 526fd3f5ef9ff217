use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::models::{Segment, Variable};

/// Current value per marker key. Every occurrence of a key shares one entry.
pub(crate) type Overrides = HashMap<String, String>;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^:}]+):([^}]+)\}").expect("marker pattern compiles"));

/// One variable per `${key:default}` match, in scan order. Repeated keys are
/// kept as separate entries.
pub(crate) fn extract_variables(template: &str) -> Vec<Variable> {
    MARKER
        .captures_iter(template)
        .map(|caps| {
            let key = capture(&caps, 1).to_string();
            Variable {
                label: key.clone(),
                key,
                default_value: capture(&caps, 2).to_string(),
            }
        })
        .collect()
}

pub(crate) fn render_plain(template: &str, overrides: &Overrides) -> String {
    MARKER
        .replace_all(template, |caps: &Captures| substitute(caps, overrides).to_string())
        .into_owned()
}

/// Same substitution as [`render_plain`], split into literal and substituted
/// spans. Empty literal spans are never emitted.
pub(crate) fn render_segments(template: &str, overrides: &Overrides) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in MARKER.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Literal(template[last..whole.start()].to_string()));
        }
        segments.push(Segment::Substitution(substitute(&caps, overrides).to_string()));
        last = whole.end();
    }
    if last < template.len() {
        segments.push(Segment::Literal(template[last..].to_string()));
    }
    segments
}

/// Seeds by key in declaration order, so a repeated key ends up with the
/// default of its last occurrence.
pub(crate) fn seed(variables: &[Variable]) -> Overrides {
    let mut values = Overrides::with_capacity(variables.len());
    for variable in variables {
        values.insert(variable.key.clone(), variable.default_value.clone());
    }
    values
}

pub(crate) fn set(values: &Overrides, key: &str, value: &str) -> Overrides {
    let mut next = values.clone();
    next.insert(key.to_string(), value.to_string());
    next
}

/// The value shown in a variable's input field.
pub(crate) fn value_for<'a>(values: &'a Overrides, variable: &'a Variable) -> &'a str {
    values
        .get(&variable.key)
        .map(String::as_str)
        .unwrap_or(&variable.default_value)
}

fn substitute<'a>(caps: &Captures<'a>, overrides: &'a Overrides) -> &'a str {
    match overrides.get(capture(caps, 1)) {
        Some(value) => value.as_str(),
        None => capture(caps, 2),
    }
}

fn capture<'a>(caps: &Captures<'a>, index: usize) -> &'a str {
    caps.get(index).map_or("", |m| m.as_str())
}
