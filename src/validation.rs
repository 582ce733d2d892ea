// src/validation.rs
//! Advisory checks over ranked output. Nothing here fails: every function
//! returns the full list of problems found so callers can log and carry on.

use std::collections::BTreeSet;

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::models::{RankedSection, ResultRecord};
use crate::persona::Persona;

const SECTION_FIELDS: [&str; 5] = [
    "title",
    "content",
    "page_number",
    "importance_rank",
    "relevance_score",
];

const RECORD_FIELDS: [&str; 6] = [
    "document",
    "persona",
    "job_to_be_done",
    "processing_timestamp",
    "total_sections",
    "sections",
];

const MIN_TITLE_LEN: usize = 2;
const MIN_CONTENT_LEN: usize = 10;

/// Checks ranked sections for consistency and completeness.
///
/// The rank check expects exactly `{1..N}` for `N` sections, so it must be
/// given the full ranked list, not a truncated prefix.
pub fn validate_sections(sections: &[RankedSection]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut actual_ranks = BTreeSet::new();

    for (i, section) in sections.iter().enumerate() {
        let n = i + 1;
        actual_ranks.insert(section.importance_rank);

        let score = section.relevance_score;
        if !score.is_finite() {
            errors.push(format!("Section {} relevance_score must be a number, got {}", n, score));
        } else if !(0.0..=1.0).contains(&score) {
            errors.push(format!(
                "Section {} relevance_score must be between 0 and 1, got {}",
                n, score
            ));
        }

        if section.page_number < 1 {
            errors.push(format!(
                "Section {} page_number must be positive integer, got {}",
                n, section.page_number
            ));
        }

        if section.title.trim().chars().count() < MIN_TITLE_LEN {
            errors.push(format!("Section {} title is too short or empty", n));
        }
        if section.content.trim().chars().count() < MIN_CONTENT_LEN {
            errors.push(format!("Section {} content is too short or empty", n));
        }
    }

    let expected_ranks: BTreeSet<u32> = (1..=sections.len() as u32).collect();
    if actual_ranks != expected_ranks || actual_ranks.len() != sections.len() {
        errors.push(format!(
            "Importance ranks are not sequential: expected {:?}, got {:?}",
            expected_ranks,
            sections.iter().map(|s| s.importance_rank).collect::<Vec<_>>()
        ));
    }

    errors
}

/// Checks a serialized result record against the output schema.
pub fn validate_structure(record: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(obj) = record.as_object() else {
        errors.push("Record must be a JSON object".to_string());
        return errors;
    };

    for field in RECORD_FIELDS {
        if !obj.contains_key(field) {
            errors.push(format!("Record missing required field: {}", field));
        }
    }

    for field in ["document", "job_to_be_done"] {
        if let Some(v) = obj.get(field) {
            if !v.is_string() {
                errors.push(format!("{} must be a string, got {}", field, v));
            }
        }
    }

    if let Some(v) = obj.get("persona") {
        match v.as_str() {
            Some(name) if name.parse::<Persona>().is_ok() => {}
            _ => errors.push(format!(
                "persona must be one of [executive, technical, marketing, investor], got {}",
                v
            )),
        }
    }

    if let Some(v) = obj.get("processing_timestamp") {
        match v.as_str() {
            Some(ts) if DateTime::parse_from_rfc3339(ts).is_ok() => {}
            _ => errors.push(format!("processing_timestamp must be an ISO-8601 date-time, got {}", v)),
        }
    }

    if let Some(v) = obj.get("total_sections") {
        if v.as_u64().is_none() {
            errors.push(format!("total_sections must be a non-negative integer, got {}", v));
        }
    }

    if let Some(v) = obj.get("sections") {
        match v.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    check_section_value(i + 1, item, &mut errors);
                }
            }
            None => errors.push(format!("sections must be an array, got {}", v)),
        }
    }

    errors
}

/// Serializes a typed record and runs `validate_structure` on it.
pub fn validate_record(record: &ResultRecord) -> Vec<String> {
    match serde_json::to_value(record) {
        Ok(value) => validate_structure(&value),
        Err(e) => vec![format!("Record could not be serialized: {}", e)],
    }
}

fn check_section_value(n: usize, item: &Value, errors: &mut Vec<String>) {
    let Some(obj) = item.as_object() else {
        errors.push(format!("Section {} must be an object", n));
        return;
    };

    for field in SECTION_FIELDS {
        if !obj.contains_key(field) {
            errors.push(format!("Section {} missing required field: {}", n, field));
        }
    }

    for field in ["title", "content"] {
        if let Some(v) = obj.get(field) {
            match v.as_str() {
                Some(s) if !s.is_empty() => {}
                Some(_) => errors.push(format!("Section {} {} must not be empty", n, field)),
                None => errors.push(format!("Section {} {} must be a string, got {}", n, field, v)),
            }
        }
    }

    for field in ["page_number", "importance_rank"] {
        check_positive_integer(n, obj, field, errors);
    }

    if let Some(v) = obj.get("relevance_score") {
        match v.as_f64() {
            Some(score) if (0.0..=1.0).contains(&score) => {}
            Some(score) => errors.push(format!(
                "Section {} relevance_score must be between 0 and 1, got {}",
                n, score
            )),
            None => errors.push(format!("Section {} relevance_score must be a number, got {}", n, v)),
        }
    }
}

fn check_positive_integer(n: usize, obj: &Map<String, Value>, field: &str, errors: &mut Vec<String>) {
    if let Some(v) = obj.get(field) {
        match v.as_u64() {
            Some(x) if x >= 1 => {}
            _ => errors.push(format!("Section {} {} must be positive integer, got {}", n, field, v)),
        }
    }
}
