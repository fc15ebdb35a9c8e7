use std::collections::HashMap;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::model::draft::Draft;
use crate::model::task::Priority;
use crate::time::parse_human_date;

/// Keys accepted in `key:value` form when filling a draft.
pub const DRAFT_KEYS: [&str; 4] = ["name", "description", "due", "priority"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic()) {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    let key = key.to_lowercase();

    // 1. Exact match
    if candidates.contains(&key.as_str()) {
        return Ok(key);
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key.as_str()))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Split a command line on whitespace, keeping double-quoted runs together.
///
/// Quotes may start mid-word (`desc:"2% milk"` yields `desc:2% milk`).
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(anyhow!("Unterminated quote in: {}", line));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Write parsed words into `draft`. Free words replace the name.
///
/// Returns one warning per key or value that could not be applied; the rest
/// of the input is still applied.
pub fn apply_to_draft(parsed: ParsedInput, draft: &mut Draft, today: NaiveDate) -> Vec<String> {
    let mut warnings = Vec::new();

    if !parsed.name.is_empty() {
        draft.name = parsed.name;
    }

    // Sorted for stable warning order
    let mut entries: Vec<_> = parsed.metadata.into_iter().collect();
    entries.sort();

    for (key, value) in entries {
        let full_key = match expand_key(&key, &DRAFT_KEYS) {
            Ok(k) => k,
            Err(e) => {
                warnings.push(e.to_string());
                continue;
            }
        };
        match full_key.as_str() {
            "name" => draft.name = value,
            "description" => draft.description = value,
            "due" => match parse_human_date(&value, today) {
                Ok(d) => draft.due_date = Some(d),
                Err(e) => warnings.push(format!("Invalid due date '{}': {}", value, e)),
            },
            "priority" => match value.parse::<Priority>() {
                Ok(p) => draft.priority = p,
                Err(e) => warnings.push(format!("{}", e)),
            },
            _ => {}
        }
    }

    warnings
}
