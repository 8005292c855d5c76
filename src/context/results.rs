//! Scanning completed batch results for downstream context sections

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

const SECTION_HEADING: &str = "### Downstream Context\n";
const SUMMARY_FILE: &str = "summary.json";

/// One result file under `<state_dir>/parallel/<batch>/results/`
#[derive(Debug, Clone)]
pub(super) struct ResultEntry {
    pub(super) path: PathBuf,
    /// `phase_id` recorded in the result JSON, if any
    pub(super) phase_id: Option<String>,
    pub(super) section: Option<String>,
}

/// Text after a `### Downstream Context` heading, up to the next `##`-level
/// heading or the end. Blank sections count as absent.
pub fn extract_section(text: &str) -> Option<String> {
    let start = text.find(SECTION_HEADING)? + SECTION_HEADING.len();
    let rest = &text[start..];
    let end = rest.find("\n##").unwrap_or(rest.len());
    let section = rest[..end].trim();
    (!section.is_empty()).then(|| section.to_string())
}

/// Collect every result file, batches and files in name order
pub(super) fn scan_results(state_dir: &Path) -> Vec<ResultEntry> {
    let parallel_dir = state_dir.join("parallel");
    let mut entries = Vec::new();

    for batch_dir in sorted_children(&parallel_dir, |p| p.is_dir()) {
        let results_dir = batch_dir.join("results");
        let files = sorted_children(&results_dir, |p| {
            p.is_file()
                && p.extension().is_some_and(|ext| ext == "json")
                && p.file_name().is_some_and(|name| name != SUMMARY_FILE)
        });

        for path in files {
            match fs::read_to_string(&path) {
                Ok(content) => entries.push(parse_result(path, &content)),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable result file"),
            }
        }
    }

    debug!(dir = %parallel_dir.display(), count = entries.len(), "scanned batch results");
    entries
}

fn sorted_children(dir: &Path, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let Ok(read) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut children: Vec<PathBuf> = read
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| keep(path.as_path()))
        .collect();
    children.sort();
    children
}

fn parse_result(path: PathBuf, content: &str) -> ResultEntry {
    match serde_json::from_str::<Value>(content) {
        Ok(json) => {
            let phase_id = match json.get("phase_id") {
                Some(Value::String(id)) => Some(id.clone()),
                Some(Value::Number(id)) => Some(id.to_string()),
                _ => None,
            };
            let section = section_in_value(&json).or_else(|| extract_section(content));
            ResultEntry {
                path,
                phase_id,
                section,
            }
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "result is not JSON, searching raw text");
            ResultEntry {
                path,
                phase_id: None,
                section: extract_section(content),
            }
        }
    }
}

/// First string anywhere in the JSON value that carries a section
fn section_in_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => extract_section(text),
        Value::Array(items) => items.iter().find_map(section_in_value),
        Value::Object(map) => map.values().find_map(section_in_value),
        _ => None,
    }
}
