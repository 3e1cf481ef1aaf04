//! Machine-readable log of submitted writes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// One accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmissionRecord {
    pub chain_id: u64,
    pub address: String,
    pub mode: String,
    pub method: String,
    pub value: String,
    pub tx_hash: Option<String>,
}

/// Append `record` to the `submissions` array in the JSON file at `path`.
///
/// Missing or empty files start a new document; the write goes through a temp file.
pub fn append_record(path: &Path, record: &SubmissionRecord) -> Result<()> {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let existing = if path.exists() {
        fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?
    } else {
        String::new()
    };

    let mut root: Value = if existing.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(&existing)
            .with_context(|| format!("failed parsing JSON in {}", path.display()))?
    };
    if !root.is_object() {
        root = json!({});
    }
    if !root.get("submissions").is_some_and(Value::is_array) {
        root["submissions"] = json!([]);
    }

    let mut entry = serde_json::to_value(record).context("failed serialising submission")?;
    entry["submitted_at"] = json!(now);

    if let Some(list) = root["submissions"].as_array_mut() {
        list.push(entry);
    }
    root["updated_at"] = json!(now);

    write_json_atomic(path, &root)
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let serialised = serde_json::to_string_pretty(value).context("failed serialising JSON")?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
