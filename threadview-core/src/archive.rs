use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, ThreadviewError};
use crate::model::{Archive, Message, Node, Thread, UNKNOWN_ROLE};

pub fn load_archive(path: &Path) -> Result<Archive> {
    let raw = read_archive_raw(path)?;
    parse_archive(path, &raw)
}

pub fn read_archive_raw(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| ThreadviewError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.is_empty() {
        return Err(ThreadviewError::EmptyArchiveFile {
            path: path.to_path_buf(),
        });
    }

    String::from_utf8(bytes).map_err(|_| ThreadviewError::NonUtf8ArchiveFile {
        path: path.to_path_buf(),
    })
}

/// Builds an [`Archive`] from an exported conversations document.
///
/// Only the top-level shape is validated. Threads and nodes that do not
/// look like the export format are kept as empty or unrenderable entries
/// rather than failing the load.
pub fn parse_archive(path: &Path, raw: &str) -> Result<Archive> {
    let value =
        serde_json::from_str::<Value>(raw).map_err(|source| ThreadviewError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(items) = value.as_array() else {
        return Err(ThreadviewError::InvalidArchive {
            path: path.to_path_buf(),
            reason: "top-level value must be an array of threads".to_string(),
        });
    };

    let mut threads = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let Some(thread) = item.as_object() else {
            debug!(index = idx, "skipping archive entry that is not an object");
            continue;
        };
        threads.push(extract_thread(thread));
    }

    debug!(threads = threads.len(), path = %path.display(), "loaded archive");
    Ok(Archive::new(threads))
}

fn extract_thread(thread: &Map<String, Value>) -> Thread {
    let title = thread
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let Some(mapping) = thread.get("mapping").and_then(Value::as_object) else {
        debug!(title = %title, "thread has no mapping object");
        return Thread {
            title,
            nodes: Vec::new(),
        };
    };

    let nodes = mapping
        .iter()
        .map(|(id, node)| Node {
            id: id.clone(),
            message: node.get("message").and_then(extract_message),
        })
        .collect();

    Thread { title, nodes }
}

fn extract_message(message: &Value) -> Option<Message> {
    if !message.is_object() {
        return None;
    }

    let role = message
        .get("author")
        .and_then(|author| author.get("role"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ROLE)
        .to_string();

    let parts = message
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| parts.iter().filter_map(part_text).collect());

    Some(Message { role, parts })
}

// Attachment pointers and other structured parts carry no text.
fn part_text(part: &Value) -> Option<String> {
    match part {
        Value::String(text) => Some(text.clone()),
        Value::Null => Some(String::new()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
