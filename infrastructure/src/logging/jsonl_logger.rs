//! JSONL file writer for invocation events.
//!
//! Each [`InvocationEvent`] is serialized as a single JSON line with a
//! `timestamp`, appended to the file via a buffered writer.

use biznisweb_application::ports::invocation_logger::{InvocationEvent, InvocationLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL invocation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing file.
/// Flushes on `Drop`.
pub struct JsonlInvocationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlInvocationLogger {
    /// Create a new logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create invocation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open invocation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvocationLogger for JsonlInvocationLogger {
    fn log(&self, event: InvocationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match serde_json::to_value(&event) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return,
        };
        record.insert("timestamp".to_string(), serde_json::Value::String(timestamp));

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlInvocationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn event(tool: &str, error_code: Option<&str>) -> InvocationEvent {
        InvocationEvent {
            tool: tool.to_string(),
            success: error_code.is_none(),
            error_code: error_code.map(str::to_string),
            duration_ms: 12,
            upstream_requests: 1,
        }
    }

    fn read(path: &Path) -> String {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("calls.jsonl");
        let logger = JsonlInvocationLogger::new(&path).unwrap();
        assert_eq!(logger.path(), path);

        logger.log(event("get_order", None));
        logger.log(event("get_invoice", Some("NOT_FOUND")));
        drop(logger);

        let content = read(&path);
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["tool"], "get_order");
        assert_eq!(first["success"], true);
        assert!(first.get("error_code").is_none());
        assert!(first["timestamp"].is_string());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["error_code"], "NOT_FOUND");
        assert_eq!(second["upstream_requests"], 1);
    }

    #[test]
    fn test_jsonl_logger_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.jsonl");

        JsonlInvocationLogger::new(&path).unwrap().log(event("list_currencies", None));
        JsonlInvocationLogger::new(&path).unwrap().log(event("list_currencies", None));

        assert_eq!(read(&path).lines().count(), 2);
    }

    #[test]
    fn test_jsonl_logger_returns_none_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlInvocationLogger::new(dir.path()).is_none());
    }
}
