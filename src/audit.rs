//! Per-submission audit records for the interactive form.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::error::{ReceiptError, Result};
use crate::receipt::ReceiptRequest;

#[derive(Debug, Serialize)]
pub struct AuditRecord<'a> {
    #[serde(flatten)]
    pub request: &'a ReceiptRequest,
    pub generated_at: String,
    pub request_id: String,
}

/// Eight hex digits identifying one submission.
pub fn new_request_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Write `receipt_config_<timestamp>_<id>.json` into `logs_dir`, creating the
/// directory if needed. Never overwrites an existing record.
pub fn write_audit_log(
    logs_dir: &Path,
    request: &ReceiptRequest,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    fs::create_dir_all(logs_dir)?;

    let request_id = new_request_id();
    let record = AuditRecord {
        request,
        generated_at: now.to_rfc3339(),
        request_id: request_id.clone(),
    };
    let content = serde_json::to_string_pretty(&record).map_err(|e| {
        ReceiptError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;

    let file_name = format!(
        "receipt_config_{}_{}.json",
        now.format("%Y%m%d_%H%M%S"),
        request_id
    );
    let path = logs_dir.join(file_name);

    let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
    file.write_all(content.as_bytes())?;

    info!(request_id = %request_id, path = %path.display(), "recorded receipt request");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::sample_request;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_request_id_is_eight_hex_digits() {
        let id = new_request_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_record_contents_and_name() {
        let temp = TempDir::new().unwrap();
        let logs = temp.path().join("logs");
        let now = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 5).unwrap();

        let path = write_audit_log(&logs, &sample_request(), now).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("receipt_config_20240301_093005_"));
        assert!(name.ends_with(".json"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["tenant_name"], "Asha Verma");
        assert_eq!(json["amount"], 50000);
        assert_eq!(json["start_date"], "2024-01-15");
        assert_eq!(json["owner_pan"], "ABCDE1234F");
        assert_eq!(json["generated_at"], now.to_rfc3339());
        assert!(name.contains(json["request_id"].as_str().unwrap()));
    }

    #[test]
    fn test_same_second_submissions_do_not_collide() {
        let temp = TempDir::new().unwrap();
        let now = Local::now();
        let first = write_audit_log(temp.path(), &sample_request(), now).unwrap();
        let second = write_audit_log(temp.path(), &sample_request(), now).unwrap();
        assert_ne!(first, second);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 2);
    }
}
