use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::months::month_span;
use crate::error::{ReceiptError, Result};

/// Longest run of receipts one request may produce (twenty years).
pub const MAX_MONTHS: i64 = 240;

/// Everything needed to produce a run of monthly receipts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReceiptRequest {
    pub tenant_name: String,
    pub amount: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_address: String,
    pub owner_name: String,
    pub owner_address: String,
    pub owner_pan: String,
}

impl ReceiptRequest {
    /// Load a request from a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReceiptError::ConfigFileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ReceiptError::RequestParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Presence checks on every text field plus the date range, which must
    /// be in order and span at most [`MAX_MONTHS`] months.
    pub fn validate(&self) -> Result<()> {
        let text_fields = [
            ("tenant_name", &self.tenant_name),
            ("property_address", &self.property_address),
            ("owner_name", &self.owner_name),
            ("owner_address", &self.owner_address),
            ("owner_pan", &self.owner_pan),
        ];

        let missing: Vec<String> = text_fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| format!("{name} is required"))
            .collect();

        if !missing.is_empty() {
            return Err(ReceiptError::Validation(missing));
        }

        if self.start_date > self.end_date {
            return Err(ReceiptError::InvalidRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        check_month_limit(self.start_date, self.end_date)
    }

    /// `Rent_Receipts_<start>_to_<end>.pdf`
    pub fn output_file_name(&self) -> String {
        format!(
            "Rent_Receipts_{}_to_{}.pdf",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}

/// Reject ranges touching more than [`MAX_MONTHS`] calendar months.
pub fn check_month_limit(start: NaiveDate, end: NaiveDate) -> Result<()> {
    let months = month_span(start, end);
    if months > MAX_MONTHS {
        return Err(ReceiptError::Validation(vec![format!(
            "Date range covers {months} months; at most {MAX_MONTHS} receipts can be generated at once"
        )]));
    }
    Ok(())
}

/// Sample request written by `receipt init`
pub const REQUEST_TEMPLATE: &str = r#"{
  "tenant_name": "Asha Verma",
  "amount": 25000,
  "start_date": "2024-04-01",
  "end_date": "2025-03-31",
  "property_address": "Flat 12B, Lakeview Apartments, MG Road, Bengaluru 560001",
  "owner_name": "Rajesh Kumar",
  "owner_address": "44 Residency Road, Bengaluru 560025",
  "owner_pan": "ABCDE1234F"
}
"#;

#[cfg(test)]
pub(crate) fn sample_request() -> ReceiptRequest {
    ReceiptRequest {
        tenant_name: "Asha Verma".to_string(),
        amount: 50000,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        property_address: "Flat 12B, Lakeview Apartments, MG Road, Bengaluru".to_string(),
        owner_name: "Rajesh Kumar".to_string(),
        owner_address: "44 Residency Road, Bengaluru".to_string(),
        owner_pan: "ABCDE1234F".to_string(),
    }
}
