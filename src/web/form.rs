use askama::Template;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ReceiptError, Result};
use crate::receipt::ReceiptRequest;

/// Raw form submission. Every field arrives as text so that missing and
/// malformed values can be reported together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReceiptForm {
    pub tenant_name: String,
    pub amount: String,
    pub start_date: String,
    pub end_date: String,
    pub property_address: String,
    pub owner_name: String,
    pub owner_address: String,
    pub owner_pan: String,
}

impl ReceiptForm {
    /// Presence-check and parse the submission.
    pub fn to_request(&self) -> Result<ReceiptRequest> {
        let mut problems = Vec::new();

        for (label, value) in [
            ("Tenant name", &self.tenant_name),
            ("Property address", &self.property_address),
            ("Owner name", &self.owner_name),
            ("Owner address", &self.owner_address),
            ("Owner PAN", &self.owner_pan),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{label} is required"));
            }
        }

        let amount = match self.amount.trim() {
            "" => {
                problems.push("Amount is required".to_string());
                None
            }
            raw => match raw.parse::<u64>() {
                Ok(amount) => Some(amount),
                Err(_) => {
                    problems.push("Amount must be a whole number of rupees, 0 or more".to_string());
                    None
                }
            },
        };

        let start_date = parse_date("Start date", &self.start_date, &mut problems);
        let end_date = parse_date("End date", &self.end_date, &mut problems);

        let (Some(amount), Some(start_date), Some(end_date)) = (amount, start_date, end_date)
        else {
            return Err(ReceiptError::Validation(problems));
        };
        if !problems.is_empty() {
            return Err(ReceiptError::Validation(problems));
        }

        let request = ReceiptRequest {
            tenant_name: self.tenant_name.trim().to_string(),
            amount,
            start_date,
            end_date,
            property_address: self.property_address.trim().to_string(),
            owner_name: self.owner_name.trim().to_string(),
            owner_address: self.owner_address.trim().to_string(),
            owner_pan: self.owner_pan.trim().to_string(),
        };
        request.validate()?;
        Ok(request)
    }
}

fn parse_date(label: &str, raw: &str, problems: &mut Vec<String>) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        problems.push(format!("{label} is required"));
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            problems.push(format!("{label} must be a date in YYYY-MM-DD format"));
            None
        }
    }
}

/// What to show above the form.
#[derive(Debug)]
pub enum Notice {
    Blank,
    Warning(Vec<String>),
    Error(&'static str),
    Download(Download),
}

pub const DOWNLOAD_NAME: &str = "Rent_Receipts.pdf";

#[derive(Debug)]
pub struct Download {
    pub months: usize,
    pub pdf_base64: String,
}

impl Download {
    pub fn file_name(&self) -> &'static str {
        DOWNLOAD_NAME
    }
}

/// The whole HTML page: notice, then the form filled with the last
/// submission. Submitted text is escaped by the template.
#[derive(Template)]
#[template(path = "receipt_form.html")]
pub struct FormPage {
    pub form: ReceiptForm,
    pub notice: Notice,
}

impl FormPage {
    pub fn new(form: ReceiptForm, notice: Notice) -> Self {
        Self { form, notice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ReceiptForm {
        ReceiptForm {
            tenant_name: " Asha Verma ".to_string(),
            amount: "50000".to_string(),
            start_date: "2024-01-15".to_string(),
            end_date: "2024-03-10".to_string(),
            property_address: "Flat 12B, MG Road".to_string(),
            owner_name: "Rajesh Kumar".to_string(),
            owner_address: "44 Residency Road".to_string(),
            owner_pan: "ABCDE1234F".to_string(),
        }
    }

    #[test]
    fn test_complete_form_parses() {
        let request = filled().to_request().unwrap();
        assert_eq!(request.tenant_name, "Asha Verma");
        assert_eq!(request.amount, 50000);
        assert_eq!(request.end_date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_empty_form_lists_every_field() {
        match ReceiptForm::default().to_request() {
            Err(ReceiptError::Validation(problems)) => assert_eq!(problems.len(), 8),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_amount_and_date() {
        let mut form = filled();
        form.amount = "-10".to_string();
        form.start_date = "15/01/2024".to_string();
        match form.to_request() {
            Err(ReceiptError::Validation(problems)) => {
                assert_eq!(
                    problems,
                    vec![
                        "Amount must be a whole number of rupees, 0 or more",
                        "Start date must be a date in YYYY-MM-DD format",
                    ]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_text_with_valid_numbers_still_rejected() {
        let mut form = filled();
        form.owner_pan = "  ".to_string();
        assert!(matches!(
            form.to_request(),
            Err(ReceiptError::Validation(p)) if p == vec!["Owner PAN is required"]
        ));
    }

    #[test]
    fn test_reversed_range() {
        let mut form = filled();
        form.end_date = "2023-12-31".to_string();
        assert!(matches!(
            form.to_request(),
            Err(ReceiptError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_download_notice_links_pdf() {
        let html = FormPage::new(
            filled(),
            Notice::Download(Download {
                months: 3,
                pdf_base64: "JVBERi0+/w==".to_string(),
            }),
        )
        .render()
        .unwrap();
        assert!(html.contains(r#"download="Rent_Receipts.pdf""#));
        assert!(html.contains("data:application/pdf;base64,JVBERi0+/w=="));
        assert!(html.contains("Generated 3 receipt(s)"));
    }

    #[test]
    fn test_page_keeps_submitted_values_escaped() {
        let mut form = filled();
        form.tenant_name = "Asha <b>Verma".to_string();
        form.owner_name = r#"Rajesh "Raj" Kumar"#.to_string();
        form.owner_address = "44 Residency Road\r\nBengaluru & Co".to_string();

        let html = FormPage::new(form, Notice::Warning(vec!["Owner PAN is required".to_string()]))
            .render()
            .unwrap();
        assert!(html.contains(r#"value="Asha &lt;b&gt;Verma""#));
        assert!(html.contains("Rajesh &quot;Raj&quot; Kumar"));
        assert!(html.contains("Bengaluru &amp; Co</textarea>"));
        assert!(html.contains(r#"value="2024-01-15""#));
        assert!(html.contains("<li>Owner PAN is required</li>"));
        assert!(!html.contains("<b>Verma"));
    }

    #[test]
    fn test_blank_page_has_empty_fields() {
        let html = FormPage::new(ReceiptForm::default(), Notice::Blank)
            .render()
            .unwrap();
        assert!(html.contains(r#"name="tenant_name" value="""#));
        assert!(!html.contains(r#"class="notice"#));
    }

    #[test]
    fn test_multi_line_owner_address_renders_on_one_row() {
        let mut form = filled();
        form.owner_address = "44 Residency Road\r\nBengaluru".to_string();
        let request = form.to_request().unwrap();

        let document = crate::receipt::build(&request).unwrap();
        for page in document.pages() {
            assert!(page.contains_text("Address: 44 Residency Road, Bengaluru"));
        }
    }
}
