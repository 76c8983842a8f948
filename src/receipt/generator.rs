use std::path::{Path, PathBuf};
use tracing::info;

use super::months::expand;
use super::request::ReceiptRequest;
use crate::error::Result;
use crate::pdf::{render, Document};

/// Validate `request` and render one receipt per month it covers.
pub fn build(request: &ReceiptRequest) -> Result<Document> {
    request.validate()?;

    let months = expand(request.start_date, request.end_date)?;
    let mut document = Document::new();
    for (index, month) in months.into_iter().enumerate() {
        let display_date = month.display_date();
        render(&mut document, index, request, month, &display_date)?;
    }

    Ok(document)
}

/// Serialize a built document to PDF bytes.
pub fn seal(document: &Document) -> Result<Vec<u8>> {
    document.seal()
}

/// Build the receipts for `request` and write them to `output_path`, or to
/// `Rent_Receipts_<start>_to_<end>.pdf` inside `output_dir` when no explicit
/// path is given. Returns the path written.
pub fn generate_receipts(
    request: &ReceiptRequest,
    output_dir: &Path,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let document = build(request)?;

    let pdf_path = match output_path {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(output_dir)?;
            output_dir.join(request.output_file_name())
        }
    };

    document.write_to(&pdf_path)?;
    info!(
        pages = document.len(),
        path = %pdf_path.display(),
        "wrote rent receipts"
    );

    Ok(pdf_path)
}
