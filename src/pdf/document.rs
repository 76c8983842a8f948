use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use std::path::Path;

use super::canvas::{page_height_pt, page_width_pt};
use super::fonts::FontStyle;
use crate::error::{ReceiptError, Result};
use crate::receipt::MonthLabel;

/// One rendered receipt.
#[derive(Debug, Clone)]
pub struct ReceiptPage {
    /// 1-based receipt number within the document
    pub number: usize,
    pub month: MonthLabel,
    pub display_date: String,
    pub(crate) text: Vec<String>,
    pub(crate) operations: Vec<Operation>,
}

impl ReceiptPage {
    /// The strings drawn on the page, top to bottom.
    pub fn text(&self) -> &[String] {
        &self.text
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text.iter().any(|line| line == needle)
    }
}

/// Append-only collection of receipt pages, serialized to PDF by [`Document::seal`].
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<ReceiptPage>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[ReceiptPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub(crate) fn push(&mut self, page: ReceiptPage) {
        self.pages.push(page);
    }

    /// Serialize all pages into a PDF file image.
    pub fn seal(&self) -> Result<Vec<u8>> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for style in FontStyle::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => style.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(style.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content = Content {
                operations: page.operations.clone(),
            };
            let encoded = content
                .encode()
                .map_err(|e| ReceiptError::Render(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), page_width_pt().into(), page_height_pt().into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal("Rent Receipts"),
            "Producer" => Object::string_literal(concat!("rent-receipt ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| ReceiptError::Render(e.to_string()))?;
        Ok(bytes)
    }

    /// Seal and write the PDF to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let bytes = self.seal()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::{build, sample_request};

    #[test]
    fn test_empty_document_still_seals() {
        let bytes = Document::new().seal().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_sealed_pdf_reloads_with_every_page() {
        let document = build(&sample_request()).unwrap();
        let bytes = document.seal().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 3);
    }

    #[test]
    fn test_seal_is_repeatable() {
        let document = build(&sample_request()).unwrap();
        let first = document.seal().unwrap();
        let second = document.seal().unwrap();
        assert_eq!(first, second);
        assert_eq!(document.len(), 3);
    }

    #[test]
    fn test_write_to_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("out.pdf");
        build(&sample_request()).unwrap().write_to(&path).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF-"));
    }
}
