pub mod audit;
pub mod config;
pub mod error;
pub mod pdf;
pub mod receipt;
pub mod web;

pub use config::Settings;
pub use error::{ReceiptError, Result};
pub use pdf::{Document, ReceiptPage};
pub use receipt::{build, expand, generate_receipts, seal, to_words, MonthLabel, ReceiptRequest};
