pub mod amount;
mod generator;
mod months;
mod request;
mod words;

pub use generator::{build, generate_receipts, seal};
pub use months::{expand, month_span, MonthLabel};
pub use request::{check_month_limit, ReceiptRequest, MAX_MONTHS, REQUEST_TEMPLATE};
pub use words::to_words;

#[cfg(test)]
pub(crate) use request::sample_request;
