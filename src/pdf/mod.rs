pub mod canvas;
mod document;
pub mod fonts;
mod render;

pub use document::{Document, ReceiptPage};
pub use render::render;
