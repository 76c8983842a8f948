//! A cursor-driven A4 page builder. Coordinates are millimetres from the
//! top-left corner; drawing calls are translated into PDF content-stream
//! operations in points from the bottom-left.

use lopdf::content::Operation;
use lopdf::Object;

use super::fonts::{encode_win_ansi, FontStyle};
use crate::error::{ReceiptError, Result};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;
/// Content may not extend below this distance from the bottom edge.
pub const BOTTOM_MARGIN_MM: f32 = 15.0;
/// Horizontal padding inside a cell.
const CELL_PADDING_MM: f32 = 1.0;
/// Points per millimetre.
const K: f32 = 72.0 / 25.4;

pub fn page_width_pt() -> f32 {
    PAGE_WIDTH_MM * K
}

pub fn page_height_pt() -> f32 {
    PAGE_HEIGHT_MM * K
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn operands(self) -> Vec<Object> {
        vec![
            (self.0 as f32 / 255.0).into(),
            (self.1 as f32 / 255.0).into(),
            (self.2 as f32 / 255.0).into(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Where the cursor goes after a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// To the right edge of the cell, same row.
    Right,
    /// To the left margin of the next row.
    NewLine,
}

pub struct Canvas {
    operations: Vec<Operation>,
    text: Vec<String>,
    x: f32,
    y: f32,
    font: FontStyle,
    font_size: f32,
    text_color: Rgb,
    fill_color: Rgb,
    draw_color: Rgb,
    line_width: f32,
    overflow: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
            text: Vec::new(),
            x: MARGIN_MM,
            y: MARGIN_MM,
            font: FontStyle::Regular,
            font_size: 12.0,
            text_color: Rgb(0, 0, 0),
            fill_color: Rgb(0, 0, 0),
            draw_color: Rgb(0, 0, 0),
            line_width: 0.2,
            overflow: false,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_xy(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_font(&mut self, font: FontStyle, size: f32) {
        self.font = font;
        self.font_size = size;
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    pub fn set_line_width(&mut self, width_mm: f32) {
        self.line_width = width_mm;
    }

    /// Move to the left margin, `h` below the current row.
    pub fn ln(&mut self, h: f32) {
        self.x = MARGIN_MM;
        self.y += h;
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.operations.push(Operation::new("RG", self.draw_color.operands()));
        self.operations
            .push(Operation::new("w", vec![(self.line_width * K).into()]));
        self.operations
            .push(Operation::new("m", vec![(x1 * K).into(), self.to_pdf_y(y1).into()]));
        self.operations
            .push(Operation::new("l", vec![(x2 * K).into(), self.to_pdf_y(y2).into()]));
        self.operations.push(Operation::new("S", vec![]));
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.operations.push(Operation::new("rg", self.fill_color.operands()));
        self.operations.push(Operation::new(
            "re",
            vec![
                (x * K).into(),
                self.to_pdf_y(y + h).into(),
                (w * K).into(),
                (h * K).into(),
            ],
        ));
        self.operations.push(Operation::new("f", vec![]));
    }

    /// Width of `text` in millimetres with the current font.
    pub fn text_width(&self, text: &str) -> f32 {
        self.font
            .text_width(&encode_win_ansi(text), self.font_size)
            / K
    }

    /// Draw a single line of text in a `w` x `h` box at the cursor, vertically
    /// centred, then move the cursor.
    pub fn cell(&mut self, w: f32, h: f32, text: &str, align: Align, next: Next) {
        self.check_fits(h);

        if !text.is_empty() {
            let text_w = self.text_width(text);
            let dx = match align {
                Align::Left => CELL_PADDING_MM,
                Align::Center => (w - text_w) / 2.0,
                Align::Right => w - CELL_PADDING_MM - text_w,
            };
            let font_size_mm = self.font_size / K;
            let baseline = self.y + 0.5 * h + 0.3 * font_size_mm;
            self.draw_text(self.x + dx, baseline, text);
        }

        match next {
            Next::Right => self.x += w,
            Next::NewLine => {
                self.x = MARGIN_MM;
                self.y += h;
            }
        }
    }

    /// Word-wrap `text` into rows of width `w`, each `h` tall, starting at
    /// the cursor's column. Leaves the cursor at the left margin below the
    /// last row and returns the number of rows drawn.
    pub fn multi_cell(&mut self, w: f32, h: f32, text: &str) -> usize {
        let column = self.x;
        let rows = self.wrap(text, w - 2.0 * CELL_PADDING_MM);
        for row in &rows {
            self.x = column;
            self.cell(w, h, row, Align::Left, Next::NewLine);
        }
        self.x = MARGIN_MM;
        rows.len()
    }

    /// Split `text` into rows no wider than `max_w` millimetres, breaking on
    /// whitespace, on explicit newlines, and inside words that are too long.
    pub fn wrap(&self, text: &str, max_w: f32) -> Vec<String> {
        let mut rows = Vec::new();

        for paragraph in text.lines() {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{current} {word}")
                };

                if self.text_width(&candidate) <= max_w {
                    current = candidate;
                    continue;
                }

                if !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                }

                if self.text_width(word) <= max_w {
                    current = word.to_string();
                } else {
                    for ch in word.chars() {
                        let mut widened = current.clone();
                        widened.push(ch);
                        if !current.is_empty() && self.text_width(&widened) > max_w {
                            rows.push(std::mem::replace(&mut current, ch.to_string()));
                        } else {
                            current = widened;
                        }
                    }
                }
            }
            rows.push(current);
        }

        if rows.is_empty() {
            rows.push(String::new());
        }
        rows
    }

    /// Every string drawn so far, in drawing order.
    pub fn text(&self) -> &[String] {
        &self.text
    }

    /// Consume the canvas, returning its operations and drawn strings. Fails
    /// if anything was placed below the bottom margin.
    pub fn finish(self) -> Result<(Vec<Operation>, Vec<String>)> {
        if self.overflow {
            return Err(ReceiptError::Render(
                "receipt content does not fit on a single page".to_string(),
            ));
        }
        Ok((self.operations, self.text))
    }

    fn draw_text(&mut self, x: f32, baseline: f32, text: &str) {
        self.operations
            .push(Operation::new("rg", self.text_color.operands()));
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec![self.font.resource_name().into(), self.font_size.into()],
        ));
        self.operations.push(Operation::new(
            "Td",
            vec![(x * K).into(), self.to_pdf_y(baseline).into()],
        ));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(text))],
        ));
        self.operations.push(Operation::new("ET", vec![]));
        self.text.push(text.to_string());
    }

    fn check_fits(&mut self, h: f32) {
        if self.y + h > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
            self.overflow = true;
        }
    }

    fn to_pdf_y(&self, y_mm: f32) -> f32 {
        (PAGE_HEIGHT_MM - y_mm) * K
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operators(ops: &[Operation]) -> Vec<&str> {
        ops.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn test_cell_moves_cursor() {
        let mut canvas = Canvas::new();
        canvas.cell(50.0, 10.0, "Amount:", Align::Left, Next::Right);
        assert_eq!((canvas.x(), canvas.y()), (60.0, 10.0));

        canvas.cell(140.0, 10.0, "Rs. 1,000/-", Align::Left, Next::NewLine);
        assert_eq!((canvas.x(), canvas.y()), (MARGIN_MM, 20.0));
        assert_eq!(canvas.text(), ["Amount:", "Rs. 1,000/-"]);
    }

    #[test]
    fn test_empty_cell_draws_nothing() {
        let mut canvas = Canvas::new();
        canvas.cell(50.0, 10.0, "", Align::Left, Next::Right);
        let (ops, text) = canvas.finish().unwrap();
        assert!(ops.is_empty());
        assert!(text.is_empty());
    }

    #[test]
    fn test_text_operations() {
        let mut canvas = Canvas::new();
        canvas.set_font(FontStyle::Bold, 16.0);
        canvas.cell(190.0, 15.0, "HOUSE RENT RECEIPT", Align::Center, Next::NewLine);
        let (ops, _) = canvas.finish().unwrap();
        assert_eq!(operators(&ops), ["rg", "BT", "Tf", "Td", "Tj", "ET"]);
        assert_eq!(ops[2].operands[0].as_name().unwrap(), b"F2");
    }

    #[test]
    fn test_right_alignment_ends_at_cell_edge() {
        let mut canvas = Canvas::new();
        canvas.set_font(FontStyle::Bold, 12.0);
        let text = "Date: 01/03/2024";
        let width = canvas.text_width(text);
        canvas.cell(190.0, 10.0, text, Align::Right, Next::Right);
        let (ops, _) = canvas.finish().unwrap();

        let td = ops.iter().find(|op| op.operator == "Td").unwrap();
        let x_pt = td.operands[0].as_float().unwrap();
        let expected = (MARGIN_MM + 190.0 - 1.0 - width) * K;
        assert!((x_pt - expected).abs() < 0.01);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let canvas = Canvas::new();
        let text = "Flat 12B, Lakeview Apartments, Near the Old Lake Bridge, MG Road, Indiranagar, Bengaluru 560038";
        let rows = canvas.wrap(text, 60.0);
        assert!(rows.len() > 1);
        for row in &rows {
            assert!(canvas.text_width(row) <= 60.0);
        }
        assert_eq!(rows.join(" "), text);
    }

    #[test]
    fn test_wrap_keeps_explicit_lines_and_splits_long_words() {
        let canvas = Canvas::new();
        assert_eq!(canvas.wrap("Line one\nLine two", 100.0), ["Line one", "Line two"]);

        let long = "X".repeat(80);
        let rows = canvas.wrap(&long, 40.0);
        assert!(rows.len() > 1);
        assert_eq!(rows.concat(), long);
    }

    #[test]
    fn test_multi_cell_returns_to_margin() {
        let mut canvas = Canvas::new();
        canvas.set_xy(60.0, 90.0);
        let rows = canvas.multi_cell(140.0, 10.0, "Short address");
        assert_eq!(rows, 1);
        assert_eq!((canvas.x(), canvas.y()), (MARGIN_MM, 100.0));
    }

    #[test]
    fn test_overflow_is_a_render_error() {
        let mut canvas = Canvas::new();
        canvas.set_xy(MARGIN_MM, 280.0);
        canvas.cell(60.0, 10.0, "Signature", Align::Left, Next::NewLine);
        assert!(matches!(canvas.finish(), Err(ReceiptError::Render(_))));
    }

    #[test]
    fn test_filled_rect_and_line() {
        let mut canvas = Canvas::new();
        canvas.set_fill_color(Rgb(240, 240, 250));
        canvas.fill_rect(10.0, 30.0, 190.0, 15.0);
        canvas.line(20.0, 200.0, 80.0, 200.0);
        let (ops, _) = canvas.finish().unwrap();
        assert_eq!(operators(&ops), ["rg", "re", "f", "RG", "w", "m", "l", "S"]);
    }
}
