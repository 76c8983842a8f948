use tracing::debug;

use super::canvas::{Align, Canvas, Next, Rgb, MARGIN_MM};
use super::document::{Document, ReceiptPage};
use super::fonts::FontStyle;
use crate::error::Result;
use crate::receipt::amount::{amount_line, words_line};
use crate::receipt::{MonthLabel, ReceiptRequest};

const TITLE: &str = "HOUSE RENT RECEIPT";

const NAVY: Rgb = Rgb(0, 0, 128);
const BLACK: Rgb = Rgb(0, 0, 0);
const PANEL: Rgb = Rgb(240, 240, 250);

const CONTENT_WIDTH: f32 = 190.0;
const LABEL_WIDTH: f32 = 50.0;
const VALUE_WIDTH: f32 = 140.0;
const ROW_HEIGHT: f32 = 10.0;

/// Lay out one receipt page for `month` and append it to `document`.
pub fn render(
    document: &mut Document,
    page_index: usize,
    request: &ReceiptRequest,
    month: MonthLabel,
    display_date: &str,
) -> Result<()> {
    let number = page_index + 1;
    let mut page = Canvas::new();

    // Title band
    page.set_draw_color(NAVY);
    page.set_line_width(0.5);
    page.line(MARGIN_MM, MARGIN_MM, MARGIN_MM + CONTENT_WIDTH, MARGIN_MM);
    page.set_font(FontStyle::Bold, 16.0);
    page.set_text_color(NAVY);
    page.cell(CONTENT_WIDTH, 15.0, TITLE, Align::Center, Next::NewLine);
    page.set_text_color(BLACK);

    // Receipt number and date panel
    page.set_fill_color(PANEL);
    page.fill_rect(MARGIN_MM, 30.0, CONTENT_WIDTH, 15.0);
    page.set_font(FontStyle::Bold, 12.0);
    page.set_xy(MARGIN_MM, 32.0);
    let half = CONTENT_WIDTH / 2.0;
    page.cell(half, ROW_HEIGHT, &format!("Receipt No: {number}"), Align::Left, Next::Right);
    page.cell(half, ROW_HEIGHT, &format!("Date: {display_date}"), Align::Right, Next::Right);
    page.ln(20.0);

    labeled_row(&mut page, "Received From:", &single_line(&request.tenant_name));
    labeled_row(&mut page, "Amount:", &amount_line(request.amount));

    page.set_font(FontStyle::Italic, 11.0);
    page.cell(LABEL_WIDTH, ROW_HEIGHT, "", Align::Left, Next::Right);
    page.cell(VALUE_WIDTH, ROW_HEIGHT, &words_line(request.amount), Align::Left, Next::NewLine);

    labeled_row(&mut page, "For Month:", &month.to_string());

    page.set_font(FontStyle::Bold, 12.0);
    page.cell(LABEL_WIDTH, ROW_HEIGHT, "Property:", Align::Left, Next::Right);
    page.set_font(FontStyle::Regular, 12.0);
    page.multi_cell(VALUE_WIDTH, ROW_HEIGHT, &request.property_address);

    // Owner panel
    page.ln(10.0);
    page.set_fill_color(PANEL);
    let panel_top = page.y();
    page.fill_rect(MARGIN_MM, panel_top, CONTENT_WIDTH, 45.0);
    page.set_font(FontStyle::Bold, 12.0);
    page.cell(CONTENT_WIDTH, ROW_HEIGHT, "Owner's Details:", Align::Left, Next::NewLine);
    page.set_font(FontStyle::Regular, 12.0);
    for line in [
        format!("Name: {}", single_line(&request.owner_name)),
        format!("Address: {}", single_line(&request.owner_address)),
        format!("PAN: {}", single_line(&request.owner_pan)),
    ] {
        page.cell(CONTENT_WIDTH, ROW_HEIGHT, &line, Align::Left, Next::NewLine);
    }

    // Signature
    page.ln(20.0);
    let rule_y = page.y();
    page.line(20.0, rule_y, 80.0, rule_y);
    page.set_font(FontStyle::Bold, 12.0);
    page.cell(60.0, ROW_HEIGHT, "Signature", Align::Left, Next::NewLine);
    page.set_font(FontStyle::Regular, 12.0);
    page.cell(
        60.0,
        ROW_HEIGHT,
        &format!("({})", single_line(&request.owner_name)),
        Align::Left,
        Next::NewLine,
    );

    let (operations, text) = page.finish()?;
    debug!(number, month = %month, "rendered receipt page");

    document.push(ReceiptPage {
        number,
        month,
        display_date: display_date.to_string(),
        text,
        operations,
    });
    Ok(())
}

fn labeled_row(page: &mut Canvas, label: &str, value: &str) {
    page.set_font(FontStyle::Bold, 12.0);
    page.cell(LABEL_WIDTH, ROW_HEIGHT, label, Align::Left, Next::Right);
    page.set_font(FontStyle::Regular, 12.0);
    page.cell(VALUE_WIDTH, ROW_HEIGHT, value, Align::Left, Next::NewLine);
}

/// Join the lines of a multi-line value with ", " so it fits a one-row cell.
fn single_line(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
