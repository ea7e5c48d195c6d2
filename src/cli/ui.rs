use crate::core::{Currency, Quote, format_money};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string. `colors` tells whether the
/// destination accepts ANSI escapes.
pub fn style_text(text: &str, style_type: StyleType, colors: bool) -> String {
    let base = Style::new().force_styling(colors);
    let style = match style_type {
        StyleType::Title => base.bold().underlined(),
        StyleType::Label => base.bold(),
        StyleType::Value => base.green().bold(),
        StyleType::Error => base.red(),
        StyleType::Subtle => base.dim(),
    };
    style.apply_to(text).to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table(colors: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if colors {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn money_cell(amount: f64) -> Cell {
    Cell::new(format_money(amount, Currency::Ars.code())).set_alignment(CellAlignment::Right)
}

/// Creates a cell for unavailable values.
pub fn na_cell() -> Cell {
    Cell::new("N/A")
        .fg(Color::Red)
        .set_alignment(CellAlignment::Right)
}

/// Renders buy and sell prices, one row per currency. Missing quotes show as N/A.
pub fn quote_table(rows: &[(Currency, Option<Quote>)], colors: bool) -> String {
    let mut table = new_styled_table(colors);
    table.set_header(vec![
        header_cell("Currency"),
        header_cell("Buy"),
        header_cell("Sell"),
    ]);

    for (currency, quote) in rows {
        let name = Cell::new(format!("{} ({})", currency.label(), currency.code()));
        match quote {
            Some(q) => table.add_row(vec![name, money_cell(q.buy), money_cell(q.sell)]),
            None => table.add_row(vec![name, na_cell(), na_cell()]),
        };
    }

    table.to_string()
}

/// Creates a spinner shown while quotes are being fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A separator line matching the terminal width.
pub fn separator() -> String {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(50);
    "=".repeat(term_width.min(50))
}
