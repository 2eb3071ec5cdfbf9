use crate::core::PriceLookup;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned amount with two decimals.
pub fn money_cell(value: Decimal) -> Cell {
    Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right)
}

/// Price cell with its currency; an unresolved price is shown in red.
pub fn price_cell(lookup: &PriceLookup) -> Cell {
    match lookup {
        PriceLookup::Resolved(result) => {
            let text = format!("{:.2} {}", result.price, result.currency);
            Cell::new(text.trim_end()).set_alignment(CellAlignment::Right)
        }
        PriceLookup::Unavailable { .. } => Cell::new("N/A")
            .fg(Color::Red)
            .set_alignment(CellAlignment::Right),
    }
}

pub fn qty_cell(qty: u64) -> Cell {
    Cell::new(qty).set_alignment(CellAlignment::Right)
}

/// Creates a spinner shown while prices are fetched.
pub fn new_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) =
        ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed_precise}]")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PriceResult;
    use rust_decimal_macros::dec;

    fn resolved(currency: &str) -> PriceLookup {
        PriceLookup::Resolved(PriceResult {
            price: dec!(9.5),
            currency: currency.to_string(),
        })
    }

    #[test]
    fn test_price_cell_shows_currency() {
        assert_eq!(price_cell(&resolved("BRL")).content(), "9.50 BRL");
        assert_eq!(price_cell(&resolved("")).content(), "9.50");
        let unavailable = PriceLookup::Unavailable {
            reason: "timeout".to_string(),
        };
        assert_eq!(price_cell(&unavailable).content(), "N/A");
    }
}
