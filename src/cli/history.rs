use super::ui;
use crate::store::{PlanRecord, RecordStore};
use anyhow::Result;
use comfy_table::Cell;
use rust_decimal::Decimal;

pub fn display_history(records: &[PlanRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Strategy"),
        ui::header_cell("Primary"),
        ui::header_cell("Qty"),
        ui::header_cell("Secondary"),
        ui::header_cell("Qty"),
        ui::header_cell("Invested"),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(record.date.format("%d/%m/%Y")),
            Cell::new(&record.strategy),
            Cell::new(&record.primary_ticker),
            ui::qty_cell(record.primary_qty),
            Cell::new(&record.secondary_ticker),
            ui::qty_cell(record.secondary_qty),
            ui::money_cell(record.total_invested),
        ]);
    }

    let total: Decimal = records.iter().map(|r| r.total_invested).sum();
    format!(
        "{}\n\n{}\n\n{} {}",
        ui::style_text("Contribution history", ui::StyleType::Title),
        table,
        ui::style_text("Total invested:", ui::StyleType::TotalLabel),
        ui::style_text(&format!("{total:.2}"), ui::StyleType::TotalValue)
    )
}

pub async fn run(store: &dyn RecordStore) -> Result<()> {
    let records = store.load_all().await?;
    if records.is_empty() {
        println!("No contributions recorded yet.");
        return Ok(());
    }
    println!("\n{}\n", display_history(&records));
    Ok(())
}
