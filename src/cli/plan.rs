use super::ui;
use crate::core::plan::{AllocationPlan, PlanLookups, build_plan};
use crate::core::price::PriceProvider;
use crate::core::{AssetUniverse, PriceLookup};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;
use rust_decimal::Decimal;

impl AllocationPlan {
    pub fn display_as_table(&self, lookups: &PlanLookups) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Asset"),
            ui::header_cell("Role"),
            ui::header_cell("Units"),
            ui::header_cell("Price"),
            ui::header_cell("Subtotal"),
        ]);

        for (position, role, lookup) in [
            (&self.primary, "Primary", &lookups.primary),
            (&self.secondary, "Secondary", &lookups.secondary),
        ] {
            table.add_row(vec![
                Cell::new(&position.ticker),
                Cell::new(ui::style_text(role, ui::StyleType::Subtle)),
                ui::qty_cell(position.qty),
                ui::price_cell(lookup),
                ui::money_cell(position.subtotal()),
            ]);
        }

        let mut output = format!(
            "Plan for {}: {}\n\n",
            self.date.format("%m/%Y"),
            ui::style_text(self.strategy_label(), ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        let leftover = self.leftover();
        let leftover_style = if leftover < Decimal::ZERO {
            ui::StyleType::Error
        } else {
            ui::StyleType::TotalValue
        };
        output.push_str(&format!(
            "\n\n{} {}\n{} {}",
            ui::style_text("Total invested:", ui::StyleType::TotalLabel),
            ui::style_text(&format!("{:.2}", self.total_invested), ui::StyleType::TotalValue),
            ui::style_text("Remaining balance:", ui::StyleType::TotalLabel),
            ui::style_text(&format!("{leftover:.2}"), leftover_style),
        ));

        for lookup in [&lookups.primary, &lookups.secondary] {
            if let PriceLookup::Unavailable { reason } = lookup {
                output.push_str(&format!(
                    "\n{}",
                    ui::style_text(&format!("Price unavailable: {reason}"), ui::StyleType::Error)
                ));
            }
        }

        output
    }
}

/// Builds the month's plan behind a spinner and prints it.
pub async fn compute_and_show(
    date: NaiveDate,
    budget: Decimal,
    universe: &AssetUniverse,
    provider: &(dyn PriceProvider + Send + Sync),
) -> AllocationPlan {
    let pb = ui::new_spinner("Fetching prices...");
    let (plan, lookups) = build_plan(date, budget, universe, provider).await;
    pb.finish_and_clear();

    println!("\n{}\n", plan.display_as_table(&lookups));
    plan
}

/// Dry run: shows the plan without recording or sending it.
pub async fn run(
    date: NaiveDate,
    budget: Decimal,
    universe: &AssetUniverse,
    provider: &(dyn PriceProvider + Send + Sync),
) -> Result<()> {
    compute_and_show(date, budget, universe, provider).await;
    Ok(())
}
