//! Summary message delivery

pub mod console;
pub mod smtp;

use crate::core::plan::{AllocationPlan, Position};
use anyhow::Result;
use async_trait::async_trait;

pub use console::ConsoleNotifier;
pub use smtp::SmtpNotifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &Message) -> Result<()>;

    fn name(&self) -> &str;
}

fn position_line(index: usize, position: &Position) -> String {
    format!(
        "{}. {}: {} unit(s) at {:.2}",
        index, position.ticker, position.qty, position.price
    )
}

/// Renders the monthly summary sent to the recipient.
pub fn render_message(plan: &AllocationPlan) -> Message {
    let rule = "-".repeat(50);
    let body = format!(
        "MONTHLY CONTRIBUTION REPORT - {month}\n\
         {rule}\n\
         Strategy: {strategy}\n\
         \n\
         SUGGESTED PURCHASES:\n\
         {primary}\n\
         {secondary}\n\
         \n\
         TOTAL INVESTED: {total:.2}\n\
         REMAINING BALANCE: {leftover:.2}\n\
         {rule}\n\
         Status: history updated.\n\
         Stay focused on the long term.\n",
        month = plan.date.format("%m/%Y"),
        strategy = plan.strategy_label(),
        primary = position_line(1, &plan.primary),
        secondary = position_line(2, &plan.secondary),
        total = plan.total_invested,
        leftover = plan.leftover(),
    );

    Message {
        subject: format!(
            "Monthly contribution plan {}",
            plan.date.format("%d/%m")
        ),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::allocation::Strategy;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn plan() -> AllocationPlan {
        AllocationPlan {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            strategy: Strategy::GlobalExpansion,
            primary: Position {
                ticker: "WRLD11.SA".to_string(),
                qty: 1,
                price: dec!(120.00),
            },
            secondary: Position {
                ticker: "SNEL11.SA".to_string(),
                qty: 10,
                price: dec!(9.5),
            },
            total_invested: dec!(215.00),
            budget: dec!(220.00),
        }
    }

    #[test]
    fn test_render_subject_has_run_date() {
        let message = render_message(&plan());
        assert_eq!(message.subject, "Monthly contribution plan 05/01");
    }

    #[test]
    fn test_render_body_fields() {
        let body = render_message(&plan()).body;
        assert!(body.starts_with("MONTHLY CONTRIBUTION REPORT - 01/2026\n"));
        assert!(body.contains("Strategy: Global Expansion (CORE)\n"));
        assert!(body.contains("1. WRLD11.SA: 1 unit(s) at 120.00\n"));
        // Each line carries its own asset's price
        assert!(body.contains("2. SNEL11.SA: 10 unit(s) at 9.50\n"));
        assert!(body.contains("TOTAL INVESTED: 215.00\n"));
        assert!(body.contains("REMAINING BALANCE: 5.00\n"));
        assert!(body.ends_with("Status: history updated.\nStay focused on the long term.\n"));
    }

    #[test]
    fn test_render_body_layout() {
        let body = render_message(&plan()).body;
        let lines: Vec<&str> = body.lines().collect();
        let rule = "-".repeat(50);
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[1], rule);
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "SUGGESTED PURCHASES:");
        assert_eq!(lines[7], "");
        assert_eq!(lines[10], rule);
    }

    #[test]
    fn test_render_overspend_shows_negative_balance() {
        let mut plan = plan();
        plan.primary.price = dec!(250.00);
        plan.secondary.qty = 0;
        plan.total_invested = dec!(250.00);
        let body = render_message(&plan).body;
        assert!(body.contains("REMAINING BALANCE: -30.00\n"));
    }
}
