use super::plan::compute_and_show;
use crate::core::AssetUniverse;
use crate::core::plan::AllocationPlan;
use crate::core::price::PriceProvider;
use crate::notify::{Notifier, render_message};
use crate::store::{PlanRecord, RecordStore};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

/// Full monthly run: plan, record, notify.
pub async fn run(
    date: NaiveDate,
    budget: Decimal,
    universe: &AssetUniverse,
    provider: &(dyn PriceProvider + Send + Sync),
    store: &dyn RecordStore,
    notifier: &dyn Notifier,
) -> Result<AllocationPlan> {
    let plan = compute_and_show(date, budget, universe, provider).await;

    store
        .append(&PlanRecord::from(&plan))
        .await
        .context("Failed to record plan")?;
    info!("Plan recorded");

    let message = render_message(&plan);
    notifier
        .send(&message)
        .await
        .with_context(|| format!("Failed to deliver summary via {}", notifier.name()))?;

    println!("Done: plan recorded and summary sent via {}.", notifier.name());
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::price::PriceResult;
    use crate::notify::Message;
    use crate::store::MemoryRecordStore;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct MockPriceProvider;

    #[async_trait]
    impl PriceProvider for MockPriceProvider {
        async fn fetch_price(&self, symbol: &str) -> Result<PriceResult> {
            let price = match symbol {
                "KNCR11.SA" => dec!(101.30),
                "B5P211.SA" => dec!(95.12),
                _ => anyhow::bail!("No price data found for symbol: {}", symbol),
            };
            Ok(PriceResult {
                price,
                currency: "BRL".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Message>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, message: &Message) -> Result<()> {
            if self.fail {
                anyhow::bail!("connection refused");
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn date() -> NaiveDate {
        // March: (3 / 3) % 3 == 1
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[tokio::test]
    async fn test_run_records_and_notifies() {
        let store = MemoryRecordStore::new();
        let notifier = RecordingNotifier::default();

        let plan = run(
            date(),
            dec!(220.00),
            &AssetUniverse::default(),
            &MockPriceProvider,
            &store,
            &notifier,
        )
        .await
        .unwrap();

        assert_eq!(plan.primary.ticker, "MCCI11.SA");
        // MCCI11.SA has no price, so the whole budget goes to the security asset
        assert_eq!(plan.primary.price, Decimal::ZERO);
        assert_eq!(plan.secondary.ticker, "B5P211.SA");
        assert_eq!(plan.secondary.qty, 2);
        assert_eq!(plan.total_invested, dec!(190.24));

        let records = store.load_all().await.unwrap();
        assert_eq!(records, vec![PlanRecord::from(&plan)]);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Monthly contribution plan 02/03");
    }

    #[tokio::test]
    async fn test_run_keeps_record_when_delivery_fails() {
        let store = MemoryRecordStore::new();
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };

        let result = run(
            date(),
            dec!(220.00),
            &AssetUniverse::default(),
            &MockPriceProvider,
            &store,
            &notifier,
        )
        .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "Failed to deliver summary via recording"
        );
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }
}
