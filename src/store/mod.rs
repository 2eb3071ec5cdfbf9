//! Append-only history of monthly plans

pub mod csv_file;
pub mod memory;

use crate::core::plan::AllocationPlan;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use csv_file::CsvRecordStore;
pub use memory::MemoryRecordStore;

/// One row of the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    #[serde(rename = "Date", with = "day_month_year")]
    pub date: NaiveDate,
    #[serde(rename = "Strategy")]
    pub strategy: String,
    #[serde(rename = "PrimaryTicker")]
    pub primary_ticker: String,
    #[serde(rename = "PrimaryQty")]
    pub primary_qty: u64,
    #[serde(rename = "SecondaryTicker")]
    pub secondary_ticker: String,
    #[serde(rename = "SecondaryQty")]
    pub secondary_qty: u64,
    #[serde(
        rename = "TotalInvested",
        serialize_with = "two_decimals",
        deserialize_with = "parse_decimal"
    )]
    pub total_invested: Decimal,
}

impl From<&AllocationPlan> for PlanRecord {
    fn from(plan: &AllocationPlan) -> Self {
        PlanRecord {
            date: plan.date,
            strategy: plan.strategy_label().to_string(),
            primary_ticker: plan.primary.ticker.clone(),
            primary_qty: plan.primary.qty,
            secondary_ticker: plan.secondary.ticker.clone(),
            secondary_qty: plan.secondary.qty,
            total_invested: plan.total_invested,
        }
    }
}

/// Durable log of plans. Implementations keep earlier rows untouched and in order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn append(&self, record: &PlanRecord) -> Result<()>;
    async fn load_all(&self) -> Result<Vec<PlanRecord>>;
}

fn two_decimals<S: serde::Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

fn parse_decimal<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let s = String::deserialize(deserializer)?;
    Decimal::from_str(s.trim()).map_err(serde::de::Error::custom)
}

mod day_month_year {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(D::Error::custom)
    }
}
