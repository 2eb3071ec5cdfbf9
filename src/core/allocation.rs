//! Monthly rotation between the three core asset groups

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const GLOBAL: &str = "WRLD11.SA";
pub const REAL_ESTATE: &[&str] = &["HGLG11.SA", "KNRI11.SA", "HGBS11.SA", "RBVA11.SA", "HGRU11.SA"];
pub const FIXED_INCOME: &[&str] = &["KNCR11.SA", "MCCI11.SA", "AFHI11.SA"];
pub const SATELLITE: &str = "SNEL11.SA";
pub const SECURITY: &str = "B5P211.SA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    GlobalExpansion,
    PhysicalRealEstate,
    FixedIncome,
}

impl Strategy {
    /// Branch picked for a 1-based calendar month.
    pub fn for_month(month: u32) -> Self {
        match month % 3 {
            1 => Strategy::GlobalExpansion,
            2 => Strategy::PhysicalRealEstate,
            _ => Strategy::FixedIncome,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::GlobalExpansion => "Global Expansion (CORE)",
            Strategy::PhysicalRealEstate => "Physical Real Estate (CORE)",
            Strategy::FixedIncome => "Fixed Income and Credit (CORE/SEG)",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Tickers the rotation chooses from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AssetUniverse {
    pub global: String,
    pub real_estate: Vec<String>,
    pub fixed_income: Vec<String>,
    pub satellite: String,
    pub security: String,
}

impl Default for AssetUniverse {
    fn default() -> Self {
        AssetUniverse {
            global: GLOBAL.to_string(),
            real_estate: REAL_ESTATE.iter().map(|s| s.to_string()).collect(),
            fixed_income: FIXED_INCOME.iter().map(|s| s.to_string()).collect(),
            satellite: SATELLITE.to_string(),
            security: SECURITY.to_string(),
        }
    }
}

impl AssetUniverse {
    pub fn validate(&self) -> Result<()> {
        if self.real_estate.is_empty() {
            bail!("Asset universe needs at least one real estate ticker");
        }
        if self.fixed_income.is_empty() {
            bail!("Asset universe needs at least one fixed income ticker");
        }
        let has_blank = [&self.global, &self.satellite, &self.security]
            .into_iter()
            .chain(&self.real_estate)
            .chain(&self.fixed_income)
            .any(|t| t.trim().is_empty());
        if has_blank {
            bail!("Asset universe contains an empty ticker");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub primary: String,
    pub secondary: String,
    pub strategy: Strategy,
}

/// Picks this month's primary and secondary tickers.
///
/// Index arithmetic uses the 1-based month as is, so each list advances by
/// one every third month and wraps around its length.
pub fn select(month: u32, universe: &AssetUniverse) -> Selection {
    let strategy = Strategy::for_month(month);
    let index = (month / 3) as usize;
    let (primary, secondary) = match strategy {
        Strategy::GlobalExpansion => (&universe.global, &universe.satellite),
        Strategy::PhysicalRealEstate => (
            &universe.real_estate[index % universe.real_estate.len()],
            &universe.satellite,
        ),
        Strategy::FixedIncome => (
            &universe.fixed_income[index % universe.fixed_income.len()],
            &universe.security,
        ),
    };

    Selection {
        primary: primary.clone(),
        secondary: secondary.clone(),
        strategy,
    }
}
