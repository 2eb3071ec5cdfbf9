//! Core business logic abstractions

pub mod allocation;
pub mod config;
pub mod contribution;
pub mod log;
pub mod plan;
pub mod price;

// Re-export main types for cleaner imports
pub use allocation::{AssetUniverse, Selection, Strategy};
pub use contribution::Contribution;
pub use plan::{AllocationPlan, Position};
pub use price::{PriceLookup, PriceProvider, PriceResult};
