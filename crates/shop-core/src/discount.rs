//! # Discount Strategies
//!
//! Strategy pattern for cart discounts. A strategy maps a subtotal to the
//! amount taken off it; the cart subtracts that amount to get its total.
//!
//! ```text
//!          DiscountStrategy (trait)
//!          ├── discount(subtotal)
//!          └── label()
//!                    ▲
//!          ┌─────────┴──────────┐
//!     NoDiscount       PercentageDiscount
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Upper bound for a percentage discount
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Computes the discount amount for a subtotal.
pub trait DiscountStrategy: Debug + Send + Sync {
    /// Amount to subtract from `subtotal`
    fn discount(&self, subtotal: f64) -> f64;

    /// Short description for logs and summaries
    fn label(&self) -> String;
}

/// Type alias for a boxed discount strategy (dynamic dispatch)
pub type BoxedDiscountStrategy = Box<dyn DiscountStrategy>;

/// Never discounts
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoDiscount;

impl DiscountStrategy for NoDiscount {
    fn discount(&self, _subtotal: f64) -> f64 {
        0.0
    }

    fn label(&self) -> String {
        "no discount".to_string()
    }
}

/// Takes a fixed percentage off the subtotal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentageDiscount {
    percentage: f64,
}

impl PercentageDiscount {
    /// Create a percentage discount.
    ///
    /// Values above 100 are clamped to 100. Negative values are kept as-is
    /// and produce a negative discount, which raises the total.
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage: percentage.min(MAX_PERCENTAGE),
        }
    }

    /// The stored (clamped) percentage
    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

impl DiscountStrategy for PercentageDiscount {
    fn discount(&self, subtotal: f64) -> f64 {
        subtotal * (self.percentage / 100.0)
    }

    fn label(&self) -> String {
        format!("{}% off", self.percentage)
    }
}

/// Discount selection as it appears in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountConfig {
    /// No discount
    None,
    /// Percentage off the subtotal
    Percentage { percentage: f64 },
}

impl Default for DiscountConfig {
    fn default() -> Self {
        DiscountConfig::None
    }
}

impl DiscountConfig {
    /// Build the configured strategy
    pub fn into_strategy(self) -> BoxedDiscountStrategy {
        match self {
            DiscountConfig::None => Box::new(NoDiscount),
            DiscountConfig::Percentage { percentage } => {
                Box::new(PercentageDiscount::new(percentage))
            }
        }
    }
}
