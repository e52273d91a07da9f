//! # Product Types
//!
//! Products placed in a [`Cart`](crate::cart::Cart). A product is identified
//! by its name; two products with the same name are the same cart entry.

use serde::{Deserialize, Serialize};

/// Format an amount for display (e.g., "$10.00")
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// A product with a unit price and a quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, also the identity key inside a cart
    pub name: String,

    /// Unit price
    pub price: f64,

    /// Quantity (any integer; the cart does not guard it)
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl Product {
    /// Create a product with a quantity of one
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: default_quantity(),
        }
    }

    /// Builder: set quantity
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Price multiplied by quantity
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Whether `other` refers to the same cart entry
    pub fn same_product(&self, other: &Product) -> bool {
        self.name == other.name
    }
}
