//! # Shopping Cart
//!
//! A cart holding products in first-insertion order plus the active
//! discount strategy.
//!
//! There is no global cart. Callers construct one `Cart` per session and pass
//! it where it is needed. The type is not synchronised; share it across
//! threads only behind a lock of your own.

use crate::discount::{BoxedDiscountStrategy, DiscountStrategy, NoDiscount};
use crate::product::{format_amount, Product};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Width of the rules in the cart listing
const RULE_WIDTH: usize = 24;

/// A shopping cart
#[derive(Debug)]
pub struct Cart {
    items: Vec<Product>,
    discount: BoxedDiscountStrategy,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart with no discount
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            discount: Box::new(NoDiscount),
        }
    }

    /// Create an empty cart with the given discount strategy
    pub fn with_discount(strategy: impl DiscountStrategy + 'static) -> Self {
        Self {
            items: Vec::new(),
            discount: Box::new(strategy),
        }
    }

    /// Add one unit of a product
    pub fn add(&mut self, product: &Product) {
        self.add_product(product, 1);
    }

    /// Add `quantity` units of a product.
    ///
    /// If an entry with the same name exists its quantity is increased,
    /// otherwise a new entry is appended. The quantity carried by `product`
    /// itself is ignored.
    pub fn add_product(&mut self, product: &Product, quantity: i64) {
        match self.items.iter_mut().find(|p| p.same_product(product)) {
            Some(existing) => {
                existing.quantity += quantity;
                debug!(
                    product = %existing.name,
                    quantity = existing.quantity,
                    "Updated cart quantity"
                );
            }
            None => {
                self.items
                    .push(Product::new(product.name.clone(), product.price).with_quantity(quantity));
                debug!(product = %product.name, quantity, "Added product to cart");
            }
        }
    }

    /// Remove every entry with the product's name. Absent products are ignored.
    pub fn remove_product(&mut self, product: &Product) {
        let before = self.items.len();
        self.items.retain(|p| !p.same_product(product));
        debug!(
            product = %product.name,
            removed = before - self.items.len(),
            "Removed product from cart"
        );
    }

    /// Empty the cart. The discount strategy is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("Cleared cart");
    }

    /// Replace the active discount strategy
    pub fn set_discount_strategy(&mut self, strategy: BoxedDiscountStrategy) {
        debug!(discount = %strategy.label(), "Changed discount strategy");
        self.discount = strategy;
    }

    /// The active discount strategy
    pub fn discount_strategy(&self) -> &dyn DiscountStrategy {
        self.discount.as_ref()
    }

    /// Cart entries in insertion order
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Find an entry by name
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.items.iter().find(|p| p.name == name)
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all entries
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|p| p.quantity).sum()
    }

    /// Sum of price × quantity
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(Product::line_total).sum()
    }

    /// Discount the active strategy gives on the current subtotal
    pub fn discount(&self) -> f64 {
        self.discount.discount(self.subtotal())
    }

    /// Subtotal minus discount
    pub fn total(&self) -> f64 {
        let subtotal = self.subtotal();
        subtotal - self.discount.discount(subtotal)
    }

    /// Snapshot of the cart for reporting
    pub fn summary(&self) -> CartSummary {
        let subtotal = self.subtotal();
        let discount = self.discount.discount(subtotal);
        CartSummary {
            lines: self.items.iter().map(SummaryLine::from_product).collect(),
            subtotal,
            discount,
            total: subtotal - discount,
            discount_label: self.discount.label(),
        }
    }

    /// Print the cart listing to stdout
    pub fn display(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.summary(), f)
    }
}

/// One cart entry in a [`CartSummary`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

impl SummaryLine {
    fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            quantity: product.quantity,
            line_total: product.line_total(),
        }
    }
}

/// Point-in-time view of a cart's contents and totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<SummaryLine>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub discount_label: String,
}

impl fmt::Display for CartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return writeln!(f, "Shopping cart is empty.");
        }

        let rule = "-".repeat(RULE_WIDTH);
        writeln!(f, "Shopping Cart Contents:")?;
        writeln!(f, "{}", rule)?;
        for line in &self.lines {
            writeln!(
                f,
                "{} - {} x {} = {}",
                line.name,
                format_amount(line.price),
                line.quantity,
                format_amount(line.line_total)
            )?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "Subtotal: {}", format_amount(self.subtotal))?;
        writeln!(f, "Discount: {}", format_amount(self.discount))?;
        writeln!(f, "Total: {}", format_amount(self.total))?;
        writeln!(f, "{}", rule)
    }
}
