//! # shop-core
//!
//! Core types and traits for the storefront exercises.
//!
//! This crate provides:
//! - `Post` for the social post display exercise
//! - `Product` and `Cart` for the shopping cart
//! - `DiscountStrategy` trait with `NoDiscount` and `PercentageDiscount`
//! - `PaymentProcessor` trait with `CreditCardProcessor` and `CashProcessor`
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use shop_core::{Cart, CashProcessor, PaymentProcessor, PercentageDiscount, Product};
//!
//! let mut cart = Cart::new();
//! cart.add_product(&Product::new("Laptop", 1000.0), 2);
//! cart.set_discount_strategy(Box::new(PercentageDiscount::new(10.0)));
//! assert_eq!(cart.total(), 1800.0);
//!
//! let mut register = CashProcessor::new(2000.0);
//! let receipt = register.process_payment(cart.total()).unwrap();
//! assert_eq!(receipt.remaining_balance, Some(200.0));
//! ```

pub mod cart;
pub mod discount;
pub mod error;
pub mod faults;
pub mod post;
pub mod processor;
pub mod product;

// Re-exports for convenience
pub use cart::{Cart, CartSummary, SummaryLine};
pub use discount::{
    BoxedDiscountStrategy, DiscountConfig, DiscountStrategy, NoDiscount, PercentageDiscount,
};
pub use error::{PaymentError, PaymentResult, SelectorError};
pub use faults::{NetworkFaults, RandomFaults, DEFAULT_FAILURE_RATE};
pub use post::Post;
pub use processor::{
    BoxedPaymentProcessor, CashProcessor, CreditCardProcessor, PaymentProcessor,
    PaymentReceipt, ProcessorSelector,
};
pub use product::{format_amount, Product};
