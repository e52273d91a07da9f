//! # shop-demo
//!
//! Console walkthrough for storefront-rs.
//!
//! This crate provides:
//! - Demo data loaded from `config/demo.toml` (or built in)
//! - A runner that prints posts, cart listings and payment outcomes
//!
//! ## Environment
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SHOP_DEMO_CONFIG` | Path to a demo TOML file |
//! | `SHOP_REPORT_FORMAT` | `text` (default) or `json` cart listings |
//! | `RUST_LOG` | Log filter, default `info` |

pub mod config;
pub mod runner;

pub use config::{ConfigError, DemoConfig, ReportFormat, Settings};
pub use runner::{build_selector, PaymentTally, Runner};
