//! # Demo Configuration
//!
//! Data for the walkthrough: posts, cart contents, processors and payment
//! attempts. Loaded from a TOML file when one is found, otherwise the
//! built-in data is used.

use serde::{Deserialize, Serialize};
use shop_core::{DiscountConfig, Post, Product, DEFAULT_FAILURE_RATE};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Env var naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "SHOP_DEMO_CONFIG";

/// Env var selecting the cart report format
pub const REPORT_FORMAT_VAR: &str = "SHOP_REPORT_FORMAT";

/// Locations searched when no explicit path is given
const CONFIG_SEARCH_PATHS: [&str; 3] = [
    "config/demo.toml",
    "../config/demo.toml",
    "../../config/demo.toml",
];

/// Errors loading demo configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown report format: {0} (expected \"text\" or \"json\")")]
    UnknownReportFormat(String),
}

/// How cart listings are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// Pretty-printed JSON summary
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(ConfigError::UnknownReportFormat(other.to_string())),
        }
    }
}

/// Process-level settings taken from the environment
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Explicit config file, if any
    pub config_path: Option<PathBuf>,
    /// Cart report format
    pub report_format: ReportFormat,
}

impl Settings {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let report_format = match std::env::var(REPORT_FORMAT_VAR) {
            Ok(value) => value.parse()?,
            Err(_) => ReportFormat::Text,
        };

        Ok(Self {
            config_path: std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from),
            report_format,
        })
    }
}

/// A card processor to register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub id: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub balance: f64,
}

/// A cash register to register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterConfig {
    pub id: String,
    pub cash_in_register: f64,
}

/// One payment to attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAttempt {
    /// Id of the processor to charge
    pub processor: String,
    pub amount: f64,
    /// Heading printed before the attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Cart walkthrough data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartScenario {
    /// Products to add; each product's quantity is the quantity added
    #[serde(default)]
    pub products: Vec<Product>,

    /// Discount applied after the first listing
    #[serde(default)]
    pub discount: DiscountConfig,

    /// Product names removed one at a time
    #[serde(default)]
    pub remove: Vec<String>,
}

/// Payment walkthrough data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentScenario {
    #[serde(default)]
    pub cards: Vec<CardConfig>,

    #[serde(default)]
    pub registers: Vec<RegisterConfig>,

    #[serde(default)]
    pub attempts: Vec<PaymentAttempt>,

    /// Chance of a simulated network error per card payment
    #[serde(default = "default_failure_rate")]
    pub network_failure_rate: f64,

    /// Seed for the network fault draws; entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_failure_rate() -> f64 {
    DEFAULT_FAILURE_RATE
}

/// Everything the walkthrough needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub posts: Vec<Post>,

    #[serde(default = "CartScenario::builtin")]
    pub cart: CartScenario,

    #[serde(default = "PaymentScenario::builtin")]
    pub payments: PaymentScenario,
}

impl CartScenario {
    fn builtin() -> Self {
        Self {
            products: vec![
                Product::new("Laptop", 1299.99),
                Product::new("Smartphone", 799.99).with_quantity(2),
                Product::new("USB-C Charger", 19.99).with_quantity(3),
            ],
            discount: DiscountConfig::Percentage { percentage: 10.0 },
            remove: vec!["Smartphone".to_string()],
        }
    }
}

impl PaymentScenario {
    fn builtin() -> Self {
        Self {
            cards: vec![
                CardConfig {
                    id: "card".to_string(),
                    card_number: "1234567890123456".to_string(),
                    expiry_date: "12/25".to_string(),
                    cvv: "123".to_string(),
                    balance: 5000.0,
                },
                CardConfig {
                    id: "expired-card".to_string(),
                    card_number: "9876543210987654".to_string(),
                    expiry_date: "01/20".to_string(),
                    cvv: "456".to_string(),
                    balance: 1000.0,
                },
            ],
            registers: vec![RegisterConfig {
                id: "cash".to_string(),
                cash_in_register: 200.0,
            }],
            attempts: vec![
                PaymentAttempt {
                    processor: "card".to_string(),
                    amount: 50.0,
                    label: Some("credit card payment of $50.00".to_string()),
                },
                PaymentAttempt {
                    processor: "card".to_string(),
                    amount: 20000.0,
                    label: Some("large credit card payment of $20000.00".to_string()),
                },
                PaymentAttempt {
                    processor: "expired-card".to_string(),
                    amount: 30.0,
                    label: Some("payment with expired card".to_string()),
                },
                PaymentAttempt {
                    processor: "cash".to_string(),
                    amount: 75.0,
                    label: Some("cash payment of $75.00".to_string()),
                },
                PaymentAttempt {
                    processor: "cash".to_string(),
                    amount: 300.0,
                    label: Some(
                        "cash payment of $300.00 (register only has $200.00)".to_string(),
                    ),
                },
            ],
            network_failure_rate: DEFAULT_FAILURE_RATE,
            seed: None,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            posts: vec![
                Post::new("Alice", "Just finished my first Rust assignment!", 15),
                Post::new("Bob", "Learning Rust traits is fun!", 7),
            ],
            cart: CartScenario::builtin(),
            payments: PaymentScenario::builtin(),
        }
    }
}

impl DemoConfig {
    /// Parse from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load from a specific file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the config for these settings.
    ///
    /// An explicit path must exist. Otherwise the search paths are tried in
    /// order and the built-in data is the fallback.
    pub fn load(settings: &Settings) -> Result<Self, ConfigError> {
        if let Some(path) = &settings.config_path {
            let config = Self::from_file(path)?;
            tracing::info!("Loaded demo config from {}", path.display());
            return Ok(config);
        }

        for path in CONFIG_SEARCH_PATHS {
            if Path::new(path).is_file() {
                let config = Self::from_file(path)?;
                tracing::info!("Loaded demo config from {}", path);
                return Ok(config);
            }
        }

        tracing::warn!("No demo config found, using built-in data");
        Ok(Self::default())
    }
}
