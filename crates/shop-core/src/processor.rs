//! # Payment Processors
//!
//! Strategy pattern for taking a payment. Each processor validates an amount
//! against its own rules and either returns a receipt or one of the closed
//! set of [`PaymentError`]s.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │        PaymentProcessor (trait)           │
//! │  ├── process_payment()                    │
//! │  └── name()                               │
//! └───────────────────────────────────────────┘
//!                      ▲
//!          ┌───────────┴───────────┐
//!  ┌───────┴───────┐       ┌───────┴───────┐
//!  │  CreditCard   │       │     Cash      │
//!  │   Processor   │       │   Processor   │
//!  └───────────────┘       └───────────────┘
//! ```
//!
//! Checks run in a fixed order and the first failing check decides the error.

use crate::error::{PaymentError, PaymentResult, SelectorError};
use crate::faults::{NetworkFaults, RandomFaults};
use crate::product::format_amount;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Largest amount a single card payment may charge
pub const CARD_PAYMENT_LIMIT: f64 = 10_000.0;

/// Required card number length
pub const CARD_NUMBER_LENGTH: usize = 16;

/// Expiry value treated as an expired card
pub const EXPIRED_CARD_SENTINEL: &str = "01/20";

/// Proof of a successful payment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    /// Generated transaction id
    pub transaction_id: Uuid,

    /// Name of the processor that took the payment
    pub processor: String,

    /// Amount charged
    pub amount: f64,

    /// Balance left after the payment, for processors that track one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_balance: Option<f64>,

    /// When the payment went through
    pub processed_at: DateTime<Utc>,
}

impl PaymentReceipt {
    /// Create a receipt with a fresh transaction id
    pub fn new(processor: impl Into<String>, amount: f64) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            processor: processor.into(),
            amount,
            remaining_balance: None,
            processed_at: Utc::now(),
        }
    }

    /// Builder: record the remaining balance
    pub fn with_remaining_balance(mut self, balance: f64) -> Self {
        self.remaining_balance = Some(balance);
        self
    }
}

impl fmt::Display for PaymentReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} payment of {} processed successfully.",
            self.processor,
            format_amount(self.amount)
        )?;
        if let Some(balance) = self.remaining_balance {
            write!(f, "\nRemaining cash in register: {}", format_amount(balance))?;
        }
        Ok(())
    }
}

/// Core trait for payment processors.
///
/// Not required to be `Sync`: a processor may mutate its own state (the cash
/// register balance, the fault source) on every attempt.
pub trait PaymentProcessor: Send {
    /// Attempt to take `amount`.
    ///
    /// # Returns
    /// A `PaymentReceipt` on success, or the first `PaymentError` whose
    /// check failed.
    fn process_payment(&mut self, amount: f64) -> PaymentResult<PaymentReceipt>;

    /// Display name of the processor
    fn name(&self) -> &'static str;
}

/// Type alias for a boxed payment processor (dynamic dispatch)
pub type BoxedPaymentProcessor = Box<dyn PaymentProcessor>;

/// Simulated card payments
pub struct CreditCardProcessor {
    card_number: String,
    expiry_date: String,
    cvv: String,
    balance: f64,
    faults: Box<dyn NetworkFaults>,
}

impl CreditCardProcessor {
    /// Create a card processor with the default random fault source
    pub fn new(
        card_number: impl Into<String>,
        expiry_date: impl Into<String>,
        cvv: impl Into<String>,
        balance: f64,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiry_date: expiry_date.into(),
            cvv: cvv.into(),
            balance,
            faults: Box::new(RandomFaults::default()),
        }
    }

    /// Builder: replace the network fault source
    pub fn with_network_faults(mut self, faults: impl NetworkFaults + 'static) -> Self {
        self.faults = Box::new(faults);
        self
    }

    /// Available balance. Payments do not reduce it.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    /// Card number with all but the last four characters hidden
    pub fn masked_number(&self) -> String {
        let len = self.card_number.chars().count();
        self.card_number
            .chars()
            .enumerate()
            .map(|(i, c)| if i + 4 < len { '*' } else { c })
            .collect()
    }

    fn validate(&mut self, amount: f64) -> PaymentResult<()> {
        if amount <= 0.0 {
            return Err(PaymentError::InvalidCard);
        }
        if amount > CARD_PAYMENT_LIMIT {
            return Err(PaymentError::PaymentLimitExceeded);
        }
        if self.card_number.chars().count() != CARD_NUMBER_LENGTH {
            return Err(PaymentError::InvalidCard);
        }
        if self.expiry_date == EXPIRED_CARD_SENTINEL {
            return Err(PaymentError::CardExpired);
        }
        if amount > self.balance {
            return Err(PaymentError::InsufficientFunds);
        }
        if self.faults.should_fail() {
            return Err(PaymentError::NetworkError);
        }
        Ok(())
    }
}

impl fmt::Debug for CreditCardProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCardProcessor")
            .field("card_number", &self.masked_number())
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"*".repeat(self.cvv.len()))
            .field("balance", &self.balance)
            .finish_non_exhaustive()
    }
}

impl PaymentProcessor for CreditCardProcessor {
    fn process_payment(&mut self, amount: f64) -> PaymentResult<PaymentReceipt> {
        debug!(card = %self.masked_number(), amount, "Processing card payment");

        if let Err(err) = self.validate(amount) {
            warn!(card = %self.masked_number(), amount, error = ?err, "Card payment rejected");
            return Err(err);
        }

        // balance stays as-is; the card side is a simulation only
        let receipt = PaymentReceipt::new(self.name(), amount);
        info!(
            transaction_id = %receipt.transaction_id,
            card = %self.masked_number(),
            amount,
            "Card payment processed"
        );
        Ok(receipt)
    }

    fn name(&self) -> &'static str {
        "Credit Card"
    }
}

/// Cash payments taken against a register balance
#[derive(Debug, Clone, PartialEq)]
pub struct CashProcessor {
    cash_in_register: f64,
}

impl CashProcessor {
    pub fn new(cash_in_register: f64) -> Self {
        Self { cash_in_register }
    }

    /// Cash currently in the register
    pub fn cash_in_register(&self) -> f64 {
        self.cash_in_register
    }
}

impl PaymentProcessor for CashProcessor {
    fn process_payment(&mut self, amount: f64) -> PaymentResult<PaymentReceipt> {
        // Non-positive amounts share the card error code
        let rejected = if amount <= 0.0 {
            Some(PaymentError::InvalidCard)
        } else if self.cash_in_register < amount {
            Some(PaymentError::CashRegisterEmpty)
        } else {
            None
        };

        if let Some(err) = rejected {
            warn!(
                amount,
                register = self.cash_in_register,
                error = ?err,
                "Cash payment rejected"
            );
            return Err(err);
        }

        self.cash_in_register -= amount;
        let receipt =
            PaymentReceipt::new(self.name(), amount).with_remaining_balance(self.cash_in_register);
        info!(
            transaction_id = %receipt.transaction_id,
            amount,
            register = self.cash_in_register,
            "Cash payment processed"
        );
        Ok(receipt)
    }

    fn name(&self) -> &'static str {
        "Cash"
    }
}

/// Registry of processors keyed by a caller-chosen id
#[derive(Default)]
pub struct ProcessorSelector {
    processors: HashMap<String, BoxedPaymentProcessor>,
}

impl ProcessorSelector {
    pub fn new() -> Self {
        Self {
            processors: HashMap::new(),
        }
    }

    /// Register a processor, replacing any previous one with the same id
    pub fn register(&mut self, id: impl Into<String>, processor: BoxedPaymentProcessor) {
        let id = id.into();
        debug!(id = %id, processor = processor.name(), "Registered payment processor");
        self.processors.insert(id, processor);
    }

    /// Register with builder pattern
    pub fn with_processor(mut self, id: impl Into<String>, processor: BoxedPaymentProcessor) -> Self {
        self.register(id, processor);
        self
    }

    /// Get a processor by id
    pub fn get_mut(&mut self, id: &str) -> Option<&mut BoxedPaymentProcessor> {
        self.processors.get_mut(id)
    }

    /// Route a payment to the processor registered under `id`
    pub fn process(&mut self, id: &str, amount: f64) -> Result<PaymentReceipt, SelectorError> {
        let processor = self
            .processors
            .get_mut(id)
            .ok_or_else(|| SelectorError::UnknownProcessor { id: id.to_string() })?;
        Ok(processor.process_payment(amount)?)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.processors.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Check if an id is registered
    pub fn has_processor(&self, id: &str) -> bool {
        self.processors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never() -> impl NetworkFaults {
        || false
    }

    fn always() -> impl NetworkFaults {
        || true
    }

    fn valid_card() -> CreditCardProcessor {
        CreditCardProcessor::new("1234567890123456", "12/25", "123", 5000.0)
            .with_network_faults(never())
    }

    #[test]
    fn test_card_payment_succeeds() {
        let mut card = valid_card();
        let receipt = card.process_payment(50.0).unwrap();

        assert_eq!(receipt.amount, 50.0);
        assert_eq!(receipt.processor, "Credit Card");
        assert_eq!(receipt.remaining_balance, None);
        assert_eq!(
            receipt.to_string(),
            "Credit Card payment of $50.00 processed successfully."
        );
    }

    #[test]
    fn test_card_balance_not_decremented() {
        let mut card = valid_card();
        card.process_payment(4000.0).unwrap();
        card.process_payment(4000.0).unwrap();

        assert_eq!(card.balance(), 5000.0);
    }

    #[test]
    fn test_card_limit_exceeded_regardless_of_balance() {
        let mut rich = CreditCardProcessor::new("1234567890123456", "12/25", "123", 1_000_000.0)
            .with_network_faults(never());

        assert_eq!(
            rich.process_payment(20_000.0),
            Err(PaymentError::PaymentLimitExceeded)
        );
        assert_eq!(
            valid_card().process_payment(20_000.0),
            Err(PaymentError::PaymentLimitExceeded)
        );
    }

    #[test]
    fn test_card_non_positive_amount() {
        let mut card = valid_card();

        assert_eq!(card.process_payment(0.0), Err(PaymentError::InvalidCard));
        assert_eq!(card.process_payment(-5.0), Err(PaymentError::InvalidCard));
    }

    #[test]
    fn test_card_bad_number() {
        let mut card = CreditCardProcessor::new("1234", "12/25", "123", 5000.0)
            .with_network_faults(never());

        assert_eq!(card.process_payment(10.0), Err(PaymentError::InvalidCard));
    }

    #[test]
    fn test_card_expired() {
        let mut expired = CreditCardProcessor::new("9876543210987654", "01/20", "456", 1000.0)
            .with_network_faults(never());

        assert_eq!(expired.process_payment(30.0), Err(PaymentError::CardExpired));
    }

    #[test]
    fn test_card_insufficient_funds() {
        let mut card = CreditCardProcessor::new("1234567890123456", "12/25", "123", 100.0)
            .with_network_faults(never());

        assert_eq!(
            card.process_payment(100.01),
            Err(PaymentError::InsufficientFunds)
        );
        assert!(card.process_payment(100.0).is_ok());
    }

    #[test]
    fn test_card_network_error() {
        let mut card = valid_card().with_network_faults(always());
        assert_eq!(card.process_payment(50.0), Err(PaymentError::NetworkError));
    }

    #[test]
    fn test_card_check_precedence() {
        // every check fails: amount wins
        let mut broken = CreditCardProcessor::new("12", "01/20", "1", 0.0)
            .with_network_faults(always());
        assert_eq!(broken.process_payment(-1.0), Err(PaymentError::InvalidCard));
        // limit beats card number
        assert_eq!(
            broken.process_payment(10_001.0),
            Err(PaymentError::PaymentLimitExceeded)
        );
        // card number beats expiry
        assert_eq!(broken.process_payment(10.0), Err(PaymentError::InvalidCard));

        // expiry beats balance
        let mut expired_empty = CreditCardProcessor::new("1234567890123456", "01/20", "1", 0.0)
            .with_network_faults(always());
        assert_eq!(
            expired_empty.process_payment(10.0),
            Err(PaymentError::CardExpired)
        );

        // balance beats network
        let mut empty = CreditCardProcessor::new("1234567890123456", "12/25", "1", 0.0)
            .with_network_faults(always());
        assert_eq!(
            empty.process_payment(10.0),
            Err(PaymentError::InsufficientFunds)
        );
    }

    #[test]
    fn test_fault_source_consulted_only_after_validation() {
        let mut draws = 0;
        let mut card = CreditCardProcessor::new("1234567890123456", "01/20", "1", 100.0)
            .with_network_faults(move || {
                draws += 1;
                assert!(draws < 1, "fault source should not be consulted");
                false
            });

        assert_eq!(card.process_payment(10.0), Err(PaymentError::CardExpired));
    }

    #[test]
    fn test_seeded_faults_are_reproducible() {
        let outcomes = |seed| {
            let mut card = valid_card().with_network_faults(RandomFaults::seeded(seed, 0.5));
            (0..50)
                .map(|_| card.process_payment(1.0).is_ok())
                .collect::<Vec<_>>()
        };

        assert_eq!(outcomes(3), outcomes(3));
    }

    #[test]
    fn test_masked_number() {
        let card = valid_card();
        assert_eq!(card.masked_number(), "************3456");
        assert!(!format!("{:?}", card).contains("1234567890123456"));
    }

    #[test]
    fn test_cash_payment_succeeds() {
        let mut register = CashProcessor::new(200.0);
        let receipt = register.process_payment(75.0).unwrap();

        assert_eq!(register.cash_in_register(), 125.0);
        assert_eq!(receipt.remaining_balance, Some(125.0));
        assert_eq!(
            receipt.to_string(),
            "Cash payment of $75.00 processed successfully.\nRemaining cash in register: $125.00"
        );
    }

    #[test]
    fn test_cash_register_empty() {
        let mut register = CashProcessor::new(200.0);

        assert_eq!(
            register.process_payment(300.0),
            Err(PaymentError::CashRegisterEmpty)
        );
        assert_eq!(register.cash_in_register(), 200.0);
    }

    #[test]
    fn test_cash_exact_amount_empties_register() {
        let mut register = CashProcessor::new(200.0);
        register.process_payment(200.0).unwrap();

        assert_eq!(register.cash_in_register(), 0.0);
    }

    #[test]
    fn test_cash_non_positive_amount_reuses_invalid_card() {
        let mut register = CashProcessor::new(200.0);

        assert_eq!(register.process_payment(0.0), Err(PaymentError::InvalidCard));
        assert_eq!(register.cash_in_register(), 200.0);
    }

    #[test]
    fn test_selector_routes_by_id() {
        let mut selector = ProcessorSelector::new()
            .with_processor("visa", Box::new(valid_card()))
            .with_processor("cash", Box::new(CashProcessor::new(200.0)));

        assert_eq!(selector.ids(), vec!["cash", "visa"]);
        assert!(selector.has_processor("visa"));
        assert_eq!(selector.len(), 2);

        let receipt = selector.process("cash", 75.0).unwrap();
        assert_eq!(receipt.processor, "Cash");
        assert_eq!(
            selector.process("cash", 300.0),
            Err(SelectorError::Payment(PaymentError::CashRegisterEmpty))
        );
        assert_eq!(selector.get_mut("visa").unwrap().name(), "Credit Card");
    }

    #[test]
    fn test_selector_unknown_id() {
        let mut selector = ProcessorSelector::new();

        assert!(selector.is_empty());
        assert_eq!(
            selector.process("amex", 10.0),
            Err(SelectorError::UnknownProcessor { id: "amex".into() })
        );
    }

    #[test]
    fn test_receipt_serializes() {
        let receipt = PaymentReceipt::new("Cash", 10.0).with_remaining_balance(90.0);
        let value = serde_json::to_value(&receipt).unwrap();

        assert_eq!(value["processor"], "Cash");
        assert_eq!(value["remaining_balance"], 90.0);
        assert!(value["transaction_id"].is_string());
    }
}
