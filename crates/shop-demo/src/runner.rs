//! # Walkthrough Runner
//!
//! Drives the three exercises against a [`DemoConfig`] and writes the
//! console transcript to any `io::Write`.

use crate::config::{DemoConfig, PaymentScenario, ReportFormat};
use shop_core::{
    format_amount, Cart, CashProcessor, CreditCardProcessor, Product, ProcessorSelector,
    RandomFaults, SelectorError,
};
use std::io::Write;
use tracing::{debug, info};

/// Tally of payment attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentTally {
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs the walkthrough sections in order
pub struct Runner<W> {
    config: DemoConfig,
    format: ReportFormat,
    out: W,
}

impl<W: Write> Runner<W> {
    pub fn new(config: DemoConfig, format: ReportFormat, out: W) -> Self {
        Self {
            config,
            format,
            out,
        }
    }

    /// Run every section
    pub fn run(&mut self) -> anyhow::Result<PaymentTally> {
        self.run_posts()?;
        let cart = self.run_cart()?;
        debug!(items = cart.len(), "Cart walkthrough finished");
        self.run_payments()
    }

    /// Print each configured post
    pub fn run_posts(&mut self) -> anyhow::Result<()> {
        for post in &self.config.posts {
            write!(self.out, "{}", post)?;
        }
        Ok(())
    }

    /// Fill, discount, trim and clear a cart, listing it after each step.
    /// Returns the (cleared) cart.
    pub fn run_cart(&mut self) -> anyhow::Result<Cart> {
        let scenario = self.config.cart.clone();
        let mut cart = Cart::new();

        for product in &scenario.products {
            cart.add_product(product, product.quantity);
        }
        info!(
            items = cart.len(),
            subtotal = cart.subtotal(),
            "Cart filled"
        );

        writeln!(self.out, "Cart with no discount:")?;
        self.report(&cart)?;

        let strategy = scenario.discount.into_strategy();
        writeln!(self.out, "\nCart with {}:", strategy.label())?;
        cart.set_discount_strategy(strategy);
        self.report(&cart)?;

        for name in &scenario.remove {
            cart.remove_product(&Product::new(name.clone(), 0.0));
            writeln!(self.out, "\nCart after removing {}:", name)?;
            self.report(&cart)?;
        }

        cart.clear();
        writeln!(self.out, "\nCart after clearing:")?;
        self.report(&cart)?;

        Ok(cart)
    }

    /// Register the configured processors and run every payment attempt
    pub fn run_payments(&mut self) -> anyhow::Result<PaymentTally> {
        let mut selector = build_selector(&self.config.payments);
        let mut tally = PaymentTally::default();

        writeln!(self.out, "\n--- Payment Processing Examples ---")?;

        for attempt in &self.config.payments.attempts {
            let heading = attempt.label.clone().unwrap_or_else(|| {
                format!("{} payment of {}", attempt.processor, format_amount(attempt.amount))
            });
            writeln!(self.out, "\nAttempting {}:", heading)?;

            match selector.process(&attempt.processor, attempt.amount) {
                Ok(receipt) => {
                    tally.succeeded += 1;
                    writeln!(self.out, "{}", receipt)?;
                    writeln!(self.out, "✅ Transaction completed successfully")?;
                }
                Err(SelectorError::Payment(err)) => {
                    tally.failed += 1;
                    writeln!(self.out, "❌ Payment Error: {}", err.message())?;
                }
                Err(err) => {
                    tally.failed += 1;
                    writeln!(self.out, "❌ Unexpected error: {}", err)?;
                }
            }
        }

        info!(
            succeeded = tally.succeeded,
            failed = tally.failed,
            "Payment walkthrough finished"
        );
        Ok(tally)
    }

    /// Consume the runner, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn report(&mut self, cart: &Cart) -> anyhow::Result<()> {
        match self.format {
            ReportFormat::Text => write!(self.out, "{}", cart)?,
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, &cart.summary())?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}

/// Build a selector holding every configured card and register
pub fn build_selector(scenario: &PaymentScenario) -> ProcessorSelector {
    let mut selector = ProcessorSelector::new();

    for (index, card) in scenario.cards.iter().enumerate() {
        let faults = match scenario.seed {
            Some(seed) => {
                RandomFaults::seeded(seed.wrapping_add(index as u64), scenario.network_failure_rate)
            }
            None => RandomFaults::from_entropy(scenario.network_failure_rate),
        };
        let processor = CreditCardProcessor::new(
            card.card_number.clone(),
            card.expiry_date.clone(),
            card.cvv.clone(),
            card.balance,
        )
        .with_network_faults(faults);
        selector.register(card.id.clone(), Box::new(processor));
    }

    for register in &scenario.registers {
        selector.register(
            register.id.clone(),
            Box::new(CashProcessor::new(register.cash_in_register)),
        );
    }

    selector
}
