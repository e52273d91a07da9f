//! # Storefront RS
//!
//! Walks through the post, cart and payment exercises on the console.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: point at a custom data file
//! export SHOP_DEMO_CONFIG=config/demo.toml
//!
//! # Run the walkthrough
//! storefront
//! ```

use shop_demo::{DemoConfig, Runner, Settings};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the transcript on stdout stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let settings = Settings::from_env()?;
    let config = DemoConfig::load(&settings)?;

    info!("Report format: {:?}", settings.report_format);
    info!("Posts loaded: {}", config.posts.len());
    info!("Payment attempts: {}", config.payments.attempts.len());

    let stdout = std::io::stdout();
    let mut runner = Runner::new(config, settings.report_format, stdout.lock());
    let tally = runner.run()?;

    info!(
        "Done: {} succeeded, {} failed",
        tally.succeeded, tally.failed
    );

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🛒 Storefront RS 🛒
  ━━━━━━━━━━━━━━━━━━━━━━━
  Cart & payment walkthrough
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
