use anyhow::Context;
use chrono::Utc;

use bookledger_circulation::{AsyncLedger, LedgerConfig, LibraryLedger};
use bookledger_core::ManualClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bookledger_observability::init();

    let config = LedgerConfig::from_env().context("invalid ledger configuration")?;
    tracing::info!(
        loan_period_days = config.loan_period().num_days(),
        late_fee_cents_per_day = config.late_fee_cents_per_day(),
        latency_ms = u64::try_from(config.simulated_latency().as_millis()).unwrap_or(u64::MAX),
        "starting circulation demo"
    );

    let clock = ManualClock::new(Utc::now());
    let mut ledger = AsyncLedger::new(LibraryLedger::with_clock(config, clock));

    if let Err(err) = bookledger_demo::run_scenario(&mut ledger, |line| println!("{line}")).await {
        tracing::error!(kind = err.kind(), error = %err, "demo halted");
        eprintln!("{err}");
    }

    let snapshot = serde_json::to_string(&ledger.ledger().snapshot())
        .context("failed to serialize ledger snapshot")?;
    tracing::debug!(snapshot = %snapshot, "final ledger state");

    Ok(())
}
