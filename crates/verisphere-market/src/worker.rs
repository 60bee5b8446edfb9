//! Background worker for continuous settlement

use crate::{Market, MarketError};
use tokio::time::{interval, Duration};
use verisphere_domain::traits::PeriodClock;

/// Background worker that sweeps settlement on a schedule
///
/// Settlement is permissionless and idempotent per period, so the worker
/// simply calls [`Market::settle_all`] at a fixed interval; anyone else
/// settling concurrently is harmless.
///
/// # Examples
///
/// ```no_run
/// use tokio::time::Duration;
/// use verisphere_market::{Market, MarketConfig, SettlementWorker};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut market = Market::new(MarketConfig::default())?;
///     let mut worker = SettlementWorker::new(Duration::from_secs(3600));
///
///     // Run until Ctrl+C
///     worker.run(&mut market).await?;
///     Ok(())
/// }
/// ```
pub struct SettlementWorker {
    interval: Duration,
    sweeps: u64,
}

impl SettlementWorker {
    /// A worker sweeping every `interval`
    pub fn new(interval: Duration) -> Self {
        Self { interval, sweeps: 0 }
    }

    /// Completed sweep count
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    /// Run sweeps until a shutdown signal (Ctrl+C) is received
    pub async fn run<K: PeriodClock>(
        &mut self,
        market: &mut Market<K>,
    ) -> Result<(), MarketError> {
        let mut ticker = interval(self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let settlements = market.settle_all()?;
                    let settled = settlements.iter().filter(|s| !s.is_no_op()).count();
                    self.sweeps += 1;
                    tracing::info!(
                        posts = settlements.len(),
                        settled,
                        sweep = self.sweeps,
                        "settlement sweep complete"
                    );
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("settlement worker shutting down");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_starts_with_no_sweeps() {
        let worker = SettlementWorker::new(Duration::from_secs(60));
        assert_eq!(worker.sweeps(), 0);
    }
}
