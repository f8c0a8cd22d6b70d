//! Background Simulator - Periodic device drift and incoming calls
//!
//! Ticks at a fixed interval while the phone service is running. Each tick,
//! if a device is connected: maybe ring from a random contact (only while
//! idle), then drift the active device's battery and signal.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;

use super::device_registry::DriftRates;
use super::phone::WeakPhone;

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Enable/disable the simulator
    pub enabled: bool,
    /// Interval between ticks
    pub tick_interval: Duration,
    /// Per-tick chance of a spontaneous incoming call
    pub incoming_call_probability: f64,
    pub drift: DriftRates,
    /// Fixed RNG seed (random when None)
    pub seed: Option<u64>,
    /// How long `stop` waits for the task to finish
    pub shutdown_timeout: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval: Duration::from_secs(5),
            incoming_call_probability: 0.0005,
            drift: DriftRates::default(),
            seed: None,
            shutdown_timeout: Duration::from_secs(1),
        }
    }
}

/// Background simulator
pub(crate) struct BackgroundSimulator {
    phone: WeakPhone,
    config: SimulatorConfig,
    rng: StdRng,
}

impl BackgroundSimulator {
    pub(crate) fn new(phone: WeakPhone, config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { phone, config, rng }
    }

    /// Start the simulator (runs in background)
    pub(crate) fn start(self) -> SimulatorHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            self.run(shutdown_rx).await;
        });
        SimulatorHandle { shutdown_tx, task }
    }

    /// Run the tick loop until shutdown is signalled
    async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        tracing::info!(
            "📡 Phone simulator started (interval: {:?})",
            self.config.tick_interval
        );

        let mut ticker = interval(self.config.tick_interval.max(Duration::from_millis(1)));

        // Skip the first immediate tick
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let Some(phone) = self.phone.upgrade() else {
                tracing::debug!("Phone service dropped, simulator exiting");
                break;
            };

            let outcome = phone.simulation_tick(&mut self.rng, &self.config).await;

            if let Some(call) = &outcome.incoming_call {
                tracing::info!("📲 Simulated incoming call from {}", call.caller_label());
            }
            if outcome.drifted {
                let status = phone.get_status().await;
                tracing::debug!(
                    "🔋 Device drift: battery {:?}%, signal {:?} bars",
                    status.battery_percent,
                    status.signal_bars
                );
            }
        }

        tracing::info!("📡 Phone simulator stopped");
    }
}

/// Running simulator task and its shutdown signal
pub(crate) struct SimulatorHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SimulatorHandle {
    /// Signal shutdown and wait up to `timeout` for the task to finish
    ///
    /// Returns false when the task did not stop in time; it is then left to
    /// finish on its own.
    pub(crate) async fn shutdown(self, timeout: Duration) -> bool {
        let _ = self.shutdown_tx.send(true);

        match tokio::time::timeout(timeout, self.task).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!("⚠️  Phone simulator task failed: {}", e);
                true
            }
            Err(_) => {
                tracing::warn!(
                    "⚠️  Phone simulator did not stop within {:?}, continuing shutdown",
                    timeout
                );
                false
            }
        }
    }
}
