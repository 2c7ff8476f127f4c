//! Simulation driver - emulates a live packing line
//!
//! On every tick each open container draws a Bernoulli trial; winners get a
//! freshly packed unit appended through the store's invariant-preserving
//! update path. Full containers are skipped, so simulation can never
//! overflow a case. The RNG is seedable and `step` is synchronous, which is
//! what makes ticks deterministic in tests; the tokio run loop only decides
//! *when* a tick happens, never *what* it does.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use packline_core::Unit;
use packline_store::{lock_store, SharedStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Milliseconds between ticks of the run loop.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Chance per open container per tick of receiving a unit.
    #[serde(default = "default_fill_probability")]
    pub fill_probability: f64,

    #[serde(default = "default_batch_id")]
    pub batch_id: String,

    #[serde(default = "default_unit_prefix")]
    pub unit_prefix: String,

    /// Fixed seed for deterministic runs; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            fill_probability: default_fill_probability(),
            batch_id: default_batch_id(),
            unit_prefix: default_unit_prefix(),
            seed: None,
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    3000
}

fn default_fill_probability() -> f64 {
    0.3
}

fn default_batch_id() -> String {
    "BATCH-SIM".to_string()
}

fn default_unit_prefix() -> String {
    "BTL".to_string()
}

/// One unit packed by the simulation during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillEvent {
    pub unit_id: String,
    pub container_id: String,
}

/// Timed generator of fill events against the shared store.
///
/// `step` performs one tick synchronously; `spawn` runs ticks on a tokio
/// interval until stopped. Stopping between ticks is always safe because
/// each tick mutates the store under one lock, and a stopped driver can be
/// resumed against current state without replaying history.
pub struct SimulationDriver {
    store: SharedStore,
    config: SimConfig,
    rng: StdRng,
    serial: u64,
}

impl SimulationDriver {
    pub fn new(store: SharedStore, config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            config,
            rng,
            serial: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// One tick: visit every open container, flip the coin, pack a fresh
    /// unit on success. Runs entirely under one store lock.
    pub fn step(&mut self) -> Vec<FillEvent> {
        let probability = self.config.fill_probability.clamp(0.0, 1.0);
        let mut store = lock_store(&self.store);

        // Full containers are skipped up front; a full case is never touched.
        let open_ids: Vec<String> = store
            .containers()
            .filter(|c| !c.is_full())
            .map(|c| c.id.clone())
            .collect();

        let mut events = Vec::new();
        for container_id in open_ids {
            if !self.rng.gen_bool(probability) {
                continue;
            }
            self.serial += 1;
            let unit_id = format!("{}-{:05}", self.config.unit_prefix, self.serial);
            let unit = Unit::new(&unit_id, &self.config.batch_id);

            match store.update_container(&container_id, |c| c.push_unit(unit)) {
                Ok(()) => {
                    tracing::debug!(%unit_id, %container_id, "simulated fill");
                    events.push(FillEvent {
                        unit_id,
                        container_id,
                    });
                }
                Err(err) => {
                    // The container was open when collected and the lock is
                    // still held, so this only fires if seed data is broken.
                    tracing::warn!(%container_id, %err, "simulated fill rejected");
                }
            }
        }
        events
    }

    /// Run ticks on an interval until asked to stop, then hand the driver
    /// back so the caller can resume later.
    pub fn spawn(self) -> SimHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        SimHandle { shutdown_tx, task }
    }

    async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Self {
        let mut interval = tokio::time::interval(Duration::from_millis(
            self.config.tick_interval_ms.max(1),
        ));
        tracing::info!(
            interval_ms = self.config.tick_interval_ms,
            probability = self.config.fill_probability,
            "simulation started"
        );
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let events = self.step();
                    if !events.is_empty() {
                        tracing::info!(count = events.len(), "simulation tick packed units");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("simulation stopped");
        self
    }
}

/// Handle to a running simulation task.
pub struct SimHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<SimulationDriver>,
}

impl SimHandle {
    /// Signal the loop and wait for it to finish its current tick. Returns
    /// the driver so the simulation can be restarted against current state.
    pub async fn stop(self) -> SimulationDriver {
        // Receiver dropping also ends the loop, so send errors are fine.
        let _ = self.shutdown_tx.send(true);
        match self.task.await {
            Ok(driver) => driver,
            Err(err) => {
                // A panicked tick cannot be resumed; surface it.
                std::panic::resume_unwind(err.into_panic())
            }
        }
    }
}
