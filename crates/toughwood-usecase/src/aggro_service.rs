//! AggroService - Lifecycle and tick loop for villager aggression
//!
//! ```text
//! host events ──► on_hostile_stimulus ──► TriggerPolicy ──► AggroRegistry
//!                                                               ▲
//! tokio interval ──► TickClock::advance ──► AggroEngine::tick ──┘
//!                                               │
//!                                               └──► broadcast<TickReport>
//! ```
//!
//! One repeating timer drives the engine. Each tick runs to completion
//! before the next is awaited, so ticks never overlap. The stimulus path
//! can run concurrently from any thread.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use toughwood_domain::model::aggro::Tick;
use toughwood_domain::model::entity::{EntityId, EntityKind};
use toughwood_domain::model::stimulus::Stimulus;
use toughwood_domain::port::directory::EntityDirectory;
use toughwood_domain::port::settings::SettingsSource;
use toughwood_domain::service::engine::{AggroEngine, TickReport};
use toughwood_domain::service::registry::AggroRegistry;
use toughwood_domain::service::trigger_policy::{Mutation, TriggerPolicy};

use crate::clock::TickClock;

/// Capacity of the tick report channel; slow subscribers miss old reports
const REPORT_CHANNEL_CAPACITY: usize = 256;

/// Shortest accepted tick period; shorter configured periods are raised to it
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// AggroService configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Real time between ticks
    pub tick_interval: Duration,
    /// Which actors can turn aggressive
    pub eligible_kind: EntityKind,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            eligible_kind: EntityKind::Villager,
        }
    }
}

/// Everything a tick needs, cloned into the timer task
#[derive(Clone)]
struct TickContext {
    registry: Arc<AggroRegistry>,
    directory: Arc<dyn EntityDirectory>,
    settings: Arc<dyn SettingsSource>,
    clock: Arc<TickClock>,
    engine: AggroEngine,
    reports: broadcast::Sender<TickReport>,
}

impl TickContext {
    fn run_tick(&self) -> TickReport {
        let now = self.clock.advance();
        let settings = self.settings.aggro();
        let report = self
            .engine
            .tick(now, &settings, &self.registry, self.directory.as_ref());

        if report.cleared {
            debug!("Aggro disabled at tick {}; registry cleared", now);
        }
        // No subscribers is fine
        let _ = self.reports.send(report.clone());
        report
    }
}

/// The aggression feature as the host sees it
pub struct AggroService {
    ctx: TickContext,
    policy: TriggerPolicy,
    config: ServiceConfig,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AggroService {
    /// Create a stopped service
    pub fn new(
        directory: Arc<dyn EntityDirectory>,
        settings: Arc<dyn SettingsSource>,
        mut config: ServiceConfig,
    ) -> Self {
        if config.tick_interval < MIN_TICK_INTERVAL {
            warn!(
                "Tick interval {:?} is too short, using {:?}",
                config.tick_interval, MIN_TICK_INTERVAL
            );
            config.tick_interval = MIN_TICK_INTERVAL;
        }
        let (reports, _) = broadcast::channel(REPORT_CHANNEL_CAPACITY);
        Self {
            ctx: TickContext {
                registry: Arc::new(AggroRegistry::new()),
                directory,
                settings,
                clock: Arc::new(TickClock::new()),
                engine: AggroEngine::new(),
                reports,
            },
            policy: TriggerPolicy::new(config.eligible_kind.clone()),
            config,
            task: Mutex::new(None),
        }
    }

    // ========== Lifecycle ==========

    /// Begin consuming ticks
    ///
    /// Returns `false` if the service was already running. Records left by
    /// stimuli received while stopped are discarded. In `always` mode every
    /// eligible actor currently in the world is marked aggressive before the
    /// first tick.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> bool {
        let Ok(mut task) = self.task.lock() else {
            return false;
        };
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return false;
        }

        self.ctx.registry.clear();
        let settings = self.ctx.settings.aggro();
        let now = self.ctx.clock.now();
        let initial = self.policy.initial(&settings, self.ctx.directory.as_ref());
        let seeded = initial
            .iter()
            .filter(|m| {
                self.policy
                    .apply(m, &settings, &self.ctx.registry, self.ctx.directory.as_ref(), now)
            })
            .count();
        if seeded > 0 {
            info!("Marked {} {}s aggressive at start-up", seeded, self.policy.eligible_kind());
        }

        let ctx = self.ctx.clone();
        let period = self.config.tick_interval;
        *task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                ctx.run_tick();
            }
        }));

        info!(
            "Aggro service started (trigger: {}, tick every {:?})",
            settings.trigger, period
        );
        true
    }

    /// Stop consuming ticks and forget every record
    ///
    /// When this returns no further tick will run.
    pub async fn stop(&self) {
        let handle = self.task.lock().ok().and_then(|mut task| task.take());
        if let Some(handle) = handle {
            handle.abort();
            // A cancelled task reports a JoinError; that is the expected outcome
            let _ = handle.await;
            info!("Aggro service stopped at tick {}", self.ctx.clock.now());
        }
        self.ctx.registry.clear();
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .map(|task| task.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Run one tick synchronously, exactly as the timer would
    ///
    /// For hosts that drive their own scheduler. Do not mix with a running
    /// timer.
    pub fn tick_now(&self) -> TickReport {
        self.ctx.run_tick()
    }

    // ========== Stimulus Entry Point ==========

    /// Route a host event through the trigger policy
    ///
    /// Returns the mutation that was applied, if any.
    pub fn on_hostile_stimulus(&self, stimulus: &Stimulus) -> Option<Mutation> {
        let settings = self.ctx.settings.aggro();
        self.policy.handle(
            stimulus,
            &settings,
            &self.ctx.registry,
            self.ctx.directory.as_ref(),
            self.ctx.clock.now(),
        )
    }

    // ========== Inspection ==========

    pub fn registry(&self) -> &AggroRegistry {
        &self.ctx.registry
    }

    pub fn is_aggressive(&self, actor: &EntityId) -> bool {
        self.ctx.registry.contains(actor)
    }

    pub fn current_tick(&self) -> Tick {
        self.ctx.clock.now()
    }

    /// Receive a copy of every tick report from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TickReport> {
        self.ctx.reports.subscribe()
    }
}

impl Drop for AggroService {
    fn drop(&mut self) {
        if let Ok(mut task) = self.task.lock() {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
    }
}
