//! # Toughwood - Villagers that fight back
//!
//! Entry point that wires the services to a simulated village.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Loads:   YamlSettings -> SharedSettings (adapter)       │
//! │    ├── Creates: InMemoryWorld (adapter)                        │
//! │    ├── Creates: AggroService, CropGrowthService (usecase)      │
//! │    └── Runs:    N ticks of the aggression loop                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   toughwood [--config PATH] [--reload-secs S] [--ticks N] [--tick-ms MS] [--trigger MODE] [--json] [--verbose]

mod demo;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use toughwood_adapter::{SharedSettings, YamlSettings};
use toughwood_domain::model::settings::{AggroSettings, CropSettings, TriggerMode};
use toughwood_domain::port::crop_field::CropField;
use toughwood_domain::port::directory::EntityDirectory;
use toughwood_domain::port::settings::SettingsSource;
use toughwood_domain::service::crop_growth::CropOutcome;
use toughwood_usecase::{AggroService, CropGrowthService, ServiceConfig};

use demo::DemoWorld;

#[derive(Parser)]
#[command(name = "toughwood")]
#[command(about = "Toughwood - Villager aggression and fast wheat, simulated")]
#[command(version)]
struct Cli {
    /// Settings file with `villager-aggro` and `fast-wheat` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Re-read the settings file every S seconds (0 disables)
    #[arg(long, default_value_t = 5)]
    reload_secs: u64,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 200)]
    ticks: u64,

    /// Real milliseconds per tick
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Override the trigger mode (retaliate, toggle-on-interact, always)
    #[arg(long)]
    trigger: Option<TriggerMode>,

    /// Print every tick report as a JSON line
    #[arg(long)]
    json: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

/// Settings the services read, plus the file they were loaded from
struct LoadedSettings {
    shared: SharedSettings,
    file: Option<Arc<YamlSettings>>,
}

fn load_settings(cli: &Cli) -> anyhow::Result<LoadedSettings> {
    let loaded = match &cli.config {
        Some(path) => {
            let yaml = YamlSettings::from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?;
            info!("📄 Loaded settings from {}", path.display());
            LoadedSettings {
                shared: SharedSettings::from_source(&yaml),
                file: Some(Arc::new(yaml)),
            }
        }
        None => LoadedSettings {
            shared: SharedSettings::new(AggroSettings::default(), CropSettings::default()),
            file: None,
        },
    };

    apply_overrides(&loaded.shared, cli.trigger);
    Ok(loaded)
}

fn apply_overrides(settings: &SharedSettings, trigger: Option<TriggerMode>) {
    if let Some(trigger) = trigger {
        settings.update_aggro(|s| s.trigger = trigger);
    }
}

/// Periodically re-read `file` and publish it through `shared`
///
/// A failed reload keeps the settings already in effect.
fn spawn_reloader(
    file: Arc<YamlSettings>,
    shared: SharedSettings,
    trigger: Option<TriggerMode>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        loop {
            interval.tick().await;
            match file.reload() {
                Ok(()) => {
                    shared.refresh_from(file.as_ref());
                    apply_overrides(&shared, trigger);
                }
                Err(e) => warn!("Keeping previous settings, reload failed: {}", e),
            }
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("🌾 Toughwood - villagers that fight back");

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    let loaded = load_settings(&cli)?;
    let reloader = match (&loaded.file, cli.reload_secs) {
        (Some(file), secs) if secs > 0 => Some(spawn_reloader(
            Arc::clone(file),
            loaded.shared.clone(),
            cli.trigger,
            Duration::from_secs(secs),
        )),
        _ => None,
    };
    let settings = Arc::new(loaded.shared);
    let aggro = settings.aggro();
    info!(
        "   trigger={} enabled={} follow-range={} attack-range={}",
        aggro.trigger, aggro.enabled, aggro.follow_range, aggro.attack_range
    );

    let village = DemoWorld::build();
    let world = Arc::new(village.world.clone());
    let tick_interval = Duration::from_millis(cli.tick_ms.max(1));

    let service = AggroService::new(
        Arc::clone(&world) as Arc<dyn EntityDirectory>,
        Arc::clone(&settings) as Arc<dyn SettingsSource>,
        ServiceConfig {
            tick_interval,
            ..ServiceConfig::default()
        },
    );
    let crops = CropGrowthService::new(
        Arc::clone(&world) as Arc<dyn CropField>,
        Arc::clone(&settings) as Arc<dyn SettingsSource>,
        tick_interval,
    );

    // ========================================
    // Start and provoke
    // ========================================

    let mut reports = service.subscribe();
    service.start();
    info!(
        "🏘️  {} villagers, {} aggressive at start",
        village.world.actor_count(),
        service.registry().len()
    );

    if let Some(stimulus) = village.provocation(aggro.trigger) {
        match service.on_hostile_stimulus(&stimulus) {
            Some(mutation) => info!("⚔️  Alex provoked a villager: {:?}", mutation),
            None => info!("🕊️  Alex's provocation was ignored"),
        }
    }

    let (seeds, farmland, face) = village.sow_wheat();
    let harvest = crops.on_block_interact(Some(&seeds), &farmland, face);
    if harvest.is_none() {
        info!("🌱 Fast wheat is disabled");
    }

    // ========================================
    // Run the loop
    // ========================================

    let mut attacks = 0;
    let mut consumed = 0;
    while consumed < cli.ticks {
        match reports.recv().await {
            Ok(report) => {
                consumed += 1;
                village.world.step();
                attacks += report.attacks();

                if cli.json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    debug!(
                        "tick {}: {} records, {} attacks, {} evictions",
                        report.tick,
                        report.records.len(),
                        report.attacks(),
                        report.evictions()
                    );
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Report consumer fell behind, skipped {} ticks", skipped);
                consumed += skipped;
            }
            Err(RecvError::Closed) => break,
        }
    }

    service.stop().await;
    if let Some(reloader) = reloader {
        reloader.abort();
    }

    // ========================================
    // Summary
    // ========================================

    let hits = village.world.drain_damage_log();
    info!(
        "📊 Ran {} ticks, {} attacks attempted, {} landed",
        service.current_tick(),
        attacks,
        hits.len()
    );
    for player in [village.alex, village.steve] {
        let health = village.world.health(&player).unwrap_or_default();
        info!("   {} health: {:.1}", village.player_name(&player), health);
    }
    for villager in &village.villagers {
        match world.current_velocity(villager) {
            Ok(v) => info!("   villager {} velocity: ({:.2}, {:.2}, {:.2})", villager, v.x, v.y, v.z),
            Err(e) => warn!("   villager {}: {}", villager, e),
        }
    }

    if let Some(handle) = harvest {
        if !handle.is_finished() {
            handle.abort();
            info!("🌱 Stopped before the wheat could ripen");
        } else {
            match handle.await {
                Ok(CropOutcome::Matured { age }) => info!("🌾 Wheat ripened to age {}", age),
                Ok(outcome) => info!("🌱 Wheat left as is: {:?}", outcome),
                Err(e) => warn!("Crop task failed: {}", e),
            }
        }
    }

    Ok(())
}
