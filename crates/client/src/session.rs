//! Engine assembly and scenario replay.
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use anim_content::{ScriptCatalog, ScriptCatalogLoader, TablesLoader};
use anim_core::MappingTables;
use runtime::{AnimationEngine, HostServices, PlaybackEvent, ScriptLibraryImpl, TracingNotifier};

use crate::config::ClientConfig;
use crate::render::TracingRenderer;
use crate::scenario::{Scenario, TimedEvent};

/// Counts of replay outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub played: usize,
    pub failed: usize,
    /// Skip counts keyed by reason.
    pub skipped: BTreeMap<String, usize>,
}

impl ReplaySummary {
    fn record(&mut self, outcome: &PlaybackEvent) {
        match outcome {
            PlaybackEvent::Played { .. } => self.played += 1,
            PlaybackEvent::Failed { .. } => self.failed += 1,
            PlaybackEvent::Skipped { reason, .. } => {
                *self.skipped.entry(reason.to_string()).or_default() += 1;
            }
        }
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// An engine wired to a scenario's host views.
pub struct Session {
    engine: AnimationEngine,
    renderer: Arc<TracingRenderer>,
    events: Vec<TimedEvent>,
}

impl Session {
    pub fn build(config: &ClientConfig, scenario: Scenario) -> Result<Self> {
        let tables = load_tables(config)?;
        let catalog = load_catalog(config)?;

        let mut scripts = ScriptLibraryImpl::new(config.engine.module_root());
        for (path, script) in catalog.producers() {
            scripts.register(path, script);
        }
        debug!(scripts = scripts.len(), "script library ready");

        let host = HostServices::new(
            Arc::new(scenario.scene()),
            Arc::new(scenario.permissions()),
            Arc::new(scenario.actors()),
            Arc::new(scenario.modules()),
            Arc::new(TracingNotifier),
        );
        let renderer = Arc::new(TracingRenderer::new());

        let engine = AnimationEngine::builder()
            .config(config.engine.clone())
            .host(host)
            .renderer(renderer.clone())
            .settings(Arc::new(scenario.settings()))
            .tables(tables)
            .scripts(Arc::new(scripts))
            .macros(Arc::new(scenario.macros()))
            .build()
            .context("Failed to build animation engine")?;

        Ok(Self {
            engine,
            renderer,
            events: scenario.events,
        })
    }

    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    pub fn sequences_played(&self) -> usize {
        self.renderer.played()
    }

    /// Feeds every event to the engine at its scheduled offset.
    pub async fn replay(&self) -> ReplaySummary {
        let start = Instant::now();
        let mut summary = ReplaySummary::default();

        for timed in &self.events {
            sleep_until(start + Duration::from_millis(timed.at_ms)).await;
            let outcome = self.engine.on_attack_event(timed.event.clone()).await;
            info!(at_ms = timed.at_ms, outcome = ?outcome, "event handled");
            summary.record(&outcome);
        }

        summary
    }
}

fn load_tables(config: &ClientConfig) -> Result<MappingTables> {
    match &config.tables {
        Some(path) => TablesLoader::load(path)
            .with_context(|| format!("Failed to load mapping tables: {}", path.display())),
        None => TablesLoader::embedded(),
    }
}

fn load_catalog(config: &ClientConfig) -> Result<ScriptCatalog> {
    match &config.scripts {
        Some(path) => ScriptCatalogLoader::load(path)
            .with_context(|| format!("Failed to load script catalog: {}", path.display())),
        None => ScriptCatalogLoader::embedded(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::EngineConfig;
    use std::path::PathBuf;

    fn config() -> ClientConfig {
        ClientConfig {
            engine: EngineConfig {
                rng_seed: Some(7),
                ..EngineConfig::default()
            },
            ..ClientConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn bundled_scenario_replays() {
        let session = Session::build(&config(), Scenario::bundled().unwrap()).unwrap();
        assert!(session.engine().is_ready());

        let summary = session.replay().await;

        assert_eq!(summary.played, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.skipped_total(), 5);
        for reason in [
            "duplicate",
            "throttled",
            "producer_unavailable",
            "not_an_attack",
            "not_owner",
        ] {
            assert_eq!(summary.skipped.get(reason), Some(&1), "{reason}");
        }
        // Two targets per played attack.
        assert_eq!(session.sequences_played(), 6);
    }

    #[test]
    fn bad_tables_path_fails_with_context() {
        let config = ClientConfig {
            tables: Some(PathBuf::from("/nonexistent/tables.ron")),
            ..config()
        };
        let err = match Session::build(&config, Scenario::bundled().unwrap()) {
            Ok(_) => panic!("expected a load error"),
            Err(err) => err,
        };
        assert!(format!("{err:#}").contains("/nonexistent/tables.ron"));
    }
}
