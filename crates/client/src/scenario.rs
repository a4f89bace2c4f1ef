//! Replayable session scenarios.
//!
//! A scenario describes one client's view of a table: the scene tokens, the
//! actors and their items, the local user's permissions, stored settings,
//! world macros, and a timeline of attack events to feed the engine.
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use anim_core::{Point, Sequence, TokenRef};
use runtime::{
    ActorDirectoryImpl, AttackEvent, InMemorySettings, Macro, MacroDirectoryImpl, MacroError,
    MacroScope, ModuleOracleImpl, PermissionOracleImpl, SceneOracleImpl,
};

const BUNDLED_SCENARIO: &str = include_str!("../scenarios/demo.json");

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user: UserSpec,
    /// Actors owned by any player in the session.
    #[serde(default)]
    pub player_owned: Vec<String>,
    #[serde(default)]
    pub active_modules: Vec<String>,
    #[serde(default)]
    pub grid_size: Option<f64>,
    #[serde(default)]
    pub tokens: Vec<TokenSpec>,
    #[serde(default)]
    pub actors: Vec<ActorSpec>,
    #[serde(default)]
    pub settings: HashMap<String, Value>,
    #[serde(default)]
    pub macros: Vec<MacroSpec>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

/// The local user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSpec {
    #[serde(default)]
    pub gm: bool,
    #[serde(default)]
    pub owns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSpec {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub controlled: bool,
    #[serde(default)]
    pub targeted: bool,
}

impl TokenSpec {
    fn token_ref(&self) -> TokenRef {
        let token = TokenRef::new(self.id.as_str(), self.name.as_str(), Point::new(self.x, self.y));
        match &self.actor {
            Some(actor) => token.with_actor(actor.as_str()),
            None => token,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActorSpec {
    pub id: String,
    #[serde(default)]
    pub items: Vec<Value>,
}

/// A world macro that stretches one asset from attacker to target.
#[derive(Debug, Clone, Deserialize)]
pub struct MacroSpec {
    pub id: String,
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimedEvent {
    /// Offset from the start of the replay.
    pub at_ms: u64,
    pub event: AttackEvent,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid scenario: {}", path.display()))
    }

    /// The demo scenario shipped with the client.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_SCENARIO).context("Invalid bundled scenario")
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut scenario: Scenario =
            serde_json::from_str(content).context("Failed to parse scenario JSON")?;
        scenario.events.sort_by_key(|timed| timed.at_ms);
        Ok(scenario)
    }

    pub fn scene(&self) -> SceneOracleImpl {
        let mut scene = SceneOracleImpl::new();
        if let Some(grid_size) = self.grid_size {
            scene = scene.with_grid_size(grid_size);
        }
        for spec in &self.tokens {
            let token = spec.token_ref();
            if spec.controlled {
                scene.control(token.clone());
            } else {
                scene.place(token.clone());
            }
            if spec.targeted {
                scene.target(token);
            }
        }
        scene
    }

    pub fn permissions(&self) -> PermissionOracleImpl {
        let base = if self.user.gm {
            PermissionOracleImpl::gm()
        } else {
            PermissionOracleImpl::player(self.user.owns.iter().cloned())
        };
        base.with_player_owned(self.player_owned.iter().cloned())
    }

    pub fn actors(&self) -> ActorDirectoryImpl {
        self.actors
            .iter()
            .fold(ActorDirectoryImpl::new(), |directory, actor| {
                actor
                    .items
                    .iter()
                    .cloned()
                    .fold(directory.with_actor(actor.id.as_str()), |directory, item| {
                        directory.with_item(actor.id.as_str(), item)
                    })
            })
    }

    pub fn modules(&self) -> ModuleOracleImpl {
        ModuleOracleImpl::with_active(self.active_modules.iter().map(String::as_str))
    }

    pub fn settings(&self) -> InMemorySettings {
        InMemorySettings::with_values(self.settings.clone())
    }

    pub fn macros(&self) -> MacroDirectoryImpl {
        self.macros
            .iter()
            .fold(MacroDirectoryImpl::new(), |directory, spec| {
                directory.with_macro(spec.id.as_str(), Arc::new(AssetMacro::from(spec)))
            })
    }
}

#[derive(Debug)]
struct AssetMacro {
    name: String,
    file: String,
}

impl From<&MacroSpec> for AssetMacro {
    fn from(spec: &MacroSpec) -> Self {
        Self {
            name: spec.name.clone(),
            file: spec.file.clone(),
        }
    }
}

#[async_trait]
impl Macro for AssetMacro {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, scope: &MacroScope) -> Result<(), MacroError> {
        let ctx = &scope.context;
        let mut seq = Sequence::new(scope.module_id.as_str());
        let effect = seq
            .effect()
            .file(self.file.as_str())
            .at_location(&ctx.source_token)
            .stretch_to(&ctx.target_token)
            .scale(ctx.scale);
        if !ctx.is_hit {
            effect.opacity(0.5).missed();
        }

        scope
            .sequencer
            .play(seq)
            .await
            .map_err(|err| MacroError(err.to_string()))
    }
}
