//! Shared fixtures: one player, one attacker token, one target, embedded content.
#![allow(dead_code)]

use std::sync::Arc;

use anim_content::{ScriptCatalogLoader, TablesLoader};
use anim_core::{Point, TokenRef};
use runtime::{
    ActorDirectoryImpl, ActorSummary, AnimationEngine, AttackRolled, ChatMessage, EngineConfig,
    InMemoryHost, InMemorySettings, MacroDirectoryImpl, ModuleOracleImpl, PermissionOracleImpl,
    RecordingRenderer, RollFlags, SceneOracleImpl, ScriptLibraryImpl, Speaker, TargetInfo,
};
use serde_json::{Value, json};

pub const ACTOR: &str = "pc-vesk";
pub const NPC: &str = "npc-goblin";
pub const SOURCE: &str = "tok-vesk";
pub const TARGET: &str = "tok-goblin";
pub const SECOND_TARGET: &str = "tok-drone";

pub fn source_token() -> TokenRef {
    TokenRef::new(SOURCE, "Vesk", Point::new(100.0, 100.0)).with_actor(ACTOR)
}

pub fn target_token() -> TokenRef {
    TokenRef::new(TARGET, "Goblin", Point::new(500.0, 100.0)).with_actor(NPC)
}

pub fn second_target() -> TokenRef {
    TokenRef::new(SECOND_TARGET, "Drone", Point::new(500.0, 400.0))
}

pub fn laser_pistol() -> Value {
    json!({
        "id": "i-laser",
        "uuid": "Actor.pc-vesk.Item.i-laser",
        "name": "Azimuth Laser Pistol",
        "system": {
            "weaponCategory": "laser",
            "weaponType": "smallA",
            "actionType": "rwak",
            "damage": {"parts": [["1d4", "fire"]]}
        }
    })
}

pub fn longsword() -> Value {
    json!({
        "id": "i-sword",
        "uuid": "Actor.pc-vesk.Item.i-sword",
        "name": "Longsword",
        "system": {
            "weaponCategory": "uncategorized",
            "weaponType": "basicM",
            "actionType": "mwak",
            "damage": {"parts": [{"formula": "1d8", "types": {"slashing": true}}]}
        }
    })
}

/// Small arm with no category: resolves to a script that is not shipped.
pub fn tactical_pistol() -> Value {
    json!({
        "id": "i-pistol",
        "uuid": "Actor.pc-vesk.Item.i-pistol",
        "name": "Tactical Semi-Auto Pistol",
        "system": {"weaponType": "smallA", "actionType": "rwak"}
    })
}

/// Matches nothing in the built-in tables.
pub fn odd_relic() -> Value {
    json!({
        "id": "i-relic",
        "uuid": "Actor.pc-vesk.Item.i-relic",
        "name": "Odd Relic",
        "system": {"weaponCategory": "shock", "damage": {"parts": ["void"]}}
    })
}

pub struct Setup {
    pub permissions: PermissionOracleImpl,
    pub renderer: RecordingRenderer,
    pub modules: Vec<&'static str>,
    pub settings: Vec<(&'static str, Value)>,
    pub macros: MacroDirectoryImpl,
    pub targets: Vec<TokenRef>,
    pub strip_shock: bool,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            permissions: PermissionOracleImpl::player([ACTOR]).with_player_owned([ACTOR]),
            renderer: RecordingRenderer::new(),
            modules: vec!["sequencer"],
            settings: Vec::new(),
            macros: MacroDirectoryImpl::new(),
            targets: vec![target_token()],
            strip_shock: true,
        }
    }
}

pub struct Harness {
    pub engine: AnimationEngine,
    pub host: InMemoryHost,
    pub renderer: Arc<RecordingRenderer>,
    pub settings: Arc<InMemorySettings>,
}

impl Setup {
    pub fn build(self) -> Harness {
        let mut tables = TablesLoader::embedded().unwrap();
        if self.strip_shock {
            // Leaves `odd_relic` with no default tier to land on.
            tables.categories.remove("shock");
        }

        let config = EngineConfig {
            rng_seed: Some(42),
            ..EngineConfig::default()
        };

        let mut scripts = ScriptLibraryImpl::new(config.module_root());
        for (path, script) in ScriptCatalogLoader::embedded().unwrap().producers() {
            scripts.register(path, script);
        }

        let scene = SceneOracleImpl::new()
            .with_controlled(source_token())
            .with_placed(target_token())
            .with_placed(second_target());
        for target in self.targets {
            scene.target(target);
        }

        let actors = ActorDirectoryImpl::new()
            .with_item(ACTOR, laser_pistol())
            .with_item(ACTOR, longsword())
            .with_actor(NPC);

        let host = InMemoryHost::new(
            scene,
            self.permissions,
            actors,
            ModuleOracleImpl::with_active(self.modules),
        );
        let renderer = Arc::new(self.renderer);
        let settings = Arc::new(InMemorySettings::with_values(
            self.settings.into_iter().map(|(k, v)| (k.to_string(), v)),
        ));

        let engine = AnimationEngine::builder()
            .config(config)
            .host(host.services())
            .renderer(renderer.clone())
            .settings(settings.clone())
            .tables(tables)
            .scripts(Arc::new(scripts))
            .macros(Arc::new(self.macros))
            .build()
            .unwrap();

        Harness {
            engine,
            host,
            renderer,
            settings,
        }
    }
}

pub fn harness() -> Harness {
    Setup::default().build()
}

pub fn attack(item: Value) -> AttackRolled {
    AttackRolled {
        actor: Some(ActorSummary {
            id: ACTOR.to_string(),
            name: "Vesk".to_string(),
        }),
        item: Some(item),
        roll_total: None,
        target: None,
    }
}

pub fn attack_roll(item: Value, total: f64, eac: f64) -> AttackRolled {
    AttackRolled {
        roll_total: Some(total),
        target: Some(TargetInfo {
            token_id: Some(TARGET.to_string()),
            eac: Some(eac),
            kac: None,
        }),
        ..attack(item)
    }
}

pub fn chat_attack(item_id: &str, success: Option<bool>) -> ChatMessage {
    ChatMessage {
        speaker: Speaker {
            actor: Some(ACTOR.to_string()),
            token: Some(SOURCE.to_string()),
        },
        flavor: Some("Azimuth Laser Pistol - Attack Roll".to_string()),
        roll_flags: Some(RollFlags {
            roll_type: Some("attack".to_string()),
            item_id: Some(item_id.to_string()),
            roll_success: success,
        }),
    }
}
