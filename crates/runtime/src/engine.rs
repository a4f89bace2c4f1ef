//! Attack animation engine.
//!
//! One engine runs per connected client. It owns every piece of mutable state
//! (dedup marker, throttle map, script cache, RNG) and exposes async entry
//! points the host calls when an attack is announced on either channel:
//!
//! ```text
//! on_attack_rolled ─┐                         ┌─ skipped ─┐
//!                   ├─ intake ─ gate ─ tokens ─┤           ├─ EventBus
//! on_chat_message ──┘                         └─ resolve ─ load ─ play ─┘
//! ```
//!
//! Handlers never return errors: every outcome becomes a [`PlaybackEvent`]
//! that is published on the bus and returned to the caller.

use std::collections::HashSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, error, info, trace, warn};

use anim_core::{
    AnimationContext, AnimationDescriptor, MappingTables, OverrideEntry, Resolution, Resolver,
    TokenRef, extract_weapon_info,
};

use crate::api::{
    AttackEvent, AttackRolled, ChatMessage, HostServices, MacroDirectory, Renderer, Result,
    RuntimeError, ScriptSource, item_key,
};
use crate::config::EngineConfig;
use crate::events::{Channel, EventBus, PlaybackEvent, SkipReason, Topic};
use crate::gate::{Throttle, determine_hit, should_animate};
use crate::intake::{DedupLedger, is_animation_owner, read_attack};
use crate::loader::{DescriptorLoader, Producer};
use crate::playback::{EFFECT_Z_INDEX, Playback, final_scale, final_speed};
use crate::settings::{self, EngineSettings, SettingsStore};

/// Resolution trail: `debug` when the debug setting is on, `trace` otherwise.
macro_rules! trail {
    ($debug:expr, $($arg:tt)+) => {
        if $debug {
            debug!($($arg)+);
        } else {
            trace!($($arg)+);
        }
    };
}

/// Options for a manually triggered effect.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOptions {
    pub scale: f64,
    pub speed: f64,
    pub sound: Option<String>,
    pub volume: f64,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            speed: 800.0,
            sound: None,
            volume: 0.5,
        }
    }
}

/// An attack that passed intake, owned by this client.
#[derive(Debug)]
struct AcceptedAttack {
    actor_id: String,
    item: Value,
    is_hit: bool,
}

pub struct AnimationEngine {
    config: EngineConfig,
    host: HostServices,
    settings: Arc<dyn SettingsStore>,
    tables: Arc<MappingTables>,
    loader: DescriptorLoader,
    playback: Playback,
    dedup: DedupLedger,
    throttle: Throttle,
    events: EventBus,
    renderer_ready: bool,
}

impl AnimationEngine {
    /// Create a new engine builder
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the renderer was found at startup.
    pub fn is_ready(&self) -> bool {
        self.renderer_ready
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe(topic)
    }

    /// Single entry point for hosts that deliver both channels together.
    pub async fn on_attack_event(&self, event: AttackEvent) -> PlaybackEvent {
        match event {
            AttackEvent::AttackRolled(payload) => self.on_attack_rolled(payload).await,
            AttackEvent::ChatMessage(message) => self.on_chat_message(message).await,
        }
    }

    /// Primary channel. The dedup marker is written before the first await.
    pub async fn on_attack_rolled(&self, event: AttackRolled) -> PlaybackEvent {
        let settings = EngineSettings::load(self.settings.as_ref());
        let outcome = match self.accept_primary(&event, &settings) {
            Ok(attack) => self.animate(Channel::Primary, attack, &settings).await,
            Err(reason) => skipped(Channel::Primary, reason),
        };
        self.finish(outcome, &settings)
    }

    /// Fallback channel: chat messages, filtered down to attack rolls.
    pub async fn on_chat_message(&self, message: ChatMessage) -> PlaybackEvent {
        let settings = EngineSettings::load(self.settings.as_ref());
        let outcome = match self.accept_fallback(&message, &settings) {
            Ok(attack) => self.animate(Channel::Fallback, attack, &settings).await,
            Err(reason) => skipped(Channel::Fallback, reason),
        };
        self.finish(outcome, &settings)
    }

    /// Resolves the descriptor an item would play, without playing it.
    pub fn animation_for_weapon(&self, item: Option<&Value>) -> Option<AnimationDescriptor> {
        self.resolve_weapon(item).map(|resolution| resolution.descriptor)
    }

    /// Like [`Self::animation_for_weapon`], reporting which tier matched.
    pub fn resolve_weapon(&self, item: Option<&Value>) -> Option<Resolution> {
        let info = extract_weapon_info(item);
        let overrides = settings::load_overrides(self.settings.as_ref());
        Resolver::new(&self.tables).resolve_with_tier(
            &info,
            &overrides,
            self.asset_pack_active(),
        )
    }

    /// Plays one effect from `source` to `target`, outside the attack pipeline.
    pub async fn play_animation(
        &self,
        source: &TokenRef,
        target: &TokenRef,
        file: &str,
        options: PlayOptions,
    ) -> Result<()> {
        if !self.renderer_available() {
            error!(target: "runtime::playback", "renderer not available for manual animation");
            return Err(RuntimeError::RendererUnavailable);
        }

        let mut seq = self.playback.new_sequence();
        seq.effect()
            .file(file)
            .at_location(source)
            .stretch_to(target)
            .scale(options.scale)
            .speed(options.speed)
            .z_index(EFFECT_Z_INDEX);
        if let Some(sound) = options.sound {
            seq.sound().file(sound).volume(options.volume);
        }

        self.playback.renderer().play(seq).await?;
        Ok(())
    }

    /// Forgets every imported script so edited files are picked up.
    pub fn clear_script_cache(&self) -> usize {
        self.loader.clear_cache()
    }

    /// Persists a per-item override for this item.
    pub fn set_item_override(&self, item: &Value, entry: OverrideEntry) -> Result<bool> {
        let info = extract_weapon_info(Some(item));
        let saved = settings::set_item_override(self.settings.as_ref(), &info, entry)?;
        if saved {
            self.host
                .notifier
                .info(&format!("Animation override saved for {}.", info.item_name));
        }
        Ok(saved)
    }

    pub fn clear_item_override(&self, item_id: &str) -> Result<bool> {
        let cleared = settings::clear_item_override(self.settings.as_ref(), item_id)?;
        if cleared {
            self.host
                .notifier
                .info(&format!("Animation override cleared for {item_id}."));
        }
        Ok(cleared)
    }

    fn accept_primary(
        &self,
        event: &AttackRolled,
        settings: &EngineSettings,
    ) -> std::result::Result<AcceptedAttack, SkipReason> {
        self.precheck(settings)?;
        let item = event.item.as_ref().ok_or(SkipReason::NoItem)?;
        let actor = event.actor.as_ref().ok_or(SkipReason::NoActor)?;
        if !is_animation_owner(self.host.permissions.as_ref(), &actor.id) {
            return Err(SkipReason::NotOwner);
        }

        let item_id = item_key(item);
        trail!(
            settings.debug_mode,
            target: "runtime::intake",
            actor = %actor.name,
            item = ?item_id,
            "attack rolled"
        );
        self.dedup.record(&actor.id, item_id.as_deref(), Instant::now());

        let is_hit = determine_hit(event.roll_total, event.target.as_ref());
        if !should_animate(is_hit, settings) {
            return Err(SkipReason::MissSuppressed);
        }

        Ok(AcceptedAttack {
            actor_id: actor.id.clone(),
            item: item.clone(),
            is_hit,
        })
    }

    fn accept_fallback(
        &self,
        message: &ChatMessage,
        settings: &EngineSettings,
    ) -> std::result::Result<AcceptedAttack, SkipReason> {
        self.precheck(settings)?;
        let attack = read_attack(message, self.host.scene.as_ref())?;

        if self
            .dedup
            .is_duplicate(&attack.actor_id, attack.item_id.as_deref(), Instant::now())
        {
            return Err(SkipReason::Duplicate);
        }

        let item = attack
            .item_id
            .as_deref()
            .and_then(|item_id| self.host.actors.item(&attack.actor_id, item_id))
            .ok_or(SkipReason::NoItem)?;
        if !is_animation_owner(self.host.permissions.as_ref(), &attack.actor_id) {
            return Err(SkipReason::NotOwner);
        }

        trail!(
            settings.debug_mode,
            target: "runtime::intake",
            actor = %attack.actor_id,
            item = ?attack.item_id,
            "attack message received"
        );

        if !should_animate(attack.is_hit, settings) {
            return Err(SkipReason::MissSuppressed);
        }

        Ok(AcceptedAttack {
            actor_id: attack.actor_id,
            item,
            is_hit: attack.is_hit,
        })
    }

    async fn animate(
        &self,
        channel: Channel,
        attack: AcceptedAttack,
        settings: &EngineSettings,
    ) -> PlaybackEvent {
        let Some(source) = self.source_token(&attack.actor_id) else {
            return skipped(channel, SkipReason::NoSourceToken);
        };
        if !self.throttle.try_acquire(&source.id, Instant::now()) {
            return skipped(channel, SkipReason::Throttled);
        }
        let targets = self.targets();
        let Some(first_target) = targets.first() else {
            return skipped(channel, SkipReason::NoTargets);
        };

        let info = extract_weapon_info(Some(&attack.item));
        let overrides = settings::load_overrides(self.settings.as_ref());
        let Some(Resolution { tier, descriptor }) = Resolver::new(&self.tables)
            .resolve_with_tier(&info, &overrides, self.asset_pack_active())
        else {
            trail!(
                settings.debug_mode,
                target: "runtime::gate",
                weapon = %info.item_name,
                "no animation for weapon"
            );
            return skipped(channel, SkipReason::NoDescriptor);
        };

        let context = AnimationContext {
            source_token: source.clone(),
            target_token: first_target.clone(),
            is_hit: attack.is_hit,
            scale: final_scale(descriptor.scale, settings.animation_scale),
            speed: final_speed(descriptor.speed, settings.animation_speed),
            attack_mode: descriptor.mode,
            weapon_info: info,
            sound_enabled: settings.sound_enabled,
            sound_volume: settings.sound_volume,
        };
        trail!(
            settings.debug_mode,
            target: "runtime::playback",
            weapon = %context.weapon_info.item_name,
            category = ?context.weapon_info.weapon_category,
            %tier,
            kind = %descriptor.kind(),
            mode = %context.attack_mode,
            scale = context.scale,
            speed = context.speed,
            targets = targets.len(),
            is_hit = context.is_hit,
            "playing animation"
        );

        let Some(producer) = self.loader.producer(&descriptor.source).await else {
            return skipped(channel, SkipReason::ProducerUnavailable);
        };

        let run = self
            .playback
            .play_targets(&producer, &context, &targets, self.host.scene.grid_size())
            .await;

        if run.producer_failures > 0 {
            self.host.notifier.error(producer_failure_notice(&producer));
        }

        if run.all_failed() {
            return PlaybackEvent::Failed {
                channel,
                actor_id: attack.actor_id,
                message: run.last_error.unwrap_or_default(),
            };
        }

        PlaybackEvent::Played {
            channel,
            actor_id: attack.actor_id,
            item_name: context.weapon_info.item_name,
            tier,
            kind: descriptor.kind(),
            is_hit: context.is_hit,
            targets: run.targets,
            failed_targets: run.failed,
        }
    }

    fn finish(&self, event: PlaybackEvent, settings: &EngineSettings) -> PlaybackEvent {
        match &event {
            PlaybackEvent::Skipped { channel, reason } => trail!(
                settings.debug_mode,
                target: "runtime::intake",
                %channel,
                %reason,
                "attack skipped"
            ),
            PlaybackEvent::Played {
                actor_id, targets, ..
            } => debug!(target: "runtime::playback", %actor_id, targets, "animation played"),
            PlaybackEvent::Failed {
                actor_id, message, ..
            } => warn!(target: "runtime::playback", %actor_id, %message, "animation failed on every target"),
        }
        self.events.publish(event.clone());
        event
    }

    fn precheck(&self, settings: &EngineSettings) -> std::result::Result<(), SkipReason> {
        if !settings.enabled {
            return Err(SkipReason::Disabled);
        }
        if !self.renderer_available() {
            return Err(SkipReason::RendererUnavailable);
        }
        if !self.host.scene.is_active() {
            return Err(SkipReason::NoActiveScene);
        }
        Ok(())
    }

    fn renderer_available(&self) -> bool {
        self.renderer_ready && self.playback.renderer().is_available()
    }

    /// First controlled token for the actor, else the first placed one.
    fn source_token(&self, actor_id: &str) -> Option<TokenRef> {
        let scene = &self.host.scene;
        scene
            .controlled_tokens()
            .into_iter()
            .find(|token| token.represents(actor_id))
            .or_else(|| {
                scene
                    .placed_tokens()
                    .into_iter()
                    .find(|token| token.represents(actor_id))
            })
    }

    /// User targets that are still on the scene.
    fn targets(&self) -> Vec<TokenRef> {
        let placed: HashSet<String> = self
            .host
            .scene
            .placed_tokens()
            .into_iter()
            .map(|token| token.id)
            .collect();
        self.host
            .scene
            .targets()
            .into_iter()
            .filter(|token| placed.contains(&token.id))
            .collect()
    }

    fn asset_pack_active(&self) -> bool {
        self.config
            .asset_pack_modules
            .iter()
            .any(|module| self.host.modules.is_active(module))
    }
}

fn skipped(channel: Channel, reason: SkipReason) -> PlaybackEvent {
    PlaybackEvent::Skipped { channel, reason }
}

fn producer_failure_notice(producer: &Producer) -> &'static str {
    match producer {
        Producer::Macro { .. } => "Error executing animation macro, check the logs.",
        _ => "Error executing animation script, check the logs.",
    }
}

/// Builder for [`AnimationEngine`] with flexible configuration.
pub struct EngineBuilder {
    config: EngineConfig,
    host: Option<HostServices>,
    renderer: Option<Arc<dyn Renderer>>,
    settings: Option<Arc<dyn SettingsStore>>,
    tables: Option<Arc<MappingTables>>,
    scripts: Option<Arc<dyn ScriptSource>>,
    macros: Option<Arc<dyn MacroDirectory>>,
    events: Option<EventBus>,
}

impl EngineBuilder {
    fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            host: None,
            renderer: None,
            settings: None,
            tables: None,
            scripts: None,
            macros: None,
            events: None,
        }
    }

    /// Override engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required host services
    pub fn host(mut self, host: HostServices) -> Self {
        self.host = Some(host);
        self
    }

    /// Set required renderer
    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Set required settings store
    pub fn settings(mut self, settings: Arc<dyn SettingsStore>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set required mapping tables
    pub fn tables(mut self, tables: MappingTables) -> Self {
        self.tables = Some(Arc::new(tables));
        self
    }

    /// Set required script source
    pub fn scripts(mut self, scripts: Arc<dyn ScriptSource>) -> Self {
        self.scripts = Some(scripts);
        self
    }

    /// Set required macro directory
    pub fn macros(mut self, macros: Arc<dyn MacroDirectory>) -> Self {
        self.macros = Some(macros);
        self
    }

    /// Share an existing event bus instead of creating one.
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the engine and run the startup renderer check.
    ///
    /// A missing renderer does not fail the build: the engine is returned in
    /// a disabled state and a permanent error is shown once.
    pub fn build(self) -> Result<AnimationEngine> {
        let host = self.host.ok_or(RuntimeError::MissingComponent("host services"))?;
        let renderer = self.renderer.ok_or(RuntimeError::MissingComponent("renderer"))?;
        let settings = self
            .settings
            .ok_or(RuntimeError::MissingComponent("settings store"))?;
        let tables = self
            .tables
            .ok_or(RuntimeError::MissingComponent("mapping tables"))?;
        let scripts = self
            .scripts
            .ok_or(RuntimeError::MissingComponent("script source"))?;
        let macros = self
            .macros
            .ok_or(RuntimeError::MissingComponent("macro directory"))?;

        let config = self.config;
        let renderer_ready =
            host.modules.is_active(&config.renderer_module) && renderer.is_available();
        if renderer_ready {
            info!(
                target: "runtime::playback",
                module_id = %config.module_id,
                "animation engine ready"
            );
        } else {
            host.notifier.error_permanent(&format!(
                "The {} module is not active. Attack animations are disabled.",
                config.renderer_module
            ));
            error!(
                target: "runtime::playback",
                renderer = %config.renderer_module,
                "renderer not available, animation engine disabled"
            );
        }

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(config.event_buffer_size));

        Ok(AnimationEngine {
            loader: DescriptorLoader::new(config.module_root(), scripts, macros),
            playback: Playback::new(config.module_id.as_str(), renderer, rng),
            dedup: DedupLedger::new(config.dedup_window),
            throttle: Throttle::new(config.throttle),
            events,
            renderer_ready,
            settings,
            tables,
            host,
            config,
        })
    }
}
