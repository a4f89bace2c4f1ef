//! Runtime for attack-driven weapon animations.
//!
//! This crate wires the pure resolution rules of `anim-core` to a live host:
//! it takes attack notifications from two redundant channels, decides whether
//! this client should render them, gates on hit/miss and rate, resolves the
//! weapon to a descriptor, loads the producer, and plays one sequence per
//! target through the host renderer. Hosts embed [`AnimationEngine`] and feed
//! it events; outcomes are published on an [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the engine and its builder
//! - [`api`] exposes the host capability traits and event payloads
//! - [`intake`] reconciles channels and arbitrates ownership
//! - [`gate`] decides hit/miss and throttles repeated triggers
//! - [`loader`] turns descriptors into producers and caches scripts
//! - [`playback`] composes and plays sequences per target
//! - [`events`] provides the topic-based outcome bus
//! - [`settings`] and [`config`] cover user settings and engine tunables
//! - [`oracle`] provides in-memory host adapters reused by tests and tools
pub mod api;
pub mod config;
pub mod engine;
pub mod events;
pub mod gate;
pub mod intake;
pub mod loader;
pub mod oracle;
pub mod playback;
pub mod settings;

pub use api::{
    ActorDirectory, ActorSummary, AttackEvent, AttackRolled, ChatMessage, HostServices, Macro,
    MacroDirectory, MacroError, MacroScope, ModuleOracle, Notifier, PermissionOracle, RenderError,
    Renderer, Result, RollFlags, RuntimeError, SceneOracle, ScriptLoadError, ScriptModule,
    ScriptSource, Speaker, TargetInfo,
};
pub use config::EngineConfig;
pub use engine::{AnimationEngine, EngineBuilder, PlayOptions};
pub use events::{Channel, EventBus, PlaybackEvent, SkipReason, Topic};
pub use loader::{DescriptorLoader, Producer};
pub use oracle::{
    ActorDirectoryImpl, InMemoryHost, MacroDirectoryImpl, ModuleOracleImpl, NoticeLevel,
    PermissionOracleImpl, RecordingNotifier, RecordingRenderer, SceneOracleImpl,
    ScriptLibraryImpl, TracingNotifier,
};
pub use settings::{EngineSettings, InMemorySettings, SettingsError, SettingsStore};
