//! Public runtime API surface.
//!
//! This module gathers the types exposed to hosts embedding the engine: the
//! capability traits they implement, the event payloads they deliver, and the
//! errors the engine reports back.

pub mod errors;
pub mod events;
pub mod host;
pub mod renderer;
pub mod scripts;

pub use errors::{Result, RuntimeError};
pub use events::{
    ActorSummary, AttackEvent, AttackRolled, ChatMessage, RollFlags, Speaker, TargetInfo,
    item_key,
};
pub use host::{
    ActorDirectory, DEFAULT_GRID_SIZE, HostServices, ModuleOracle, Notifier, PermissionOracle,
    SceneOracle,
};
pub use renderer::{RenderError, Renderer};
pub use scripts::{
    Macro, MacroDirectory, MacroError, MacroScope, ScriptLoadError, ScriptModule, ScriptSource,
};
