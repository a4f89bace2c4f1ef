//! Read-only views of the host tabletop the engine runs inside.
//!
//! Every client in a session runs its own engine against its own view of the
//! shared scene. These traits are that view; [`HostServices`] bundles them so
//! the builder takes one value instead of five.
use std::sync::Arc;

use serde_json::Value;

use anim_core::TokenRef;

/// Grid cell size used when the scene does not report one.
pub const DEFAULT_GRID_SIZE: f64 = 100.0;

/// The currently viewed scene.
pub trait SceneOracle: Send + Sync {
    /// Whether a scene is loaded and visible on this client.
    fn is_active(&self) -> bool;

    /// Tokens this client has selected.
    fn controlled_tokens(&self) -> Vec<TokenRef>;

    /// Every token placed on the scene.
    fn placed_tokens(&self) -> Vec<TokenRef>;

    /// Tokens the local user has targeted.
    fn targets(&self) -> Vec<TokenRef>;

    fn grid_size(&self) -> f64 {
        DEFAULT_GRID_SIZE
    }
}

/// Ownership and role queries for the local user.
pub trait PermissionOracle: Send + Sync {
    /// Whether the local user owns the actor.
    fn is_owner(&self, actor_id: &str) -> bool;

    /// Whether any non-GM user owns the actor.
    fn has_player_owner(&self, actor_id: &str) -> bool;

    fn is_gm(&self) -> bool;
}

/// Actor and owned-item lookups.
pub trait ActorDirectory: Send + Sync {
    fn contains(&self, actor_id: &str) -> bool;

    /// Raw item record owned by the actor, in host JSON shape.
    fn item(&self, actor_id: &str, item_id: &str) -> Option<Value>;
}

/// Which optional host modules are enabled.
pub trait ModuleOracle: Send + Sync {
    fn is_active(&self, module_id: &str) -> bool;
}

/// User-visible notifications.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);

    /// An error that stays on screen until dismissed.
    fn error_permanent(&self, message: &str) {
        self.error(message);
    }
}

/// Bundle of host views handed to the engine builder.
#[derive(Clone)]
pub struct HostServices {
    pub scene: Arc<dyn SceneOracle>,
    pub permissions: Arc<dyn PermissionOracle>,
    pub actors: Arc<dyn ActorDirectory>,
    pub modules: Arc<dyn ModuleOracle>,
    pub notifier: Arc<dyn Notifier>,
}

impl HostServices {
    pub fn new(
        scene: Arc<dyn SceneOracle>,
        permissions: Arc<dyn PermissionOracle>,
        actors: Arc<dyn ActorDirectory>,
        modules: Arc<dyn ModuleOracle>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            scene,
            permissions,
            actors,
            modules,
            notifier,
        }
    }
}
