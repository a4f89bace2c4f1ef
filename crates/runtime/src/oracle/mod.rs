//! In-memory implementations of the host capability traits.
//!
//! These back the integration tests and the scenario client. [`InMemoryHost`]
//! keeps the concrete adapters so callers can edit the scene or inspect
//! notifications while the engine only sees [`HostServices`].
mod actors;
mod modules;
mod notifier;
mod permissions;
mod renderer;
mod scene;
mod scripts;

use std::sync::Arc;

pub use actors::ActorDirectoryImpl;
pub use modules::ModuleOracleImpl;
pub use notifier::{NoticeLevel, RecordingNotifier, TracingNotifier};
pub use permissions::PermissionOracleImpl;
pub use renderer::RecordingRenderer;
pub use scene::SceneOracleImpl;
pub use scripts::{MacroDirectoryImpl, ScriptLibraryImpl};

use crate::api::HostServices;

/// Concrete host adapters bundled together.
#[derive(Clone)]
pub struct InMemoryHost {
    pub scene: Arc<SceneOracleImpl>,
    pub permissions: Arc<PermissionOracleImpl>,
    pub actors: Arc<ActorDirectoryImpl>,
    pub modules: Arc<ModuleOracleImpl>,
    pub notifier: Arc<RecordingNotifier>,
}

impl InMemoryHost {
    pub fn new(
        scene: SceneOracleImpl,
        permissions: PermissionOracleImpl,
        actors: ActorDirectoryImpl,
        modules: ModuleOracleImpl,
    ) -> Self {
        Self {
            scene: Arc::new(scene),
            permissions: Arc::new(permissions),
            actors: Arc::new(actors),
            modules: Arc::new(modules),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    /// Type-erased view handed to the engine builder.
    pub fn services(&self) -> HostServices {
        HostServices::new(
            self.scene.clone(),
            self.permissions.clone(),
            self.actors.clone(),
            self.modules.clone(),
            self.notifier.clone(),
        )
    }
}
