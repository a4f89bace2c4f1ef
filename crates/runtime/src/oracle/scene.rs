//! In-memory scene registry.
use std::sync::{Mutex, PoisonError};

use anim_core::TokenRef;

use crate::api::{DEFAULT_GRID_SIZE, SceneOracle};

#[derive(Debug)]
struct SceneState {
    active: bool,
    grid_size: f64,
    controlled: Vec<TokenRef>,
    placed: Vec<TokenRef>,
    targets: Vec<TokenRef>,
}

/// SceneOracle backed by token lists the caller edits directly.
///
/// Targets are kept as given; a token removed from the scene stays targeted
/// until [`SceneOracleImpl::clear_targets`], mirroring a stale host selection.
#[derive(Debug)]
pub struct SceneOracleImpl {
    state: Mutex<SceneState>,
}

impl Default for SceneOracleImpl {
    fn default() -> Self {
        Self {
            state: Mutex::new(SceneState {
                active: true,
                grid_size: DEFAULT_GRID_SIZE,
                controlled: Vec::new(),
                placed: Vec::new(),
                targets: Vec::new(),
            }),
        }
    }
}

impl SceneOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placed(self, token: TokenRef) -> Self {
        self.place(token);
        self
    }

    pub fn with_controlled(self, token: TokenRef) -> Self {
        self.control(token);
        self
    }

    pub fn with_target(self, token: TokenRef) -> Self {
        self.target(token);
        self
    }

    pub fn with_grid_size(self, grid_size: f64) -> Self {
        self.lock().grid_size = grid_size;
        self
    }

    pub fn set_active(&self, active: bool) {
        self.lock().active = active;
    }

    pub fn place(&self, token: TokenRef) {
        let mut state = self.lock();
        state.placed.retain(|t| t.id != token.id);
        state.placed.push(token);
    }

    /// Places the token if needed and selects it.
    pub fn control(&self, token: TokenRef) {
        self.place(token.clone());
        let mut state = self.lock();
        state.controlled.retain(|t| t.id != token.id);
        state.controlled.push(token);
    }

    pub fn release_all(&self) {
        self.lock().controlled.clear();
    }

    pub fn target(&self, token: TokenRef) {
        let mut state = self.lock();
        state.targets.retain(|t| t.id != token.id);
        state.targets.push(token);
    }

    pub fn clear_targets(&self) {
        self.lock().targets.clear();
    }

    /// Removes the token from the scene and from the controlled set.
    pub fn remove(&self, token_id: &str) {
        let mut state = self.lock();
        state.placed.retain(|t| t.id != token_id);
        state.controlled.retain(|t| t.id != token_id);
    }

    pub fn find(&self, token_id: &str) -> Option<TokenRef> {
        self.lock().placed.iter().find(|t| t.id == token_id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SceneState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SceneOracle for SceneOracleImpl {
    fn is_active(&self) -> bool {
        self.lock().active
    }

    fn controlled_tokens(&self) -> Vec<TokenRef> {
        self.lock().controlled.clone()
    }

    fn placed_tokens(&self) -> Vec<TokenRef> {
        self.lock().placed.clone()
    }

    fn targets(&self) -> Vec<TokenRef> {
        self.lock().targets.clone()
    }

    fn grid_size(&self) -> f64 {
        self.lock().grid_size
    }
}
