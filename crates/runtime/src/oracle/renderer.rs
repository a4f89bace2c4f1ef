//! Renderer that keeps every sequence it is asked to play.
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use anim_core::{Sequence, SequenceStep};

use crate::api::{RenderError, Renderer};

#[derive(Debug)]
pub struct RecordingRenderer {
    available: bool,
    failing_targets: HashSet<String>,
    played: Mutex<Vec<Sequence>>,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self {
            available: true,
            failing_targets: HashSet::new(),
            played: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    /// Fails any sequence with an effect stretched to this token.
    pub fn failing_for(mut self, token_id: impl Into<String>) -> Self {
        self.failing_targets.insert(token_id.into());
        self
    }

    pub fn played(&self) -> Vec<Sequence> {
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn play_count(&self) -> usize {
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn failing_target(&self, sequence: &Sequence) -> Option<String> {
        sequence.steps().iter().find_map(|step| match step {
            SequenceStep::Effect(effect) => effect
                .stretch_target
                .as_ref()
                .filter(|t| self.failing_targets.contains(&t.id))
                .map(|t| t.id.clone()),
            SequenceStep::Sound(_) => None,
        })
    }
}

#[async_trait]
impl Renderer for RecordingRenderer {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn play(&self, sequence: Sequence) -> Result<(), RenderError> {
        if let Some(target) = self.failing_target(&sequence) {
            return Err(RenderError::new(format!("cannot draw toward {target}")));
        }
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sequence);
        Ok(())
    }
}
