//! Actor directory holding raw item records.
use std::collections::HashMap;

use serde_json::Value;

use crate::api::{ActorDirectory, item_key};

#[derive(Debug, Clone, Default)]
pub struct ActorDirectoryImpl {
    actors: HashMap<String, HashMap<String, Value>>,
}

impl ActorDirectoryImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actors.entry(actor_id.into()).or_default();
        self
    }

    /// Adds an item under its `id` (or `uuid`). Items with neither are ignored.
    pub fn with_item(mut self, actor_id: impl Into<String>, item: Value) -> Self {
        let items = self.actors.entry(actor_id.into()).or_default();
        if let Some(key) = item_key(&item) {
            items.insert(key, item);
        }
        self
    }
}

impl ActorDirectory for ActorDirectoryImpl {
    fn contains(&self, actor_id: &str) -> bool {
        self.actors.contains_key(actor_id)
    }

    fn item(&self, actor_id: &str, item_id: &str) -> Option<Value> {
        self.actors.get(actor_id)?.get(item_id).cloned()
    }
}
