//! Recovers attack payloads from fallback-channel chat messages.

use crate::api::{ChatMessage, SceneOracle};
use crate::events::SkipReason;

/// Attack details read off a chat message, before any lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatAttack {
    pub actor_id: String,
    pub item_id: Option<String>,
    pub is_hit: bool,
}

/// Whether the message is an attack roll: system roll flags present and
/// either the roll type or the flavor text says so.
pub fn is_attack_message(message: &ChatMessage) -> bool {
    let Some(flags) = &message.roll_flags else {
        return false;
    };
    flags.roll_type.as_deref() == Some("attack")
        || message
            .flavor
            .as_deref()
            .is_some_and(|flavor| flavor.to_lowercase().contains("attack"))
}

/// Extracts the attacking actor and the hit flag.
///
/// A speaker naming only a token is resolved through the token's actor.
pub fn read_attack(message: &ChatMessage, scene: &dyn SceneOracle) -> Result<ChatAttack, SkipReason> {
    if !is_attack_message(message) {
        return Err(SkipReason::NotAnAttack);
    }
    let flags = message.roll_flags.clone().unwrap_or_default();

    let actor_id = match (&message.speaker.actor, &message.speaker.token) {
        (Some(actor), _) => Some(actor.clone()),
        (None, Some(token)) => scene
            .placed_tokens()
            .into_iter()
            .find(|placed| &placed.id == token)
            .and_then(|placed| placed.actor_id),
        (None, None) => None,
    };
    let actor_id = actor_id.ok_or(SkipReason::NoActor)?;

    Ok(ChatAttack {
        actor_id,
        item_id: flags.item_id,
        is_hit: flags.roll_success.unwrap_or(true),
    })
}
