//! Inbound attack notifications delivered by the host.
//!
//! The primary channel carries a structured attack payload straight from the
//! action pipeline. The fallback channel carries every created chat message;
//! only some of them describe attacks.
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Defense values read off the targeted token's actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
    #[serde(default)]
    pub token_id: Option<String>,
    /// Energy armor class, consulted first.
    #[serde(default)]
    pub eac: Option<f64>,
    /// Kinetic armor class, consulted when EAC is absent.
    #[serde(default)]
    pub kac: Option<f64>,
}

impl TargetInfo {
    pub fn defense_value(&self) -> Option<f64> {
        self.eac.or(self.kac)
    }
}

/// Primary-channel payload: an attack roll has been made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackRolled {
    #[serde(default)]
    pub actor: Option<ActorSummary>,
    /// Raw item record in host JSON shape.
    #[serde(default)]
    pub item: Option<Value>,
    #[serde(default)]
    pub roll_total: Option<f64>,
    #[serde(default)]
    pub target: Option<TargetInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Game-system flags attached to a rolled chat message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollFlags {
    #[serde(default)]
    pub roll_type: Option<String>,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub roll_success: Option<bool>,
}

/// Fallback-channel payload: any chat message created in the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub speaker: Speaker,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub roll_flags: Option<RollFlags>,
}

/// Either channel, for hosts that deliver both through one subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum AttackEvent {
    AttackRolled(AttackRolled),
    ChatMessage(ChatMessage),
}

/// Stable identifier of an item record: `id`, else `uuid`.
pub fn item_key(item: &Value) -> Option<String> {
    item.get("id")
        .or_else(|| item.get("uuid"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defense_prefers_eac() {
        let both = TargetInfo {
            token_id: None,
            eac: Some(14.0),
            kac: Some(16.0),
        };
        assert_eq!(both.defense_value(), Some(14.0));

        let kac_only = TargetInfo {
            kac: Some(16.0),
            ..Default::default()
        };
        assert_eq!(kac_only.defense_value(), Some(16.0));
        assert_eq!(TargetInfo::default().defense_value(), None);
    }

    #[test]
    fn item_key_prefers_short_id() {
        assert_eq!(
            item_key(&json!({"id": "abc", "uuid": "Actor.x.Item.abc"})).as_deref(),
            Some("abc")
        );
        assert_eq!(
            item_key(&json!({"uuid": "Actor.x.Item.abc"})).as_deref(),
            Some("Actor.x.Item.abc")
        );
        assert_eq!(item_key(&json!({"name": "Knife"})), None);
    }

    #[test]
    fn chat_message_parses_from_host_json() {
        let message: ChatMessage = serde_json::from_value(json!({
            "speaker": {"actor": "a1"},
            "flavor": "Laser Pistol Attack",
            "rollFlags": {"rollType": "attack", "itemId": "i1", "rollSuccess": false}
        }))
        .unwrap();
        let flags = message.roll_flags.unwrap();
        assert_eq!(flags.item_id.as_deref(), Some("i1"));
        assert_eq!(flags.roll_success, Some(false));
        assert_eq!(message.speaker.token, None);
    }
}
