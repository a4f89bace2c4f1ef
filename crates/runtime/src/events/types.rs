//! Outcome events published after each handled attack.

use serde::{Deserialize, Serialize};

use anim_core::{DescriptorKind, Tier};

/// Which upstream channel delivered the attack.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Channel {
    Primary,
    Fallback,
}

/// Why an attack produced no animation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    Disabled,
    RendererUnavailable,
    NoActiveScene,
    NotAnAttack,
    NoActor,
    NoItem,
    NotOwner,
    Duplicate,
    MissSuppressed,
    NoSourceToken,
    Throttled,
    NoTargets,
    NoDescriptor,
    ProducerUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlaybackEvent {
    Played {
        channel: Channel,
        actor_id: String,
        item_name: String,
        tier: Tier,
        kind: DescriptorKind,
        is_hit: bool,
        targets: usize,
        failed_targets: usize,
    },
    Skipped {
        channel: Channel,
        reason: SkipReason,
    },
    /// Every target failed; nothing was shown.
    Failed {
        channel: Channel,
        actor_id: String,
        message: String,
    },
}

impl PlaybackEvent {
    pub fn channel(&self) -> Channel {
        match self {
            PlaybackEvent::Played { channel, .. }
            | PlaybackEvent::Skipped { channel, .. }
            | PlaybackEvent::Failed { channel, .. } => *channel,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            PlaybackEvent::Skipped { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    pub fn is_played(&self) -> bool {
        matches!(self, PlaybackEvent::Played { .. })
    }
}
