//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::types::PlaybackEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Attacks dropped before playback, with the reason
    Intake,
    /// Animations played or failed
    Playback,
}

impl Topic {
    pub fn of(event: &PlaybackEvent) -> Self {
        match event {
            PlaybackEvent::Skipped { .. } => Topic::Intake,
            PlaybackEvent::Played { .. } | PlaybackEvent::Failed { .. } => Topic::Playback,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front and never replaced,
/// so cloning shares them.
#[derive(Clone)]
pub struct EventBus {
    intake: broadcast::Sender<PlaybackEvent>,
    playback: broadcast::Sender<PlaybackEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            intake: broadcast::channel(capacity).0,
            playback: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<PlaybackEvent> {
        match topic {
            Topic::Intake => &self.intake,
            Topic::Playback => &self.playback,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: PlaybackEvent) {
        let topic = Topic::of(&event);
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<PlaybackEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<PlaybackEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Channel, SkipReason};

    #[tokio::test]
    async fn routes_by_topic() {
        let bus = EventBus::with_capacity(4);
        let mut receivers = bus.subscribe_multiple(&[Topic::Intake, Topic::Playback]);

        bus.publish(PlaybackEvent::Skipped {
            channel: Channel::Fallback,
            reason: SkipReason::Duplicate,
        });

        let intake = receivers.get_mut(&Topic::Intake).unwrap();
        let event = intake.recv().await.unwrap();
        assert_eq!(event.skip_reason(), Some(SkipReason::Duplicate));

        let playback = receivers.get_mut(&Topic::Playback).unwrap();
        assert!(playback.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(PlaybackEvent::Failed {
            channel: Channel::Primary,
            actor_id: "a1".into(),
            message: "renderer gone".into(),
        });
    }
}
