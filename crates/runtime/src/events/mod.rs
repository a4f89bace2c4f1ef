//! Topic-based event bus for attack outcomes.
//!
//! Every attack the engine handles ends in exactly one [`PlaybackEvent`]:
//! skips land on [`Topic::Intake`], plays and failures on [`Topic::Playback`].

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{Channel, PlaybackEvent, SkipReason};
