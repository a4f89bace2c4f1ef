//! Event intake: channel reconciliation and ownership arbitration.

mod chat;
mod dedup;
mod ownership;

pub use chat::{ChatAttack, is_attack_message, read_attack};
pub use dedup::DedupLedger;
pub use ownership::is_animation_owner;
