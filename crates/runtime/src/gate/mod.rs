//! Hit/miss gate and per-token throttle.

mod hit;
mod throttle;

pub use hit::{determine_hit, should_animate};
pub use throttle::Throttle;
