//! Scenario replay client for the attack animation engine.
//!
//! # Architecture
//!
//! ```text
//! ClientConfig (env) ──→ Session::build ──→ AnimationEngine
//!                            ├─→ content: tables + script catalog (RON)
//!                            ├─→ host views from the Scenario
//!                            └─→ TracingRenderer
//! Scenario events ──→ Session::replay ──→ ReplaySummary
//! ```
//!
//! The binary is the composition root. Everything it assembles lives in the
//! `runtime` and `anim-content` crates; this crate only supplies a scenario
//! format, a renderer that writes to the log, and logging setup.

pub mod config;
pub mod logging;
pub mod render;
pub mod scenario;
pub mod session;

pub use config::ClientConfig;
pub use render::TracingRenderer;
pub use scenario::Scenario;
pub use session::{ReplaySummary, Session};
