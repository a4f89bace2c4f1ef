//! Engine configuration fixed at construction.
use std::env;
use std::time::Duration;

/// Tunables that do not live in the user-facing settings store.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Module id used to build `modules/<id>/` script paths and sequences.
    pub module_id: String,
    /// Minimum gap between two animations from the same attacking token.
    pub throttle: Duration,
    /// How long a primary-channel marker suppresses the fallback channel.
    pub dedup_window: Duration,
    /// Any of these modules being active enables the asset-pack tier.
    pub asset_pack_modules: Vec<String>,
    /// Host module that provides the renderer.
    pub renderer_module: String,
    pub event_buffer_size: usize,
    /// Fixed seed for miss displacement; random when unset.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            module_id: "strikefx".to_string(),
            throttle: Duration::from_millis(200),
            dedup_window: Duration::from_millis(2000),
            asset_pack_modules: vec!["jb2a_patreon".to_string(), "JB2A_DnD5e".to_string()],
            renderer_module: "sequencer".to_string(),
            event_buffer_size: 100,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `STRIKEFX_THROTTLE_MS`
    /// - `STRIKEFX_DEDUP_WINDOW_MS`
    /// - `STRIKEFX_RNG_SEED`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("STRIKEFX_THROTTLE_MS") {
            config.throttle = Duration::from_millis(ms);
        }

        if let Some(ms) = read_env::<u64>("STRIKEFX_DEDUP_WINDOW_MS") {
            config.dedup_window = Duration::from_millis(ms);
        }

        config.rng_seed = read_env::<u64>("STRIKEFX_RNG_SEED");

        config
    }

    /// Root every script path is resolved under.
    pub fn module_root(&self) -> String {
        format!("modules/{}", self.module_id)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_timings() {
        let config = EngineConfig::default();
        assert_eq!(config.throttle, Duration::from_millis(200));
        assert_eq!(config.dedup_window, Duration::from_millis(2000));
        assert_eq!(config.module_root(), "modules/strikefx");
        assert!(config.asset_pack_modules.iter().any(|m| m == "JB2A_DnD5e"));
    }
}
