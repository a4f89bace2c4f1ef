//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use runtime::EngineConfig;

/// Configuration required to bootstrap an engine and replay a scenario.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub engine: EngineConfig,
    /// Scenario file to replay; the bundled demo otherwise.
    pub scenario: Option<PathBuf>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    /// Mapping tables RON file replacing the embedded tables.
    pub tables: Option<PathBuf>,
    /// Script catalog RON file replacing the embedded catalog.
    pub scripts: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STRIKEFX_SCENARIO` - Scenario JSON to replay (default: bundled demo)
    /// - `STRIKEFX_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `STRIKEFX_LOG_DIR` - Directory for log files (default: platform cache dir)
    /// - `STRIKEFX_TABLES` - Mapping tables RON file (default: embedded)
    /// - `STRIKEFX_SCRIPTS` - Script catalog RON file (default: embedded)
    ///
    /// Engine tunables are read by [`EngineConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            engine: EngineConfig::from_env(),
            scenario: read_path("STRIKEFX_SCENARIO"),
            session_id: env::var("STRIKEFX_SESSION_ID").ok().filter(|s| !s.is_empty()),
            log_dir: read_path("STRIKEFX_LOG_DIR"),
            tables: read_path("STRIKEFX_TABLES"),
            scripts: read_path("STRIKEFX_SCRIPTS"),
        }
    }
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
