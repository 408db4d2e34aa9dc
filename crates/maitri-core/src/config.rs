//! Configuration from YAML config + env var overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Env var overrides for the alert and telemetry timings.
const ENV_TELEMETRY_INTERVAL_MS: &str = "MAITRI_TELEMETRY_INTERVAL_MS";
const ENV_ALERT_INITIAL_DELAY_SECS: &str = "MAITRI_ALERT_INITIAL_DELAY_SECS";
const ENV_ALERT_REARM_SECS: &str = "MAITRI_ALERT_REARM_SECS";
const ENV_ALERT_AUTO_DISMISS_SECS: &str = "MAITRI_ALERT_AUTO_DISMISS_SECS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How often the telemetry panel refreshes
    #[serde(default = "default_telemetry_interval_ms")]
    pub telemetry_interval_ms: u64,

    /// Delay before the first simulated stress alert
    #[serde(default = "default_alert_initial_delay_secs")]
    pub alert_initial_delay_secs: u64,

    /// Period of the alert re-arm check
    #[serde(default = "default_alert_rearm_secs")]
    pub alert_rearm_secs: u64,

    /// How long an alert stays up before dismissing itself
    #[serde(default = "default_alert_auto_dismiss_secs")]
    pub alert_auto_dismiss_secs: u64,

    /// Minimum delay before a reply arrives
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,

    /// Random extra delay added on top of the minimum
    #[serde(default = "default_reply_delay_jitter_ms")]
    pub reply_delay_jitter_ms: u64,

    /// Real-time step the runner advances the dashboard by
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_telemetry_interval_ms() -> u64 {
    3000
}
fn default_alert_initial_delay_secs() -> u64 {
    8
}
fn default_alert_rearm_secs() -> u64 {
    45
}
fn default_alert_auto_dismiss_secs() -> u64 {
    12
}
fn default_reply_delay_min_ms() -> u64 {
    1300
}
fn default_reply_delay_jitter_ms() -> u64 {
    700
}
fn default_tick_ms() -> u64 {
    100
}

fn env_u64(var: &str) -> Result<Option<u64>> {
    match std::env::var(var) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be an integer, got {:?}", var, v)),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Load config from a YAML file with env var overrides.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let mut config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from the default location (project_root/config.yaml)
    pub fn load_from_dir(project_root: &Path) -> Result<Self> {
        Self::load(&project_root.join("config.yaml"))
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(v) = env_u64(ENV_TELEMETRY_INTERVAL_MS)? {
            self.telemetry_interval_ms = v;
        }
        if let Some(v) = env_u64(ENV_ALERT_INITIAL_DELAY_SECS)? {
            self.alert_initial_delay_secs = v;
        }
        if let Some(v) = env_u64(ENV_ALERT_REARM_SECS)? {
            self.alert_rearm_secs = v;
        }
        if let Some(v) = env_u64(ENV_ALERT_AUTO_DISMISS_SECS)? {
            self.alert_auto_dismiss_secs = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.telemetry_interval_ms == 0 {
            anyhow::bail!("telemetry_interval_ms must be greater than zero");
        }
        if self.alert_rearm_secs == 0 {
            anyhow::bail!("alert_rearm_secs must be greater than zero");
        }
        if self.tick_ms == 0 {
            anyhow::bail!("tick_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn telemetry_interval(&self) -> Duration {
        Duration::from_millis(self.telemetry_interval_ms)
    }

    pub fn alert_initial_delay(&self) -> Duration {
        Duration::from_secs(self.alert_initial_delay_secs)
    }

    pub fn alert_rearm_period(&self) -> Duration {
        Duration::from_secs(self.alert_rearm_secs)
    }

    pub fn alert_auto_dismiss(&self) -> Duration {
        Duration::from_secs(self.alert_auto_dismiss_secs)
    }

    pub fn reply_delay_min(&self) -> Duration {
        Duration::from_millis(self.reply_delay_min_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telemetry_interval_ms: default_telemetry_interval_ms(),
            alert_initial_delay_secs: default_alert_initial_delay_secs(),
            alert_rearm_secs: default_alert_rearm_secs(),
            alert_auto_dismiss_secs: default_alert_auto_dismiss_secs(),
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_jitter_ms: default_reply_delay_jitter_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::NamedTempFile;

    const ENV_VARS: [&str; 4] = [
        ENV_TELEMETRY_INTERVAL_MS,
        ENV_ALERT_INITIAL_DELAY_SECS,
        ENV_ALERT_REARM_SECS,
        ENV_ALERT_AUTO_DISMISS_SECS,
    ];

    // Env vars are process-global; every test that loads a file holds this.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        guard
    }

    fn yaml(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "{}", content).unwrap();
        tmp
    }

    #[test]
    fn test_load_config_defaults() {
        let _env = env_lock();
        let tmp = yaml("reply_delay_min_ms: 1300");

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.telemetry_interval_ms, 3000);
        assert_eq!(config.reply_delay_jitter_ms, 700);
        assert_eq!(config.tick_ms, 100);
    }

    #[test]
    fn test_load_config_custom_values() {
        let _env = env_lock();
        let tmp = yaml("reply_delay_min_ms: 200\nreply_delay_jitter_ms: 0\ntick_ms: 50");

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.reply_delay_min(), Duration::from_millis(200));
        assert_eq!(config.reply_delay_jitter_ms, 0);
        assert_eq!(config.tick(), Duration::from_millis(50));
    }

    #[test]
    fn test_env_overrides_file() {
        let _env = env_lock();
        let tmp = yaml("telemetry_interval_ms: 3000\nalert_rearm_secs: 45");
        std::env::set_var(ENV_TELEMETRY_INTERVAL_MS, "500");
        std::env::set_var(ENV_ALERT_INITIAL_DELAY_SECS, "2");
        std::env::set_var(ENV_ALERT_REARM_SECS, " 20 ");
        std::env::set_var(ENV_ALERT_AUTO_DISMISS_SECS, "4");

        let config = Config::load(tmp.path());
        for var in ENV_VARS {
            std::env::remove_var(var);
        }

        let config = config.unwrap();
        assert_eq!(config.telemetry_interval(), Duration::from_millis(500));
        assert_eq!(config.alert_initial_delay(), Duration::from_secs(2));
        assert_eq!(config.alert_rearm_period(), Duration::from_secs(20));
        assert_eq!(config.alert_auto_dismiss(), Duration::from_secs(4));
        // Not env-overridable.
        assert_eq!(config.tick_ms, 100);
    }

    #[test]
    fn test_non_integer_env_fails() {
        let _env = env_lock();
        let tmp = yaml("tick_ms: 100");
        std::env::set_var(ENV_ALERT_REARM_SECS, "soon");

        let result = Config::load(tmp.path());
        std::env::remove_var(ENV_ALERT_REARM_SECS);

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains(ENV_ALERT_REARM_SECS));
    }

    #[test]
    fn test_zero_env_rearm_fails_validation() {
        let _env = env_lock();
        let tmp = yaml("alert_rearm_secs: 45");
        std::env::set_var(ENV_ALERT_REARM_SECS, "0");

        let result = Config::load(tmp.path());
        std::env::remove_var(ENV_ALERT_REARM_SECS);

        assert!(result.is_err());
    }

    #[test]
    fn test_zero_tick_fails() {
        let _env = env_lock();
        let tmp = yaml("tick_ms: 0");

        assert!(Config::load(tmp.path()).is_err());
    }

    #[test]
    fn test_zero_telemetry_interval_fails() {
        let _env = env_lock();
        let tmp = yaml("telemetry_interval_ms: 0");

        let err = Config::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("telemetry_interval_ms"));
    }

    #[test]
    fn test_zero_rearm_fails() {
        let _env = env_lock();
        let tmp = yaml("alert_rearm_secs: 0");

        let err = Config::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("alert_rearm_secs"));
    }

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.alert_initial_delay(), Duration::from_secs(8));
        assert_eq!(config.alert_rearm_period(), Duration::from_secs(45));
        assert_eq!(config.alert_auto_dismiss(), Duration::from_secs(12));
    }
}
