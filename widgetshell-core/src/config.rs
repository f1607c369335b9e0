//! Global widgetshell configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::clock_editor::DEFAULT_DRAG_THRESHOLD;
use crate::error::{ShellError, ShellResult};
use crate::ticker::DEFAULT_TICK;

static DEFAULT_DATA_PATH: &str = "~/.local/share/widgetshell";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK.as_millis() as u64
}

fn default_drag_threshold() -> f32 {
    DEFAULT_DRAG_THRESHOLD
}

/// Configuration at ~/.config/widgetshell/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShellConfig {
    /// Where persisted panel state lives.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Vertical drag distance per minute of clock adjustment.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            data_dir: default_data_dir(),
            tick_interval_ms: default_tick_interval_ms(),
            drag_threshold: default_drag_threshold(),
        }
    }
}

impl ShellConfig {
    pub fn config_path() -> ShellResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ShellError::Config("Could not determine config directory".into()))?
            .join("widgetshell");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from its default location, creating a commented-out
    /// template on first run.
    pub fn load() -> ShellResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ShellResult<Self> {
        let config: ShellConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| ShellError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ShellError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the tick loop and drag handling cannot work with.
    pub fn validate(&self) -> ShellResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(ShellError::Config("tick_interval_ms must be positive".into()));
        }

        if !(self.drag_threshold.is_finite() && self.drag_threshold > 0.0) {
            return Err(ShellError::Config(format!(
                "drag_threshold must be a positive number, got {}",
                self.drag_threshold
            )));
        }

        Ok(())
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate and save the current config.
    pub fn save(&self, path: &Path) -> ShellResult<()> {
        self.validate()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| ShellError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ShellError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ShellResult<()> {
        let contents = format!(
            "\
# widgetshell configuration

# Where calendar labels and the clock offset are stored:
# data_dir = \"{}\"

# Redraw period for the clock and calendar banner, in milliseconds:
# tick_interval_ms = {}

# Vertical drag distance per minute when adjusting the clock:
# drag_threshold = {:.1}
",
            DEFAULT_DATA_PATH,
            default_tick_interval_ms(),
            DEFAULT_DRAG_THRESHOLD,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShellError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ShellError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_loads_as_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("widgetshell").join("config.toml");

        ShellConfig::create_default_config(&path).unwrap();
        let config = ShellConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.drag_threshold, 10.0);
    }

    #[test]
    fn overrides_are_read() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/var/lib/shell\"\ntick_interval_ms = 250\ndrag_threshold = 4.5\n",
        )
        .unwrap();

        let config = ShellConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/var/lib/shell"));
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.drag_threshold, 4.5);
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "tick_interval_ms = 0\n").unwrap();

        assert!(matches!(
            ShellConfig::load_from(&path),
            Err(ShellError::Config(_))
        ));
    }

    #[test]
    fn non_positive_drag_threshold_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        for value in ["-5.0", "0.0"] {
            std::fs::write(&path, format!("drag_threshold = {value}\n")).unwrap();
            assert!(
                matches!(ShellConfig::load_from(&path), Err(ShellError::Config(_))),
                "drag_threshold = {value}"
            );
        }

        for threshold in [f32::NAN, f32::INFINITY] {
            let config = ShellConfig {
                drag_threshold: threshold,
                ..ShellConfig::default()
            };
            assert!(config.validate().is_err(), "drag_threshold = {threshold}");
        }
    }

    #[test]
    fn invalid_config_is_not_saved() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let config = ShellConfig {
            drag_threshold: -1.0,
            ..ShellConfig::default()
        };

        assert!(matches!(config.save(&path), Err(ShellError::Config(_))));
        assert!(!path.exists());
    }

    #[test]
    fn save_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let config = ShellConfig {
            drag_threshold: 7.0,
            ..ShellConfig::default()
        };

        config.save(&path).unwrap();
        let loaded = ShellConfig::load_from(&path).unwrap();
        assert_eq!(loaded.drag_threshold, 7.0);
        assert_eq!(loaded.tick_interval_ms, 1000);
    }
}
