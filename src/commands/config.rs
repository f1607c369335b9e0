use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use widgetshell_core::config::ShellConfig;

/// Print the config location and effective settings, updating and saving
/// any that were passed.
pub fn run(tick_interval_ms: Option<u64>, drag_threshold: Option<f32>) -> Result<()> {
    let config_path = ShellConfig::config_path()?;
    let mut config = ShellConfig::load()?;

    if apply(&mut config, tick_interval_ms, drag_threshold) {
        config.save(&config_path)?;
        println!("{} {}", "✓".green(), "Config saved".dimmed());
    }

    print(&config, &config_path);
    Ok(())
}

fn apply(
    config: &mut ShellConfig,
    tick_interval_ms: Option<u64>,
    drag_threshold: Option<f32>,
) -> bool {
    let mut changed = false;

    if let Some(ms) = tick_interval_ms {
        config.tick_interval_ms = ms;
        changed = true;
    }
    if let Some(threshold) = drag_threshold {
        config.drag_threshold = threshold;
        changed = true;
    }

    changed
}

fn print(config: &ShellConfig, config_path: &Path) {
    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!("{}", "Settings".bold());
    println!("  tick_interval_ms  {}", config.tick_interval_ms);
    println!("  drag_threshold    {}", config.drag_threshold);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_passed_settings_change() {
        let mut config = ShellConfig::default();
        assert!(!apply(&mut config, None, None));

        assert!(apply(&mut config, None, Some(4.0)));
        assert_eq!(config.drag_threshold, 4.0);
        assert_eq!(config.tick_interval_ms, 1000);
    }

    #[test]
    fn updated_config_saves_and_reloads() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let mut config = ShellConfig::default();

        apply(&mut config, Some(250), Some(6.5));
        config.save(&path).unwrap();

        let loaded = ShellConfig::load_from(&path).unwrap();
        assert_eq!(loaded.tick_interval_ms, 250);
        assert_eq!(loaded.drag_threshold, 6.5);
    }

    #[test]
    fn rejected_update_is_not_written() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let mut config = ShellConfig::default();

        apply(&mut config, None, Some(-3.0));
        assert!(config.save(&path).is_err());
        assert!(!path.exists());
    }
}
