use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::config::AppConfig;

const CONFIG_DIR: &str = "async-modal";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

pub fn load() -> color_eyre::Result<AppConfig> {
    let Some(path) = config_path() else {
        debug!("No config directory found, using defaults");
        return Ok(AppConfig::default());
    };

    if !path.exists() {
        debug!("Config file not found at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = parse(&content)?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}

pub fn parse(content: &str) -> color_eyre::Result<AppConfig> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use async_modal::DoubleOpenPolicy;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.theme.name, "Catppuccin Mocha");
        assert_eq!(config.greeter.name, "world");
        assert_eq!(config.modal.on_double_open, DoubleOpenPolicy::Supersede);
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
            [theme]
            name = "Catppuccin Latte"

            [modal]
            on_double_open = "reject"

            [greeter]
            name = "ferris"

            [keybindings.app]
            open = "g"
            quit = "ctrl+q"
            "#,
        )
        .unwrap();

        assert_eq!(config.theme.name, "Catppuccin Latte");
        assert_eq!(config.modal.on_double_open, DoubleOpenPolicy::Reject);
        assert_eq!(config.greeter.name, "ferris");
        assert_eq!(config.keybindings.app.quit.hint(), "ctrl+q");
    }

    #[test]
    fn test_invalid_policy_is_an_error() {
        assert!(parse("[modal]\non_double_open = \"queue\"").is_err());
    }
}
