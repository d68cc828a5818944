pub mod key;
pub mod keybindings;
pub mod loader;

use async_modal::ModalOptions;
pub use keybindings::{AppAction, DialogAction, KeybindingsConfig};
pub use loader::load;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

/// Settings for the greeter dialog shown by the demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreeterConfig {
    /// Value passed to `show_modal`.
    pub name: String,
}

impl Default for GreeterConfig {
    fn default() -> Self {
        Self {
            name: "world".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub modal: ModalOptions,
    #[serde(default)]
    pub greeter: GreeterConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}
