use crossterm::event::{KeyCode, KeyEvent};
use serde::{Deserialize, Serialize};

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Open,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppKeybindings {
    pub open: KeyBinding,
    pub quit: KeyBinding,
}

impl Default for AppKeybindings {
    fn default() -> Self {
        Self {
            open: Key::new(KeyCode::Char('o')).into(),
            quit: Key::new(KeyCode::Char('q')).into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogKeybindings {
    pub confirm: KeyBinding,
    pub cancel: KeyBinding,
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            confirm: vec![Key::new(KeyCode::Char('y')), Key::new(KeyCode::Enter)].into(),
            cancel: vec![Key::new(KeyCode::Char('n')), Key::new(KeyCode::Esc)].into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default)]
    pub app: AppKeybindings,
    #[serde(default)]
    pub dialog: DialogKeybindings,
}

impl KeybindingsConfig {
    pub fn matches_app(&self, event: &KeyEvent, action: AppAction) -> bool {
        self.app_binding(action).matches(event)
    }

    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        self.dialog_binding(action).matches(event)
    }

    pub const fn app_binding(&self, action: AppAction) -> &KeyBinding {
        match action {
            AppAction::Open => &self.app.open,
            AppAction::Quit => &self.app.quit,
        }
    }

    pub const fn dialog_binding(&self, action: DialogAction) -> &KeyBinding {
        match action {
            DialogAction::Confirm => &self.dialog.confirm,
            DialogAction::Cancel => &self.dialog.cancel,
        }
    }
}
