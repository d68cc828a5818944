use async_modal::DoubleOpenPolicy;
use clap::{Parser, ValueEnum};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "modal-demo", version, about = "Open a greeter dialog and await its answer")]
pub struct Args {
    /// Value shown in the greeter dialog (e.g., "world")
    #[arg(short, long)]
    pub name: Option<String>,

    /// What happens when a dialog is opened while another one is open
    #[arg(short, long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Theme name (e.g., "Catppuccin Latte")
    #[arg(short, long)]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Supersede,
    Reject,
}

impl From<PolicyArg> for DoubleOpenPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Supersede => Self::Supersede,
            PolicyArg::Reject => Self::Reject,
        }
    }
}

impl Args {
    /// Override config values with the ones given on the command line.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(name) = &self.name {
            config.greeter.name.clone_from(name);
        }
        if let Some(policy) = self.policy {
            config.modal.on_double_open = policy.into();
        }
        if let Some(theme) = &self.theme {
            config.theme.name.clone_from(theme);
        }
    }
}
