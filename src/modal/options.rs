use serde::{Deserialize, Serialize};

/// What `show_modal` does when a modal is already open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleOpenPolicy {
    /// Replace the open modal. Its future settles with
    /// [`ModalError::Superseded`](super::ModalError::Superseded).
    #[default]
    Supersede,
    /// Keep the open modal. The new future settles with
    /// [`ModalError::AlreadyOpen`](super::ModalError::AlreadyOpen).
    Reject,
}

impl DoubleOpenPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Supersede => "supersede",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for DoubleOpenPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalOptions {
    #[serde(default)]
    pub on_double_open: DoubleOpenPolicy,
}

impl ModalOptions {
    #[must_use]
    pub const fn with_double_open(mut self, policy: DoubleOpenPolicy) -> Self {
        self.on_double_open = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_supersede() {
        assert_eq!(ModalOptions::default().on_double_open, DoubleOpenPolicy::Supersede);
    }

    #[test]
    fn test_policy_from_toml() {
        let options: ModalOptions = toml::from_str("on_double_open = \"reject\"").unwrap();
        assert_eq!(options.on_double_open, DoubleOpenPolicy::Reject);

        let options: ModalOptions = toml::from_str("").unwrap();
        assert_eq!(options.on_double_open, DoubleOpenPolicy::Supersede);
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(DoubleOpenPolicy::Supersede.to_string(), "supersede");
        assert_eq!(DoubleOpenPolicy::Reject.to_string(), "reject");
    }
}
