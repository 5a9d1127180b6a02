//! Async policy declared through the settings file.

use serde::{Deserialize, Serialize};

use crate::constants::{CONFIGURE_AWAIT_CAPTURE, CONFIGURE_AWAIT_DECLINE};

/// `[policy]` section of `awaitguard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PolicyConfig {
    /// `"decline"` requires `ConfigureAwait(false)` on every await,
    /// `"capture"` explicitly opts out. Unset means no declaration.
    pub configure_await: Option<String>,
}

/// Parsed form of `policy.configure_await`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigureAwaitSetting {
    Decline,
    Capture,
}

impl ConfigureAwaitSetting {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            CONFIGURE_AWAIT_DECLINE => Some(Self::Decline),
            CONFIGURE_AWAIT_CAPTURE => Some(Self::Capture),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Decline => CONFIGURE_AWAIT_DECLINE,
            Self::Capture => CONFIGURE_AWAIT_CAPTURE,
        }
    }
}

impl PolicyConfig {
    /// The declared setting, or `None` when unset or unrecognized.
    pub fn configure_await_setting(&self) -> Option<ConfigureAwaitSetting> {
        self.configure_await
            .as_deref()
            .and_then(ConfigureAwaitSetting::parse)
    }
}
