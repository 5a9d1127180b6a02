//! Configuration system for awaitguard.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod awaitguard_config;
pub mod policy_config;

pub use analysis_config::AnalysisConfig;
pub use awaitguard_config::{AwaitGuardConfig, CliOverrides};
pub use policy_config::{ConfigureAwaitSetting, PolicyConfig};
