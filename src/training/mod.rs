mod config;
mod mind;
mod registry;

pub use config::{MindConfig, NetworkConfig, TrainingConfig, Verbosity};
pub use mind::CoreMind;
pub use registry::{SkillNames, SkillRegistry};
