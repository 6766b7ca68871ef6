use std::{fs, path::Path};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::{
    arch::{activations::NonLinearity, Hyperparams},
    codec::MAX_WIDTH,
    MindErr, Result,
};

/// How chatty the diagnostics are: 1 milestones, 2 per-cycle summaries, 3 per-weight traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verbosity(u8);

impl Verbosity {
    pub const MILESTONES: Verbosity = Verbosity(1);
    pub const CYCLES: Verbosity = Verbosity(2);
    pub const WEIGHTS: Verbosity = Verbosity(3);

    pub fn new(level: u8) -> Result<Self> {
        if !(1..=3).contains(&level) {
            return Err(MindErr::InvalidInput("verbosity must be 1, 2 or 3"));
        }

        Ok(Self(level))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// The log level that lets exactly this verbosity's messages through.
    pub fn level_filter(&self) -> LevelFilter {
        match self.0 {
            0 | 1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::MILESTONES
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub hidden_act: NonLinearity,
    pub output_act: NonLinearity,
    /// Seed of the weight initialization, `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_size: 5,
            hidden_size: 5,
            output_size: 1,
            hidden_act: NonLinearity::Tanh,
            output_act: NonLinearity::LeakyRelu,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Training cycles run per acquired skill.
    pub cycles: usize,
    /// Full passes over the training set per cycle.
    pub iterations: usize,
    pub learning_rate: f32,
    pub momentum: f32,
}

impl TrainingConfig {
    pub fn hyperparams(&self) -> Hyperparams {
        Hyperparams::new(self.learning_rate, self.momentum)
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let Hyperparams {
            learning_rate,
            momentum,
        } = Hyperparams::default();

        Self {
            cycles: 50,
            iterations: 1,
            learning_rate,
            momentum,
        }
    }
}

/// Everything needed to build and drive a `CoreMind`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MindConfig {
    pub network: NetworkConfig,
    pub training: TrainingConfig,
    pub verbosity: Verbosity,
    /// Human readable skill names, indexed by skill code.
    pub skills: Vec<String>,
}

impl MindConfig {
    /// Parses and validates a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let NetworkConfig {
            input_size,
            hidden_size,
            output_size,
            ..
        } = self.network;

        if input_size == 0 || input_size > MAX_WIDTH {
            return Err(MindErr::InvalidInput("input_size must be between 1 and 16"));
        }
        if hidden_size == 0 {
            return Err(MindErr::InvalidInput("hidden_size must be greater than zero"));
        }
        if output_size != 1 {
            return Err(MindErr::SizeMismatch {
                what: "output_size",
                got: output_size,
                expected: 1,
            });
        }

        let TrainingConfig {
            learning_rate,
            momentum,
            ..
        } = self.training;

        if !learning_rate.is_finite() || !momentum.is_finite() {
            return Err(MindErr::InvalidInput(
                "learning_rate and momentum must be finite",
            ));
        }

        Verbosity::new(self.verbosity.level())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = MindConfig::from_json("{}").unwrap();

        assert_eq!(config, MindConfig::default());
        assert_eq!(config.network.input_size, 5);
        assert_eq!(config.network.hidden_act, NonLinearity::Tanh);
        assert_eq!(config.network.output_act, NonLinearity::LeakyRelu);
        assert_eq!(config.training.cycles, 50);
        assert_eq!(config.training.hyperparams(), Hyperparams::new(0.5, 0.1));
        assert_eq!(config.verbosity, Verbosity::MILESTONES);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let json = r#"{
            "network": { "hidden_size": 8, "output_act": "sigmoid", "seed": 7 },
            "training": { "cycles": 10 },
            "verbosity": 3,
            "skills": ["botany", "cooking"]
        }"#;
        let config = MindConfig::from_json(json).unwrap();

        assert_eq!(config.network.hidden_size, 8);
        assert_eq!(config.network.input_size, 5);
        assert_eq!(config.network.output_act, NonLinearity::Sigmoid);
        assert_eq!(config.network.seed, Some(7));
        assert_eq!(config.training.cycles, 10);
        assert_eq!(config.training.iterations, 1);
        assert_eq!(config.verbosity.level_filter(), LevelFilter::Trace);
        assert_eq!(config.skills.len(), 2);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(MindConfig::from_json(r#"{ "verbosity": 4 }"#).is_err());
        assert!(MindConfig::from_json(r#"{ "network": { "output_size": 2 } }"#).is_err());
        assert!(MindConfig::from_json(r#"{ "network": { "input_size": 17 } }"#).is_err());
        assert!(MindConfig::from_json(r#"{ "network": { "output_act": "gelu" } }"#).is_err());
        assert!(matches!(
            MindConfig::from_json("not json"),
            Err(MindErr::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let res = MindConfig::load("/definitely/not/here.json");
        assert!(matches!(res, Err(MindErr::Io(_))));
    }

    #[test]
    fn verbosity_maps_to_log_levels() {
        assert_eq!(Verbosity::MILESTONES.level_filter(), LevelFilter::Info);
        assert_eq!(Verbosity::CYCLES.level_filter(), LevelFilter::Debug);
        assert_eq!(Verbosity::WEIGHTS.level_filter(), LevelFilter::Trace);
        assert!(Verbosity::new(0).is_err());
    }
}
