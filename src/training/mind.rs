use log::{debug, info};

use super::{MindConfig, SkillNames, SkillRegistry};
use crate::{
    arch::{Hyperparams, Network, WeightGen},
    codec::SkillCodec,
    MindErr, Result,
};

/// Teaches a network which skill codes have been acquired.
///
/// Every cycle retrains over the full code range, labeling *all* learned codes positive, so
/// earlier skills are not forgotten when a new one is taught.
pub struct CoreMind {
    network: Network,
    codec: SkillCodec,
    learned: Vec<u32>,
    registry: Option<Box<dyn SkillRegistry>>,

    cycles: usize,
    iterations: usize,
    hyper: Hyperparams,
}

impl CoreMind {
    /// Creates a new `CoreMind` around an existing network, with the default schedule of 50
    /// cycles of one iteration each.
    ///
    /// # Returns
    /// An error if the network does not take the codec's width as input or does not have a
    /// single output.
    pub fn new(network: Network, codec: SkillCodec) -> Result<Self> {
        if network.input_size() != codec.width() {
            return Err(MindErr::SizeMismatch {
                what: "network inputs",
                got: network.input_size(),
                expected: codec.width(),
            });
        }
        if network.output_size() != 1 {
            return Err(MindErr::SizeMismatch {
                what: "network outputs",
                got: network.output_size(),
                expected: 1,
            });
        }

        Ok(Self {
            network,
            codec,
            learned: Vec::with_capacity(codec.capacity() as usize),
            registry: None,
            cycles: 50,
            iterations: 1,
            hyper: Hyperparams::default(),
        })
    }

    /// Builds the network, codec, schedule and registry described by `config`.
    pub fn from_config(config: &MindConfig) -> Result<Self> {
        config.validate()?;

        let net = &config.network;
        let mut weight_gen = WeightGen::seeded(net.seed)?;
        let network = Network::with_non_linearities(
            net.input_size,
            net.hidden_size,
            net.output_size,
            net.hidden_act,
            net.output_act,
            &mut weight_gen,
        )?;

        let mut mind = Self::new(network, SkillCodec::new(net.input_size)?)?
            .with_schedule(config.training.cycles, config.training.iterations)
            .with_hyperparams(config.training.hyperparams());

        if !config.skills.is_empty() {
            mind = mind.with_registry(SkillNames::new(config.skills.iter().cloned()));
        }

        Ok(mind)
    }

    pub fn with_schedule(mut self, cycles: usize, iterations: usize) -> Self {
        self.cycles = cycles;
        self.iterations = iterations;
        self
    }

    pub fn with_hyperparams(mut self, hyper: Hyperparams) -> Self {
        self.hyper = hyper;
        self
    }

    pub fn with_registry<R>(mut self, registry: R) -> Self
    where
        R: SkillRegistry + 'static,
    {
        self.registry = Some(Box::new(registry));
        self
    }

    /// The learned codes, in the order they were first acquired.
    pub fn learned_codes(&self) -> &[u32] {
        &self.learned
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn codec(&self) -> &SkillCodec {
        &self.codec
    }

    /// Records `code` as learned, unless it already is, and trains the network on every
    /// learned code for the configured amount of cycles.
    ///
    /// # Returns
    /// An error before touching the network if `code` is out of the codec's range.
    pub fn acquire_skill(&mut self, code: u32) -> Result<()> {
        let probe = self.codec.encode_input(code)?;
        let skill = self.skill_name(code).to_owned();

        if self.learned.contains(&code) {
            info!(code = code, skill = skill.as_str(); "skill already known, reinforcing");
        } else {
            self.learned.push(code);
            let bits = probe.to_string();
            info!(
                code = code,
                skill = skill.as_str(),
                bits = bits.as_str();
                "acquiring skill"
            );
        }

        for cycle in 0..self.cycles {
            let samples = self.codec.training_set_for(&self.learned)?;

            let mut loss = 0.0;
            self.network
                .train_with(&samples, self.iterations, self.hyper, |_, l| loss = l)?;

            let output = self.network.forward(probe.view())?[0];
            debug!(
                code = code,
                cycle = cycle,
                loss = loss,
                output = output;
                "training cycle finished"
            );
        }

        info!(
            code = code,
            learned = self.learned.len();
            "skill acquired"
        );

        Ok(())
    }

    /// Parses a skill code received from outside the core and acquires it.
    ///
    /// # Returns
    /// The parsed code, or `MindErr::InvalidSkillCode` if `raw` is not an integer in the
    /// codec's range. The network is untouched on error.
    pub fn acquire_skill_str(&mut self, raw: &str) -> Result<u32> {
        let code = self.parse_code(raw)?;
        self.acquire_skill(code)?;
        Ok(code)
    }

    /// Parses a skill code, checking it against the codec's range.
    pub fn parse_code(&self, raw: &str) -> Result<u32> {
        let trimmed = raw.trim();
        let code = trimmed
            .parse::<u32>()
            .map_err(|e| MindErr::InvalidSkillCode(format!("'{trimmed}': {e}")))?;

        self.codec.check(code).map_err(|_| {
            MindErr::InvalidSkillCode(format!(
                "'{trimmed}' is outside [0, {})",
                self.codec.capacity()
            ))
        })?;

        Ok(code)
    }

    /// Runs a single forward pass on `code` and returns the network's output.
    pub fn recall(&mut self, code: u32) -> Result<f32> {
        let x = self.codec.encode_input(code)?;
        Ok(self.network.forward(x.view())?[0])
    }

    fn skill_name(&self, code: u32) -> &str {
        self.registry
            .as_ref()
            .and_then(|registry| registry.name(code))
            .unwrap_or("unnamed")
    }
}
