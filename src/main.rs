use std::env;

use anyhow::{bail, Context};
use log::{info, warn};

use coremind::training::{CoreMind, MindConfig, Verbosity};

const CONFIG_VAR: &str = "MIND_CONFIG";
const VERBOSITY_VAR: &str = "MIND_VERBOSITY";

fn main() -> anyhow::Result<()> {
    let mut config = match env::var(CONFIG_VAR) {
        Ok(path) => MindConfig::load(&path).with_context(|| format!("loading config '{path}'"))?,
        Err(_) => MindConfig::default(),
    };

    if let Ok(level) = env::var(VERBOSITY_VAR) {
        let level = level
            .trim()
            .parse::<u8>()
            .with_context(|| format!("{VERBOSITY_VAR} must be 1, 2 or 3, got '{level}'"))?;
        config.verbosity = Verbosity::new(level)?;
    }

    env_logger::Builder::new()
        .filter_level(config.verbosity.level_filter())
        .parse_default_env()
        .init();

    let codes: Vec<String> = env::args().skip(1).collect();
    if codes.is_empty() {
        bail!("usage: coremind <skill code>...");
    }

    let mut mind = CoreMind::from_config(&config)?;
    for raw in &codes {
        match mind.acquire_skill_str(raw) {
            Ok(code) => info!(code = code; "skill learned"),
            Err(e) => warn!("skipping '{raw}': {e}"),
        }
    }

    let capacity = mind.codec().capacity();
    for code in 0..capacity {
        let output = mind.recall(code)?;
        let mark = if mind.learned_codes().contains(&code) {
            "*"
        } else {
            " "
        };
        println!("{mark} {code:>3} {output:>8.4}");
    }

    Ok(())
}
