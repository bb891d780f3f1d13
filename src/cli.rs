/*
 * CLI Module
 *
 * Command line flags shared by the `birds` and `birds-viewer` binaries, plus
 * the logging setup both of them use.
 */

use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;
use crate::params::{SimulationParams, DEFAULT_PARAMS_PATH};

// Flags that override the parameter file
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Parameter file (TOML). Defaults to ./birds.toml when it exists
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Arena width
    #[arg(long)]
    pub width: Option<f32>,

    /// Arena height
    #[arg(long)]
    pub height: Option<f32>,

    /// Number of birds
    #[arg(long)]
    pub birds: Option<usize>,

    /// Number of food items
    #[arg(long)]
    pub food: Option<usize>,
}

impl ParamArgs {
    // Parameter file first, then flags on top, then validation
    pub fn resolve(&self) -> Result<SimulationParams, ConfigError> {
        let mut params = match &self.config {
            Some(path) => SimulationParams::load(path)?,
            None if PathBuf::from(DEFAULT_PARAMS_PATH).exists() => {
                info!(path = DEFAULT_PARAMS_PATH, "loading default parameter file");
                SimulationParams::load(DEFAULT_PARAMS_PATH)?
            }
            None => SimulationParams::default(),
        };

        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(birds) = self.birds {
            params.num_birds = birds;
        }
        if let Some(food) = self.food {
            params.num_food = food;
        }

        params.validate()?;
        Ok(params)
    }
}

// Log to stderr, filtered by RUST_LOG (info when unset)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        // A subscriber installed earlier stays in charge
        debug!(%err, "tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = ParamArgs {
            seed: Some(7),
            birds: Some(3),
            width: Some(400.0),
            ..ParamArgs::default()
        };
        // The working directory of the test run carries no birds.toml
        let params = args.resolve().unwrap();
        assert_eq!(params.seed, 7);
        assert_eq!(params.num_birds, 3);
        assert_eq!(params.width, 400.0);
        assert_eq!(params.height, 600.0);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = ParamArgs {
            food: Some(0),
            ..ParamArgs::default()
        };
        assert!(matches!(args.resolve(), Err(ConfigError::NoFood)));
    }

    #[test]
    fn tracing_can_be_initialized_twice() {
        init_tracing();
        init_tracing();
        info!("still logging after a second init");
    }
}
