//! Synthetic datasets: a built-in model sampled on a grid plus Gaussian noise.
//!
//! Useful for exercising the fitter without an external dataset. The
//! output is deterministic for a given seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Grid, SynthConfig};
use crate::error::{NumericError, Result};
use crate::models::{ParamVector, model_for};

pub fn generate_dataset(config: &SynthConfig) -> Result<Grid> {
    let model = model_for(config.model);
    if config.params.len() != model.param_len() {
        return Err(NumericError::ShapeMismatch {
            what: format!("{} parameters", model.name()),
            left: config.params.len(),
            right: model.param_len(),
        });
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(NumericError::invalid(format!(
            "Invalid noise level: {} (must be finite and >=0).",
            config.noise
        )));
    }

    let n = config.domain.sample_count(config.step)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| NumericError::invalid(format!("Noise distribution error: {e}")))?;

    let base = ParamVector::from_slice(0.0, &config.params);
    let mut grid = Grid::with_capacity(n);
    for i in 0..n {
        let x = config.domain.start + i as f64 * config.step;
        let clean = model.eval(&base.at(x));
        if !clean.is_finite() {
            return Err(NumericError::DomainError {
                function: model.name().to_string(),
                x,
                index: i,
            });
        }
        grid.push(x, clean + normal.sample(&mut rng));
    }

    log::debug!(
        "generated {n} {} samples (noise={}, seed={})",
        model.name(),
        config.noise,
        config.seed
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Domain, ModelKind};

    fn config(noise: f64, seed: u64) -> SynthConfig {
        SynthConfig {
            model: ModelKind::Line,
            params: vec![1.0, 2.0],
            domain: Domain::new(0.0, 9.0),
            step: 1.0,
            noise,
            seed,
            out: "unused.txt".into(),
        }
    }

    #[test]
    fn noiseless_dataset_follows_the_model() {
        let grid = generate_dataset(&config(0.0, 1)).unwrap();
        assert_eq!(grid.len(), 10);
        for (x, y) in grid.points() {
            assert_eq!(y, 1.0 + 2.0 * x);
        }
    }

    #[test]
    fn uneven_step_stays_inside_the_domain() {
        let mut cfg = config(0.0, 1);
        cfg.step = 4.0;
        let grid = generate_dataset(&cfg).unwrap();
        assert_eq!(grid.x, vec![0.0, 4.0, 8.0]);
    }

    #[test]
    fn same_seed_same_noise() {
        let a = generate_dataset(&config(0.3, 42)).unwrap();
        let b = generate_dataset(&config(0.3, 42)).unwrap();
        let c = generate_dataset(&config(0.3, 43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn wrong_parameter_count_is_rejected() {
        let mut cfg = config(0.0, 1);
        cfg.params = vec![1.0];
        assert!(matches!(
            generate_dataset(&cfg),
            Err(NumericError::ShapeMismatch { left: 1, right: 2, .. })
        ));
    }
}
