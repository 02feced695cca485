//! The discrete configuration space: uniform draws and neighborhood moves.

use rand::Rng;

use ot_types::{Configuration, Dimension, TunerError, TunerResult};

/// The set of tunable dimensions and the perturbation policy over them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSpace {
    dims: Vec<Dimension>,
    /// Probability that a perturbation is a big jump (two dimensions
    /// reassigned uniformly) rather than a single-dimension local step.
    big_jump_prob: f64,
}

impl ConfigSpace {
    pub fn new(dims: Vec<Dimension>, big_jump_prob: f64) -> TunerResult<Self> {
        if dims.len() < 2 {
            return Err(TunerError::Config(
                "configuration space needs at least two dimensions".into(),
            ));
        }
        if !(0.0..=1.0).contains(&big_jump_prob) {
            return Err(TunerError::Config(format!(
                "big_jump_prob must be within [0, 1], got {big_jump_prob}"
            )));
        }
        let mut names = std::collections::HashSet::new();
        for dim in &dims {
            if !names.insert(dim.name.as_str()) {
                return Err(TunerError::Config(format!(
                    "duplicate dimension name: {}",
                    dim.name
                )));
            }
            if dim.values.len() < 2 {
                return Err(TunerError::Config(format!(
                    "dimension {} needs at least two allowed values",
                    dim.name
                )));
            }
            let unique: std::collections::HashSet<i64> = dim.values.iter().copied().collect();
            if unique.len() != dim.values.len() {
                return Err(TunerError::Config(format!(
                    "dimension {} has duplicate allowed values",
                    dim.name
                )));
            }
        }
        Ok(Self {
            dims,
            big_jump_prob,
        })
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dims
    }

    /// Draws one allowed value per dimension, independently and uniformly.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Configuration {
        self.dims
            .iter()
            .map(|dim| {
                let value = dim.values[rng.random_range(0..dim.values.len())];
                (dim.name.clone(), value)
            })
            .collect()
    }

    /// Produces a neighboring configuration without touching the input.
    ///
    /// With probability `big_jump_prob` two distinct dimensions are each
    /// reassigned to a uniform draw (the current value is not excluded, so
    /// a big jump can land on the same configuration). Otherwise one
    /// dimension moves to an adjacent value in its ordered list; boundary
    /// values move inward, never wrap.
    pub fn perturb<R: Rng>(&self, config: &Configuration, rng: &mut R) -> Configuration {
        if rng.random::<f64>() < self.big_jump_prob {
            self.big_jump(config, rng)
        } else {
            self.local_step(config, rng)
        }
    }

    fn big_jump<R: Rng>(&self, config: &Configuration, rng: &mut R) -> Configuration {
        let first = rng.random_range(0..self.dims.len());
        let mut second = rng.random_range(0..self.dims.len() - 1);
        if second >= first {
            second += 1;
        }

        let mut next = config.clone();
        for idx in [first, second] {
            let dim = &self.dims[idx];
            let value = dim.values[rng.random_range(0..dim.values.len())];
            next = next.with_value(&dim.name, value);
        }
        next
    }

    fn local_step<R: Rng>(&self, config: &Configuration, rng: &mut R) -> Configuration {
        let dim = &self.dims[rng.random_range(0..self.dims.len())];
        let pos = config
            .value(&dim.name)
            .and_then(|v| dim.position_of(v))
            .unwrap_or(0);
        let last = dim.values.len() - 1;

        let next_pos = if pos == 0 {
            1
        } else if pos == last {
            last - 1
        } else if rng.random::<bool>() {
            pos + 1
        } else {
            pos - 1
        };

        config.with_value(&dim.name, dim.values[next_pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn space(big_jump_prob: f64) -> ConfigSpace {
        let dims = vec![
            Dimension::new("seed", (0..=10).collect()),
            Dimension::new("pace", (0..=10).collect()),
            Dimension::new("turnover", (0..=10).collect()),
        ];
        ConfigSpace::new(dims, big_jump_prob).unwrap()
    }

    #[test]
    fn random_draws_stay_in_allowed_values() {
        let space = space(0.2);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let config = space.random(&mut rng);
            assert_eq!(config.len(), 3);
            for dim in space.dimensions() {
                let v = config.value(&dim.name).unwrap();
                assert!(dim.values.contains(&v), "{v} not allowed for {}", dim.name);
            }
        }
    }

    #[test]
    fn local_step_changes_exactly_one_dimension_by_one_position() {
        let space = space(0.0); // never big-jump
        let mut rng = StdRng::seed_from_u64(2);
        let config = space.random(&mut rng);
        for _ in 0..200 {
            let next = space.perturb(&config, &mut rng);
            assert_eq!(config.distance(&next), 1);
            // The moved dimension is exactly one position away.
            for dim in space.dimensions() {
                let before = config.value(&dim.name).unwrap();
                let after = next.value(&dim.name).unwrap();
                if before != after {
                    let a = dim.position_of(before).unwrap() as i64;
                    let b = dim.position_of(after).unwrap() as i64;
                    assert_eq!((a - b).abs(), 1);
                }
            }
        }
    }

    #[test]
    fn boundary_values_move_inward() {
        let dims = vec![
            Dimension::new("a", vec![0, 1, 2]),
            Dimension::new("b", vec![0, 1, 2]),
        ];
        let space = ConfigSpace::new(dims, 0.0).unwrap();
        let config: Configuration = [("a".to_string(), 0), ("b".to_string(), 2)]
            .into_iter()
            .collect();

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let next = space.perturb(&config, &mut rng);
            // No wraparound: 0 can only go to 1, 2 can only go to 1.
            assert!(next.value("a").unwrap() == 0 || next.value("a").unwrap() == 1);
            assert!(next.value("b").unwrap() == 2 || next.value("b").unwrap() == 1);
        }
    }

    #[test]
    fn big_jump_touches_at_most_two_dimensions() {
        let space = space(1.0); // always big-jump
        let mut rng = StdRng::seed_from_u64(4);
        let config = space.random(&mut rng);
        for _ in 0..200 {
            let next = space.perturb(&config, &mut rng);
            assert!(config.distance(&next) <= 2);
        }
    }

    #[test]
    fn perturb_never_mutates_input() {
        let space = space(0.5);
        let mut rng = StdRng::seed_from_u64(5);
        let config = space.random(&mut rng);
        let snapshot = config.clone();
        for _ in 0..50 {
            let _ = space.perturb(&config, &mut rng);
        }
        assert_eq!(config, snapshot);
    }

    #[test]
    fn degenerate_spaces_rejected() {
        assert!(ConfigSpace::new(vec![Dimension::new("only", vec![0, 1])], 0.2).is_err());
        assert!(ConfigSpace::new(
            vec![
                Dimension::new("a", vec![0]),
                Dimension::new("b", vec![0, 1]),
            ],
            0.2
        )
        .is_err());
        assert!(ConfigSpace::new(
            vec![
                Dimension::new("a", vec![0, 1]),
                Dimension::new("a", vec![0, 1]),
            ],
            0.2
        )
        .is_err());
        assert!(ConfigSpace::new(
            vec![
                Dimension::new("a", vec![0, 1]),
                Dimension::new("b", vec![0, 1]),
            ],
            1.5
        )
        .is_err());
    }
}
