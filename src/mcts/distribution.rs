//! Distribution shaping over action maps
//!
//! - `normalise`: divide by the total mass
//! - `extremise`: sharpen or flatten with a temperature `tau`, P(a) ∝ v(a)^(1/τ)
//! - `mix_dirichlet_noise`: AlphaGo Zero exploration noise,
//!   (1 - ε) · p(a) + ε · η(a) with η ~ Dir(α)

use crate::mcts::action_map::ActionMap;
use crate::{MctsError, Result};
use rand::Rng;
use rand_distr::{Distribution, Gamma};

/// Rescales values so they sum to one.
///
/// # Errors
/// [`MctsError::EmptyDistribution`] when the map is empty or its total is not positive.
pub fn normalise<K: Clone>(distribution: &ActionMap<K, f64>) -> Result<ActionMap<K, f64>> {
    let total: f64 = distribution.values().sum();
    if !(total > 0.0) {
        return Err(MctsError::EmptyDistribution);
    }
    Ok(distribution.map_values(|v| v / total))
}

/// Temperature-controlled distribution: values raised to `1 / tau`, then normalised.
///
/// Values are first divided by the maximum so that small temperatures do not
/// overflow. `tau = 1` is plain normalisation; as `tau → 0` the mass moves to
/// the arg-max key(s), split equally between exact ties.
///
/// # Errors
/// * [`MctsError::InvalidTemperature`] when `tau <= 0` or is not finite
/// * [`MctsError::NegativeWeight`] when any value is negative
/// * [`MctsError::EmptyDistribution`] when the map is empty or all zero
pub fn extremise<K: Clone>(distribution: &ActionMap<K, f64>, tau: f64) -> Result<ActionMap<K, f64>> {
    if !(tau > 0.0) || !tau.is_finite() {
        return Err(MctsError::InvalidTemperature(tau));
    }
    if let Some(&negative) = distribution.values().find(|&&v| v < 0.0) {
        return Err(MctsError::NegativeWeight(negative));
    }

    let max_value = distribution.values().copied().fold(0.0, f64::max);
    if !(max_value > 0.0) {
        return Err(MctsError::EmptyDistribution);
    }

    let exponent = 1.0 / tau;
    let powered = distribution.map_values(|v| (v / max_value).powf(exponent));
    let total: f64 = powered.values().sum();

    Ok(powered.map_values(|v| v / total))
}

/// Draws one sample from a symmetric Dirichlet distribution of dimension `dimension`.
///
/// Sampled as independent `Gamma(alpha, 1)` variables divided by their sum.
/// A one-dimensional draw is always `[1.0]`.
///
/// # Errors
/// [`MctsError::Dirichlet`] when `alpha` is not a valid Gamma shape (not strictly positive).
pub fn sample_dirichlet<R: Rng + ?Sized>(alpha: f64, dimension: usize, rng: &mut R) -> Result<Vec<f64>> {
    let gamma = Gamma::new(alpha, 1.0)
        .map_err(|e| MctsError::Dirichlet(format!("alpha={}: {:?}", alpha, e)))?;

    let mut noise: Vec<f64> = (0..dimension).map(|_| gamma.sample(rng)).collect();
    let sum: f64 = noise.iter().sum();

    if sum > 0.0 && sum.is_finite() {
        for value in &mut noise {
            *value /= sum;
        }
    } else if dimension > 0 {
        // Every component underflowed (tiny alpha); fall back to the mean of Dir(alpha).
        log::warn!("Dirichlet draw underflowed (alpha={}), using uniform noise", alpha);
        noise = vec![1.0 / dimension as f64; dimension];
    }

    Ok(noise)
}

/// Mixes Dirichlet noise into a distribution.
///
/// One sample of dimension `distribution.len()` is drawn and paired with the
/// entries in iteration order; each value becomes `(1 - epsilon) * v + epsilon * noise`.
/// The draw happens even when `epsilon == 0`, so the random stream advances the
/// same way whatever the mixing weight.
pub fn mix_dirichlet_noise<K, R>(
    distribution: &ActionMap<K, f64>,
    epsilon: f64,
    alpha: f64,
    rng: &mut R,
) -> Result<ActionMap<K, f64>>
where
    K: Clone + PartialEq,
    R: Rng + ?Sized,
{
    let noise = sample_dirichlet(alpha, distribution.len(), rng)?;

    Ok(distribution
        .iter()
        .zip(noise)
        .map(|((key, &value), eta)| (key.clone(), (1.0 - epsilon) * value + epsilon * eta))
        .collect())
}
