//! Optimizer spec validation logic

use super::error::ValidationError;
use crate::config::schema::{OptimSpec, KNOWN_PARAMS, PARAM_BETA1, PARAM_BETA2};

/// Validate an optimizer specification
///
/// Checks:
/// - The optimizer name is known
/// - No unrecognized parameters are present
/// - Parameters have the right types
/// - Numeric values are in valid ranges
pub fn validate_spec(spec: &OptimSpec) -> Result<(), ValidationError> {
    if !spec.name.eq_ignore_ascii_case("adamr") {
        return Err(ValidationError::InvalidOptimizer(spec.name.clone()));
    }

    if !(spec.lr > 0.0 && spec.lr.is_finite()) {
        return Err(ValidationError::InvalidLearningRate(spec.lr));
    }

    // Sorted so the reported key is deterministic
    let mut unknown: Vec<&String> =
        spec.params.keys().filter(|k| !KNOWN_PARAMS.contains(&k.as_str())).collect();
    unknown.sort();
    if let Some(key) = unknown.first() {
        return Err(ValidationError::UnknownParam((*key).clone()));
    }

    let config = spec.to_config()?;

    for (name, value) in [(PARAM_BETA1, config.betas.0), (PARAM_BETA2, config.betas.1)] {
        if !(0.0..1.0).contains(&value) {
            return Err(ValidationError::InvalidBeta { name, value });
        }
    }

    if !(config.eps >= 0.0 && config.eps.is_finite()) {
        return Err(ValidationError::InvalidEps(config.eps));
    }

    if !(0.0..=1.0).contains(&config.recover_level) {
        return Err(ValidationError::InvalidRecoverLevel(config.recover_level));
    }

    if !(config.recover_pow > 0.0 && config.recover_pow.is_finite()) {
        return Err(ValidationError::InvalidRecoverPow(config.recover_pow));
    }

    if !config.weight_decay.is_finite() {
        return Err(ValidationError::InvalidWeightDecay(config.weight_decay));
    }

    Ok(())
}
