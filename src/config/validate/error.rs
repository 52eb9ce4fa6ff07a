//! Validation error types

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid optimizer: {0} (must be: adamr)")]
    InvalidOptimizer(String),

    #[error("Invalid learning rate: {0} (must be > 0.0 and finite)")]
    InvalidLearningRate(f32),

    #[error("Invalid {name}: {value} (must be in [0.0, 1.0))")]
    InvalidBeta { name: &'static str, value: f32 },

    #[error("Invalid eps: {0} (must be >= 0.0)")]
    InvalidEps(f32),

    #[error("Invalid recover_level: {0} (must be in [0.0, 1.0])")]
    InvalidRecoverLevel(f32),

    #[error("Invalid recover_pow: {0} (must be > 0.0)")]
    InvalidRecoverPow(f32),

    #[error("Invalid weight_decay: {0} (must be finite)")]
    InvalidWeightDecay(f32),

    #[error("Parameter '{param}' must be a {expected}")]
    WrongType { param: String, expected: &'static str },

    #[error("Unknown optimizer parameter: {0}")]
    UnknownParam(String),
}
