//! Optimizer specification schema
//!
//! ```yaml
//! name: adamr
//! lr: 0.001
//! beta1: 0.9
//! recover_level: 0.8
//! ```
//!
//! Every key other than `name` and `lr` is optional and falls back to
//! [`AdamRConfig::default`].

use super::validate::ValidationError;
use crate::optim::AdamRConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Optimizer parameter field names
pub const PARAM_BETA1: &str = "beta1";
pub const PARAM_BETA2: &str = "beta2";
pub const PARAM_EPS: &str = "eps";
pub const PARAM_WEIGHT_DECAY: &str = "weight_decay";
pub const PARAM_ENABLE_RECOVER: &str = "enable_recover";
pub const PARAM_RECOVER_LEVEL: &str = "recover_level";
pub const PARAM_RECOVER_POW: &str = "recover_pow";

/// Recognized optional parameter keys
pub const KNOWN_PARAMS: [&str; 7] = [
    PARAM_BETA1,
    PARAM_BETA2,
    PARAM_EPS,
    PARAM_WEIGHT_DECAY,
    PARAM_ENABLE_RECOVER,
    PARAM_RECOVER_LEVEL,
    PARAM_RECOVER_POW,
];

/// Optimizer specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimSpec {
    /// Optimizer name: "adamr"
    pub name: String,

    /// Learning rate
    pub lr: f32,

    /// Remaining hyperparameters (beta1, beta2, recover_level, ...)
    #[serde(flatten)]
    pub params: HashMap<String, serde_json::Value>,
}

impl OptimSpec {
    /// Spec for `adamr` with no extra parameters
    pub fn adamr(lr: f32) -> Self {
        Self { name: "adamr".to_string(), lr, params: HashMap::new() }
    }

    /// Set an optional parameter
    pub fn with_param(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Extract typed hyperparameters, without range checks
    pub fn to_config(&self) -> Result<AdamRConfig, ValidationError> {
        let defaults = AdamRConfig::default();
        let beta1 = self.float(PARAM_BETA1)?.unwrap_or(defaults.betas.0);
        let beta2 = self.float(PARAM_BETA2)?.unwrap_or(defaults.betas.1);

        Ok(AdamRConfig {
            lr: self.lr,
            betas: (beta1, beta2),
            eps: self.float(PARAM_EPS)?.unwrap_or(defaults.eps),
            enable_recover: self.flag(PARAM_ENABLE_RECOVER)?.unwrap_or(defaults.enable_recover),
            recover_level: self.float(PARAM_RECOVER_LEVEL)?.unwrap_or(defaults.recover_level),
            recover_pow: self.float(PARAM_RECOVER_POW)?.unwrap_or(defaults.recover_pow),
            weight_decay: self.float(PARAM_WEIGHT_DECAY)?.unwrap_or(defaults.weight_decay),
        })
    }

    fn float(&self, key: &str) -> Result<Option<f32>, ValidationError> {
        match self.params.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(|v| Some(v as f32))
                .ok_or_else(|| ValidationError::WrongType {
                    param: key.to_string(),
                    expected: "number",
                }),
        }
    }

    fn flag(&self, key: &str) -> Result<Option<bool>, ValidationError> {
        match self.params.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| ValidationError::WrongType {
                    param: key.to_string(),
                    expected: "bool",
                }),
        }
    }
}
