//! Parameter groups and their hyperparameters

use crate::error::{Error, Result};
use crate::Tensor;

/// AdamR hyperparameters shared by every tensor of a group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamRConfig {
    pub lr: f32,
    pub betas: (f32, f32),
    pub eps: f32,
    /// Blend the adaptive step with the tracked displacement
    pub enable_recover: bool,
    /// Maximum pull strength, in `[0, 1]`
    pub recover_level: f32,
    /// Shape of the rank curve
    pub recover_pow: f32,
    /// Coupled L2 decay, only used when recovery is disabled
    pub weight_decay: f32,
}

impl AdamRConfig {
    /// Defaults with the given learning rate
    pub fn with_lr(lr: f32) -> Self {
        Self { lr, ..Self::default() }
    }

    /// Reject configurations that cannot be constructed
    pub fn validate(&self, group: usize) -> Result<()> {
        if !(0.0..=1.0).contains(&self.recover_level) {
            return Err(Error::InvalidRecoverLevel { group, value: self.recover_level });
        }
        Ok(())
    }
}

impl Default for AdamRConfig {
    fn default() -> Self {
        Self {
            lr: 1e-3,
            betas: (0.9, 0.999),
            eps: 1e-8,
            enable_recover: true,
            recover_level: 1.0,
            recover_pow: 2.0,
            weight_decay: 0.01,
        }
    }
}

/// Per-group overrides; unset fields inherit the optimizer defaults
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupOptions {
    pub lr: Option<f32>,
    pub betas: Option<(f32, f32)>,
    pub eps: Option<f32>,
    pub enable_recover: Option<bool>,
    pub recover_level: Option<f32>,
    pub recover_pow: Option<f32>,
    pub weight_decay: Option<f32>,
}

impl GroupOptions {
    /// Fill unset fields from `defaults`
    pub fn resolve(&self, defaults: &AdamRConfig) -> AdamRConfig {
        AdamRConfig {
            lr: self.lr.unwrap_or(defaults.lr),
            betas: self.betas.unwrap_or(defaults.betas),
            eps: self.eps.unwrap_or(defaults.eps),
            enable_recover: self.enable_recover.unwrap_or(defaults.enable_recover),
            recover_level: self.recover_level.unwrap_or(defaults.recover_level),
            recover_pow: self.recover_pow.unwrap_or(defaults.recover_pow),
            weight_decay: self.weight_decay.unwrap_or(defaults.weight_decay),
        }
    }
}

/// A set of tensors handed to the optimizer together
#[derive(Debug, Clone)]
pub struct ParamGroup {
    pub name: Option<String>,
    pub params: Vec<Tensor>,
    pub options: GroupOptions,
}

impl ParamGroup {
    pub fn new(params: Vec<Tensor>) -> Self {
        Self { name: None, params, options: GroupOptions::default() }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_lr(mut self, lr: f32) -> Self {
        self.options.lr = Some(lr);
        self
    }

    pub fn with_betas(mut self, beta1: f32, beta2: f32) -> Self {
        self.options.betas = Some((beta1, beta2));
        self
    }

    pub fn with_eps(mut self, eps: f32) -> Self {
        self.options.eps = Some(eps);
        self
    }

    pub fn with_recover(mut self, enable: bool) -> Self {
        self.options.enable_recover = Some(enable);
        self
    }

    pub fn with_recover_level(mut self, level: f32) -> Self {
        self.options.recover_level = Some(level);
        self
    }

    pub fn with_recover_pow(mut self, pow: f32) -> Self {
        self.options.recover_pow = Some(pow);
        self
    }

    pub fn with_weight_decay(mut self, weight_decay: f32) -> Self {
        self.options.weight_decay = Some(weight_decay);
        self
    }
}

impl From<Vec<Tensor>> for ParamGroup {
    fn from(params: Vec<Tensor>) -> Self {
        Self::new(params)
    }
}

/// Per-group counters carried between steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupState {
    /// Number of completed `step` calls; 0 before the first
    pub step: u64,
    /// Parameters registered for recovery so far
    pub num_layers: usize,
}

impl GroupState {
    /// Counters for the next call: `step + 1`, layers unchanged
    pub fn advance(self) -> Self {
        Self { step: self.step + 1, ..self }
    }

    /// `(1 - β1^t, 1 - β2^t)` at the current step
    pub fn bias_corrections(&self, betas: (f32, f32)) -> (f32, f32) {
        let t = self.step.min(i32::MAX as u64) as i32;
        (1.0 - betas.0.powi(t), 1.0 - betas.1.powi(t))
    }
}

/// Optimizer-side view of a group
#[derive(Debug, Clone)]
pub(crate) struct ResolvedGroup {
    pub name: Option<String>,
    pub params: Vec<Tensor>,
    pub config: AdamRConfig,
}
