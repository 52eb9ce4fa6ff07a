//! AdamR: Adam with rank-weighted weight recovery
//!
//! An optimizer for tape-based training loops. Parameters are grouped; each
//! group shares hyperparameters and a step counter. With recovery enabled,
//! every parameter's adaptive step is blended with a pull back along its own
//! accumulated displacement, strongest for the first-registered parameter of
//! a group and vanishing for the last.
//!
//! # Example
//!
//! ```
//! use adamr::optim::{AdamR, AdamRConfig, Optimizer};
//! use adamr::Tensor;
//!
//! let weight = Tensor::from_vec(vec![0.5, -0.5], true);
//! let bias = Tensor::from_vec(vec![0.0], true);
//! let mut opt = AdamR::new(vec![weight.clone(), bias.clone()], AdamRConfig::with_lr(0.01))
//!     .expect("valid config");
//!
//! weight.set_grad(ndarray::arr1(&[1.0, -1.0]));
//! bias.set_grad(ndarray::arr1(&[0.5]));
//! opt.step(None);
//! opt.zero_grad();
//! ```
//!
//! # Modules
//!
//! - `autograd`: tensor handle and gradient-recording mode
//! - `optim`: the optimizer, its state and update kernels
//! - `config`: YAML optimizer specs, validation and construction
//! - `trace`: opt-in step timing

pub mod autograd;
pub mod config;
pub mod error;
pub mod optim;
pub mod trace;

pub use autograd::Tensor;
pub use error::{Error, Result};
