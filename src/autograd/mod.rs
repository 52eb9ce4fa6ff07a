//! Minimal autograd surface consumed by the optimizer
//!
//! Gradients are produced elsewhere; this module only provides the tensor
//! handle they attach to and the gradient-recording mode.

mod context;
mod tensor;

pub use context::{enable_grad, is_grad_enabled, no_grad};
pub use tensor::Tensor;
