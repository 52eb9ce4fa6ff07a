//! AdamR update kernels
//!
//! Each kernel is one stage of the per-parameter update and is generic over
//! [`TensorBuffer`], so the same rule drives any storage backend.
//!
//! ```text
//! m   = β1·m + (1-β1)·g
//! v   = β2·v + (1-β2)·g²
//! u   = (m / bc1) / (√v / √bc2 + ε)
//!
//! recover:     u = (1-w)·lr·u + w·d ;  d -= u ;  θ -= u
//! no recover:  if λ ≠ 0 { θ -= lr·(u + λ·θ) }
//! ```

use super::buffer::TensorBuffer;

/// Update the first and second moment estimates in place
pub fn update_moments<B: TensorBuffer>(
    exp_avg: &mut B,
    exp_avg_sq: &mut B,
    grad: &B,
    beta1: f32,
    beta2: f32,
) {
    exp_avg.scale_(beta1);
    exp_avg.axpy_(1.0 - beta1, grad);

    exp_avg_sq.scale_(beta2);
    exp_avg_sq.addcmul_(1.0 - beta2, grad, grad);
}

/// Bias-corrected adaptive direction `(m / bc1) / (√v / √bc2 + ε)`
pub fn adaptive_update<B: TensorBuffer>(
    exp_avg: &B,
    exp_avg_sq: &B,
    bias_correction1: f32,
    bias_correction2: f32,
    eps: f32,
) -> B {
    let mut denom = exp_avg_sq.sqrt();
    denom.scale_(1.0 / bias_correction2.sqrt());
    denom.add_scalar_(eps);

    let mut update = exp_avg.clone();
    update.scale_(1.0 / bias_correction1);
    update.div_(&denom);
    update
}

/// Blend the scaled adaptive step with the tracked displacement and apply it
///
/// On return `update` holds exactly the displacement subtracted from both
/// `weight_dist` and `param`.
pub fn apply_recover<B: TensorBuffer>(
    update: &mut B,
    weight_dist: &mut B,
    param: &mut B,
    lr: f32,
    recover_weight: f32,
) {
    update.scale_(lr);
    update.scale_(1.0 - recover_weight);
    update.axpy_(recover_weight, weight_dist);

    weight_dist.axpy_(-1.0, update);
    param.axpy_(-1.0, update);
}

/// Apply the coupled weight-decay step
///
/// Returns `false` when `weight_decay` is zero: the adaptive direction is
/// then discarded and `param` is left untouched.
pub fn apply_decay<B: TensorBuffer>(
    mut update: B,
    param: &mut B,
    lr: f32,
    weight_decay: f32,
) -> bool {
    if weight_decay == 0.0 {
        return false;
    }
    update.axpy_(weight_decay, param);
    param.axpy_(-lr, &update);
    true
}
