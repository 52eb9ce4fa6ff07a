//! Elementwise arithmetic capability set used by the update kernels
//!
//! The kernels in [`super::update`] only need a handful of in-place
//! operations. Any storage that provides them (CPU arrays, device buffers,
//! vectorized slices) can be driven by the same update rule.

use ndarray::{Array, Dimension, Zip};

/// Minimal in-place arithmetic over a dense f32 buffer
///
/// Binary operations assume both operands have the same shape; mismatches
/// are left to the implementation (ndarray panics).
pub trait TensorBuffer: Clone {
    /// Zero-filled buffer with the same shape
    fn zeros_like(&self) -> Self;

    /// `self *= alpha`
    fn scale_(&mut self, alpha: f32);

    /// `self += alpha * x`
    fn axpy_(&mut self, alpha: f32, x: &Self);

    /// `self += value * a * b`
    fn addcmul_(&mut self, value: f32, a: &Self, b: &Self);

    /// Elementwise square root into a new buffer
    fn sqrt(&self) -> Self;

    /// `self /= other` elementwise
    fn div_(&mut self, other: &Self);

    /// `self += scalar`
    fn add_scalar_(&mut self, scalar: f32);
}

impl<D: Dimension> TensorBuffer for Array<f32, D> {
    fn zeros_like(&self) -> Self {
        Array::zeros(self.raw_dim())
    }

    fn scale_(&mut self, alpha: f32) {
        self.mapv_inplace(|x| x * alpha);
    }

    fn axpy_(&mut self, alpha: f32, x: &Self) {
        self.scaled_add(alpha, x);
    }

    fn addcmul_(&mut self, value: f32, a: &Self, b: &Self) {
        Zip::from(self).and(a).and(b).for_each(|s, &a, &b| *s += value * a * b);
    }

    fn sqrt(&self) -> Self {
        self.mapv(f32::sqrt)
    }

    fn div_(&mut self, other: &Self) {
        Zip::from(self).and(other).for_each(|s, &o| *s /= o);
    }

    fn add_scalar_(&mut self, scalar: f32) {
        self.mapv_inplace(|x| x + scalar);
    }
}
