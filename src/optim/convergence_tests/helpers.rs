//! Shared test helpers for AdamR convergence tests

#[cfg(test)]
use crate::optim::{AdamR, AdamRConfig, Optimizer};
#[cfg(test)]
use crate::Tensor;
#[cfg(test)]
use ndarray::Array1;

/// Run `iterations` steps of a single-tensor problem and return the tensor
#[cfg(test)]
pub fn optimize<F>(config: AdamRConfig, init: Vec<f32>, iterations: usize, grad_fn: F) -> Tensor
where
    F: Fn(&Array1<f32>) -> Array1<f32>,
{
    let param = Tensor::from_vec(init, true);
    let mut optimizer =
        AdamR::new(vec![param.clone()], config).expect("test config should be valid");

    for _ in 0..iterations {
        let grad = grad_fn(&param.data());
        param.set_grad(grad);
        optimizer.step(None);
    }

    param
}

/// Plain-Adam behaviour: recovery on with zero pull
#[cfg(test)]
pub fn adam_like(lr: f32) -> AdamRConfig {
    AdamRConfig { lr, recover_level: 0.0, ..AdamRConfig::default() }
}

/// Coupled weight-decay branch
#[cfg(test)]
pub fn decayed(lr: f32, weight_decay: f32) -> AdamRConfig {
    AdamRConfig { lr, enable_recover: false, weight_decay, ..AdamRConfig::default() }
}

/// Test that optimizer converges on f(x) = x^2
#[cfg(test)]
pub fn test_quadratic_convergence(config: AdamRConfig, iterations: usize, threshold: f32) -> bool {
    let param = optimize(config, vec![3.0, -2.0, 1.5, -2.5], iterations, |x| x.mapv(|v| 2.0 * v));
    let data = param.data();
    data.iter().all(|&val| val.abs() < threshold)
}

/// Test that loss on f(x) = x^2 never rises by more than a small tolerance
#[cfg(test)]
pub fn test_loss_decreases(config: AdamRConfig, iterations: usize) -> bool {
    let param = Tensor::from_vec(vec![10.0], true);
    let mut optimizer = AdamR::new(vec![param.clone()], config).expect("valid config");
    let mut prev_loss = f32::INFINITY;

    for _ in 0..iterations {
        let x = param.data()[0];
        let loss = x * x;
        if loss > prev_loss + 1e-3 {
            return false;
        }
        prev_loss = loss;
        param.set_grad(ndarray::arr1(&[2.0 * x]));
        optimizer.step(None);
    }

    true
}

/// Test ill-conditioned quadratic f(x,y) = 0.5*(x^2 + 100*y^2)
#[cfg(test)]
pub fn test_ill_conditioned_convergence(
    config: AdamRConfig,
    iterations: usize,
    threshold: f32,
) -> bool {
    let param = optimize(config, vec![10.0, 10.0], iterations, |p| {
        ndarray::arr1(&[p[0], 100.0 * p[1]])
    });
    let data = param.data();
    data.iter().all(|&val| val.abs() < threshold)
}

/// Test high-dimensional sum of squares
#[cfg(test)]
pub fn test_high_dim_convergence(
    config: AdamRConfig,
    dim: usize,
    iterations: usize,
    threshold: f32,
) -> bool {
    let init: Vec<f32> = (0..dim).map(|i| (i as f32 + 1.0) * 0.5).collect();
    let param = optimize(config, init, iterations, |x| x.mapv(|v| 2.0 * v));
    let data = param.data();
    data.iter().all(|&val| val.abs() < threshold)
}

/// Should not produce NaN or Inf with very small gradients
#[cfg(test)]
pub fn test_small_gradient_stability(config: AdamRConfig) -> bool {
    let param = optimize(config, vec![1e-6, 1e-6], 100, |x| x.mapv(|v| 2.0 * v));
    let data = param.data();
    data.iter().all(|&val| val.is_finite())
}

/// Should not produce NaN or Inf with large gradients
#[cfg(test)]
pub fn test_large_gradient_stability(config: AdamRConfig) -> bool {
    let param = optimize(config, vec![1e4, 1e4], 100, |x| x.mapv(|v| 2.0 * v));
    let data = param.data();
    data.iter().all(|&val| val.is_finite())
}
