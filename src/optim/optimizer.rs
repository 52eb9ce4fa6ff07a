//! Optimizer trait

/// Loss re-evaluation callback passed to [`Optimizer::step`]
pub type Closure<'a> = &'a mut dyn FnMut() -> f32;

/// Trait for optimizers that own their parameter handles
pub trait Optimizer {
    /// Perform a single optimization step
    ///
    /// When a closure is given it is evaluated first, with gradient
    /// recording enabled, and its loss is returned.
    fn step(&mut self, closure: Option<Closure<'_>>) -> Option<f32>;

    /// Detach the gradients of every managed parameter
    fn zero_grad(&mut self);

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);
}
