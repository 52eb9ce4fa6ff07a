//! AdamR optimizer (Adam with rank-weighted weight recovery)
//!
//! AdamR runs the usual Adam moment recurrences. With recovery enabled, the
//! lr-scaled adaptive step of each parameter is blended with the parameter's
//! tracked displacement `d` (the negated sum of all updates it received):
//!
//! ```text
//! u = (1 - w)·lr·û + w·d      d -= u      θ -= u
//! ```
//!
//! so a parameter is pulled back toward where it started in proportion to
//! `w`. The weight depends on the parameter's registration rank within its
//! group (see [`recover_weight`]): early-registered tensors are pulled hardest,
//! the last-registered one takes a plain Adam step.
//!
//! Without recovery the step is Adam with coupled L2 decay; when
//! `weight_decay` is zero that branch applies nothing at all.

use super::optimizer::{Closure, Optimizer};
use super::param_group::{AdamRConfig, GroupState, ParamGroup, ResolvedGroup};
use super::recover::recover_weight;
use super::state::{ParamBuffers, ParamId, ParamState};
use super::update::{adaptive_update, apply_decay, apply_recover, update_moments};
use crate::autograd::{enable_grad, no_grad};
use crate::error::{Error, Result};
use crate::trace::{TraceStep, TRACER};
use crate::Tensor;
use log::{debug, warn};
use ndarray::Array1;

type State = ParamState<Array1<f32>>;

/// AdamR optimizer over one or more parameter groups
#[derive(Debug)]
pub struct AdamR {
    defaults: AdamRConfig,
    groups: Vec<ResolvedGroup>,
    group_states: Vec<GroupState>,
    states: Vec<Vec<State>>,
}

impl AdamR {
    /// Create an optimizer with a single group
    pub fn new(params: Vec<Tensor>, config: AdamRConfig) -> Result<Self> {
        Self::with_groups(vec![ParamGroup::new(params)], config)
    }

    /// Create an optimizer from explicit groups
    ///
    /// Options a group leaves unset are taken from `defaults`. Fails if any
    /// resolved `recover_level` is outside `[0, 1]`, if a tensor is listed
    /// twice, or if `groups` is empty.
    pub fn with_groups(groups: Vec<ParamGroup>, defaults: AdamRConfig) -> Result<Self> {
        if groups.is_empty() {
            return Err(Error::EmptyParamGroups);
        }
        let mut optimizer =
            Self { defaults, groups: Vec::new(), group_states: Vec::new(), states: Vec::new() };
        for group in groups {
            optimizer.add_param_group(group)?;
        }
        Ok(optimizer)
    }

    /// Append a group; it starts with a fresh step counter
    pub fn add_param_group(&mut self, group: ParamGroup) -> Result<()> {
        let index = self.groups.len();
        let config = group.options.resolve(&self.defaults);
        config.validate(index)?;

        for (i, param) in group.params.iter().enumerate() {
            let seen_before = group.params[..i].iter().any(|p| p.same_storage(param))
                || self.params().any(|(_, p)| p.same_storage(param));
            if seen_before {
                return Err(Error::DuplicateParameter { group: index, index: i });
            }
            if !param.requires_grad() {
                warn!(
                    "{} does not require grad; it is only stepped if a gradient is set by hand",
                    ParamId::new(index, i)
                );
            }
        }

        if !config.enable_recover && config.weight_decay == 0.0 {
            warn!(
                "group {index}: recovery disabled and weight_decay = 0; \
                 steps on this group leave parameters unchanged"
            );
        }
        debug!(
            "group {index} ({}): {} params, lr={}, recover={}",
            group.name.as_deref().unwrap_or("unnamed"),
            group.params.len(),
            config.lr,
            config.enable_recover
        );

        self.states.push(vec![ParamState::Uninitialized; group.params.len()]);
        self.group_states.push(GroupState::default());
        self.groups.push(ResolvedGroup { name: group.name, params: group.params, config });
        Ok(())
    }

    /// Number of parameter groups
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Tensors of a group, in the order they were given
    ///
    /// # Panics
    ///
    /// Panics if `group >= num_groups()`. Same for the other `group_*`
    /// accessors and [`step_count`](Self::step_count).
    #[must_use]
    pub fn group_params(&self, group: usize) -> &[Tensor] {
        &self.groups[group].params
    }

    /// Resolved hyperparameters of a group
    #[must_use]
    pub fn group_config(&self, group: usize) -> &AdamRConfig {
        &self.groups[group].config
    }

    /// Optional label given with [`ParamGroup::named`]
    #[must_use]
    pub fn group_name(&self, group: usize) -> Option<&str> {
        self.groups[group].name.as_deref()
    }

    /// Step and registration counters of a group
    #[must_use]
    pub fn group_state(&self, group: usize) -> GroupState {
        self.group_states[group]
    }

    /// Completed steps of a group
    #[must_use]
    pub fn step_count(&self, group: usize) -> u64 {
        self.group_states[group].step
    }

    /// Set the learning rate of a single group
    pub fn set_group_lr(&mut self, group: usize, lr: f32) {
        self.groups[group].config.lr = lr;
    }

    /// State of one parameter, `None` if the id is out of range
    #[must_use]
    pub fn state(&self, id: ParamId) -> Option<&State> {
        self.states.get(id.group)?.get(id.index)
    }

    /// Every managed parameter with its id, in group order
    pub fn params(&self) -> impl Iterator<Item = (ParamId, &Tensor)> + '_ {
        self.groups.iter().enumerate().flat_map(|(g, group)| {
            group.params.iter().enumerate().map(move |(i, p)| (ParamId::new(g, i), p))
        })
    }

    /// One call's worth of work on a group; returns the group's new counters
    fn step_group(&mut self, group: usize, state: GroupState) -> GroupState {
        let ResolvedGroup { params, config, .. } = &self.groups[group];
        let states = &mut self.states[group];
        let config = *config;

        let state = TRACER.span(TraceStep::Register, || {
            register(group, params, &mut states[..], state, config.enable_recover)
        });
        let (bias_correction1, bias_correction2) = state.bias_corrections(config.betas);
        let (beta1, beta2) = config.betas;
        let mut discarded = 0usize;

        for (param, param_state) in params.iter().zip(states.iter_mut()) {
            let grad = param.grad_ref();
            let Some(grad) = grad.as_ref() else {
                continue;
            };
            let ParamState::Initialized(buffers) = param_state else {
                continue;
            };

            let update = TRACER.span(TraceStep::Moments, || {
                update_moments(&mut buffers.exp_avg, &mut buffers.exp_avg_sq, grad, beta1, beta2);
                adaptive_update(
                    &buffers.exp_avg,
                    &buffers.exp_avg_sq,
                    bias_correction1,
                    bias_correction2,
                    config.eps,
                )
            });

            let mut data = param.data_mut();
            match buffers.recover.as_mut() {
                Some(recover) => {
                    let weight = recover_weight(
                        recover.p_index,
                        state.num_layers,
                        config.recover_pow,
                        config.recover_level,
                    );
                    let mut update = update;
                    TRACER.span(TraceStep::Recover, || {
                        apply_recover(
                            &mut update,
                            &mut recover.weight_dist,
                            &mut *data,
                            config.lr,
                            weight,
                        );
                    });
                }
                None => {
                    let applied = TRACER.span(TraceStep::Decay, || {
                        apply_decay(update, &mut *data, config.lr, config.weight_decay)
                    });
                    if !applied {
                        discarded += 1;
                    }
                }
            }
        }

        if discarded > 0 {
            debug!(
                "group {group} step {}: weight_decay = 0, update discarded for {discarded} params",
                state.step
            );
        }
        state
    }
}

/// Create state for parameters presenting their first gradient
///
/// Runs over the whole group before any update so every recovering
/// parameter sees the same `num_layers` within a call.
fn register(
    group: usize,
    params: &[Tensor],
    states: &mut [State],
    mut group_state: GroupState,
    enable_recover: bool,
) -> GroupState {
    for (index, (param, state)) in params.iter().zip(states.iter_mut()).enumerate() {
        if state.is_initialized() || !param.has_grad() {
            continue;
        }
        let p_index = enable_recover.then(|| {
            let p_index = group_state.num_layers;
            group_state.num_layers += 1;
            p_index
        });
        *state = ParamState::Initialized(ParamBuffers::zeros(&*param.data(), p_index));
        debug!("registered {} (p_index {p_index:?})", ParamId::new(group, index));
    }
    group_state
}

impl Optimizer for AdamR {
    fn step(&mut self, closure: Option<Closure<'_>>) -> Option<f32> {
        let loss = closure.map(|f| TRACER.span(TraceStep::Closure, || enable_grad(f)));

        no_grad(|| {
            for group in 0..self.groups.len() {
                let next = self.group_states[group].advance();
                self.group_states[group] = self.step_group(group, next);
            }
        });

        loss
    }

    fn zero_grad(&mut self) {
        for group in &self.groups {
            for param in &group.params {
                param.zero_grad();
            }
        }
    }

    fn lr(&self) -> f32 {
        self.groups[0].config.lr
    }

    fn set_lr(&mut self, lr: f32) {
        for group in &mut self.groups {
            group.config.lr = lr;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    fn config(enable_recover: bool, weight_decay: f32) -> AdamRConfig {
        AdamRConfig { lr: 0.1, enable_recover, weight_decay, ..AdamRConfig::default() }
    }

    #[test]
    fn test_new_rejects_out_of_range_level() {
        for level in [1.5, -0.1] {
            let params = vec![Tensor::from_vec(vec![1.0], true)];
            let result =
                AdamR::new(params, AdamRConfig { recover_level: level, ..Default::default() });
            assert!(matches!(result, Err(Error::InvalidRecoverLevel { .. })));
        }
    }

    #[test]
    fn test_group_override_is_validated() {
        let group = ParamGroup::new(vec![Tensor::zeros(2, true)]).with_recover_level(2.0);
        let err = AdamR::with_groups(vec![group], AdamRConfig::default())
            .expect_err("group level 2.0 must fail");
        assert!(matches!(err, Error::InvalidRecoverLevel { group: 0, value } if value == 2.0));
    }

    #[test]
    fn test_empty_groups_rejected() {
        let err = AdamR::with_groups(vec![], AdamRConfig::default()).expect_err("empty");
        assert!(matches!(err, Error::EmptyParamGroups));
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let shared = Tensor::zeros(2, true);
        let groups = vec![
            ParamGroup::new(vec![shared.clone()]),
            ParamGroup::new(vec![Tensor::zeros(1, true), shared]),
        ];
        let err = AdamR::with_groups(groups, AdamRConfig::default()).expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateParameter { group: 1, index: 1 }));
    }

    #[test]
    fn test_step_counter_once_per_call() {
        let params = vec![Tensor::zeros(2, true), Tensor::zeros(2, true)];
        for p in &params {
            p.set_grad(arr1(&[1.0, 1.0]));
        }
        let mut opt = AdamR::new(params, config(true, 0.0)).expect("valid config");
        assert_eq!(opt.step_count(0), 0);
        opt.step(None);
        opt.step(None);
        assert_eq!(opt.step_count(0), 2);
        assert_eq!(opt.group_state(0).num_layers, 2);
    }

    #[test]
    fn test_skips_parameter_without_grad() {
        let with_grad = Tensor::from_vec(vec![1.0], true);
        let without_grad = Tensor::from_vec(vec![1.0], true);
        with_grad.set_grad(arr1(&[1.0]));

        let mut opt = AdamR::new(vec![without_grad.clone(), with_grad], config(true, 0.0))
            .expect("valid config");
        opt.step(None);

        assert_eq!(opt.state(ParamId::new(0, 0)), Some(&ParamState::Uninitialized));
        assert_eq!(without_grad.data()[0], 1.0);
        assert_eq!(opt.state(ParamId::new(0, 1)).and_then(ParamState::p_index), Some(0));
        assert_eq!(opt.group_state(0).num_layers, 1);
    }

    #[test]
    fn test_late_parameter_registers_after_earlier_ones() {
        let a = Tensor::zeros(1, true);
        let b = Tensor::zeros(1, true);
        let mut opt = AdamR::new(vec![a.clone(), b.clone()], config(true, 0.0)).expect("valid");

        b.set_grad(arr1(&[1.0]));
        opt.step(None);
        a.set_grad(arr1(&[1.0]));
        opt.step(None);

        assert_eq!(opt.state(ParamId::new(0, 1)).and_then(ParamState::p_index), Some(0));
        assert_eq!(opt.state(ParamId::new(0, 0)).and_then(ParamState::p_index), Some(1));
    }

    #[test]
    fn test_no_recover_without_decay_leaves_param() {
        let p = Tensor::from_vec(vec![0.5, -0.5], true);
        p.set_grad(arr1(&[1.0, 1.0]));
        let mut opt = AdamR::new(vec![p.clone()], config(false, 0.0)).expect("valid");
        opt.step(None);

        assert_eq!(*p.data(), arr1(&[0.5, -0.5]));
        // Moments still advance
        let buffers = opt.state(ParamId::new(0, 0)).and_then(ParamState::buffers).expect("init");
        assert_abs_diff_eq!(buffers.exp_avg[0], 0.1, epsilon = 1e-7);
        assert!(buffers.recover.is_none());
    }

    #[test]
    fn test_no_recover_with_decay_first_step() {
        let p = Tensor::from_vec(vec![2.0], true);
        p.set_grad(arr1(&[1.0]));
        let mut opt = AdamR::new(vec![p.clone()], config(false, 0.5)).expect("valid");
        opt.step(None);
        // 2 - 0.1 * (1 + 0.5 * 2)
        assert_abs_diff_eq!(p.data()[0], 1.8, epsilon = 1e-5);
    }

    #[test]
    fn test_single_recovering_param_gets_full_level() {
        let p = Tensor::from_vec(vec![1.0], true);
        p.set_grad(arr1(&[1.0]));
        let cfg = AdamRConfig { recover_level: 0.5, ..config(true, 0.0) };
        let mut opt = AdamR::new(vec![p.clone()], cfg).expect("valid");
        opt.step(None);
        // first step: update = (1 - 0.5) * 0.1 * 1 + 0.5 * 0
        assert_abs_diff_eq!(p.data()[0], 0.95, epsilon = 1e-5);
        assert!(p.data()[0].is_finite());
    }

    #[test]
    fn test_closure_runs_with_grad_enabled() {
        let p = Tensor::from_vec(vec![1.0], true);
        let mut opt = AdamR::new(vec![p.clone()], config(true, 0.0)).expect("valid");

        let mut observed = None;
        let loss = opt.step(Some(&mut || {
            observed = Some(crate::autograd::is_grad_enabled());
            p.set_grad(arr1(&[2.0]));
            4.0
        }));

        assert_eq!(loss, Some(4.0));
        assert_eq!(observed, Some(true));
        assert!(opt.state(ParamId::new(0, 0)).is_some_and(ParamState::is_initialized));
    }

    #[test]
    fn test_step_without_closure_returns_none() {
        let mut opt = AdamR::new(vec![Tensor::zeros(1, true)], AdamRConfig::default()).expect("ok");
        assert_eq!(opt.step(None), None);
    }

    #[test]
    fn test_zero_grad_and_lr() {
        let a = Tensor::zeros(1, true);
        let b = Tensor::zeros(1, true);
        a.set_grad(arr1(&[1.0]));
        b.set_grad(arr1(&[1.0]));
        let groups = vec![ParamGroup::new(vec![a.clone()]), ParamGroup::new(vec![b.clone()])];
        let mut opt = AdamR::with_groups(groups, AdamRConfig::default()).expect("valid");

        opt.zero_grad();
        assert!(!a.has_grad() && !b.has_grad());

        opt.set_lr(0.5);
        assert_eq!(opt.lr(), 0.5);
        assert_eq!(opt.group_config(1).lr, 0.5);

        opt.set_group_lr(1, 0.25);
        assert_eq!(opt.group_config(1).lr, 0.25);
        assert_eq!(opt.lr(), 0.5);
    }

    #[test]
    fn test_add_param_group_starts_fresh() {
        let a = Tensor::zeros(1, true);
        a.set_grad(arr1(&[1.0]));
        let mut opt = AdamR::new(vec![a], AdamRConfig::default()).expect("valid");
        opt.step(None);

        let b = Tensor::zeros(1, true);
        b.set_grad(arr1(&[1.0]));
        opt.add_param_group(ParamGroup::new(vec![b]).named("late").with_lr(0.01))
            .expect("valid group");
        opt.step(None);

        assert_eq!(opt.num_groups(), 2);
        assert_eq!(opt.step_count(0), 2);
        assert_eq!(opt.step_count(1), 1);
        assert_eq!(opt.group_name(1), Some("late"));
        assert_eq!(opt.group_params(1).len(), 1);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_group_accessor_out_of_range_panics() {
        let opt = AdamR::new(vec![Tensor::zeros(1, true)], AdamRConfig::default()).expect("ok");
        assert_eq!(opt.num_groups(), 1);
        let _ = opt.group_config(1);
    }

    #[test]
    fn test_state_out_of_range_is_none() {
        let opt = AdamR::new(vec![Tensor::zeros(1, true)], AdamRConfig::default()).expect("ok");
        assert!(opt.state(ParamId::new(0, 5)).is_none());
        assert!(opt.state(ParamId::new(3, 0)).is_none());
    }

    #[test]
    fn test_tracer_records_phases() {
        let p = Tensor::zeros(2, true);
        p.set_grad(arr1(&[1.0, 1.0]));
        let mut opt = AdamR::new(vec![p], config(true, 0.0)).expect("valid");

        TRACER.enable();
        let before = TRACER.count(TraceStep::Recover);
        opt.step(None);
        assert!(TRACER.count(TraceStep::Recover) > before);
    }
}
