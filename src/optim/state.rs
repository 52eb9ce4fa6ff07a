//! Per-parameter optimizer state

use super::buffer::TensorBuffer;
use std::fmt;

/// Stable handle to a parameter: group position and index within the group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId {
    pub group: usize,
    pub index: usize,
}

impl ParamId {
    pub fn new(group: usize, index: usize) -> Self {
        Self { group, index }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {} / param {}", self.group, self.index)
    }
}

/// Recovery bookkeeping for one parameter
#[derive(Debug, Clone, PartialEq)]
pub struct RecoverState<B> {
    /// Negated sum of every update applied so far
    pub weight_dist: B,
    /// Registration order within the group
    pub p_index: usize,
}

/// Moment buffers, created on first gradient
#[derive(Debug, Clone, PartialEq)]
pub struct ParamBuffers<B> {
    pub exp_avg: B,
    pub exp_avg_sq: B,
    pub recover: Option<RecoverState<B>>,
}

impl<B: TensorBuffer> ParamBuffers<B> {
    /// Zero buffers shaped like `like`
    pub fn zeros(like: &B, recover_index: Option<usize>) -> Self {
        Self {
            exp_avg: like.zeros_like(),
            exp_avg_sq: like.zeros_like(),
            recover: recover_index
                .map(|p_index| RecoverState { weight_dist: like.zeros_like(), p_index }),
        }
    }
}

/// Lifecycle of a parameter's state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ParamState<B> {
    /// No gradient has been seen yet
    #[default]
    Uninitialized,
    Initialized(ParamBuffers<B>),
}

impl<B> ParamState<B> {
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized(_))
    }

    pub fn buffers(&self) -> Option<&ParamBuffers<B>> {
        match self {
            Self::Initialized(buffers) => Some(buffers),
            Self::Uninitialized => None,
        }
    }

    /// Registration order, if the parameter is tracked for recovery
    pub fn p_index(&self) -> Option<usize> {
        self.buffers().and_then(|b| b.recover.as_ref()).map(|r| r.p_index)
    }
}
