//! AdamR optimizer and the pieces it is built from

mod adamr;
pub mod buffer;
mod convergence_tests; // Tests split into convergence_tests/ directory
mod optimizer;
mod param_group;
mod recover;
mod state;
pub mod update;

pub use adamr::AdamR;
pub use buffer::TensorBuffer;
pub use optimizer::{Closure, Optimizer};
pub use param_group::{AdamRConfig, GroupOptions, GroupState, ParamGroup};
pub use recover::recover_weight;
pub use state::{ParamBuffers, ParamId, ParamState, RecoverState};
