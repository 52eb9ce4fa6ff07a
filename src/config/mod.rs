//! Declarative optimizer configuration
//!
//! Optimizers can be described in YAML, validated, and built against a set
//! of parameters:
//!
//! ```no_run
//! use adamr::config::build_from_yaml;
//! use adamr::Tensor;
//!
//! let params = vec![Tensor::from_vec(vec![0.0; 4], true)];
//! let optimizer = build_from_yaml("optimizer.yaml", params)?;
//! # Ok::<(), adamr::Error>(())
//! ```

mod builder;
mod loader;
mod schema;
mod validate;

pub use builder::{build_from_yaml, build_optimizer};
pub use loader::{load_spec, parse_spec};
pub use schema::{
    OptimSpec, KNOWN_PARAMS, PARAM_BETA1, PARAM_BETA2, PARAM_ENABLE_RECOVER, PARAM_EPS,
    PARAM_RECOVER_LEVEL, PARAM_RECOVER_POW, PARAM_WEIGHT_DECAY,
};
pub use validate::{validate_spec, ValidationError};
