//! Build optimizers from configuration

use super::loader::load_spec;
use super::schema::OptimSpec;
use super::validate::validate_spec;
use crate::error::Result;
use crate::optim::AdamR;
use crate::Tensor;
use log::debug;
use std::path::Path;

/// Build an optimizer from a spec over a flat parameter list
pub fn build_optimizer(spec: &OptimSpec, params: Vec<Tensor>) -> Result<AdamR> {
    validate_spec(spec)?;
    let config = spec.to_config()?;
    debug!("building {} over {} params: {config:?}", spec.name, params.len());
    AdamR::new(params, config)
}

/// Load, validate and build in one call
pub fn build_from_yaml<P: AsRef<Path>>(path: P, params: Vec<Tensor>) -> Result<AdamR> {
    let spec = load_spec(path)?;
    build_optimizer(&spec, params)
}
