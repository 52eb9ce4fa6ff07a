//! Reading optimizer specs from YAML

use super::schema::OptimSpec;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Parse an optimizer spec from a YAML string
pub fn parse_spec(yaml: &str) -> Result<OptimSpec> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load an optimizer spec from a YAML file
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<OptimSpec> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_spec(&yaml)
}
