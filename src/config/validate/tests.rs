//! Unit tests for optimizer spec validation

use super::error::ValidationError;
use super::validator::validate_spec;
use crate::config::schema::*;

fn create_valid_spec() -> OptimSpec {
    OptimSpec::adamr(0.001)
        .with_param(PARAM_BETA1, 0.9)
        .with_param(PARAM_RECOVER_LEVEL, 0.5)
}

#[test]
fn test_valid_spec() {
    assert!(validate_spec(&create_valid_spec()).is_ok());
    assert!(validate_spec(&OptimSpec::adamr(0.1)).is_ok());
}

#[test]
fn test_name_is_case_insensitive() {
    let mut spec = create_valid_spec();
    spec.name = "AdamR".to_string();
    assert!(validate_spec(&spec).is_ok());
}

#[test]
fn test_invalid_optimizer() {
    let mut spec = create_valid_spec();
    spec.name = "adamw".to_string();
    let err = validate_spec(&spec).unwrap_err();
    assert_eq!(err, ValidationError::InvalidOptimizer("adamw".to_string()));
}

#[test]
fn test_invalid_learning_rate() {
    for lr in [0.0, -0.1, f32::NAN, f32::INFINITY] {
        let mut spec = create_valid_spec();
        spec.lr = lr;
        let err = validate_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidLearningRate(_)));
    }
}

#[test]
fn test_unknown_param() {
    let spec = create_valid_spec().with_param("momentum", 0.9);
    let err = validate_spec(&spec).unwrap_err();
    assert_eq!(err, ValidationError::UnknownParam("momentum".to_string()));
}

#[test]
fn test_invalid_beta() {
    let spec = create_valid_spec().with_param(PARAM_BETA2, 1.0);
    let err = validate_spec(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidBeta { name: "beta2", .. }));
}

#[test]
fn test_invalid_recover_level() {
    for level in [1.5, -0.1] {
        let spec = create_valid_spec().with_param(PARAM_RECOVER_LEVEL, level);
        let err = validate_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRecoverLevel(_)));
    }
}

#[test]
fn test_invalid_recover_pow() {
    let spec = create_valid_spec().with_param(PARAM_RECOVER_POW, 0.0);
    let err = validate_spec(&spec).unwrap_err();
    assert_eq!(err, ValidationError::InvalidRecoverPow(0.0));
}

#[test]
fn test_negative_eps() {
    let spec = create_valid_spec().with_param(PARAM_EPS, -1e-8);
    let err = validate_spec(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidEps(_)));
}

#[test]
fn test_zero_eps_allowed() {
    let spec = create_valid_spec().with_param(PARAM_EPS, 0.0);
    assert!(validate_spec(&spec).is_ok());
}

#[test]
fn test_wrong_type_reported() {
    let spec = create_valid_spec().with_param(PARAM_WEIGHT_DECAY, "lots");
    let err = validate_spec(&spec).unwrap_err();
    assert!(err.to_string().contains("weight_decay"));
}

#[test]
fn test_error_messages() {
    assert!(ValidationError::InvalidRecoverLevel(1.5).to_string().contains("[0.0, 1.0]"));
    assert!(ValidationError::InvalidBeta { name: "beta1", value: 1.0 }
        .to_string()
        .contains("beta1"));
}
