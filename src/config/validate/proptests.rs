//! Property-based tests for optimizer spec validation

use super::error::ValidationError;
use super::validator::validate_spec;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_spec() -> impl Strategy<Value = OptimSpec> {
    (
        1e-6f32..1.0,   // lr
        0.0f64..0.999,  // beta1
        0.0f64..0.9999, // beta2
        0.0f64..=1.0,   // recover_level
        0.1f64..8.0,    // recover_pow
        any::<bool>(),  // enable_recover
    )
        .prop_map(|(lr, beta1, beta2, level, pow, recover)| {
            OptimSpec::adamr(lr)
                .with_param(PARAM_BETA1, beta1)
                .with_param(PARAM_BETA2, beta2)
                .with_param(PARAM_RECOVER_LEVEL, level)
                .with_param(PARAM_RECOVER_POW, pow)
                .with_param(PARAM_ENABLE_RECOVER, recover)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn prop_level_above_one_fails(spec in arb_valid_spec(), level in 1.001f64..100.0) {
        let spec = spec.with_param(PARAM_RECOVER_LEVEL, level);
        prop_assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidRecoverLevel(_))
        ));
    }

    #[test]
    fn prop_negative_level_fails(spec in arb_valid_spec(), level in -100.0f64..-0.001) {
        let spec = spec.with_param(PARAM_RECOVER_LEVEL, level);
        prop_assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidRecoverLevel(_))
        ));
    }

    #[test]
    fn prop_non_positive_lr_fails(spec in arb_valid_spec(), lr in -1.0f32..=0.0) {
        let mut spec = spec;
        spec.lr = lr;
        prop_assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidLearningRate(_))
        ));
    }
}
