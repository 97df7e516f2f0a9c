#[cfg(test)]
mod pricing_tests {
    use homepricer::{
        error::ModelError,
        models::home::HomeFeatures,
        pricing::{self, LinearPipeline, Regressor, DEFAULT_DIRHAM_RATE},
    };

    const SAMPLE_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models/pipeline.json");

    fn identity_on_rm() -> LinearPipeline {
        LinearPipeline::new(
            [0.0; 7],
            [1.0; 7],
            [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            0.0,
        )
        .unwrap()
    }

    fn example_features() -> HomeFeatures {
        HomeFeatures {
            rm: 6.0,
            lstat: 5.0,
            dis: 4.0,
            tax: 300.0,
            ptratio: 15.0,
            age: 60.0,
            indus: 7.0,
        }
    }

    #[test]
    fn to_dirham_scales_and_converts() {
        assert_eq!(pricing::to_dirham(24.0, DEFAULT_DIRHAM_RATE), 240000.0);
    }

    #[test]
    fn to_dirham_rounds_dollars_to_one_decimal() {
        let price = pricing::to_dirham(21.23456, DEFAULT_DIRHAM_RATE);
        assert!((price - 212346.0).abs() < 1e-6, "got {price}");
    }

    #[test]
    fn to_dirham_rounds_exact_ties_to_even() {
        // 12345.25 dollars sits exactly between 12345.2 and 12345.3
        assert_eq!(pricing::to_dirham(12.34525, DEFAULT_DIRHAM_RATE), 123452.0);
        assert_eq!(pricing::to_dirham(0.00075, DEFAULT_DIRHAM_RATE), 8.0);
    }

    #[test]
    fn to_medv_inverts_conversion() {
        assert_eq!(pricing::to_medv(240000.0, DEFAULT_DIRHAM_RATE), 24.0);
        assert_eq!(pricing::to_medv(0.0, DEFAULT_DIRHAM_RATE), 0.0);
    }

    #[test]
    fn custom_rate_is_applied() {
        assert_eq!(pricing::to_dirham(1.0, 3.0), 3000.0);
        assert_eq!(pricing::to_medv(3000.0, 3.0), 1.0);
    }

    #[test]
    fn predict_passes_features_in_model_order() {
        let model = LinearPipeline::new(
            [0.0; 7],
            [1.0; 7],
            [1.0, 10.0, 100.0, 1000.0, 10000.0, 100000.0, 1000000.0],
            0.0,
        )
        .unwrap();
        let raw = model.predict(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(raw, 7654321.0);
    }

    #[test]
    fn predict_price_uses_model_estimate() {
        let mut features = example_features();
        features.rm = 24.0;
        let prediction = pricing::predict_price(&identity_on_rm(), &features, DEFAULT_DIRHAM_RATE);
        assert_eq!(prediction.predicted_price_dh, 240000.0);
    }

    #[test]
    fn predict_price_is_deterministic() {
        let model = LinearPipeline::load(SAMPLE_MODEL).unwrap();
        let first = pricing::predict_price(&model, &example_features(), DEFAULT_DIRHAM_RATE);
        let second = pricing::predict_price(&model, &example_features(), DEFAULT_DIRHAM_RATE);
        assert_eq!(first, second);
    }

    #[test]
    fn sample_model_returns_intercept_at_mean() {
        let model = LinearPipeline::load(SAMPLE_MODEL).unwrap();
        let at_mean = [6.2846, 12.6531, 3.7950, 408.2372, 18.4555, 68.5749, 11.1368];
        assert!((model.predict(&at_mean) - 22.5328).abs() < 1e-9);
    }

    #[test]
    fn scaler_is_optional() {
        let json = br#"{
            "features": ["rm", "lstat", "dis", "tax", "ptratio", "age", "indus"],
            "coefficients": [2.0, 0, 0, 0, 0, 0, 0],
            "intercept": 1.0
        }"#;
        let model = LinearPipeline::from_json(json).unwrap();
        assert_eq!(model.predict(&[3.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0]), 7.0);
    }

    #[test]
    fn missing_artifact_is_io_error() {
        let result = LinearPipeline::load("/nonexistent/pipeline.json");
        assert!(matches!(result, Err(ModelError::Io { .. })));
    }

    #[test]
    fn garbage_artifact_is_parse_error() {
        let result = LinearPipeline::from_json(b"\x80\x04\x95 not json");
        assert!(matches!(result, Err(ModelError::Parse(_))));
    }

    #[test]
    fn wrong_feature_order_is_rejected() {
        let json = br#"{
            "features": ["lstat", "rm", "dis", "tax", "ptratio", "age", "indus"],
            "coefficients": [0, 0, 0, 0, 0, 0, 0],
            "intercept": 0
        }"#;
        assert!(matches!(
            LinearPipeline::from_json(json),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn short_coefficients_are_rejected() {
        let json = br#"{
            "features": ["rm", "lstat", "dis", "tax", "ptratio", "age", "indus"],
            "coefficients": [1, 2, 3],
            "intercept": 0
        }"#;
        let err = LinearPipeline::from_json(json).unwrap_err();
        assert!(err.to_string().contains("coefficients has 3 values"));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let result = LinearPipeline::new([0.0; 7], [0.0; 7], [1.0; 7], 0.0);
        assert!(matches!(result, Err(ModelError::Invalid(_))));
    }
}
