use std::sync::Arc;

use serde_json::Value;

use super::common::*;
use crate::eligibility::artifacts::{
    ArtifactError, BinaryClassifier, ClassLabel, FeatureScaler, InferenceError, LinearClassifier,
    LinearKind, ModelArtifacts, StandardScaler,
};
use crate::eligibility::domain::ApplicantRecord;
use crate::eligibility::encoder::{FeatureLayout, CANONICAL_FEATURE_ORDER};
use crate::eligibility::{DecisionStatus, EligibilityPipeline};

/// Long-horizon loan the sample bundle scores as ineligible.
fn long_term_record() -> ApplicantRecord {
    ApplicantRecord {
        loan_amount: 10_000_000,
        loan_term_days: 36_500,
        ..record()
    }
}

#[test]
fn bundle_loads_with_canonical_layout() {
    let artifacts = ModelArtifacts::from_json_str(BUNDLE_JSON).expect("bundle loads");

    assert_eq!(artifacts.layout(), &FeatureLayout::canonical());
    assert_eq!(artifacts.layout().column_names()[9], "Credit_History");
}

#[test]
fn sample_bundle_separates_applicants() {
    let pipeline = EligibilityPipeline::new(Arc::new(
        ModelArtifacts::from_json_str(BUNDLE_JSON).expect("bundle loads"),
    ));

    assert!(pipeline.evaluate_record(record()).is_approved());
    assert_eq!(
        pipeline.evaluate_record(long_term_record()).status(),
        DecisionStatus::Rejected
    );
}

#[test]
fn permuted_bundle_reads_columns_by_name() {
    let mut bundle: Value = serde_json::from_str(BUNDLE_JSON).expect("valid json");
    for pointer in [
        "/feature_names",
        "/scaler/mean",
        "/scaler/scale",
        "/classifier/coefficients",
    ] {
        bundle
            .pointer_mut(pointer)
            .and_then(Value::as_array_mut)
            .expect("array field")
            .reverse();
    }

    let permuted =
        ModelArtifacts::from_json_str(&bundle.to_string()).expect("permuted bundle loads");
    let mut reversed = CANONICAL_FEATURE_ORDER.to_vec();
    reversed.reverse();
    assert_eq!(permuted.layout().columns(), reversed.as_slice());

    let canonical = EligibilityPipeline::new(Arc::new(
        ModelArtifacts::from_json_str(BUNDLE_JSON).expect("bundle loads"),
    ));
    let permuted = EligibilityPipeline::new(Arc::new(permuted));

    for applicant in [record(), long_term_record()] {
        assert_eq!(
            permuted.evaluate_record(applicant.clone()),
            canonical.evaluate_record(applicant)
        );
    }
}

#[test]
fn bundle_rejects_unknown_feature_column() {
    let raw = bundle_with("\"Property_Area\"", "\"Region\"");

    let err = ModelArtifacts::from_json_str(&raw).expect_err("unknown column");
    assert!(matches!(err, ArtifactError::Layout(_)), "got {err:?}");
}

#[test]
fn bundle_rejects_short_coefficients() {
    let raw = bundle_with("-0.05, 1.4, 0.1]", "-0.05, 1.4]");

    let err = ModelArtifacts::from_json_str(&raw).expect_err("short coefficients");
    match err {
        ArtifactError::Dimension {
            component,
            expected,
            actual,
        } => {
            assert_eq!(component, "classifier");
            assert_eq!(expected, 11);
            assert_eq!(actual, 10);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn bundle_rejects_mismatched_scaler_vectors() {
    let raw = bundle_with("70.0, 0.36, 0.79]", "70.0, 0.36]");

    let err = ModelArtifacts::from_json_str(&raw).expect_err("short scale");
    assert!(
        matches!(err, ArtifactError::Dimension { component: "scaler scale", .. }),
        "got {err:?}"
    );
}

#[test]
fn bundle_rejects_unknown_classifier_kind() {
    let raw = bundle_with("\"logistic_regression\"", "\"random_forest\"");

    let err = ModelArtifacts::from_json_str(&raw).expect_err("unsupported kind");
    assert!(matches!(err, ArtifactError::Json(_)), "got {err:?}");
}

#[test]
fn load_reports_missing_file() {
    let err = ModelArtifacts::load("/nonexistent/loan_model.json").expect_err("missing file");

    assert!(matches!(err, ArtifactError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/loan_model.json"));
}

#[test]
fn standard_scaler_centers_and_scales() {
    let scaler = StandardScaler::new(vec![10.0, 5.0, 1.0], vec![2.0, 0.0, 0.5]).expect("scaler");

    let scaled = scaler.transform(&[14.0, 7.0, 2.0]).expect("transform");

    assert_eq!(scaled, vec![2.0, 2.0, 2.0]);
}

#[test]
fn standard_scaler_rejects_bad_input() {
    let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).expect("scaler");

    assert_eq!(
        scaler.transform(&[1.0]),
        Err(InferenceError::DimensionMismatch {
            stage: "scaler",
            expected: 2,
            actual: 1,
        })
    );
    assert_eq!(
        scaler.transform(&[1.0, f64::NAN]),
        Err(InferenceError::NonFinite {
            stage: "scaler",
            index: 1,
        })
    );
}

#[test]
fn linear_svm_subtracts_rho() {
    let svm = LinearClassifier::linear_svm(vec![1.0, -2.0], 0.5);

    assert_eq!(svm.kind(), LinearKind::LinearSvm);
    assert_eq!(svm.decision_function(&[3.0, 1.0]), Ok(0.5));
    assert_eq!(svm.predict(&[3.0, 1.0]), Ok(ClassLabel::Eligible));
    assert_eq!(svm.predict(&[2.5, 1.0]), Ok(ClassLabel::Ineligible));
}

#[test]
fn logistic_boundary_is_ineligible() {
    let model = LinearClassifier::logistic_regression(vec![1.0], -1.0);

    assert_eq!(model.kind(), LinearKind::LogisticRegression);
    assert_eq!(model.predict(&[1.0]), Ok(ClassLabel::Ineligible));
    assert_eq!(model.predict(&[1.5]), Ok(ClassLabel::Eligible));
}

#[test]
fn overflowing_score_is_an_inference_error() {
    let model = LinearClassifier::logistic_regression(vec![f64::MAX, f64::MAX], 0.0);

    assert_eq!(
        model.predict(&[f64::MAX, f64::MAX]),
        Err(InferenceError::NonFiniteScore {
            stage: "classifier"
        })
    );
}

#[test]
fn linear_svm_bundle_loads() {
    let raw = bundle_with("\"logistic_regression\"", "\"linear_svm\"")
        .replacen("\"coefficients\"", "\"weights\"", 1)
        .replacen("\"intercept\": 0.9", "\"rho\": -0.9", 1);

    let artifacts = ModelArtifacts::from_json_str(&raw).expect("svm bundle loads");
    let pipeline = EligibilityPipeline::new(Arc::new(artifacts));

    assert!(pipeline.evaluate_record(record()).is_approved());
}
