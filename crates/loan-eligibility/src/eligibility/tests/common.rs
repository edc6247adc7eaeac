use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::eligibility::artifacts::{
    BinaryClassifier, ClassLabel, FeatureScaler, InferenceError, ModelArtifacts,
};
use crate::eligibility::domain::{
    Answer, ApplicantRecord, ApplicantSubmission, CreditHistory, Dependents, Education, Gender,
    PropertyArea,
};
use crate::eligibility::encoder::FeatureLayout;
use crate::eligibility::normalizer::normalize;
use crate::eligibility::EligibilityPipeline;

/// Good-credit applicant comfortably inside the affordability ceiling.
pub(super) fn submission() -> ApplicantSubmission {
    ApplicantSubmission {
        gender: Gender::Male,
        married: Answer::Yes,
        dependents: Dependents::Zero,
        education: Education::Graduate,
        self_employed: Answer::No,
        applicant_income: Some(1_200_000),
        coapplicant_income: Some(0),
        loan_amount: Some(500_000),
        loan_term_days: Some(360),
        property_area: PropertyArea::Urban,
        credit_history: CreditHistory::Good,
    }
}

pub(super) fn record() -> ApplicantRecord {
    normalize(submission())
}

/// Daily income of exactly 1,000 LKR: 365,000 a year.
pub(super) fn round_income_record(credit_history: CreditHistory, loan_amount: u64) -> ApplicantRecord {
    ApplicantRecord {
        applicant_income: 365_000,
        coapplicant_income: 0,
        loan_amount,
        loan_term_days: 360,
        credit_history,
        ..record()
    }
}

pub(super) struct IdentityScaler;

impl FeatureScaler for IdentityScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        Ok(features.to_vec())
    }
}

/// Rejects every vector as if column 5 held a non-finite value.
pub(super) struct FailingScaler;

impl FeatureScaler for FailingScaler {
    fn transform(&self, _features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        Err(InferenceError::NonFinite {
            stage: "scaler",
            index: 5,
        })
    }
}

pub(super) struct AlwaysEligible;

impl BinaryClassifier for AlwaysEligible {
    fn predict(&self, _features: &[f64]) -> Result<ClassLabel, InferenceError> {
        Ok(ClassLabel::Eligible)
    }
}

pub(super) struct AlwaysIneligible;

impl BinaryClassifier for AlwaysIneligible {
    fn predict(&self, _features: &[f64]) -> Result<ClassLabel, InferenceError> {
        Ok(ClassLabel::Ineligible)
    }
}

/// Mimics an artifact trained on a different column count.
pub(super) struct MismatchedClassifier;

impl BinaryClassifier for MismatchedClassifier {
    fn predict(&self, features: &[f64]) -> Result<ClassLabel, InferenceError> {
        Err(InferenceError::DimensionMismatch {
            stage: "classifier",
            expected: 12,
            actual: features.len(),
        })
    }
}

#[derive(Clone, Default)]
pub(super) struct CountingClassifier {
    calls: Arc<AtomicUsize>,
}

impl CountingClassifier {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BinaryClassifier for CountingClassifier {
    fn predict(&self, _features: &[f64]) -> Result<ClassLabel, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ClassLabel::Eligible)
    }
}

pub(super) fn artifacts_with<C>(classifier: C) -> Arc<ModelArtifacts>
where
    C: BinaryClassifier + 'static,
{
    Arc::new(ModelArtifacts::from_parts(
        FeatureLayout::canonical(),
        IdentityScaler,
        classifier,
    ))
}

pub(super) fn pipeline_with<C>(classifier: C) -> EligibilityPipeline
where
    C: BinaryClassifier + 'static,
{
    EligibilityPipeline::new(artifacts_with(classifier))
}

/// Small fitted bundle: credit history dominates, everything else is near neutral.
pub(super) const BUNDLE_JSON: &str = r#"{
    "feature_names": [
        "Gender", "Married", "Dependents", "Education", "Self_Employed",
        "ApplicantIncome", "CoapplicantIncome", "LoanAmount", "Loan_Amount_Term",
        "Credit_History", "Property_Area"
    ],
    "scaler": {
        "kind": "standard",
        "mean": [0.8, 0.65, 0.75, 0.78, 0.14, 650000.0, 200000.0, 1500000.0, 330.0, 0.84, 1.04],
        "scale": [0.4, 0.48, 1.0, 0.41, 0.35, 700000.0, 350000.0, 1000000.0, 70.0, 0.36, 0.79]
    },
    "classifier": {
        "kind": "logistic_regression",
        "coefficients": [0.05, 0.2, 0.02, 0.15, -0.02, 0.05, 0.03, -0.1, -0.05, 1.4, 0.1],
        "intercept": 0.9
    }
}"#;

pub(super) fn bundle_with(replace: &str, with: &str) -> String {
    BUNDLE_JSON.replacen(replace, with, 1)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
