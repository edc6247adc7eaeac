//! Eligibility decision pipeline: normalize, screen, encode, classify.

pub mod artifacts;
pub mod batch;
pub mod decision;
pub mod domain;
pub mod encoder;
pub mod normalizer;
pub mod policy;
pub mod router;
pub mod rules;

#[cfg(test)]
mod tests;

pub use artifacts::{
    ArtifactError, BinaryClassifier, ClassLabel, FeatureScaler, InferenceError, LinearClassifier,
    ModelArtifacts, StandardScaler,
};
pub use batch::{evaluate_csv, evaluate_csv_path, BatchDecision, BatchError, BatchReport, BatchSummary};
pub use decision::{DecisionOutcome, DecisionService, DecisionStatus, EligibilityDecision};
pub use domain::{
    parse_choice, Answer, ApplicantRecord, ApplicantSubmission, Choice, ChoiceError, CreditFlag,
    CreditHistory, Dependents, Education, Gender, PropertyArea,
};
pub use encoder::{
    EncodedFeatureVector, Feature, FeatureEncoder, FeatureLayout, LayoutError,
    CANONICAL_FEATURE_ORDER,
};
pub use normalizer::normalize;
pub use policy::{
    format_amount, Affordability, EligibilityPolicy, RejectionCategory, RejectionReason,
};
pub use router::eligibility_router;
pub use rules::{RuleEngine, RuleVerdict, ScreenedApplicant, Screening};

use std::sync::Arc;
use tracing::info;

/// One-pass pipeline over immutable, process-wide model artifacts.
#[derive(Debug)]
pub struct EligibilityPipeline {
    rules: RuleEngine,
    encoder: FeatureEncoder,
    decisions: DecisionService,
}

impl EligibilityPipeline {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self::with_policy(artifacts, EligibilityPolicy::default())
    }

    pub fn with_policy(artifacts: Arc<ModelArtifacts>, policy: EligibilityPolicy) -> Self {
        let encoder = FeatureEncoder::new(artifacts.layout().clone());
        Self {
            rules: RuleEngine::new(policy),
            encoder,
            decisions: DecisionService::new(artifacts),
        }
    }

    pub fn evaluate(&self, submission: ApplicantSubmission) -> EligibilityDecision {
        self.evaluate_record(normalize(submission))
    }

    pub fn evaluate_record(&self, record: ApplicantRecord) -> EligibilityDecision {
        let applicant = match self.rules.screen(record) {
            Screening::Passed(applicant) => applicant,
            Screening::Rejected(reason) => return EligibilityDecision::Rejected(reason),
        };

        let features = self.encoder.encode(&applicant);
        let decision = self.decisions.decide(&features, &applicant.affordability);
        info!(
            status = decision.status().label(),
            credit_history = applicant.record.credit_history.label(),
            "eligibility decided"
        );
        decision
    }

    pub fn feature_columns(&self) -> Vec<&'static str> {
        self.encoder.layout().column_names()
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        self.rules.policy()
    }
}
