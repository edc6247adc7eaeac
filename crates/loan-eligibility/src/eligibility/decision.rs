use super::artifacts::{ClassLabel, InferenceError, ModelArtifacts};
use super::encoder::EncodedFeatureVector;
use super::policy::{Affordability, RejectionCategory, RejectionReason};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// Final pipeline result for one applicant.
#[derive(Debug, Clone, PartialEq)]
pub enum EligibilityDecision {
    Approved { estimated_monthly_installment: f64 },
    Rejected(RejectionReason),
    /// Scaling or prediction failed; never a statement about the applicant.
    Error { message: String },
}

impl EligibilityDecision {
    pub fn status(&self) -> DecisionStatus {
        match self {
            Self::Approved { .. } => DecisionStatus::Approved,
            Self::Rejected(_) => DecisionStatus::Rejected,
            Self::Error { .. } => DecisionStatus::Error,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::Approved {
                estimated_monthly_installment,
            } => format!(
                "approved, estimated monthly installment {:.2} LKR",
                estimated_monthly_installment
            ),
            Self::Rejected(reason) => format!("rejected: {}", reason.summary()),
            Self::Error { message } => format!("prediction error: {message}"),
        }
    }

    pub fn to_outcome(&self) -> DecisionOutcome {
        match self {
            Self::Approved {
                estimated_monthly_installment,
            } => DecisionOutcome {
                status: DecisionStatus::Approved,
                reason: None,
                rejection_category: None,
                estimated_monthly_installment: Some(*estimated_monthly_installment),
            },
            Self::Rejected(reason) => DecisionOutcome {
                status: DecisionStatus::Rejected,
                reason: Some(reason.summary()),
                rejection_category: Some(reason.category()),
                estimated_monthly_installment: None,
            },
            Self::Error { message } => DecisionOutcome {
                status: DecisionStatus::Error,
                reason: Some(message.clone()),
                rejection_category: None,
                estimated_monthly_installment: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Approved,
    Rejected,
    Error,
}

impl DecisionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Error => "error",
        }
    }
}

/// Serializable decision handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub status: DecisionStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub rejection_category: Option<RejectionCategory>,
    #[serde(default)]
    pub estimated_monthly_installment: Option<f64>,
}

/// Scales the encoded vector and asks the classifier for a verdict.
#[derive(Debug, Clone)]
pub struct DecisionService {
    artifacts: Arc<ModelArtifacts>,
}

impl DecisionService {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self { artifacts }
    }

    pub fn decide(
        &self,
        features: &EncodedFeatureVector,
        affordability: &Affordability,
    ) -> EligibilityDecision {
        match self.classify(features) {
            Ok(ClassLabel::Eligible) => EligibilityDecision::Approved {
                estimated_monthly_installment: affordability.monthly_installment,
            },
            Ok(ClassLabel::Ineligible) => {
                EligibilityDecision::Rejected(RejectionReason::ModelPredictedIneligible)
            }
            Err(err) => {
                error!(error = %err, "eligibility prediction failed");
                EligibilityDecision::Error {
                    message: err.to_string(),
                }
            }
        }
    }

    fn classify(&self, features: &EncodedFeatureVector) -> Result<ClassLabel, InferenceError> {
        let scaled = self.artifacts.scaler().transform(features.values())?;
        let label = self.artifacts.classifier().predict(&scaled)?;
        debug!(label = label.value(), "classifier verdict");
        Ok(label)
    }
}
