//! Loan eligibility decisions.
//!
//! Raw applicant inputs flow through a fixed pipeline: normalization, hard
//! rejection rules, feature encoding, then scaling and classification against
//! model artifacts loaded once at startup.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;

pub use eligibility::{
    ApplicantRecord, ApplicantSubmission, DecisionOutcome, EligibilityDecision,
    EligibilityPipeline, ModelArtifacts,
};
