use super::decision::{DecisionOutcome, EligibilityDecision};
use super::domain::{
    Answer, ApplicantSubmission, CreditHistory, Dependents, Education, Gender, PropertyArea,
};
use super::policy::RejectionCategory;
use super::EligibilityPipeline;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to open applicant file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid applicant CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Decision for one CSV row; `row` counts data rows from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchDecision {
    pub row: usize,
    pub reference: Option<String>,
    pub outcome: DecisionOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub approved: usize,
    pub rejected_validation: usize,
    pub rejected_policy: usize,
    pub rejected_model: usize,
    pub errors: usize,
}

impl BatchSummary {
    fn record(&mut self, decision: &EligibilityDecision) {
        match decision {
            EligibilityDecision::Approved { .. } => self.approved += 1,
            EligibilityDecision::Rejected(reason) => match reason.category() {
                RejectionCategory::Validation => self.rejected_validation += 1,
                RejectionCategory::Policy => self.rejected_policy += 1,
                RejectionCategory::Model => self.rejected_model += 1,
            },
            EligibilityDecision::Error { .. } => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.approved
            + self.rejected_validation
            + self.rejected_policy
            + self.rejected_model
            + self.errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub rows: Vec<BatchDecision>,
    pub summary: BatchSummary,
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    #[serde(default)]
    reference: Option<String>,
    gender: Gender,
    married: Answer,
    dependents: Dependents,
    education: Education,
    self_employed: Answer,
    applicant_income: Option<u64>,
    coapplicant_income: Option<u64>,
    loan_amount: Option<u64>,
    loan_term_days: Option<u32>,
    property_area: PropertyArea,
    credit_history: CreditHistory,
}

impl ApplicantRow {
    fn into_parts(self) -> (Option<String>, ApplicantSubmission) {
        let reference = self.reference.filter(|value| !value.trim().is_empty());
        let submission = ApplicantSubmission {
            gender: self.gender,
            married: self.married,
            dependents: self.dependents,
            education: self.education,
            self_employed: self.self_employed,
            applicant_income: self.applicant_income,
            coapplicant_income: self.coapplicant_income,
            loan_amount: self.loan_amount,
            loan_term_days: self.loan_term_days,
            property_area: self.property_area,
            credit_history: self.credit_history,
        };
        (reference, submission)
    }
}

/// Scores every applicant in a CSV export. Empty numeric cells count as unset.
pub fn evaluate_csv<R: Read>(
    reader: R,
    pipeline: &EligibilityPipeline,
) -> Result<BatchReport, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut report = BatchReport::default();

    for (index, row) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
        let (reference, submission) = row?.into_parts();
        let decision = pipeline.evaluate(submission);
        report.summary.record(&decision);
        report.rows.push(BatchDecision {
            row: index + 1,
            reference,
            outcome: decision.to_outcome(),
        });
    }

    info!(
        rows = report.summary.total(),
        approved = report.summary.approved,
        errors = report.summary.errors,
        "batch evaluation finished"
    );

    Ok(report)
}

pub fn evaluate_csv_path<P: AsRef<Path>>(
    path: P,
    pipeline: &EligibilityPipeline,
) -> Result<BatchReport, BatchError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| BatchError::Io {
        path: path.display().to_string(),
        source,
    })?;
    evaluate_csv(file, pipeline)
}
