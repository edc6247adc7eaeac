use super::domain::ApplicantRecord;
use serde::{Deserialize, Serialize};

/// Fixed affordability parameters applied by the rule engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityPolicy {
    /// Largest share of daily income the daily installment may take for established borrowers.
    pub standard_emi_ceiling: f64,
    /// Stricter share applied to applicants without credit history.
    pub fresher_emi_ceiling: f64,
    pub days_per_year: f64,
    pub days_per_month: f64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            standard_emi_ceiling: 0.5,
            fresher_emi_ceiling: 0.4,
            days_per_year: 365.0,
            days_per_month: 30.0,
        }
    }
}

/// Income against installment, all figures in LKR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affordability {
    pub total_annual_income: f64,
    pub daily_income: f64,
    pub daily_installment: f64,
    pub monthly_installment: f64,
}

impl Affordability {
    /// Returns `None` for a zero-day term, which has no defined installment.
    pub fn assess(record: &ApplicantRecord, policy: &EligibilityPolicy) -> Option<Self> {
        if record.loan_term_days == 0 {
            return None;
        }

        let total_annual_income = record.total_annual_income() as f64;
        let daily_income = total_annual_income / policy.days_per_year;
        let daily_installment = record.loan_amount as f64 / f64::from(record.loan_term_days);

        Some(Self {
            total_annual_income,
            daily_income,
            daily_installment,
            monthly_installment: daily_installment * policy.days_per_month,
        })
    }

    /// Strictly greater: an installment exactly at the ceiling is affordable.
    pub fn exceeds(&self, ceiling: f64) -> bool {
        self.daily_installment > self.daily_income * ceiling
    }
}

/// Distinguishes user-correctable input problems from business rules and model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCategory {
    Validation,
    Policy,
    Model,
}

impl RejectionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Policy => "policy",
            Self::Model => "model",
        }
    }
}

/// Terminal rejection explanations surfaced to the applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RejectionReason {
    NoIncomeSource,
    InvalidLoanTerms,
    PoorCreditHistory,
    FresherWithoutPersonalIncome,
    FresherInstallmentTooHigh { monthly_installment: f64 },
    InstallmentExceedsAffordability { monthly_installment: f64 },
    ModelPredictedIneligible,
}

impl RejectionReason {
    pub fn category(&self) -> RejectionCategory {
        match self {
            Self::NoIncomeSource | Self::InvalidLoanTerms => RejectionCategory::Validation,
            Self::PoorCreditHistory
            | Self::FresherWithoutPersonalIncome
            | Self::FresherInstallmentTooHigh { .. }
            | Self::InstallmentExceedsAffordability { .. } => RejectionCategory::Policy,
            Self::ModelPredictedIneligible => RejectionCategory::Model,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::NoIncomeSource => "no income source provided".to_string(),
            Self::InvalidLoanTerms => "invalid loan amount or term".to_string(),
            Self::PoorCreditHistory => "poor credit history".to_string(),
            Self::FresherWithoutPersonalIncome => "fresher without personal income".to_string(),
            Self::FresherInstallmentTooHigh {
                monthly_installment,
            } => format!(
                "monthly EMI ({} LKR) is too high for your income level (fresher limit)",
                format_amount(*monthly_installment)
            ),
            Self::InstallmentExceedsAffordability {
                monthly_installment,
            } => format!(
                "monthly EMI ({} LKR) exceeds affordability limits",
                format_amount(*monthly_installment)
            ),
            Self::ModelPredictedIneligible => "model-predicted ineligible".to_string(),
        }
    }
}

/// Rounds to whole units and groups thousands with commas.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if rounded < 0.0 {
        grouped.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
