use super::domain::{ApplicantRecord, ApplicantSubmission};
use tracing::debug;

/// Resolves a raw submission into the canonical record.
///
/// Unset numeric answers become zero instead of failing here; the rule engine
/// treats zero income, amount, or term as its own rejection signal.
pub fn normalize(submission: ApplicantSubmission) -> ApplicantRecord {
    let ApplicantSubmission {
        gender,
        married,
        dependents,
        education,
        self_employed,
        applicant_income,
        coapplicant_income,
        loan_amount,
        loan_term_days,
        property_area,
        credit_history,
    } = submission;

    ApplicantRecord {
        gender,
        married,
        dependents,
        education,
        self_employed,
        applicant_income: or_zero("applicant_income", applicant_income),
        coapplicant_income: or_zero("coapplicant_income", coapplicant_income),
        loan_amount: or_zero("loan_amount", loan_amount),
        loan_term_days: or_zero("loan_term_days", loan_term_days),
        property_area,
        credit_history,
    }
}

fn or_zero<T: Default>(field: &'static str, value: Option<T>) -> T {
    value.unwrap_or_else(|| {
        debug!(field, "numeric input unset, defaulting to zero");
        T::default()
    })
}
