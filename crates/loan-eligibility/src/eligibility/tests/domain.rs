use super::common::*;
use crate::eligibility::domain::{
    parse_choice, Answer, ApplicantSubmission, CreditHistory, Dependents, Education, Gender,
    PropertyArea,
};
use crate::eligibility::normalizer::normalize;
use serde_json::json;

#[test]
fn parse_choice_accepts_presentation_labels() {
    assert_eq!(parse_choice::<Gender>(" female "), Ok(Gender::Female));
    assert_eq!(parse_choice::<Dependents>("3+"), Ok(Dependents::ThreeOrMore));
    assert_eq!(
        parse_choice::<Education>("Not Graduate"),
        Ok(Education::NotGraduate)
    );
    assert_eq!(
        parse_choice::<CreditHistory>("Fresher (No History)"),
        Ok(CreditHistory::Fresher)
    );
    assert_eq!(
        parse_choice::<CreditHistory>("fresher"),
        Ok(CreditHistory::Fresher)
    );
}

#[test]
fn parse_choice_lists_allowed_labels() {
    let err = parse_choice::<PropertyArea>("Suburban").expect_err("unknown area");
    assert_eq!(err.field, "property area");
    assert_eq!(err.value, "Suburban");
    assert_eq!(
        err.to_string(),
        "invalid property area 'Suburban': expected one of 'Urban', 'Semiurban', 'Rural'"
    );
}

#[test]
fn submission_deserializes_presentation_payload() {
    let payload = json!({
        "gender": "Female",
        "married": "No",
        "dependents": "3+",
        "education": "Not Graduate",
        "self_employed": "Yes",
        "applicant_income": 840000,
        "property_area": "Semiurban",
        "credit_history": "Fresher (No History)"
    });

    let submission: ApplicantSubmission =
        serde_json::from_value(payload).expect("payload deserializes");

    assert_eq!(submission.dependents, Dependents::ThreeOrMore);
    assert_eq!(submission.credit_history, CreditHistory::Fresher);
    assert_eq!(submission.applicant_income, Some(840_000));
    assert_eq!(submission.coapplicant_income, None);
    assert_eq!(submission.loan_term_days, None);
}

#[test]
fn negative_amounts_are_rejected_at_the_boundary() {
    let mut payload = serde_json::to_value(submission()).expect("serializes");
    payload["loan_amount"] = json!(-5);

    assert!(serde_json::from_value::<ApplicantSubmission>(payload).is_err());
}

#[test]
fn normalizer_defaults_unset_numbers_to_zero() {
    let submission = ApplicantSubmission {
        applicant_income: None,
        coapplicant_income: Some(250_000),
        loan_amount: None,
        loan_term_days: None,
        ..submission()
    };

    let record = normalize(submission.clone());

    assert_eq!(record.applicant_income, 0);
    assert_eq!(record.coapplicant_income, 250_000);
    assert_eq!(record.loan_amount, 0);
    assert_eq!(record.loan_term_days, 0);
    assert_eq!(record.gender, submission.gender);
    assert_eq!(record.credit_history, submission.credit_history);
}

#[test]
fn credit_history_collapse_keeps_bad_distinct() {
    assert_eq!(CreditHistory::Good.collapse().value(), 1);
    assert_eq!(CreditHistory::Fresher.collapse().value(), 1);
    assert_eq!(CreditHistory::Bad.collapse().value(), 0);
}

#[test]
fn yes_no_error_describes_the_expected_value() {
    let err = parse_choice::<Answer>("maybe").expect_err("not yes or no");

    assert_eq!(
        err.to_string(),
        "invalid yes/no value 'maybe': expected one of 'Yes', 'No'"
    );
}
