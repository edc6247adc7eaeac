use crate::infra::{load_config, load_pipeline};
use clap::Args;
use loan_eligibility::eligibility::{
    evaluate_csv_path, format_amount, parse_choice, Answer, ApplicantSubmission, BatchReport,
    CreditHistory, Dependents, Education, EligibilityDecision, Gender, PropertyArea,
};
use loan_eligibility::error::AppError;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    #[arg(long, value_parser = parse_choice::<Gender>, default_value = "Male")]
    pub(crate) gender: Gender,
    /// Marital status (Yes/No)
    #[arg(long, value_parser = parse_choice::<Answer>, default_value = "Yes")]
    pub(crate) married: Answer,
    /// Number of dependents (0, 1, 2, 3+)
    #[arg(long, value_parser = parse_choice::<Dependents>, default_value = "0")]
    pub(crate) dependents: Dependents,
    /// Graduate or "Not Graduate"
    #[arg(long, value_parser = parse_choice::<Education>, default_value = "Graduate")]
    pub(crate) education: Education,
    #[arg(long, value_parser = parse_choice::<Answer>, default_value = "Yes")]
    pub(crate) self_employed: Answer,
    /// Applicant annual income in LKR
    #[arg(long)]
    pub(crate) applicant_income: Option<u64>,
    /// Co-applicant annual income in LKR
    #[arg(long)]
    pub(crate) coapplicant_income: Option<u64>,
    #[arg(long)]
    pub(crate) loan_amount: Option<u64>,
    /// Loan term in days
    #[arg(long)]
    pub(crate) loan_term_days: Option<u32>,
    /// Urban, Semiurban or Rural
    #[arg(long, value_parser = parse_choice::<PropertyArea>, default_value = "Urban")]
    pub(crate) property_area: PropertyArea,
    /// Good, Bad or "Fresher (No History)"
    #[arg(long, value_parser = parse_choice::<CreditHistory>, default_value = "Good")]
    pub(crate) credit_history: CreditHistory,
    /// Print the decision as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EvaluateArgs {
    fn submission(&self) -> ApplicantSubmission {
        ApplicantSubmission {
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
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Applicant CSV export (header row required)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs, artifact: Option<PathBuf>) -> Result<(), AppError> {
    let config = load_config(artifact)?;
    let pipeline = load_pipeline(&config)?;

    let submission = args.submission();
    let loan_amount = submission.loan_amount.unwrap_or_default();
    let decision = pipeline.evaluate(submission);

    if args.json {
        print_json(&decision.to_outcome())?;
    } else {
        render_decision(&decision, loan_amount, "");
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs, artifact: Option<PathBuf>) -> Result<(), AppError> {
    let config = load_config(artifact)?;
    let pipeline = load_pipeline(&config)?;

    let report = evaluate_csv_path(&args.csv, &pipeline)?;
    if args.json {
        print_json(&report)?;
    } else {
        render_batch(&report);
    }
    Ok(())
}

pub(crate) fn run_demo(artifact: Option<PathBuf>) -> Result<(), AppError> {
    let config = load_config(artifact)?;
    let pipeline = load_pipeline(&config)?;

    println!("Loan eligibility demo");
    println!("Model artifact: {}", config.artifacts.path.display());
    println!("Feature order: {}", pipeline.feature_columns().join(", "));

    for (index, (title, submission)) in demo_scenarios().into_iter().enumerate() {
        println!("\n{}. {}", index + 1, title);
        let loan_amount = submission.loan_amount.unwrap_or_default();
        render_decision(&pipeline.evaluate(submission), loan_amount, "   ");
    }

    Ok(())
}

fn render_decision(decision: &EligibilityDecision, loan_amount: u64, indent: &str) {
    match decision {
        EligibilityDecision::Approved {
            estimated_monthly_installment,
        } => {
            println!("{indent}Loan approved");
            println!(
                "{indent}- Eligible for the loan of LKR {}",
                format_amount(loan_amount as f64)
            );
            println!(
                "{indent}- Estimated monthly installment: LKR {:.2}",
                estimated_monthly_installment
            );
        }
        EligibilityDecision::Rejected(reason) => {
            println!("{indent}Loan rejected ({})", reason.category().label());
            println!("{indent}- Reason: {}", reason.summary());
        }
        EligibilityDecision::Error { message } => {
            println!("{indent}Prediction unavailable");
            println!("{indent}- Error: {message}");
        }
    }
}

fn render_batch(report: &BatchReport) {
    println!("Batch eligibility report ({} applicants)", report.summary.total());
    for row in &report.rows {
        let reference = row.reference.as_deref().unwrap_or("-");
        let detail = match (&row.outcome.reason, row.outcome.estimated_monthly_installment) {
            (Some(reason), _) => reason.clone(),
            (None, Some(installment)) => format!("installment LKR {installment:.2}"),
            (None, None) => String::new(),
        };
        println!(
            "- row {} [{}] {}: {}",
            row.row,
            reference,
            row.outcome.status.label(),
            detail
        );
    }

    let summary = &report.summary;
    println!(
        "Summary: {} approved | {} validation | {} policy | {} model | {} errors",
        summary.approved,
        summary.rejected_validation,
        summary.rejected_policy,
        summary.rejected_model,
        summary.errors
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn demo_applicant() -> ApplicantSubmission {
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

fn demo_scenarios() -> Vec<(&'static str, ApplicantSubmission)> {
    vec![
        (
            "Good credit, 1,200,000 LKR income, 500,000 LKR over 360 days",
            demo_applicant(),
        ),
        (
            "Bad credit",
            ApplicantSubmission {
                credit_history: CreditHistory::Bad,
                ..demo_applicant()
            },
        ),
        (
            "Fresher relying on co-applicant income only",
            ApplicantSubmission {
                applicant_income: Some(0),
                coapplicant_income: Some(900_000),
                loan_amount: Some(300_000),
                credit_history: CreditHistory::Fresher,
                ..demo_applicant()
            },
        ),
        (
            "No income source",
            ApplicantSubmission {
                applicant_income: None,
                coapplicant_income: None,
                ..demo_applicant()
            },
        ),
        (
            "Zero-day loan term",
            ApplicantSubmission {
                loan_term_days: Some(0),
                ..demo_applicant()
            },
        ),
    ]
}
