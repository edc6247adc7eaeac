use crate::demo::{run_batch, run_demo, run_evaluate, BatchArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_eligibility::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Eligibility Service",
    about = "Score loan applicants against the eligibility rules and classifier",
    version
)]
struct Cli {
    /// Model artifact bundle to load (overrides APP_MODEL_ARTIFACT)
    #[arg(long, global = true)]
    artifact: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Decide a single applicant supplied on the command line
    Evaluate(EvaluateArgs),
    /// Score every applicant in a CSV export
    Batch(BatchArgs),
    /// Walk through the reference applicant scenarios
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let artifact = cli.artifact;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, artifact).await,
        Command::Evaluate(args) => run_evaluate(args, artifact),
        Command::Batch(args) => run_batch(args, artifact),
        Command::Demo => run_demo(artifact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_eligibility::eligibility::{Answer, CreditHistory};

    #[test]
    fn invalid_yes_no_value_names_the_flag() {
        let err = Cli::try_parse_from(["loan-eligibility-api", "evaluate", "--married", "maybe"])
            .expect_err("maybe is not a yes/no value");

        let message = err.to_string();
        assert!(message.contains("--married"), "{message}");
        assert!(
            message.contains("invalid yes/no value 'maybe': expected one of 'Yes', 'No'"),
            "{message}"
        );
    }

    #[test]
    fn evaluate_accepts_presentation_labels() {
        let cli = Cli::try_parse_from([
            "loan-eligibility-api",
            "--artifact",
            "models/alt.json",
            "evaluate",
            "--self-employed",
            "no",
            "--credit-history",
            "Fresher (No History)",
        ])
        .expect("valid arguments");

        assert_eq!(cli.artifact, Some(PathBuf::from("models/alt.json")));
        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.self_employed, Answer::No);
                assert_eq!(args.credit_history, CreditHistory::Fresher);
            }
            other => panic!("expected evaluate, got {other:?}"),
        }
    }
}
