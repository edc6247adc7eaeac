use super::domain::{ApplicantRecord, CreditFlag, CreditHistory};
use super::policy::{Affordability, EligibilityPolicy, RejectionReason};
use std::fmt;
use tracing::{debug, info};

/// Result of a single rule: keep going or stop the pipeline with a rejection.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleVerdict {
    Continue,
    Halt(RejectionReason),
}

type RuleCheck = fn(&ApplicantRecord, &EligibilityPolicy) -> RuleVerdict;

struct Rule {
    name: &'static str,
    check: RuleCheck,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Applicant that cleared every hard rule, ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenedApplicant {
    pub record: ApplicantRecord,
    pub credit_flag: CreditFlag,
    pub affordability: Affordability,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screening {
    Passed(ScreenedApplicant),
    Rejected(RejectionReason),
}

/// Ordered hard-rejection rules evaluated before any model call.
///
/// The record checks run first, in order; the affordability ceiling runs last
/// against the one `Affordability` computed for the request. The zero-term
/// check must precede it, and the bad-credit gate precedes the fresher path.
#[derive(Debug)]
pub struct RuleEngine {
    policy: EligibilityPolicy,
    rules: Vec<Rule>,
}

const AFFORDABILITY_RULE: &str = "affordability";

impl RuleEngine {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self {
            policy,
            rules: standard_rules(),
        }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .map(|rule| rule.name)
            .chain([AFFORDABILITY_RULE])
            .collect()
    }

    pub fn screen(&self, record: ApplicantRecord) -> Screening {
        for rule in &self.rules {
            if let RuleVerdict::Halt(reason) = (rule.check)(&record, &self.policy) {
                return rejected(rule.name, reason);
            }
            debug!(rule = rule.name, "rule passed");
        }

        // Invariant: loan_request_validity halted every zero-day term above.
        let Some(affordability) = Affordability::assess(&record, &self.policy) else {
            return rejected("loan_request_validity", RejectionReason::InvalidLoanTerms);
        };

        if let RuleVerdict::Halt(reason) = affordability_ceiling(&record, &affordability, &self.policy)
        {
            return rejected(AFFORDABILITY_RULE, reason);
        }
        debug!(rule = AFFORDABILITY_RULE, "rule passed");

        Screening::Passed(ScreenedApplicant {
            credit_flag: record.credit_history.collapse(),
            affordability,
            record,
        })
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(EligibilityPolicy::default())
    }
}

fn rejected(rule: &'static str, reason: RejectionReason) -> Screening {
    info!(
        rule,
        category = reason.category().label(),
        reason = %reason.summary(),
        "applicant rejected by rule"
    );
    Screening::Rejected(reason)
}

fn standard_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "income_presence",
            check: income_presence,
        },
        Rule {
            name: "loan_request_validity",
            check: loan_request_validity,
        },
        Rule {
            name: "credit_history_gate",
            check: credit_history_gate,
        },
    ]
}

fn income_presence(record: &ApplicantRecord, _policy: &EligibilityPolicy) -> RuleVerdict {
    if record.applicant_income == 0 && record.coapplicant_income == 0 {
        RuleVerdict::Halt(RejectionReason::NoIncomeSource)
    } else {
        RuleVerdict::Continue
    }
}

fn loan_request_validity(record: &ApplicantRecord, _policy: &EligibilityPolicy) -> RuleVerdict {
    if record.loan_amount == 0 || record.loan_term_days == 0 {
        RuleVerdict::Halt(RejectionReason::InvalidLoanTerms)
    } else {
        RuleVerdict::Continue
    }
}

fn credit_history_gate(record: &ApplicantRecord, _policy: &EligibilityPolicy) -> RuleVerdict {
    if record.credit_history == CreditHistory::Bad {
        RuleVerdict::Halt(RejectionReason::PoorCreditHistory)
    } else {
        RuleVerdict::Continue
    }
}

fn affordability_ceiling(
    record: &ApplicantRecord,
    affordability: &Affordability,
    policy: &EligibilityPolicy,
) -> RuleVerdict {
    match record.credit_history {
        CreditHistory::Fresher => {
            // Co-applicant income alone does not qualify a fresher.
            if record.applicant_income == 0 {
                return RuleVerdict::Halt(RejectionReason::FresherWithoutPersonalIncome);
            }
            if affordability.exceeds(policy.fresher_emi_ceiling) {
                return RuleVerdict::Halt(RejectionReason::FresherInstallmentTooHigh {
                    monthly_installment: affordability.monthly_installment,
                });
            }
            RuleVerdict::Continue
        }
        CreditHistory::Good | CreditHistory::Bad => {
            if affordability.exceeds(policy.standard_emi_ceiling) {
                RuleVerdict::Halt(RejectionReason::InstallmentExceedsAffordability {
                    monthly_installment: affordability.monthly_installment,
                })
            } else {
                RuleVerdict::Continue
            }
        }
    }
}
