use serde::{Deserialize, Serialize};

/// Categorical inputs offered by the presentation surface as a fixed set of labels.
pub trait Choice: Copy + 'static {
    /// Field name used in parse errors.
    const FIELD: &'static str;

    fn options() -> Vec<Self>;

    fn label(self) -> &'static str;

    fn matches(self, raw: &str) -> bool {
        self.label().eq_ignore_ascii_case(raw)
    }
}

/// Raised when a label does not belong to the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} '{value}': expected one of {expected}")]
pub struct ChoiceError {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

/// Parses a presentation label (trimmed, case-insensitive) into a categorical field.
pub fn parse_choice<T: Choice>(raw: &str) -> Result<T, ChoiceError> {
    let trimmed = raw.trim();
    T::options()
        .into_iter()
        .find(|option| option.matches(trimmed))
        .ok_or_else(|| ChoiceError {
            field: T::FIELD,
            value: trimmed.to_string(),
            expected: T::options()
                .into_iter()
                .map(|option| format!("'{}'", option.label()))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn ordered() -> [Self; 2] {
        [Self::Male, Self::Female]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Yes/No answer used for marital and self-employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub const fn ordered() -> [Self; 2] {
        [Self::Yes, Self::No]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dependents {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3+")]
    ThreeOrMore,
}

impl Dependents {
    pub const fn ordered() -> [Self; 4] {
        [Self::Zero, Self::One, Self::Two, Self::ThreeOrMore]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Two => "2",
            Self::ThreeOrMore => "3+",
        }
    }

    /// Count as encoded for the classifier; "3+" saturates at 3.
    pub const fn count(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::ThreeOrMore => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    Graduate,
    #[serde(rename = "Not Graduate", alias = "NotGraduate")]
    NotGraduate,
}

impl Education {
    pub const fn ordered() -> [Self; 2] {
        [Self::Graduate, Self::NotGraduate]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Graduate => "Graduate",
            Self::NotGraduate => "Not Graduate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyArea {
    Urban,
    Semiurban,
    Rural,
}

impl PropertyArea {
    pub const fn ordered() -> [Self; 3] {
        [Self::Urban, Self::Semiurban, Self::Rural]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Semiurban => "Semiurban",
            Self::Rural => "Rural",
        }
    }
}

/// Repayment history as declared by the applicant. Fresher means no history at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditHistory {
    Good,
    Bad,
    #[serde(rename = "Fresher (No History)", alias = "Fresher")]
    Fresher,
}

impl CreditHistory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Good, Self::Bad, Self::Fresher]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Bad => "Bad",
            Self::Fresher => "Fresher (No History)",
        }
    }

    /// Binary flag understood by the classifier. Only call once the fresher
    /// checks have run: a fresher that got this far counts as good history.
    pub const fn collapse(self) -> CreditFlag {
        match self {
            Self::Good | Self::Fresher => CreditFlag::Good,
            Self::Bad => CreditFlag::Bad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditFlag {
    Good,
    Bad,
}

impl CreditFlag {
    pub const fn value(self) -> u8 {
        match self {
            Self::Good => 1,
            Self::Bad => 0,
        }
    }
}

impl Choice for Gender {
    const FIELD: &'static str = "gender";

    fn options() -> Vec<Self> {
        Self::ordered().to_vec()
    }

    fn label(self) -> &'static str {
        Gender::label(self)
    }
}

impl Choice for Answer {
    const FIELD: &'static str = "yes/no value";

    fn options() -> Vec<Self> {
        Self::ordered().to_vec()
    }

    fn label(self) -> &'static str {
        Answer::label(self)
    }
}

impl Choice for Dependents {
    const FIELD: &'static str = "dependents";

    fn options() -> Vec<Self> {
        Self::ordered().to_vec()
    }

    fn label(self) -> &'static str {
        Dependents::label(self)
    }
}

impl Choice for Education {
    const FIELD: &'static str = "education";

    fn options() -> Vec<Self> {
        Self::ordered().to_vec()
    }

    fn label(self) -> &'static str {
        Education::label(self)
    }

    fn matches(self, raw: &str) -> bool {
        Education::label(self).eq_ignore_ascii_case(raw)
            || (self == Self::NotGraduate && raw.eq_ignore_ascii_case("NotGraduate"))
    }
}

impl Choice for PropertyArea {
    const FIELD: &'static str = "property area";

    fn options() -> Vec<Self> {
        Self::ordered().to_vec()
    }

    fn label(self) -> &'static str {
        PropertyArea::label(self)
    }
}

impl Choice for CreditHistory {
    const FIELD: &'static str = "credit history";

    fn options() -> Vec<Self> {
        Self::ordered().to_vec()
    }

    fn label(self) -> &'static str {
        CreditHistory::label(self)
    }

    fn matches(self, raw: &str) -> bool {
        CreditHistory::label(self).eq_ignore_ascii_case(raw)
            || (self == Self::Fresher && raw.eq_ignore_ascii_case("Fresher"))
    }
}

/// Raw values collected by the presentation surface. Numeric answers may be unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantSubmission {
    pub gender: Gender,
    pub married: Answer,
    pub dependents: Dependents,
    pub education: Education,
    pub self_employed: Answer,
    /// Annual income in whole LKR.
    #[serde(default)]
    pub applicant_income: Option<u64>,
    #[serde(default)]
    pub coapplicant_income: Option<u64>,
    #[serde(default)]
    pub loan_amount: Option<u64>,
    #[serde(default)]
    pub loan_term_days: Option<u32>,
    pub property_area: PropertyArea,
    pub credit_history: CreditHistory,
}

/// Canonical applicant record with every numeric field resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub gender: Gender,
    pub married: Answer,
    pub dependents: Dependents,
    pub education: Education,
    pub self_employed: Answer,
    pub applicant_income: u64,
    pub coapplicant_income: u64,
    pub loan_amount: u64,
    pub loan_term_days: u32,
    pub property_area: PropertyArea,
    pub credit_history: CreditHistory,
}

impl ApplicantRecord {
    pub fn total_annual_income(&self) -> u64 {
        self.applicant_income.saturating_add(self.coapplicant_income)
    }
}
