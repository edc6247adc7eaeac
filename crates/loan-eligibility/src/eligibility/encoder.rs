use super::domain::{Answer, Education, Gender, PropertyArea};
use super::rules::ScreenedApplicant;
use serde::Serialize;
use std::collections::HashSet;

/// Classifier input columns, named as in the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Feature {
    Gender,
    Married,
    Dependents,
    Education,
    SelfEmployed,
    ApplicantIncome,
    CoapplicantIncome,
    LoanAmount,
    LoanAmountTerm,
    CreditHistory,
    PropertyArea,
}

/// Authoritative column order the classifier was trained on.
pub const CANONICAL_FEATURE_ORDER: [Feature; 11] = [
    Feature::Gender,
    Feature::Married,
    Feature::Dependents,
    Feature::Education,
    Feature::SelfEmployed,
    Feature::ApplicantIncome,
    Feature::CoapplicantIncome,
    Feature::LoanAmount,
    Feature::LoanAmountTerm,
    Feature::CreditHistory,
    Feature::PropertyArea,
];

impl Feature {
    pub const fn column(self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::Married => "Married",
            Self::Dependents => "Dependents",
            Self::Education => "Education",
            Self::SelfEmployed => "Self_Employed",
            Self::ApplicantIncome => "ApplicantIncome",
            Self::CoapplicantIncome => "CoapplicantIncome",
            Self::LoanAmount => "LoanAmount",
            Self::LoanAmountTerm => "Loan_Amount_Term",
            Self::CreditHistory => "Credit_History",
            Self::PropertyArea => "Property_Area",
        }
    }

    pub fn from_column(name: &str) -> Option<Self> {
        CANONICAL_FEATURE_ORDER
            .into_iter()
            .find(|feature| feature.column() == name.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("unknown feature column '{0}'")]
    UnknownColumn(String),
    #[error("feature column '{0}' listed more than once")]
    DuplicateColumn(String),
    #[error("feature column '{0}' missing from artifact")]
    MissingColumn(&'static str),
}

/// Column order consumed by the scaler and classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLayout {
    columns: Vec<Feature>,
}

impl FeatureLayout {
    pub fn canonical() -> Self {
        Self {
            columns: CANONICAL_FEATURE_ORDER.to_vec(),
        }
    }

    /// Resolves the ordered column names shipped with the model artifact.
    /// Every canonical column must appear exactly once; order is free.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, LayoutError> {
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let feature = Feature::from_column(name)
                .ok_or_else(|| LayoutError::UnknownColumn(name.to_string()))?;
            if !seen.insert(feature) {
                return Err(LayoutError::DuplicateColumn(name.to_string()));
            }
            columns.push(feature);
        }

        if let Some(missing) = CANONICAL_FEATURE_ORDER
            .into_iter()
            .find(|feature| !seen.contains(feature))
        {
            return Err(LayoutError::MissingColumn(missing.column()));
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Feature] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|feature| feature.column()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Numeric classifier input in the artifact's column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedFeatureVector {
    columns: Vec<Feature>,
    values: Vec<f64>,
}

impl EncodedFeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn columns(&self) -> &[Feature] {
        &self.columns
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.columns
            .iter()
            .position(|column| *column == feature)
            .and_then(|index| self.values.get(index).copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_parts_for_tests(columns: Vec<Feature>, values: Vec<f64>) -> Self {
        Self { columns, values }
    }
}

/// Maps a screened applicant onto the classifier's feature columns.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    layout: FeatureLayout,
}

impl FeatureEncoder {
    pub fn new(layout: FeatureLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn encode(&self, applicant: &ScreenedApplicant) -> EncodedFeatureVector {
        let values = self
            .layout
            .columns()
            .iter()
            .map(|feature| feature_value(*feature, applicant))
            .collect();

        EncodedFeatureVector {
            columns: self.layout.columns().to_vec(),
            values,
        }
    }
}

fn feature_value(feature: Feature, applicant: &ScreenedApplicant) -> f64 {
    let record = &applicant.record;
    match feature {
        Feature::Gender => match record.gender {
            Gender::Male => 1.0,
            Gender::Female => 0.0,
        },
        Feature::Married => answer_flag(record.married),
        Feature::Dependents => f64::from(record.dependents.count()),
        Feature::Education => match record.education {
            Education::Graduate => 1.0,
            Education::NotGraduate => 0.0,
        },
        Feature::SelfEmployed => answer_flag(record.self_employed),
        Feature::ApplicantIncome => record.applicant_income as f64,
        Feature::CoapplicantIncome => record.coapplicant_income as f64,
        Feature::LoanAmount => record.loan_amount as f64,
        Feature::LoanAmountTerm => f64::from(record.loan_term_days),
        Feature::CreditHistory => f64::from(applicant.credit_flag.value()),
        Feature::PropertyArea => match record.property_area {
            PropertyArea::Urban => 2.0,
            PropertyArea::Semiurban => 1.0,
            PropertyArea::Rural => 0.0,
        },
    }
}

fn answer_flag(answer: Answer) -> f64 {
    match answer {
        Answer::Yes => 1.0,
        Answer::No => 0.0,
    }
}
