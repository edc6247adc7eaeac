//! Fitted scaler, classifier, and feature ordering shipped as one JSON bundle.
//!
//! Training happens elsewhere; this module only loads the fitted parameters and
//! exposes them behind the [`FeatureScaler`] and [`BinaryClassifier`] seams.

use super::encoder::{FeatureLayout, LayoutError};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Binary classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLabel {
    Eligible,
    Ineligible,
}

impl ClassLabel {
    pub const fn value(self) -> u8 {
        match self {
            Self::Eligible => 1,
            Self::Ineligible => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("{stage} expected {expected} features, received {actual}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{stage} received a non-finite value at position {index}")]
    NonFinite { stage: &'static str, index: usize },
    #[error("{stage} produced a non-finite score")]
    NonFiniteScore { stage: &'static str },
}

/// Pre-fitted transform applied to the encoded vector before prediction.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

/// Pre-fitted binary predictor consuming the scaled vector.
pub trait BinaryClassifier: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<ClassLabel, InferenceError>;
}

/// Standardization with per-column mean and scale. A zero scale leaves the
/// centered value untouched, matching how constant columns are fitted.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        if mean.len() != scale.len() {
            return Err(ArtifactError::Dimension {
                component: "scaler scale",
                expected: mean.len(),
                actual: scale.len(),
            });
        }
        Ok(Self { mean, scale })
    }

    pub fn dimension(&self) -> usize {
        self.mean.len()
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        const STAGE: &str = "scaler";
        ensure_shape(STAGE, self.mean.len(), features)?;

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (value - mean) / scale
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearKind {
    LogisticRegression,
    LinearSvm,
}

/// Linear decision function `w·x + b`; positive scores are the eligible class.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearClassifier {
    kind: LinearKind,
    weights: Vec<f64>,
    bias: f64,
}

impl LinearClassifier {
    pub fn logistic_regression(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            kind: LinearKind::LogisticRegression,
            weights: coefficients,
            bias: intercept,
        }
    }

    /// SVM convention: `f(x) = w·x - rho`.
    pub fn linear_svm(weights: Vec<f64>, rho: f64) -> Self {
        Self {
            kind: LinearKind::LinearSvm,
            weights,
            bias: -rho,
        }
    }

    pub fn kind(&self) -> LinearKind {
        self.kind
    }

    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    pub fn decision_function(&self, features: &[f64]) -> Result<f64, InferenceError> {
        const STAGE: &str = "classifier";
        ensure_shape(STAGE, self.weights.len(), features)?;

        let score = self
            .weights
            .iter()
            .zip(features)
            .map(|(weight, value)| weight * value)
            .sum::<f64>()
            + self.bias;

        if score.is_finite() {
            Ok(score)
        } else {
            Err(InferenceError::NonFiniteScore { stage: STAGE })
        }
    }
}

impl BinaryClassifier for LinearClassifier {
    fn predict(&self, features: &[f64]) -> Result<ClassLabel, InferenceError> {
        let score = self.decision_function(features)?;
        Ok(if score > 0.0 {
            ClassLabel::Eligible
        } else {
            ClassLabel::Ineligible
        })
    }
}

fn ensure_shape(stage: &'static str, expected: usize, features: &[f64]) -> Result<(), InferenceError> {
    if features.len() != expected {
        return Err(InferenceError::DimensionMismatch {
            stage,
            expected,
            actual: features.len(),
        });
    }
    match features.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(InferenceError::NonFinite { stage, index }),
        None => Ok(()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model artifact bundle: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feature layout mismatch: {0}")]
    Layout(#[from] LayoutError),
    #[error("{component} carries {actual} values but {expected} were expected")]
    Dimension {
        component: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Deserialize)]
struct ArtifactBundle {
    feature_names: Vec<String>,
    scaler: ScalerSpec,
    classifier: ClassifierSpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScalerSpec {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClassifierSpec {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    LinearSvm {
        weights: Vec<f64>,
        rho: f64,
    },
}

/// Read-only model state shared by every request for the process lifetime.
pub struct ModelArtifacts {
    layout: FeatureLayout,
    scaler: Box<dyn FeatureScaler>,
    classifier: Box<dyn BinaryClassifier>,
}

impl ModelArtifacts {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let artifacts = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            features = artifacts.layout.len(),
            "model artifacts loaded"
        );
        Ok(artifacts)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        let bundle: ArtifactBundle = serde_json::from_reader(reader)?;
        Self::from_bundle(bundle)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ArtifactError> {
        let bundle: ArtifactBundle = serde_json::from_str(raw)?;
        Self::from_bundle(bundle)
    }

    /// Assembles artifacts from already-fitted components without shape checks.
    pub fn from_parts<S, C>(layout: FeatureLayout, scaler: S, classifier: C) -> Self
    where
        S: FeatureScaler + 'static,
        C: BinaryClassifier + 'static,
    {
        Self {
            layout,
            scaler: Box::new(scaler),
            classifier: Box::new(classifier),
        }
    }

    fn from_bundle(bundle: ArtifactBundle) -> Result<Self, ArtifactError> {
        let layout = FeatureLayout::from_names(&bundle.feature_names)?;

        let scaler = match bundle.scaler {
            ScalerSpec::Standard { mean, scale } => StandardScaler::new(mean, scale)?,
        };
        check_dimension("scaler", layout.len(), scaler.dimension())?;

        let classifier = match bundle.classifier {
            ClassifierSpec::LogisticRegression {
                coefficients,
                intercept,
            } => LinearClassifier::logistic_regression(coefficients, intercept),
            ClassifierSpec::LinearSvm { weights, rho } => {
                LinearClassifier::linear_svm(weights, rho)
            }
        };
        check_dimension("classifier", layout.len(), classifier.dimension())?;

        Ok(Self::from_parts(layout, scaler, classifier))
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn scaler(&self) -> &dyn FeatureScaler {
        self.scaler.as_ref()
    }

    pub fn classifier(&self) -> &dyn BinaryClassifier {
        self.classifier.as_ref()
    }
}

impl fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("columns", &self.layout.column_names())
            .finish_non_exhaustive()
    }
}

fn check_dimension(
    component: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ArtifactError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ArtifactError::Dimension {
            component,
            expected,
            actual,
        })
    }
}
