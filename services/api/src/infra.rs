use loan_eligibility::config::{AppConfig, ArtifactConfig};
use loan_eligibility::error::AppError;
use loan_eligibility::{EligibilityPipeline, ModelArtifacts};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads configuration, letting a command-line artifact path win over the environment.
pub(crate) fn load_config(artifact: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = artifact {
        config.artifacts = ArtifactConfig::new(path.to_string_lossy())?;
    }
    Ok(config)
}

pub(crate) fn load_pipeline(config: &AppConfig) -> Result<Arc<EligibilityPipeline>, AppError> {
    let artifacts = ModelArtifacts::load(&config.artifacts.path)?;
    Ok(Arc::new(EligibilityPipeline::new(Arc::new(artifacts))))
}
