use metrics_exporter_prometheus::PrometheusHandle;
use psychorisk::assessment::{AssessmentService, InMemoryEvaluationRepository};
use psychorisk::config::AssessmentConfig;
use psychorisk::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Service over process-local storage with the configured catalog and edit ceiling.
pub(crate) fn in_memory_service(
    config: &AssessmentConfig,
) -> Result<AssessmentService<InMemoryEvaluationRepository>, AppError> {
    let catalog = config.load_catalog()?;
    Ok(AssessmentService::new(
        Arc::new(InMemoryEvaluationRepository::default()),
        Arc::new(catalog),
        config,
    ))
}
