use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicantRepository};
use crate::routes::build_router;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uptick_admissions::config::AppConfig;
use uptick_admissions::cors::{AllowList, CorsMode, OriginGate};
use uptick_admissions::error::AppError;
use uptick_admissions::telemetry;
use uptick_admissions::workflows::applicants::{ApplicantIntakeService, ResendNotifier};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let cors_mode = config.environment.cors_mode();
    let allow_list = AllowList::from(&config.cors);
    if cors_mode == CorsMode::Production && config.cors.allowed_origins.is_empty() {
        warn!("ALLOWED_ORIGINS is empty; every browser origin will be rejected");
    }
    if config.email.api_key.is_none() {
        warn!("RESEND_API_KEY is not set; confirmation emails will not be sent");
    }
    let gate = OriginGate::new(cors_mode, allow_list);

    let repository = Arc::new(InMemoryApplicantRepository::default());
    let notifier = Arc::new(ResendNotifier::new(&config.email));
    let intake_service = Arc::new(ApplicantIntakeService::new(repository, notifier));

    let app = build_router(intake_service, app_state, gate).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        origins = config.cors.allowed_origins.len(),
        "admissions api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
