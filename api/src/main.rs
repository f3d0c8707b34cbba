use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use crm_api::{config::load_config, create_app, telemetry::init_tracing, AppState};
use crm_core::repositories::{InMemoryVerificationRepository, VerificationRepository};
use crm_core::services::{
    EmailServiceTrait, VerificationCleanupConfig, VerificationCleanupService, VerificationService,
    VerificationServiceConfig,
};
use crm_infra::database::{DatabasePool, MySqlVerificationRepository};
use crm_infra::email::{create_email_service, EmailServiceAdapter};
use crm_shared::config::{AppConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config().context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(
        environment = ?config.environment,
        storage = ?config.database.backend,
        "Starting CRM verification API"
    );

    let email = EmailServiceAdapter::new(create_email_service(&config.email));
    info!(provider = email.provider_name(), "Email delivery configured");
    let email = Arc::new(email);

    match config.database.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory verification storage; records are lost on restart");
            let repository = Arc::new(InMemoryVerificationRepository::new());
            run(config, repository, email).await
        }
        StorageBackend::MySql => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("Failed to connect to MySQL")?;
            let repository = MySqlVerificationRepository::new(pool.pool().clone());
            if config.database.auto_migrate {
                repository
                    .ensure_schema()
                    .await
                    .context("Failed to prepare verification table")?;
            }
            let result = run(config, Arc::new(repository), email).await;
            pool.close().await;
            result
        }
    }
}

async fn run<R, N>(config: AppConfig, repository: Arc<R>, email: Arc<N>) -> anyhow::Result<()>
where
    R: VerificationRepository + 'static,
    N: EmailServiceTrait + 'static,
{
    let service = Arc::new(VerificationService::new(
        repository,
        email,
        VerificationServiceConfig::from(&config.verification),
    ));

    let cleanup = Arc::new(VerificationCleanupService::new(
        service.clone(),
        VerificationCleanupConfig::from(&config.verification),
    ));
    let cleanup_task = cleanup.start_background_task();

    let state = web::Data::new(AppState::new(service));
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "HTTP server listening");

    let mut server = HttpServer::new(move || create_app(state.clone(), max_payload_size))
        .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server error");

    if let Some(task) = cleanup_task {
        task.abort();
    }
    info!("Server stopped");
    result
}
