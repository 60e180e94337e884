//! Consensus server binary: configuration, wiring, and the axum serve loop.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use consensus::adapters::ai::{GeminiConfig, GeminiProvider, RetryingGenerationProvider};
use consensus::adapters::http::{app_router, DecisionHandlers, ProjectHandlers};
use consensus::adapters::storage::FileProjectStore;
use consensus::application::handlers::{ClarifyHandler, DiagnosticPingHandler, ProduceHandler};
use consensus::config::AppConfig;
use consensus::ports::GenerationProvider;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let status = config.generation.status();
    if !status.configured {
        warn!("no generation API key configured; clarify and produce will reject requests");
    }

    // Credential state is computed once here and injected; it is not
    // re-checked at runtime.
    let provider: Option<Arc<dyn GenerationProvider>> = config.generation.credential().map(|key| {
        let transport = GeminiProvider::new(
            GeminiConfig::new(key)
                .with_model(config.generation.model.clone())
                .with_base_url(config.generation.base_url.clone()),
        );
        Arc::new(RetryingGenerationProvider::new(Arc::new(transport))) as Arc<dyn GenerationProvider>
    });

    let store = Arc::new(FileProjectStore::new(&config.storage.data_dir));

    let decision_handlers = DecisionHandlers::new(
        status,
        Arc::new(ClarifyHandler::new(provider.clone())),
        Arc::new(ProduceHandler::new(
            provider.clone(),
            config.generation.produce_timeout(),
            config.generation.produce_max_retries,
        )),
        Arc::new(DiagnosticPingHandler::new(provider)),
    );
    let project_handlers = ProjectHandlers::new(store);

    let app = app_router(decision_handlers, project_handlers, &config.server);

    let addr = config.server.socket_addr();
    info!(%addr, "starting consensus server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
