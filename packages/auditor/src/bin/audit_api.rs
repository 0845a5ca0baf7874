use std::time::Duration;

use logic_auditor::config::AuditorConfig;
use logic_auditor::gateway::HttpGateway;
use logic_auditor::llm::AnthropicClient;
use logic_auditor::server::{self, AppState};
use logic_auditor::Auditor;
use logic_auditor_fetcher::Fetcher;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AuditorConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        model = %config.llm.model,
        gateway = ?config.gateway,
        proxy = %config.fetcher.proxy_base_url,
        "starting logic auditor"
    );

    let llm = AnthropicClient::new(&config.llm).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to build model client");
        std::process::exit(1);
    });

    let gateway = HttpGateway::new(&config.gateway).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to build reference data gateway");
        std::process::exit(1);
    });

    let fetcher = Fetcher::with_timeout(Duration::from_secs(config.fetcher.timeout_secs))
        .map(|f| f.with_proxy_base_url(config.fetcher.proxy_base_url.clone()))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to build text fetcher");
            std::process::exit(1);
        });

    let state = AppState::new(Auditor::new(llm, gateway, fetcher, &config.llm));
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, addr = %config.bind_addr, "failed to bind");
            std::process::exit(1);
        });

    tracing::info!(addr = %config.bind_addr, "listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
