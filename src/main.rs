use std::sync::Arc;

use anyhow::Context as _;
use lambda_runtime::{LambdaEvent, service_fn};

use ses_forward::config::{ForwarderConfig, RelayConfig};
use ses_forward::event::SesEvent;
use ses_forward::forwarder::{ForwardResponse, Forwarder};
use ses_forward::mailer::create_mailer;
use ses_forward::store::S3ObjectStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    // Initialize tracing; the log sink stamps each line itself
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    // Clients are built once and shared by every invocation
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let relay = RelayConfig::from_env().context("Invalid relay configuration")?;
    let mailer = create_mailer(&relay, &sdk_config).context("Failed to create mail relay")?;
    let store = Arc::new(S3ObjectStore::from_conf(&sdk_config));
    let forwarder = Arc::new(Forwarder::new(store, mailer));

    tracing::info!("SES Forward v{} ready", env!("CARGO_PKG_VERSION"));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<SesEvent>| {
        let forwarder = Arc::clone(&forwarder);
        async move { handle(&forwarder, event).await }
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {e}"))
}

/// One invocation: configuration is read from the environment every time.
async fn handle(
    forwarder: &Forwarder,
    event: LambdaEvent<SesEvent>,
) -> Result<ForwardResponse, lambda_runtime::Error> {
    tracing::debug!(request_id = %event.context.request_id, "Invocation received");
    let config = ForwarderConfig::from_env()?;
    Ok(forwarder.handle(&config, &event.payload).await?)
}
