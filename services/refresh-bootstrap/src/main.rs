use refresh_bootstrap::{Config, LoadHook, RefreshBootstrap, build_transport};
use rust_common::init_tracing;
use tracing::{debug, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.tracing)?;

    let transport = build_transport(&config)?;
    let bootstrap = RefreshBootstrap::from_config(transport, &config)?;
    let metrics = bootstrap.metrics();

    info!(
        endpoint = %bootstrap.endpoint(),
        variant = %config.variant,
        "Starting refresh bootstrap"
    );

    let outcome = LoadHook::new(bootstrap)
        .spawn()
        .await?
        .is_some_and(|report| report.outcome());

    debug!(metrics = %metrics.to_prometheus(), "Refresh metrics");
    info!(outcome, "Refresh bootstrap finished");

    Ok(())
}
