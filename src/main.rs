use anyhow::Result;
use parcel_intake::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("parcel_intake=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::load()?;
    tracing::info!(
        bind = %config.server.bind,
        data_file = %config.storage.data_file.display(),
        locale = %config.locale,
        "Starting parcel intake"
    );

    ServerBuilder::new().with_config(config).serve().await
}
