use barcode_buddy::{
    config::{self, BackendKind},
    console,
    core::registry::Registry,
    errors::Result,
    render::LabelRenderer,
    store::{self, KvFile, LocalStore},
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    info!(backend = ?app_config.storage.backend, "Configuration loaded.");

    // 4. Open the selected storage backend
    let store = store::open_store(&app_config.storage)
        .await
        .inspect(|_| info!("Storage backend opened."))
        .inspect_err(|e| error!("Failed to open storage backend: {e}"))?;

    // The theme flag lives next to the products in the local key-value file
    let theme_store = (app_config.storage.backend == BackendKind::Local)
        .then(|| LocalStore::new(KvFile::new(&app_config.storage.path)));

    // 5. Load the registry from the backend
    let mut registry = Registry::new(store);
    registry
        .reload()
        .await
        .inspect_err(|e| error!("Failed to load products: {e}"))?;
    info!("Registry loaded: {} product(s).", registry.len());

    // 6. Run the console loop
    console::run(registry, &app_config, &LabelRenderer::new(), theme_store).await
}
