//! NIDUS Server — application entry point.
//!
//! Bootstraps the configured store: a remote SurrealDB instance when the
//! connection environment is present, otherwise the seeded in-memory
//! demo workspace.

use nidus_client::config::{ClientConfig, StoreTarget};
use nidus_client::{Sessions, bootstrap_demo};
use nidus_db::{DbManager, SurrealStore, open_memory, run_migrations};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nidus=info".parse().unwrap()))
        .json()
        .init();

    tracing::info!("Starting NIDUS...");

    let config = ClientConfig::from_env();
    if let Err(err) = run(config).await {
        tracing::error!(error = %err, "Startup failed");
        std::process::exit(1);
    }

    tracing::info!("NIDUS stopped.");
}

async fn run(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    match config.target {
        StoreTarget::Remote(db_config) => {
            let manager = DbManager::connect(&db_config).await?;
            run_migrations(manager.client()).await?;
            let _store = SurrealStore::new(manager.client().clone());
            tracing::info!("Remote store ready");
        }
        StoreTarget::Demo => {
            let db = open_memory().await?;
            run_migrations(&db).await?;
            let store = SurrealStore::new(db);

            let (organization, admin) = bootstrap_demo(&store).await?;
            let sessions = Sessions::new(store);
            let route = sessions.route(admin.id).await;

            tracing::info!(
                organization = %organization.name,
                admin = %admin.email,
                route = ?route,
                "Demo workspace ready"
            );
        }
    }

    Ok(())
}
