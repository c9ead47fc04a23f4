pub mod config;
pub mod error;
pub mod observability;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use larder_shopping::{GroceryListOrganizer, HttpCleanupService};

pub use config::Config;
pub use routes::AppState;

/// Organizer backed by the HTTP cleanup service configured in `config`
pub fn cleanup_organizer(config: &Config) -> anyhow::Result<GroceryListOrganizer> {
    let service = HttpCleanupService::new(
        config.cleanup.endpoint.clone(),
        Duration::from_secs(config.cleanup.timeout_secs),
    )?;

    Ok(GroceryListOrganizer::new(Arc::new(service)))
}

/// Create the app router
///
/// Tests build their own [`AppState`] and call [`routes::router`] directly.
pub fn create_app(config: &Config) -> anyhow::Result<axum::Router> {
    let state = AppState {
        organizer: cleanup_organizer(config)?,
    };

    Ok(routes::router(state))
}
