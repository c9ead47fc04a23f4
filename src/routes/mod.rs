use axum::{
    Router,
    routing::{get, post},
};
use larder_shopping::GroceryListOrganizer;
use tower_http::trace::TraceLayer;

mod health;
mod shopping_list;

pub use health::health;
pub use shopping_list::{ExportRequest, GenerateRequest, OrganizeRequest};

#[derive(Clone)]
pub struct AppState {
    pub organizer: GroceryListOrganizer,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health::health))
        .route("/shopping-list", post(shopping_list::generate))
        .route("/shopping-list/organize", post(shopping_list::organize))
        .route("/shopping-list/export", post(shopping_list::export))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
