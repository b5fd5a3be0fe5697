pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::labels::handlers as label_handlers;
use crate::state::AppState;
use crate::subscribers::handlers as subscriber_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Subscriber API
        .route(
            "/api/v1/subscribers",
            get(subscriber_handlers::handle_list_subscribers)
                .post(subscriber_handlers::handle_create_subscriber),
        )
        .route(
            "/api/v1/subscribers/:id",
            get(subscriber_handlers::handle_get_subscriber)
                .put(subscriber_handlers::handle_update_subscriber)
                .delete(subscriber_handlers::handle_delete_subscriber),
        )
        .route(
            "/api/v1/subscribers/:id/history",
            get(subscriber_handlers::handle_subscription_history),
        )
        .route(
            "/api/v1/subscribers/:id/renew",
            post(subscriber_handlers::handle_renew_subscription),
        )
        // Labels API
        .route("/api/v1/labels", get(label_handlers::handle_generate_labels))
        .with_state(state)
}
