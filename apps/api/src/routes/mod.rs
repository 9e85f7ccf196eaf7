pub mod health;

use std::time::Duration;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::timeout::TimeoutLayer;

use crate::profile::handlers;
use crate::state::AppState;

/// GET /
async fn root() -> &'static str {
    "API running"
}

/// GET /api/posts — placeholder, no post schema yet.
async fn posts_placeholder() -> &'static str {
    "Post Route"
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health::health_handler))
        // Profile API
        .route("/api/profile/me", get(handlers::get_my_profile))
        .route(
            "/api/profile",
            post(handlers::upsert_profile)
                .get(handlers::list_profiles)
                .delete(handlers::delete_account),
        )
        .route("/api/profile/user/:user_id", get(handlers::get_profile_by_user))
        .route("/api/profile/experience", put(handlers::add_experience))
        .route(
            "/api/profile/experience/:exp_id",
            delete(handlers::remove_experience),
        )
        .route("/api/profile/education", put(handlers::add_education))
        .route(
            "/api/profile/education/:edu_id",
            delete(handlers::remove_education),
        )
        // Posts API (placeholder)
        .route("/api/posts", get(posts_placeholder))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
