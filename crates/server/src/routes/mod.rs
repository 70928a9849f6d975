use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use skill::Skill;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;

pub mod health;
pub mod skill_invoke;

/// Routes of the local adapter: the skill endpoint at `/` plus a health check.
pub fn router(skill: Arc<Skill>) -> Router {
    Router::new()
        .route("/", post(skill_invoke::invoke_skill))
        .route("/health", get(health::health_check))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(skill)
}
