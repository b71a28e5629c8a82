pub mod handlers;

pub use handlers::*;

use crate::service::PlannerService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

/// 构建路由
pub fn router(service: Arc<PlannerService>) -> Router {
    let planner_routes = Router::new()
        .route("/api/vocabulary", post(vocabulary))
        .route("/api/depletion", post(depletion))
        .route("/api/deduction", post(deduction))
        .route("/api/usage", post(usage))
        .route("/api/unlocks", post(unlocks))
        .route("/api/shopping-list", post(shopping_list))
        .route("/api/shopping-list/share", post(shopping_list_share))
        .route("/api/shopping-list/csv", post(shopping_list_csv))
        .route("/api/meal-plan", post(meal_plan))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(planner_routes)
        .layer(ServiceBuilder::new())
}
