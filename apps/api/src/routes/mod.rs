pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::opportunities::handlers as opportunities;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        // Stored opportunities
        .route(
            "/api/v1/opportunities",
            get(opportunities::handle_list_opportunities),
        )
        .route(
            "/api/v1/opportunities/stats",
            get(opportunities::handle_opportunity_stats),
        )
        .route(
            "/api/v1/opportunities/top-risk-organizations",
            get(opportunities::handle_top_risk_organizations),
        )
        .route(
            "/api/v1/opportunities/top-risk-domains",
            get(opportunities::handle_top_risk_domains),
        )
        .route(
            "/api/v1/opportunities/:id",
            get(opportunities::handle_get_opportunity),
        )
        .with_state(state)
}
