//! Axum route handlers for the stored-opportunity API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::models::RiskLevel;
use crate::errors::AppError;
use crate::models::opportunity::{OpportunityRow, RiskCountRow};
use crate::opportunities::repository::{
    count_opportunities, get_opportunity, list_opportunities, opportunity_stats,
    top_risk_domains, top_risk_organizations, ListFilter, OpportunityStats,
};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;
/// Filter value meaning "every level".
const ALL_LEVELS: &str = "TODOS";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub limit: Option<i64>,
    #[serde(alias = "skip")]
    pub offset: Option<i64>,
    #[serde(alias = "nivel_risco")]
    pub risk_level: Option<String>,
}

impl ListQuery {
    pub fn into_filter(self) -> Result<ListFilter, AppError> {
        let risk_level = match self.risk_level.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(token) if token.eq_ignore_ascii_case(ALL_LEVELS) => None,
            Some(token) => Some(RiskLevel::from_token(token).ok_or_else(|| {
                AppError::Validation(format!("Nível de risco desconhecido: {token}"))
            })?),
        };

        Ok(ListFilter {
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.unwrap_or(0).max(0),
            risk_level,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityListResponse {
    pub opportunities: Vec<OpportunityRow>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize)]
pub struct TopOrganizationsResponse {
    pub organizations: Vec<RiskCountRow>,
}

#[derive(Debug, Serialize)]
pub struct TopDomainsResponse {
    pub domains: Vec<RiskCountRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/opportunities
pub async fn handle_list_opportunities(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<OpportunityListResponse>, AppError> {
    let filter = query.into_filter()?;
    let opportunities = list_opportunities(&state.db, &filter).await?;
    let total = count_opportunities(&state.db, filter.risk_level).await?;
    Ok(Json(OpportunityListResponse {
        opportunities,
        total,
        limit: filter.limit,
        offset: filter.offset,
    }))
}

/// GET /api/v1/opportunities/stats
pub async fn handle_opportunity_stats(
    State(state): State<AppState>,
) -> Result<Json<OpportunityStats>, AppError> {
    Ok(Json(opportunity_stats(&state.db).await?))
}

/// GET /api/v1/opportunities/top-risk-organizations
pub async fn handle_top_risk_organizations(
    State(state): State<AppState>,
) -> Result<Json<TopOrganizationsResponse>, AppError> {
    let organizations = top_risk_organizations(&state.db).await?;
    Ok(Json(TopOrganizationsResponse { organizations }))
}

/// GET /api/v1/opportunities/top-risk-domains
pub async fn handle_top_risk_domains(
    State(state): State<AppState>,
) -> Result<Json<TopDomainsResponse>, AppError> {
    let domains = top_risk_domains(&state.db).await?;
    Ok(Json(TopDomainsResponse { domains }))
}

/// GET /api/v1/opportunities/:id
pub async fn handle_get_opportunity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OpportunityRow>, AppError> {
    let row = get_opportunity(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {id} not found")))?;
    Ok(Json(row))
}
