use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityRow {
    pub id: Uuid,
    pub input_type: String,
    pub source_url: Option<String>,
    pub source_domain: Option<String>,
    pub domain_label: String,
    pub original_text: String,
    pub title: Option<String>,
    pub organization: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub compensation: Option<String>,
    pub location: Option<String>,
    pub opportunity_type: Option<String>,
    pub benefits: Option<String>,
    pub contacts: Option<String>,
    pub platform: Option<String>,
    pub url_trust: Option<Value>,
    pub risk_level: String,
    pub risk_score: i16,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
    pub detailed_recommendations: Value,
    pub category_scores: Value,
    pub suspicious_excerpts: Value,
    pub category_explanations: Value,
    pub analyzed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Count of high-risk postings attributed to one organization or domain.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RiskCountRow {
    pub name: String,
    pub high_risk_count: i64,
}
