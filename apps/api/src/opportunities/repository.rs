//! Storage of analysed opportunities.

use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::RiskLevel;
use crate::analysis::service::{AnalysisInput, AnalysisOutcome};
use crate::analysis::trust::TrustClassification;
use crate::models::opportunity::{OpportunityRow, RiskCountRow};

/// How many entries the top-risk rankings return.
pub const TOP_RISK_LIMIT: i64 = 4;

/// Organization names the model emits when it found none. Compared lowercased.
const PLACEHOLDER_ORGANIZATIONS: [&str; 7] = [
    "empresa anónima",
    "agência de recrutamento (não especificada)",
    "agência de recrutamento (nome não especificado)",
    "não especificada",
    "não informado",
    "n/a",
    "não encontrado",
];
const EXCLUDED_DOMAINS: [&str; 2] = ["localhost", "127.0.0.1"];
/// Domain label for submissions that came in as pasted text.
const TEXT_SUBMISSION_LABEL: &str = "Análise por texto";
/// Domain label for links whose host could not be determined.
const UNKNOWN_SOURCE_LABEL: &str = "Fonte não especificada";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFilter {
    pub limit: i64,
    pub offset: i64,
    pub risk_level: Option<RiskLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityStats {
    pub total_opportunities: i64,
    pub high_risk: i64,
}

fn high_risk_tokens() -> Vec<String> {
    [RiskLevel::High, RiskLevel::Critical]
        .iter()
        .map(|level| level.as_token().to_string())
        .collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Name a submission is ranked under in the top-risk domain list.
fn domain_label(input: &AnalysisInput, trust: Option<&TrustClassification>) -> String {
    if let Some(domain) = trust.and_then(|t| t.domain.as_deref()) {
        return domain.to_string();
    }
    match input {
        AnalysisInput::Link(_) => UNKNOWN_SOURCE_LABEL.to_string(),
        AnalysisInput::Text(_) => TEXT_SUBMISSION_LABEL.to_string(),
    }
}

/// Persists one analysis and returns its id.
pub async fn save_opportunity(
    pool: &PgPool,
    input: &AnalysisInput,
    outcome: &AnalysisOutcome,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let posting = &outcome.posting;
    let assessment = &outcome.assessment;
    let source_domain = outcome.trust.as_ref().and_then(|t| t.domain.clone());
    let label = domain_label(input, outcome.trust.as_ref());
    let url_trust = outcome
        .trust
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    sqlx::query(
        r#"
        INSERT INTO opportunities
            (id, input_type, source_url, source_domain, domain_label, original_text,
             title, organization, description, requirements, compensation,
             location, opportunity_type, benefits, contacts, platform,
             url_trust, risk_level, risk_score, alerts, recommendations,
             detailed_recommendations, category_scores, suspicious_excerpts,
             category_explanations)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25)
        "#,
    )
    .bind(id)
    .bind(input.kind())
    .bind(&posting.source_url)
    .bind(&source_domain)
    .bind(&label)
    .bind(&outcome.content)
    .bind(&posting.title)
    .bind(&posting.organization)
    .bind(&posting.description)
    .bind(&posting.requirements)
    .bind(&posting.compensation)
    .bind(&posting.location)
    .bind(posting.opportunity_type.map(|t| t.as_token()))
    .bind(&posting.benefits)
    .bind(&posting.contacts)
    .bind(&posting.platform)
    .bind(url_trust)
    .bind(assessment.risk_level.as_token())
    .bind(i16::from(assessment.score))
    .bind(&assessment.alerts)
    .bind(&assessment.recommendations)
    .bind(serde_json::to_value(&assessment.detailed_recommendations)?)
    .bind(serde_json::to_value(&assessment.category_scores)?)
    .bind(serde_json::to_value(&assessment.suspicious_excerpts)?)
    .bind(serde_json::to_value(&assessment.category_explanations)?)
    .execute(pool)
    .await?;

    info!(
        "Stored opportunity {id} ({}, level {})",
        input.kind(),
        assessment.risk_level.as_token()
    );
    Ok(id)
}

/// Newest first.
pub async fn list_opportunities(pool: &PgPool, filter: &ListFilter) -> Result<Vec<OpportunityRow>> {
    Ok(sqlx::query_as::<_, OpportunityRow>(
        r#"
        SELECT * FROM opportunities
        WHERE ($1::TEXT IS NULL OR risk_level = $1)
        ORDER BY analyzed_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(filter.risk_level.map(|l| l.as_token()))
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(pool)
    .await?)
}

pub async fn count_opportunities(pool: &PgPool, risk_level: Option<RiskLevel>) -> Result<i64> {
    Ok(sqlx::query_scalar(
        "SELECT COUNT(*) FROM opportunities WHERE ($1::TEXT IS NULL OR risk_level = $1)",
    )
    .bind(risk_level.map(|l| l.as_token()))
    .fetch_one(pool)
    .await?)
}

pub async fn get_opportunity(pool: &PgPool, id: Uuid) -> Result<Option<OpportunityRow>> {
    Ok(
        sqlx::query_as::<_, OpportunityRow>("SELECT * FROM opportunities WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn opportunity_stats(pool: &PgPool) -> Result<OpportunityStats> {
    let (total_opportunities, high_risk): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COUNT(*) FILTER (WHERE risk_level = ANY($1))
        FROM opportunities
        "#,
    )
    .bind(high_risk_tokens())
    .fetch_one(pool)
    .await?;

    Ok(OpportunityStats {
        total_opportunities,
        high_risk,
    })
}

/// Organizations with the most ALTO/CRITICO postings.
pub async fn top_risk_organizations(pool: &PgPool) -> Result<Vec<RiskCountRow>> {
    Ok(sqlx::query_as::<_, RiskCountRow>(
        r#"
        SELECT btrim(organization) AS name, COUNT(*) AS high_risk_count
        FROM opportunities
        WHERE risk_level = ANY($1)
          AND organization IS NOT NULL
          AND btrim(organization) <> ''
          AND lower(btrim(organization)) <> ALL($2)
        GROUP BY btrim(organization)
        ORDER BY high_risk_count DESC, name ASC
        LIMIT $3
        "#,
    )
    .bind(high_risk_tokens())
    .bind(to_strings(&PLACEHOLDER_ORGANIZATIONS))
    .bind(TOP_RISK_LIMIT)
    .fetch_all(pool)
    .await?)
}

/// Source domains with the most ALTO/CRITICO postings, ranked by the label
/// stored at save time.
pub async fn top_risk_domains(pool: &PgPool) -> Result<Vec<RiskCountRow>> {
    Ok(sqlx::query_as::<_, RiskCountRow>(
        r#"
        SELECT domain_label AS name, COUNT(*) AS high_risk_count
        FROM opportunities
        WHERE risk_level = ANY($1)
          AND domain_label <> ALL($2)
        GROUP BY domain_label
        ORDER BY high_risk_count DESC, name ASC
        LIMIT $3
        "#,
    )
    .bind(high_risk_tokens())
    .bind(to_strings(&EXCLUDED_DOMAINS))
    .bind(TOP_RISK_LIMIT)
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::trust::classify;

    #[test]
    fn test_high_risk_tokens_are_alto_and_critico() {
        assert_eq!(high_risk_tokens(), vec!["ALTO", "CRITICO"]);
    }

    #[test]
    fn test_domain_label_follows_input_type() {
        let link = AnalysisInput::Link("http://".to_string());
        let unparsed = classify("http://");
        assert_eq!(unparsed.domain, None);
        assert_eq!(domain_label(&link, Some(&unparsed)), "Fonte não especificada");
        assert_eq!(domain_label(&link, None), "Fonte não especificada");

        let text = AnalysisInput::Text("Vaga de motorista".to_string());
        assert_eq!(domain_label(&text, None), "Análise por texto");
    }

    #[test]
    fn test_domain_label_uses_classified_domain() {
        let url = "https://www.vagas-rapidas.xyz/oferta";
        let link = AnalysisInput::Link(url.to_string());
        assert_eq!(domain_label(&link, Some(&classify(url))), "vagas-rapidas.xyz");
    }

    #[test]
    fn test_placeholders_are_lowercase() {
        for name in PLACEHOLDER_ORGANIZATIONS {
            assert_eq!(name, name.to_lowercase());
        }
    }
}
