//! Axum route handler for the analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::analysis::models::{ExtractedPosting, RiskAssessment};
use crate::analysis::service::{analyze_opportunity, AnalysisInput};
use crate::analysis::trust::TrustClassification;
use crate::errors::AppError;
use crate::opportunities::repository::save_opportunity;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputType {
    Link,
    #[serde(alias = "TEXTO")]
    Text,
}

/// Accepts both the English field names and the Portuguese ones older
/// clients send.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(alias = "tipoEntrada")]
    pub input_type: InputType,
    #[serde(default, alias = "linkOportunidade")]
    pub opportunity_link: Option<String>,
    #[serde(default, alias = "textoPublicacao")]
    pub posting_text: Option<String>,
}

impl AnalyzeRequest {
    pub fn into_input(self) -> Result<AnalysisInput, AppError> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        match self.input_type {
            InputType::Link => present(self.opportunity_link)
                .map(AnalysisInput::Link)
                .ok_or_else(|| {
                    AppError::Validation(
                        "opportunityLink é obrigatório quando inputType é LINK".to_string(),
                    )
                }),
            InputType::Text => present(self.posting_text)
                .map(AnalysisInput::Text)
                .ok_or_else(|| {
                    AppError::Validation(
                        "postingText é obrigatório quando inputType é TEXT".to_string(),
                    )
                }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis: RiskAssessment,
    pub extracted_posting: ExtractedPosting,
    pub original_text: String,
    pub url_trust: Option<TrustClassification>,
    /// `None` when the analysis could not be stored.
    pub opportunity_id: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let input = req.into_input()?;
    let outcome =
        analyze_opportunity(&input, state.fetcher.as_ref(), state.model.as_ref()).await?;

    // Storage is best-effort; the caller still gets the analysis.
    let opportunity_id = match save_opportunity(&state.db, &input, &outcome).await {
        Ok(id) => Some(id),
        Err(e) => {
            error!("Failed to store analysis: {e:#}");
            None
        }
    };

    Ok(Json(AnalyzeResponse {
        analysis: outcome.assessment,
        extracted_posting: outcome.posting,
        original_text: outcome.content,
        url_trust: outcome.trust,
        opportunity_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> AnalyzeRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_english_field_names() {
        let req = parse(json!({"inputType": "LINK", "opportunityLink": "https://vagas.co.mz/1"}));
        assert_eq!(
            req.into_input().unwrap(),
            AnalysisInput::Link("https://vagas.co.mz/1".to_string())
        );
    }

    #[test]
    fn test_portuguese_field_names() {
        let req = parse(json!({"tipoEntrada": "TEXTO", "textoPublicacao": "Vaga de motorista"}));
        assert_eq!(
            req.into_input().unwrap(),
            AnalysisInput::Text("Vaga de motorista".to_string())
        );
    }

    #[test]
    fn test_missing_payload_for_input_type_is_rejected() {
        let req = parse(json!({"inputType": "LINK", "postingText": "Vaga de motorista"}));
        assert!(matches!(req.into_input(), Err(AppError::Validation(_))));

        let req = parse(json!({"inputType": "TEXT", "postingText": "   "}));
        assert!(matches!(req.into_input(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_unknown_input_type_fails_to_deserialize() {
        let result: Result<AnalyzeRequest, _> =
            serde_json::from_value(json!({"inputType": "PDF"}));
        assert!(result.is_err());
    }
}
