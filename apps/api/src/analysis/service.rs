//! End-to-end analysis of one submission: resolve content, extract, classify, merge.

use tracing::{info, warn};

use crate::analysis::extraction::extract_posting;
use crate::analysis::merger::merge;
use crate::analysis::models::{ExtractedPosting, RiskAssessment};
use crate::analysis::trust::{classify, with_default_scheme, TrustClassification};
use crate::errors::AppError;
use crate::fetcher::ContentFetcher;
use crate::llm_client::TextModel;

/// Content shorter than this (after trimming) is rejected.
pub const MIN_CONTENT_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    /// Raw posting text pasted by the user.
    Text(String),
    /// Link to a posting page.
    Link(String),
}

impl AnalysisInput {
    /// Stored input-type token.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "TEXT",
            Self::Link(_) => "LINK",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub assessment: RiskAssessment,
    pub posting: ExtractedPosting,
    /// Present for link submissions only.
    pub trust: Option<TrustClassification>,
    /// The exact text the model was given (before truncation).
    pub content: String,
}

/// Runs the full pipeline. Model and parse failures degrade to fallback
/// findings; only invalid input is an error.
pub async fn analyze_opportunity(
    input: &AnalysisInput,
    fetcher: &dyn ContentFetcher,
    model: &dyn TextModel,
) -> Result<AnalysisOutcome, AppError> {
    let content = resolve_content(input, fetcher).await?;

    if content.trim().chars().count() < MIN_CONTENT_CHARS {
        return Err(AppError::Validation(format!(
            "Conteúdo muito curto para análise (mínimo {MIN_CONTENT_CHARS} caracteres)"
        )));
    }

    let (posting, findings) = extract_posting(&content, model).await;

    let (posting, trust) = match input {
        AnalysisInput::Link(url) => {
            let trust = classify(url);
            let posting = ExtractedPosting {
                source_url: Some(url.trim().to_string()),
                ..posting
            };
            (posting, Some(trust))
        }
        AnalysisInput::Text(_) => (posting, None),
    };

    let assessment = merge(findings, trust.as_ref());
    info!(
        "Analysis complete: level={} score={} trusted={}",
        assessment.risk_level.as_token(),
        assessment.score,
        trust.as_ref().is_some_and(|t| t.is_trusted)
    );

    Ok(AnalysisOutcome {
        assessment,
        posting,
        trust,
        content,
    })
}

/// Turns the submission into the text handed to the model. A link that cannot
/// be fetched is still analysed, from the link alone.
async fn resolve_content(
    input: &AnalysisInput,
    fetcher: &dyn ContentFetcher,
) -> Result<String, AppError> {
    match input {
        AnalysisInput::Text(text) => Ok(text.clone()),
        AnalysisInput::Link(url) => {
            let url = url.trim();
            if url.is_empty() {
                return Err(AppError::Validation(
                    "O link da oportunidade é obrigatório".to_string(),
                ));
            }
            match fetcher.fetch(&with_default_scheme(url)).await {
                Ok(page) => Ok(format!("Título: {}\n\nConteúdo: {}", page.title, page.text)),
                Err(e) => {
                    warn!("Could not fetch {url}: {e}");
                    Ok(format!(
                        "Link fornecido: {url}\nErro ao extrair conteúdo completo."
                    ))
                }
            }
        }
    }
}
