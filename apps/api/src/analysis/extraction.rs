//! Extraction adapter: turns posting content into `(ExtractedPosting, RawFindings)`.
//!
//! The model response is handled in three independent steps:
//! 1. the completion is kept as an opaque string,
//! 2. `extract_json` recovers a JSON object from it,
//! 3. the object is coerced field by field into typed values, defaulting
//!    whatever is missing or malformed.
//!
//! `extract_posting` never fails. Any model or parse failure produces the
//! fallback findings, which always carry actionable recommendations.

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::analysis::models::{
    CategoryMap, CategoryScores, CategoryTexts, ExtractedPosting, OpportunityType,
    RawFindings, RecommendationItem, Recommendations, RiskLevel,
};
use crate::analysis::prompts::ANALYSIS_PROMPT_TEMPLATE;
use crate::analysis::recommendations::{generic_safety_checklist, manual_verification};
use crate::analysis::response_parser::extract_json;
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, OUTPUT_LANGUAGE_INSTRUCTION};
use crate::llm_client::{LlmError, TextModel};

/// Content beyond this many characters is silently dropped before prompting.
pub const MAX_CONTENT_CHARS: usize = 8000;
/// A category explanation is only kept when its score reaches this value.
pub const EXPLANATION_THRESHOLD: u8 = 31;

const DEFAULT_SCORE: u8 = 50;
const PARSE_FAILURE_ALERT: &str = "Erro na análise automática";

/// Why the fallback findings were produced.
#[derive(Debug)]
enum FallbackCause {
    /// The model call failed or returned nothing.
    ModelInvocation(String),
    /// The completion held no usable JSON findings.
    Unparseable,
}

/// Runs the model over `content` and coerces its answer.
pub async fn extract_posting(
    content: &str,
    model: &dyn TextModel,
) -> (ExtractedPosting, RawFindings) {
    let prompt = build_prompt(content);

    let completion = match model.complete(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            error!("Model invocation failed: {e}");
            return fallback(FallbackCause::ModelInvocation(model_failure_message(&e)));
        }
    };

    debug!("Model response received ({} chars)", completion.chars().count());
    interpret_completion(&completion)
}

/// Builds the full prompt, truncating `content` to [`MAX_CONTENT_CHARS`].
pub fn build_prompt(content: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        .replace("{language_instruction}", OUTPUT_LANGUAGE_INSTRUCTION)
        .replace("{content}", truncate_chars(content, MAX_CONTENT_CHARS))
}

/// Interprets a raw completion. Exposed separately so the coercion rules can
/// be exercised without a model.
pub fn interpret_completion(completion: &str) -> (ExtractedPosting, RawFindings) {
    if completion.trim().is_empty() {
        error!("Model returned an empty completion");
        return fallback(FallbackCause::ModelInvocation(model_failure_message(
            &LlmError::EmptyContent,
        )));
    }

    let object = match extract_json(completion) {
        Ok(object) => object,
        Err(e) => {
            warn!("Could not recover JSON from model output: {e}");
            return fallback(FallbackCause::Unparseable);
        }
    };

    let Some(findings) = object.get("riskFindings").and_then(Value::as_object) else {
        warn!("Model output has no riskFindings object");
        return fallback(FallbackCause::Unparseable);
    };

    let posting = object
        .get("extractedPosting")
        .and_then(Value::as_object)
        .map(coerce_posting)
        .unwrap_or_default();
    if posting.is_empty() {
        debug!("Model output carries no posting fields");
    }
    let findings = coerce_findings(findings);

    info!(
        "Model findings: level={:?} score={}",
        findings.risk_level, findings.score
    );
    (posting, findings)
}

/// User-facing description of a model failure, used in the fallback alert.
fn model_failure_message(error: &LlmError) -> String {
    match error {
        LlmError::EmptyContent => "Resposta vazia do modelo".to_string(),
        LlmError::Blocked(reason) => {
            format!("Conteúdo bloqueado pelos filtros de segurança do modelo ({reason})")
        }
        LlmError::Api { status, message } => {
            format!("O serviço do modelo respondeu com erro {status}: {message}")
        }
        LlmError::Http(e) => format!("Falha de comunicação com o serviço do modelo: {e}"),
    }
}

fn fallback(cause: FallbackCause) -> (ExtractedPosting, RawFindings) {
    let (alert, error) = match &cause {
        FallbackCause::ModelInvocation(e) => (format!("Erro na análise: {e}"), Some(e.as_str())),
        FallbackCause::Unparseable => (PARSE_FAILURE_ALERT.to_string(), None),
    };

    let mut detailed: Recommendations = generic_safety_checklist().into();
    detailed.push(manual_verification(error));

    let findings = RawFindings {
        risk_level: RiskLevel::Medium,
        score: DEFAULT_SCORE,
        alerts: vec![alert],
        recommendations: detailed.titles(),
        detailed_recommendations: detailed,
        category_scores: CategoryScores::default(),
        suspicious_excerpts: CategoryTexts::default(),
        category_explanations: CategoryTexts::default(),
    };
    (ExtractedPosting::default(), findings)
}

// ────────────────────────────────────────────────────────────────────────────
// Coercion
// ────────────────────────────────────────────────────────────────────────────

fn coerce_posting(obj: &Map<String, Value>) -> ExtractedPosting {
    let text = |key: &str| non_empty_str(obj.get(key));
    ExtractedPosting {
        title: text("title"),
        organization: text("organization"),
        description: text("description"),
        requirements: text("requirements"),
        compensation: text("compensation"),
        location: text("location"),
        opportunity_type: text("opportunityType").map(|t| OpportunityType::from_token(&t)),
        benefits: text("benefits"),
        contacts: text("contacts"),
        platform: text("platform"),
        source_url: None,
    }
}

fn coerce_findings(obj: &Map<String, Value>) -> RawFindings {
    let risk_level = obj
        .get("riskLevel")
        .and_then(Value::as_str)
        .and_then(RiskLevel::from_token)
        .unwrap_or_default();
    let score = obj
        .get("score")
        .and_then(coerce_score)
        .unwrap_or(DEFAULT_SCORE);

    let alerts = string_list(obj.get("alerts"));
    let mut recommendations = string_list(obj.get("recommendations"));
    let mut detailed = detailed_recommendations(obj.get("detailedRecommendations"));

    if detailed.is_empty() && risk_level.allows_generic_backfill() {
        detailed = generic_safety_checklist().into();
        if recommendations.is_empty() {
            recommendations = detailed.titles();
        }
    }

    let scores_obj = obj.get("categoryScores").and_then(Value::as_object);
    let category_scores = CategoryMap::from_fn(|c| {
        scores_obj
            .and_then(|m| m.get(c.key()))
            .and_then(coerce_score)
            .unwrap_or(0)
    });

    let category_texts = |key: &str| {
        let texts = obj.get(key).and_then(Value::as_object);
        CategoryMap::from_fn(|c| non_empty_str(texts.and_then(|m| m.get(c.key()))))
    };
    let suspicious_excerpts = category_texts("suspiciousExcerpts");
    let mut category_explanations = category_texts("categoryExplanations");
    gate_explanations(&mut category_explanations, &category_scores);

    RawFindings {
        risk_level,
        score,
        alerts,
        recommendations,
        detailed_recommendations: detailed,
        category_scores,
        suspicious_excerpts,
        category_explanations,
    }
}

/// Drops every explanation whose category scored below [`EXPLANATION_THRESHOLD`].
pub fn gate_explanations(explanations: &mut CategoryTexts, scores: &CategoryScores) {
    for (category, score) in scores.iter() {
        if *score < EXPLANATION_THRESHOLD {
            explanations.set(category, None);
        }
    }
}

fn detailed_recommendations(value: Option<&Value>) -> Recommendations {
    let Some(items) = value.and_then(Value::as_array) else {
        return Recommendations::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|item| {
            let title = non_empty_str(item.get("title"));
            let explanation = non_empty_str(item.get("explanation"));
            if title.is_none() && explanation.is_none() {
                return None;
            }
            Some(RecommendationItem::new(
                title.unwrap_or_default(),
                explanation.unwrap_or_default(),
                non_empty_str(item.get("problematicExcerpt")),
            ))
        })
        .collect()
}

/// Accepts integers, floats and numeric strings; clamps to 0..=100.
fn coerce_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| non_empty_str(Some(item)))
                .collect()
        })
        .unwrap_or_default()
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
