//! Domain types shared by the analysis pipeline.
//!
//! Wire tokens for risk levels and opportunity types follow the Portuguese
//! vocabulary the model and the frontend speak (`BAIXO`, `EMPREGO`, ...).
//! English names are accepted as aliases on input.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Maximum length of a recommendation title.
pub const MAX_RECOMMENDATION_TITLE_CHARS: usize = 80;

// ────────────────────────────────────────────────────────────────────────────
// Risk level
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "BAIXO", alias = "LOW")]
    Low,
    #[default]
    #[serde(rename = "MEDIO", alias = "MEDIUM", alias = "MÉDIO")]
    Medium,
    #[serde(rename = "ALTO", alias = "HIGH")]
    High,
    #[serde(rename = "CRITICO", alias = "CRITICAL", alias = "CRÍTICO")]
    Critical,
}

impl RiskLevel {
    /// Parses a level token as emitted by the model. Case-insensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "BAIXO" | "LOW" => Some(Self::Low),
            "MEDIO" | "MÉDIO" | "MEDIUM" => Some(Self::Medium),
            "ALTO" | "HIGH" => Some(Self::High),
            "CRITICO" | "CRÍTICO" | "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Low => "BAIXO",
            Self::Medium => "MEDIO",
            Self::High => "ALTO",
            Self::Critical => "CRITICO",
        }
    }

    /// LOW and MEDIUM postings get generic safety advice when the model gives none.
    pub fn allows_generic_backfill(&self) -> bool {
        matches!(self, Self::Low | Self::Medium)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Opportunity type / extracted posting
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpportunityType {
    #[serde(rename = "EMPREGO", alias = "EMPLOYMENT")]
    Employment,
    #[serde(rename = "ESTAGIO", alias = "INTERNSHIP")]
    Internship,
    #[serde(rename = "VOLUNTARIADO", alias = "VOLUNTEER")]
    Volunteer,
    #[serde(rename = "CURSO", alias = "COURSE")]
    Course,
    #[serde(rename = "BOLSA_ESTUDO", alias = "SCHOLARSHIP")]
    Scholarship,
    #[serde(rename = "NEGOCIO", alias = "BUSINESS")]
    Business,
    #[serde(rename = "OUTROS", alias = "OTHER")]
    Other,
}

impl OpportunityType {
    /// Unrecognized tokens collapse to `Other`; the model was asked for one
    /// of the listed values and anything else is still some kind of posting.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "EMPREGO" | "EMPLOYMENT" => Self::Employment,
            "ESTAGIO" | "ESTÁGIO" | "INTERNSHIP" => Self::Internship,
            "VOLUNTARIADO" | "VOLUNTEER" => Self::Volunteer,
            "CURSO" | "COURSE" => Self::Course,
            "BOLSA_ESTUDO" | "BOLSA DE ESTUDO" | "SCHOLARSHIP" => Self::Scholarship,
            "NEGOCIO" | "NEGÓCIO" | "BUSINESS" => Self::Business,
            _ => Self::Other,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Employment => "EMPREGO",
            Self::Internship => "ESTAGIO",
            Self::Volunteer => "VOLUNTARIADO",
            Self::Course => "CURSO",
            Self::Scholarship => "BOLSA_ESTUDO",
            Self::Business => "NEGOCIO",
            Self::Other => "OUTROS",
        }
    }
}

/// Posting metadata recovered from the content. `None` means "not found".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPosting {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub compensation: Option<String>,
    pub location: Option<String>,
    pub opportunity_type: Option<OpportunityType>,
    pub benefits: Option<String>,
    pub contacts: Option<String>,
    pub platform: Option<String>,
    pub source_url: Option<String>,
}

impl ExtractedPosting {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Risk categories
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskCategory {
    TitleSuspicious,
    OrgSuspicious,
    DescriptionVague,
    RequirementsVague,
    SalaryUnrealistic,
    ContactSuspicious,
    PlatformSuspicious,
    UrlSuspicious,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 8] = [
        Self::TitleSuspicious,
        Self::OrgSuspicious,
        Self::DescriptionVague,
        Self::RequirementsVague,
        Self::SalaryUnrealistic,
        Self::ContactSuspicious,
        Self::PlatformSuspicious,
        Self::UrlSuspicious,
    ];

    /// JSON key used in the model contract and in API responses.
    pub fn key(&self) -> &'static str {
        match self {
            Self::TitleSuspicious => "titleSuspicious",
            Self::OrgSuspicious => "orgSuspicious",
            Self::DescriptionVague => "descriptionVague",
            Self::RequirementsVague => "requirementsVague",
            Self::SalaryUnrealistic => "salaryUnrealistic",
            Self::ContactSuspicious => "contactSuspicious",
            Self::PlatformSuspicious => "platformSuspicious",
            Self::UrlSuspicious => "urlSuspicious",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Fixed eight-slot record keyed by [`RiskCategory`]. Every category always
/// has a slot, so consumers never ask "is this key present".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap<T> {
    slots: [T; 8],
}

impl<T> CategoryMap<T> {
    pub fn get(&self, category: RiskCategory) -> &T {
        &self.slots[category.index()]
    }

    pub fn set(&mut self, category: RiskCategory, value: T) {
        self.slots[category.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (RiskCategory, &T)> {
        RiskCategory::ALL
            .into_iter()
            .map(move |c| (c, self.get(c)))
    }
}

impl<T: Default> CategoryMap<T> {
    pub fn from_fn(mut f: impl FnMut(RiskCategory) -> T) -> Self {
        let mut map = Self::default();
        for category in RiskCategory::ALL {
            map.set(category, f(category));
        }
        map
    }
}

pub type CategoryScores = CategoryMap<u8>;
pub type CategoryTexts = CategoryMap<Option<String>>;

impl CategoryTexts {
    pub fn present(&self) -> impl Iterator<Item = (RiskCategory, &str)> {
        self.iter()
            .filter_map(|(c, v)| v.as_deref().map(|text| (c, text)))
    }
}

impl Serialize for CategoryMap<u8> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        for (category, score) in self.iter() {
            map.serialize_entry(category.key(), score)?;
        }
        map.end()
    }
}

/// Only categories that carry text are serialized.
impl Serialize for CategoryMap<Option<String>> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: Vec<_> = self.present().collect();
        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (category, text) in present {
            map.serialize_entry(category.key(), text)?;
        }
        map.end()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub title: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problematic_excerpt: Option<String>,
}

impl RecommendationItem {
    /// Builds an item, clipping the title to [`MAX_RECOMMENDATION_TITLE_CHARS`].
    pub fn new(
        title: impl Into<String>,
        explanation: impl Into<String>,
        problematic_excerpt: Option<String>,
    ) -> Self {
        let title: String = title.into();
        let title = match title.char_indices().nth(MAX_RECOMMENDATION_TITLE_CHARS) {
            Some((cut, _)) => title[..cut].to_string(),
            None => title,
        };
        Self {
            title,
            explanation: explanation.into(),
            problematic_excerpt,
        }
    }
}

/// Ordered recommendation sequence.
///
/// `prepend` places an item ahead of everything already present; `push`
/// appends. Trust-derived items are prepended so they lead the list, while
/// model-derived items keep their relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Recommendations(Vec<RecommendationItem>);

impl Recommendations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn prepend(&mut self, item: RecommendationItem) {
        self.0.insert(0, item);
    }

    pub fn push(&mut self, item: RecommendationItem) {
        self.0.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&RecommendationItem> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecommendationItem> {
        self.0.iter()
    }

    pub fn titles(&self) -> Vec<String> {
        self.0.iter().map(|r| r.title.clone()).collect()
    }
}

impl From<Vec<RecommendationItem>> for Recommendations {
    fn from(items: Vec<RecommendationItem>) -> Self {
        Self(items)
    }
}

impl FromIterator<RecommendationItem> for Recommendations {
    fn from_iter<I: IntoIterator<Item = RecommendationItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Recommendations {
    type Item = &'a RecommendationItem;
    type IntoIter = std::slice::Iter<'a, RecommendationItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Findings and the final assessment
// ────────────────────────────────────────────────────────────────────────────

/// Typed findings coerced from the model response, before trust evidence is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFindings {
    pub risk_level: RiskLevel,
    pub score: u8,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
    pub detailed_recommendations: Recommendations,
    pub category_scores: CategoryScores,
    pub suspicious_excerpts: CategoryTexts,
    pub category_explanations: CategoryTexts,
}

/// Final report returned to callers and persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub score: u8,
    pub alerts: Vec<String>,
    /// Titles only; kept for older consumers of the API.
    pub recommendations: Vec<String>,
    pub detailed_recommendations: Recommendations,
    pub category_scores: CategoryScores,
    pub suspicious_excerpts: CategoryTexts,
    pub category_explanations: CategoryTexts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_risk_level_tokens_round_trip() {
        for level in [
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::Critical,
        ] {
            assert_eq!(RiskLevel::from_token(level.as_token()), Some(level));
        }
        assert_eq!(RiskLevel::from_token("critical"), Some(RiskLevel::Critical));
        assert_eq!(RiskLevel::from_token("bogus"), None);
    }

    #[test]
    fn test_risk_level_serializes_as_portuguese_token() {
        assert_eq!(serde_json::to_value(RiskLevel::High).unwrap(), json!("ALTO"));
        let parsed: RiskLevel = serde_json::from_str(r#""HIGH""#).unwrap();
        assert_eq!(parsed, RiskLevel::High);
    }

    #[test]
    fn test_unknown_opportunity_type_is_other() {
        assert_eq!(OpportunityType::from_token("freelance"), OpportunityType::Other);
        assert_eq!(OpportunityType::from_token("estagio"), OpportunityType::Internship);
        assert_eq!(OpportunityType::Scholarship.as_token(), "BOLSA_ESTUDO");
    }

    #[test]
    fn test_category_scores_serialize_all_eight_keys() {
        let mut scores = CategoryScores::default();
        scores.set(RiskCategory::SalaryUnrealistic, 80);
        let value = serde_json::to_value(&scores).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        assert_eq!(obj["salaryUnrealistic"], json!(80));
        assert_eq!(obj["urlSuspicious"], json!(0));
    }

    #[test]
    fn test_category_texts_serialize_only_present_entries() {
        let mut texts = CategoryTexts::default();
        texts.set(RiskCategory::ContactSuspicious, Some("WhatsApp only".to_string()));
        let value = serde_json::to_value(&texts).unwrap();
        assert_eq!(value, json!({"contactSuspicious": "WhatsApp only"}));
    }

    #[test]
    fn test_recommendation_title_is_clipped_to_80_chars() {
        let item = RecommendationItem::new("á".repeat(120), "why", None);
        assert_eq!(item.title.chars().count(), MAX_RECOMMENDATION_TITLE_CHARS);
    }

    #[test]
    fn test_prepend_places_item_first_and_keeps_order() {
        let mut recs: Recommendations = vec![
            RecommendationItem::new("a", "", None),
            RecommendationItem::new("b", "", None),
        ]
        .into();
        recs.prepend(RecommendationItem::new("trusted", "", None));
        recs.push(RecommendationItem::new("c", "", None));
        assert_eq!(recs.titles(), vec!["trusted", "a", "b", "c"]);
    }

    #[test]
    fn test_extracted_posting_default_is_empty() {
        assert!(ExtractedPosting::default().is_empty());
        let posting = ExtractedPosting {
            title: Some("Motorista".to_string()),
            ..Default::default()
        };
        assert!(!posting.is_empty());
    }
}
