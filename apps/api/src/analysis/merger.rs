//! Risk merger: applies URL trust evidence to the model's findings.

use tracing::debug;

use crate::analysis::extraction::gate_explanations;
use crate::analysis::models::{RawFindings, RiskAssessment, RiskCategory};
use crate::analysis::recommendations::{job_portal_caution, trusted_source};
use crate::analysis::trust::{DomainType, TrustClassification};

/// Produces the final assessment.
///
/// Only a trusted classification changes anything:
/// - institutional domains clear `urlSuspicious` and get a trusted-source item,
/// - job portals keep every score but get a caution item,
/// - other trusted domains get a trusted-source item.
///
/// Trust-derived items lead both recommendation lists. The overall level and
/// score are never touched.
pub fn merge(findings: RawFindings, trust: Option<&TrustClassification>) -> RiskAssessment {
    let RawFindings {
        risk_level,
        score,
        alerts,
        mut recommendations,
        mut detailed_recommendations,
        mut category_scores,
        suspicious_excerpts,
        mut category_explanations,
    } = findings;

    if let Some(trust) = trust.filter(|t| t.is_trusted) {
        debug!(
            "Applying trust evidence: domain={:?} type={:?}",
            trust.domain, trust.domain_type
        );

        if trust.domain_type.overrides_url_suspicion() {
            category_scores.set(RiskCategory::UrlSuspicious, 0);
            gate_explanations(&mut category_explanations, &category_scores);
        }

        let item = match trust.domain_type {
            DomainType::JobPortal => job_portal_caution(&trust.reason),
            _ => trusted_source(&trust.reason),
        };
        recommendations.insert(0, item.title.clone());
        detailed_recommendations.prepend(item);
    }

    RiskAssessment {
        risk_level,
        score,
        alerts,
        recommendations,
        detailed_recommendations,
        category_scores,
        suspicious_excerpts,
        category_explanations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{
        CategoryScores, CategoryTexts, RecommendationItem, Recommendations, RiskLevel,
    };
    use crate::analysis::recommendations::{JOB_PORTAL_CAUTION_TITLE, TRUSTED_SOURCE_TITLE};
    use crate::analysis::trust::classify;

    fn findings_with_url_score(url_score: u8) -> RawFindings {
        let mut category_scores = CategoryScores::default();
        category_scores.set(RiskCategory::UrlSuspicious, url_score);
        category_scores.set(RiskCategory::ContactSuspicious, 60);

        let mut category_explanations = CategoryTexts::default();
        category_explanations.set(
            RiskCategory::UrlSuspicious,
            Some("Domínio desconhecido".to_string()),
        );
        category_explanations.set(
            RiskCategory::ContactSuspicious,
            Some("Apenas WhatsApp".to_string()),
        );

        let detailed: Recommendations = vec![RecommendationItem::new(
            "Não envie dinheiro",
            "Pedido de taxa de inscrição",
            None,
        )]
        .into();

        RawFindings {
            risk_level: RiskLevel::High,
            score: 78,
            alerts: vec!["Contato apenas por WhatsApp".to_string()],
            recommendations: detailed.titles(),
            detailed_recommendations: detailed,
            category_scores,
            suspicious_excerpts: CategoryTexts::default(),
            category_explanations,
        }
    }

    #[test]
    fn test_government_domain_clears_url_suspicion() {
        let trust = classify("https://www.gov.mz/vagas/123");
        let assessment = merge(findings_with_url_score(85), Some(&trust));

        assert_eq!(*assessment.category_scores.get(RiskCategory::UrlSuspicious), 0);
        assert!(assessment
            .category_explanations
            .get(RiskCategory::UrlSuspicious)
            .is_none());
        assert_eq!(*assessment.category_scores.get(RiskCategory::ContactSuspicious), 60);
        assert!(assessment
            .category_explanations
            .get(RiskCategory::ContactSuspicious)
            .is_some());
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.score, 78);
        assert_eq!(
            assessment.detailed_recommendations.first().unwrap().title,
            TRUSTED_SOURCE_TITLE
        );
    }

    #[test]
    fn test_job_portal_keeps_scores_and_leads_with_caution() {
        let trust = classify("https://www.linkedin.com/jobs/view/123");
        let assessment = merge(findings_with_url_score(85), Some(&trust));

        assert_eq!(*assessment.category_scores.get(RiskCategory::UrlSuspicious), 85);
        let first = assessment.detailed_recommendations.first().unwrap();
        assert_eq!(first.title, JOB_PORTAL_CAUTION_TITLE);
        assert!(first.explanation.contains(&trust.reason));
        assert_eq!(
            assessment.detailed_recommendations.titles(),
            vec![JOB_PORTAL_CAUTION_TITLE, "Não envie dinheiro"]
        );
        assert_eq!(assessment.recommendations[0], JOB_PORTAL_CAUTION_TITLE);
    }

    #[test]
    fn test_generic_trusted_domain_gets_trusted_source_item() {
        let trust = TrustClassification {
            is_trusted: true,
            trust_level: crate::analysis::trust::TrustLevel::High,
            domain_type: DomainType::TrustedDomain,
            reason: "Domínio confiável conhecido".to_string(),
            domain: Some("example.org".to_string()),
        };
        let assessment = merge(findings_with_url_score(50), Some(&trust));

        assert_eq!(*assessment.category_scores.get(RiskCategory::UrlSuspicious), 50);
        assert_eq!(
            assessment.detailed_recommendations.first().unwrap().title,
            TRUSTED_SOURCE_TITLE
        );
        assert_eq!(assessment.detailed_recommendations.len(), 2);
    }

    #[test]
    fn test_untrusted_domain_passes_findings_through() {
        let findings = findings_with_url_score(85);
        let trust = classify("https://ganhe-dinheiro-facil.xyz/vaga");
        let assessment = merge(findings.clone(), Some(&trust));

        assert_eq!(assessment.category_scores, findings.category_scores);
        assert_eq!(assessment.detailed_recommendations, findings.detailed_recommendations);
        assert_eq!(assessment.recommendations, findings.recommendations);
    }

    #[test]
    fn test_missing_trust_passes_findings_through() {
        let findings = findings_with_url_score(40);
        let assessment = merge(findings.clone(), None);

        assert_eq!(assessment.risk_level, findings.risk_level);
        assert_eq!(assessment.alerts, findings.alerts);
        assert_eq!(assessment.category_scores, findings.category_scores);
        assert_eq!(assessment.category_explanations, findings.category_explanations);
        assert_eq!(assessment.detailed_recommendations, findings.detailed_recommendations);
    }
}
