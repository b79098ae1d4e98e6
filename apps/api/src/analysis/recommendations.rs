//! Static recommendation catalog.

use crate::analysis::models::RecommendationItem;

pub const MANUAL_VERIFICATION_TITLE: &str = "Verifique manualmente a oportunidade";
pub const JOB_PORTAL_CAUTION_TITLE: &str = "Portal de empregos conhecido - mas mantenha cautela";
pub const TRUSTED_SOURCE_TITLE: &str = "URL de fonte confiável identificada";

/// Generic four-step safety checklist for postings where the model gave no advice.
pub fn generic_safety_checklist() -> Vec<RecommendationItem> {
    vec![
        RecommendationItem::new(
            "Pesquise a empresa antes de prosseguir",
            "Mesmo que a oportunidade pareça legítima, é sempre recomendável pesquisar \
             informações sobre a empresa em sites oficiais, redes sociais e plataformas de \
             avaliação profissional antes de se candidatar.",
            None,
        ),
        RecommendationItem::new(
            "Verifique a identidade do contato",
            "Confirme que o contato fornecido realmente pertence à empresa anunciada. \
             Prefira comunicação através de canais oficiais da empresa quando possível.",
            None,
        ),
        RecommendationItem::new(
            "Nunca forneça informações sensíveis prematuramente",
            "Empresas legítimas não solicitam informações bancárias, senhas ou documentos \
             pessoais antes de uma entrevista formal ou processo de seleção estabelecido.",
            None,
        ),
        RecommendationItem::new(
            "Mantenha-se informado sobre golpes",
            "Fique atento a sinais comuns de golpes como promessas de ganhos fáceis, pressão \
             para decisão rápida ou solicitação de pagamento antecipado.",
            None,
        ),
    ]
}

/// Closing item of the fallback findings. `error` is the underlying failure when
/// the model call itself failed.
pub fn manual_verification(error: Option<&str>) -> RecommendationItem {
    let explanation = match error {
        Some(error) => format!(
            "Ocorreu um erro durante a análise automática ({error}). Por favor, revise \
             cuidadosamente a oportunidade antes de tomar qualquer decisão e considere \
             consultar autoridades competentes se identificar sinais suspeitos."
        ),
        None => "Não foi possível realizar a análise automática completa. Por favor, revise \
                 cuidadosamente a oportunidade antes de tomar qualquer decisão."
            .to_string(),
    };
    RecommendationItem::new(MANUAL_VERIFICATION_TITLE, explanation, None)
}

pub fn job_portal_caution(trust_reason: &str) -> RecommendationItem {
    RecommendationItem::new(
        JOB_PORTAL_CAUTION_TITLE,
        format!(
            "A oportunidade foi encontrada em {trust_reason}. Mesmo portais confiáveis podem \
             ter anúncios falsos ou golpes. Sempre verifique a legitimidade da empresa e do \
             anúncio antes de prosseguir."
        ),
        None,
    )
}

pub fn trusted_source(trust_reason: &str) -> RecommendationItem {
    RecommendationItem::new(
        TRUSTED_SOURCE_TITLE,
        format!(
            "A oportunidade foi encontrada em {trust_reason}. Isso é um indicador positivo de \
             legitimidade, mas ainda assim mantenha as precauções de segurança."
        ),
        None,
    )
}
