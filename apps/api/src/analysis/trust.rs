//! Trust registry: classifies a posting URL against a curated allow-list of domains.
//!
//! Classification is pure and recomputed per request. Malformed input never
//! fails; it simply yields an untrusted, UNKNOWN classification.

use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrustLevel {
    High,
    Low,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainType {
    JobPortal,
    GovernmentOrganization,
    TechCompany,
    LocalCompany,
    NewsSite,
    Ngo,
    TrustedDomain,
    Unknown,
}

impl DomainType {
    /// Trusted domains of these types are strong enough evidence to clear the
    /// model's URL suspicion.
    pub fn overrides_url_suspicion(&self) -> bool {
        matches!(
            self,
            Self::GovernmentOrganization
                | Self::TechCompany
                | Self::LocalCompany
                | Self::NewsSite
                | Self::Ngo
        )
    }

    fn trust_reason(&self) -> &'static str {
        match self {
            Self::JobPortal => "Portal de empregos conhecido (mas mantenha cautela - mesmo portais confiáveis podem ter anúncios falsos)",
            Self::GovernmentOrganization => "Organização governamental ou internacional confiável",
            Self::TechCompany => "Empresa de tecnologia conhecida",
            Self::LocalCompany => "Empresa local conhecida",
            Self::NewsSite => "Site de notícias confiável",
            Self::Ngo => "ONG confiável",
            Self::TrustedDomain => "Domínio confiável conhecido",
            Self::Unknown => "URL não reconhecida como confiável",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustClassification {
    pub is_trusted: bool,
    pub trust_level: TrustLevel,
    pub domain_type: DomainType,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl TrustClassification {
    fn unknown(reason: &str, domain: Option<String>) -> Self {
        Self {
            is_trusted: false,
            trust_level: TrustLevel::Unknown,
            domain_type: DomainType::Unknown,
            reason: reason.to_string(),
            domain,
        }
    }
}

const TRUSTED_DOMAINS: &[&str] = &[
    // Job portals
    "linkedin.com",
    "linkedin.co.mz",
    "indeed.com",
    "indeed.co.mz",
    "glassdoor.com",
    "glassdoor.co.mz",
    "reed.co.uk",
    "reed.co.mz",
    "emprego.co.mz",
    "emprego.co.za",
    "jobartis.co.mz",
    "jobartis.co.za",
    "jobs.co.mz",
    "jobs.co.za",
    "vagas.co.mz",
    "vagas.co.za",
    // International organizations
    "unodc.org",
    "un.org",
    "worldbank.org",
    "imf.org",
    "who.int",
    "unicef.org",
    "undp.org",
    // Governments
    "gov.mz",
    "gov.za",
    "gov.br",
    "gov.uk",
    // Tech and consumer multinationals
    "microsoft.com",
    "google.com",
    "apple.com",
    "amazon.com",
    "facebook.com",
    "meta.com",
    "netflix.com",
    "spotify.com",
    "uber.com",
    "airbnb.com",
    "tesla.com",
    "spacex.com",
    "ibm.com",
    "oracle.com",
    "salesforce.com",
    "adobe.com",
    "intel.com",
    "nvidia.com",
    "cisco.com",
    "vmware.com",
    "redhat.com",
    // Academic institutions
    "harvard.edu",
    "mit.edu",
    "stanford.edu",
    "cambridge.ac.uk",
    "oxford.ac.uk",
    "up.ac.za",
    "uct.ac.za",
    "wits.ac.za",
    "uem.mz",
    "up.ac.mz",
    "isctem.ac.mz",
    // News outlets
    "bbc.com",
    "cnn.com",
    "reuters.com",
    "dw.com",
    "france24.com",
    "aljazeera.com",
    "rt.com",
    "sputniknews.com",
    "noticias.sapo.mz",
    "opais.co.mz",
    "jornalnoticias.co.mz",
    "verdade.co.mz",
    // NGOs
    "amnesty.org",
    "hrw.org",
    "transparency.org",
    "oxfam.org",
    "msf.org",
    "doctorswithoutborders.org",
    "redcross.org",
    "unhcr.org",
    "wfp.org",
    "fao.org",
    "ilo.org",
    // Companies operating in Mozambique
    "mcel.co.mz",
    "vodacom.co.mz",
    "movitel.co.mz",
    "bci.co.mz",
    "bancounico.co.mz",
    "bancobci.co.mz",
    "bancobm.co.mz",
    "coca-cola.co.mz",
    "pepsi.co.mz",
    "nestle.co.mz",
    "unilever.co.mz",
    "procter.co.mz",
    "gamble.co.mz",
    "shell.co.mz",
    "total.co.mz",
    "exxonmobil.co.mz",
    "sasol.co.mz",
    "sasol.co.za",
    "sasol.com",
];

/// Keyword groups in precedence order. The first group with a substring hit
/// decides the domain type, so a domain matching several groups (a
/// government jobs board, say) lands in the earliest one.
const DOMAIN_KEYWORD_GROUPS: &[(DomainType, &[&str])] = &[
    (
        DomainType::JobPortal,
        &[
            "linkedin",
            "indeed",
            "glassdoor",
            "monster",
            "reed",
            "totaljobs",
            "ziprecruiter",
            "careerbuilder",
            "simplyhired",
            "emprego",
            "jobartis",
            "jobs",
            "vagas",
            "trabalho",
        ],
    ),
    (
        DomainType::GovernmentOrganization,
        &[
            "unodc",
            "un.org",
            "gov.",
            "edu.",
            "worldbank",
            "imf",
            "who.int",
            "unicef",
            "undp",
        ],
    ),
    (
        DomainType::TechCompany,
        &[
            "microsoft",
            "google",
            "apple",
            "amazon",
            "facebook",
            "meta",
            "netflix",
            "spotify",
            "uber",
            "airbnb",
            "tesla",
            "spacex",
            "ibm",
            "oracle",
            "salesforce",
            "adobe",
            "intel",
            "nvidia",
            "cisco",
            "vmware",
            "redhat",
        ],
    ),
    (
        DomainType::LocalCompany,
        &[
            "mcel",
            "vodacom",
            "movitel",
            "bci",
            "bancounico",
            "bancobci",
            "bancobm",
            "coca-cola",
            "pepsi",
            "nestle",
            "unilever",
            "procter",
            "gamble",
            "shell",
            "total",
            "exxonmobil",
            "sasol",
        ],
    ),
    (
        DomainType::NewsSite,
        &[
            "bbc",
            "cnn",
            "reuters",
            "ap.org",
            "bloomberg",
            "wsj",
            "nytimes",
            "washingtonpost",
            "theguardian",
            "independent",
            "dw",
            "france24",
            "aljazeera",
            "rt",
            "sputniknews",
            "noticias.sapo",
            "opais",
            "jornalnoticias",
            "verdade",
        ],
    ),
    (
        DomainType::Ngo,
        &[
            "amnesty",
            "hrw",
            "transparency",
            "oxfam",
            "msf",
            "doctorswithoutborders",
            "redcross",
            "unicef",
            "unhcr",
            "wfp",
            "fao",
            "ilo",
        ],
    ),
];

/// Classifies `url` against the trust registry.
pub fn classify(url: &str) -> TrustClassification {
    if url.trim().is_empty() {
        return TrustClassification::unknown("URL não fornecida", None);
    }

    let Some(domain) = normalize_domain(url) else {
        return TrustClassification::unknown("URL inválida ou sem domínio", None);
    };

    if !TRUSTED_DOMAINS.contains(&domain.as_str()) {
        return TrustClassification {
            is_trusted: false,
            trust_level: TrustLevel::Low,
            domain_type: DomainType::Unknown,
            reason: DomainType::Unknown.trust_reason().to_string(),
            domain: Some(domain),
        };
    }

    let domain_type = categorize_domain(&domain);
    TrustClassification {
        is_trusted: true,
        trust_level: TrustLevel::High,
        domain_type,
        reason: domain_type.trust_reason().to_string(),
        domain: Some(domain),
    }
}

/// Trims `url` and prefixes `https://` unless it already has an http(s) scheme.
pub fn with_default_scheme(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Reduces a URL to its lowercase host without a leading `www.`.
/// Schemeless input such as `linkedin.com/jobs/1` is read as https.
pub fn normalize_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(&with_default_scheme(url)).ok()?;

    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() {
        return None;
    }
    Some(host.to_string())
}

/// Picks the domain type for a registry member by keyword-group precedence.
pub fn categorize_domain(domain: &str) -> DomainType {
    DOMAIN_KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| domain.contains(k)))
        .map(|(domain_type, _)| *domain_type)
        .unwrap_or(DomainType::TrustedDomain)
}
