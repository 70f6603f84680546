use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============ Lead Models ============

/// Pipeline status of a lead in the sales process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Contacted")]
    Contacted,
    #[serde(rename = "Qualified")]
    Qualified,
    #[serde(rename = "Demo Scheduled")]
    DemoScheduled,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl LeadStatus {
    /// Label used in exports and CRM imports.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::DemoScheduled => "Demo Scheduled",
            LeadStatus::ClosedWon => "Closed Won",
            LeadStatus::ClosedLost => "Closed Lost",
        }
    }
}

/// A prospective company record subject to scoring and outreach.
///
/// Only the firmographic basics are required. Every signal used by the scorer
/// is optional and degrades to a neutral default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Identifier of the lead.
    pub id: String,
    /// Company name.
    pub company_name: String,
    /// Company website URL.
    pub website: String,
    /// Industry label (e.g. "SaaS", "FinTech").
    pub industry: String,
    /// Company size bucket (e.g. "51-200"). Unknown buckets are allowed.
    pub company_size: String,
    /// Country of the company headquarters.
    pub country: String,
    /// Key contact, usually "Name, Title".
    #[serde(default)]
    pub key_person: Option<String>,
    /// Short company description.
    #[serde(default)]
    pub description: Option<String>,
    /// Detected technologies. Order is irrelevant.
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// LinkedIn company page.
    #[serde(default)]
    pub linkedin_url: Option<String>,
    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Domain authority (0-100).
    #[serde(default)]
    pub domain_authority: Option<f64>,
    /// LinkedIn follower count.
    #[serde(default)]
    pub linkedin_followers: Option<u64>,
    /// Funding stage (e.g. "Series A").
    #[serde(default)]
    pub funding_stage: Option<String>,
    /// Whether the company was recently in the news.
    #[serde(default)]
    pub recent_news: Option<bool>,
    /// Growth rate in percentage points.
    #[serde(default)]
    pub growth_rate: Option<f64>,

    // CRM fields
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Pipeline status.
    #[serde(default)]
    pub status: LeadStatus,
    /// Sales notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Date of last contact.
    #[serde(default)]
    pub last_contacted: Option<NaiveDate>,
    /// Owner of the lead.
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl Lead {
    /// Creates a lead with the required fields and every optional signal empty.
    pub fn new(
        id: impl Into<String>,
        company_name: impl Into<String>,
        website: impl Into<String>,
        industry: impl Into<String>,
        company_size: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            company_name: company_name.into(),
            website: website.into(),
            industry: industry.into(),
            company_size: company_size.into(),
            country: country.into(),
            key_person: None,
            description: None,
            tech_stack: Vec::new(),
            linkedin_url: None,
            email: None,
            domain_authority: None,
            linkedin_followers: None,
            funding_stage: None,
            recent_news: None,
            growth_rate: None,
            tags: Vec::new(),
            status: LeadStatus::New,
            notes: None,
            last_contacted: None,
            assigned_to: None,
        }
    }
}

// ============ Outreach Models ============

/// Sender-side context for outreach emails.
///
/// Required-field validation is the caller's job; missing values just produce
/// emptier copy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonaContext {
    pub sender_name: String,
    pub sender_company: String,
    pub sender_role: String,
    pub value_proposition: String,
    #[serde(default)]
    pub industry: Option<String>,
}

/// Stylistic variant of an email template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Casual,
    Corporate,
}

impl Tone {
    /// Tones produced by a multi-tone generation, in order.
    pub const MULTI_TONE_ORDER: [Tone; 3] = [Tone::Professional, Tone::Friendly, Tone::Corporate];
}

/// Purpose of an email template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    #[default]
    ColdOutreach,
    FollowUp,
    DemoRequest,
    Introduction,
}

/// A generated email. Stateless and regenerable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
    pub tone: Tone,
    pub template_type: TemplateType,
}

// ============ Enrichment Models ============

/// Which enrichment steps to run for a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrichmentOptions {
    #[serde(default = "default_true")]
    pub validate_emails: bool,
    #[serde(default = "default_true")]
    pub enrich_company_data: bool,
    #[serde(default = "default_true")]
    pub find_social_profiles: bool,
    #[serde(default = "default_true")]
    pub get_tech_stack: bool,
}

fn default_true() -> bool {
    true
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            validate_emails: true,
            enrich_company_data: true,
            find_social_profiles: true,
            get_tech_stack: true,
        }
    }
}

/// Deliverability status of an email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailStatus {
    Valid,
    Invalid,
    CatchAll,
    Unknown,
}

impl EmailStatus {
    /// Parses a provider verdict. Anything unrecognised is `Unknown`.
    pub fn from_provider(result: Option<&str>) -> Self {
        match result {
            Some("valid") | Some("deliverable") => EmailStatus::Valid,
            Some("invalid") | Some("undeliverable") => EmailStatus::Invalid,
            Some("catch-all") | Some("accept_all") => EmailStatus::CatchAll,
            _ => EmailStatus::Unknown,
        }
    }
}

/// Social profile URLs for a company.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialProfiles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// Firmographic and technographic data produced by enrichment.
///
/// Live provider responses and deterministic mock data share this shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnrichmentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_profiles: Option<SocialProfiles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_status: Option<EmailStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_authority: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Outcome of one enrichment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<EnrichmentData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EnrichmentResult {
    pub fn succeeded(data: EnrichmentData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Patches a lead with the enriched values.
    ///
    /// Only present, non-empty values overwrite. Employee count is used as the
    /// social follower signal when nothing better is known.
    ///
    /// Returns `true` if the result carried data.
    pub fn apply_to(&self, lead: &mut Lead) -> bool {
        let Some(data) = self.data.as_ref().filter(|_| self.success) else {
            return false;
        };

        if let Some(size) = data.company_size.as_ref().filter(|s| !s.is_empty()) {
            lead.company_size = size.clone();
        }
        if let Some(stack) = &data.tech_stack {
            lead.tech_stack = stack.clone();
        }
        if let Some(da) = data.domain_authority.filter(|da| *da != 0.0) {
            lead.domain_authority = Some(da);
        }
        if let Some(count) = data.employee_count.filter(|c| *c != 0) {
            lead.linkedin_followers = Some(count);
        }
        if let Some(linkedin) = data
            .social_profiles
            .as_ref()
            .and_then(|p| p.linkedin.as_ref())
            .filter(|l| !l.is_empty())
        {
            lead.linkedin_url = Some(linkedin.clone());
        }

        true
    }
}

/// Summary of a sequential batch enrichment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEnrichmentReport {
    pub processed: usize,
    pub enriched: usize,
    pub failed: usize,
    pub leads: Vec<Lead>,
}

// ============ API Request Models ============

/// Request body for email generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateEmailRequest {
    pub lead: Lead,
    pub persona: PersonaContext,
    #[serde(default)]
    pub template_type: TemplateType,
    #[serde(default)]
    pub tone: Tone,
}

/// Request body for multi-tone email generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateAllTonesRequest {
    pub lead: Lead,
    pub persona: PersonaContext,
}

/// Request body for a single-lead enrichment.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichRequest {
    /// Domain or website to enrich.
    pub domain: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub options: EnrichmentOptions,
}

/// Request body for a batch enrichment.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchEnrichRequest {
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub options: EnrichmentOptions,
}

/// Request body for export endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    pub leads: Vec<Lead>,
}

/// Request body for webhook sync.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookSyncRequest {
    pub webhook_url: String,
    pub leads: Vec<Lead>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lead() -> Lead {
        Lead::new("1", "Acme", "https://acme.io", "SaaS", "11-50", "Canada")
    }

    #[test]
    fn test_lead_deserializes_with_defaults() {
        let lead: Lead = serde_json::from_value(serde_json::json!({
            "id": "7",
            "company_name": "Acme",
            "website": "https://acme.io",
            "industry": "SaaS",
            "company_size": "11-50",
            "country": "Canada"
        }))
        .unwrap();

        assert!(lead.tech_stack.is_empty());
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.domain_authority, None);
    }

    #[test]
    fn test_enums_use_wire_names() {
        assert_eq!(
            serde_json::to_value(EmailStatus::CatchAll).unwrap(),
            serde_json::json!("catch-all")
        );
        assert_eq!(
            serde_json::to_value(TemplateType::ColdOutreach).unwrap(),
            serde_json::json!("cold_outreach")
        );
        assert_eq!(
            serde_json::to_value(LeadStatus::DemoScheduled).unwrap(),
            serde_json::json!("Demo Scheduled")
        );
    }

    #[test]
    fn test_apply_to_patches_present_values() {
        let mut lead = sample_lead();
        let result = EnrichmentResult::succeeded(EnrichmentData {
            company_size: Some("201-500".to_string()),
            tech_stack: Some(vec!["React".to_string()]),
            domain_authority: Some(64.0),
            employee_count: Some(320),
            social_profiles: Some(SocialProfiles {
                linkedin: Some("https://linkedin.com/company/acme".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert!(result.apply_to(&mut lead));
        assert_eq!(lead.company_size, "201-500");
        assert_eq!(lead.tech_stack, vec!["React".to_string()]);
        assert_eq!(lead.domain_authority, Some(64.0));
        assert_eq!(lead.linkedin_followers, Some(320));
        assert_eq!(
            lead.linkedin_url.as_deref(),
            Some("https://linkedin.com/company/acme")
        );
    }

    #[test]
    fn test_apply_to_ignores_zero_values() {
        let mut lead = sample_lead();
        lead.domain_authority = Some(50.0);
        let result = EnrichmentResult::succeeded(EnrichmentData {
            domain_authority: Some(0.0),
            employee_count: Some(0),
            ..Default::default()
        });

        result.apply_to(&mut lead);
        assert_eq!(lead.domain_authority, Some(50.0));
        assert_eq!(lead.linkedin_followers, None);
    }

    #[test]
    fn test_apply_to_failed_result_is_noop() {
        let mut lead = sample_lead();
        let before = lead.clone();
        assert!(!EnrichmentResult::failed("boom").apply_to(&mut lead));
        assert_eq!(lead, before);
    }

    #[test]
    fn test_email_status_from_provider() {
        assert_eq!(EmailStatus::from_provider(Some("valid")), EmailStatus::Valid);
        assert_eq!(
            EmailStatus::from_provider(Some("accept_all")),
            EmailStatus::CatchAll
        );
        assert_eq!(EmailStatus::from_provider(Some("risky")), EmailStatus::Unknown);
        assert_eq!(EmailStatus::from_provider(None), EmailStatus::Unknown);
    }
}
