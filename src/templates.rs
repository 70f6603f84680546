//! Outreach email generation.
//!
//! A raw template is chosen by (type, tone), then every `{{placeholder}}` is
//! filled from a context built from the lead and the sender persona. Context
//! phrases are chosen with [`crate::hashing`] so the same inputs always yield
//! the same copy.

use crate::hashing::pick;
use crate::models::{EmailTemplate, Lead, PersonaContext, TemplateType, Tone};
use chrono::{Duration, Local, NaiveDate};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Subject/body pair before placeholder substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTemplate {
    pub subject: &'static str,
    pub body: &'static str,
}

const COLD_OUTREACH_PROFESSIONAL: RawTemplate = RawTemplate {
    subject: "Quick question about {{company}}'s {{pain_point}}",
    body: "Hi {{contact_name}},

I noticed {{company}} is {{company_context}}. Many {{industry}} companies like yours are looking to {{value_prop_context}}.

We've helped similar companies {{specific_benefit}}. For example, {{example_result}}.

Would you be open to a 15-minute conversation to explore how this could apply to {{company}}?

Best regards,
{{sender_name}}
{{sender_role}} at {{sender_company}}",
};

const COLD_OUTREACH_FRIENDLY: RawTemplate = RawTemplate {
    subject: "Love what {{company}} is doing in {{industry}}!",
    body: "Hi {{contact_name}},

Hope you're having a great week! I came across {{company}} and was really impressed by {{company_context}}.

I work with {{industry}} companies to {{value_proposition}}, and I think there might be a great fit here. We've helped companies like {{example_company}} achieve {{specific_benefit}}.

Would love to chat for 10 minutes about how we could help {{company}} {{main_benefit}}.

When works best for you?

Cheers,
{{sender_name}}",
};

const COLD_OUTREACH_CORPORATE: RawTemplate = RawTemplate {
    subject: "Partnership opportunity for {{company}}",
    body: "Dear {{contact_name}},

I am reaching out regarding a potential partnership opportunity that could benefit {{company}}.

Our platform has demonstrated significant value for {{industry}} organizations, delivering {{key_metrics}}. Given {{company}}'s position in the market and {{company_context}}, I believe there is strong alignment.

I would welcome the opportunity to discuss how our solution could support {{company}}'s {{business_objective}}.

Would you be available for a brief call next week?

Sincerely,
{{sender_name}}
{{sender_title}}
{{sender_company}}",
};

const FOLLOW_UP_PROFESSIONAL: RawTemplate = RawTemplate {
    subject: "Following up on our {{company}} conversation",
    body: "Hi {{contact_name}},

I wanted to follow up on my previous email about {{value_proposition}} for {{company}}.

I understand you're likely busy, but I thought you might be interested in this quick case study: {{case_study_headline}}.

{{specific_result_detail}}

Happy to share more details if this resonates. Would a brief 10-minute call work for you this week?

Best,
{{sender_name}}",
};

const DEMO_REQUEST_PROFESSIONAL: RawTemplate = RawTemplate {
    subject: "{{company}} + {{sender_company}}: 15-minute demo",
    body: "Hi {{contact_name}},

Based on our previous conversation and {{company}}'s focus on {{business_focus}}, I'd love to show you exactly how {{sender_company}} could help {{main_benefit}}.

The demo takes just 15 minutes and covers:
• {{benefit_1}}
• {{benefit_2}}
• {{benefit_3}}

I have availability {{availability}}. What works best for you?

Looking forward to connecting,
{{sender_name}}",
};

/// Looks up the template for an exact (type, tone) pair.
pub fn lookup_template(template_type: TemplateType, tone: Tone) -> Option<RawTemplate> {
    match (template_type, tone) {
        (TemplateType::ColdOutreach, Tone::Professional) => Some(COLD_OUTREACH_PROFESSIONAL),
        (TemplateType::ColdOutreach, Tone::Friendly) => Some(COLD_OUTREACH_FRIENDLY),
        (TemplateType::ColdOutreach, Tone::Corporate) => Some(COLD_OUTREACH_CORPORATE),
        (TemplateType::FollowUp, Tone::Professional) => Some(FOLLOW_UP_PROFESSIONAL),
        (TemplateType::DemoRequest, Tone::Professional) => Some(DEMO_REQUEST_PROFESSIONAL),
        _ => None,
    }
}

/// Template for a (type, tone) pair, falling back to cold outreach /
/// professional when the pair has no template.
pub fn select_template(template_type: TemplateType, tone: Tone) -> RawTemplate {
    match lookup_template(template_type, tone) {
        Some(template) => template,
        None => COLD_OUTREACH_PROFESSIONAL,
    }
}

/// Generates outreach emails for leads.
#[derive(Debug, Clone, Copy)]
pub struct TemplateBuilder {
    reference_date: NaiveDate,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateBuilder {
    /// Builder whose availability text is computed from today's local date.
    pub fn new() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
        }
    }

    /// Builder with a fixed "today", for reproducible availability text.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    /// Generates one email. Never fails.
    pub fn generate(
        &self,
        lead: &Lead,
        persona: &PersonaContext,
        template_type: TemplateType,
        tone: Tone,
    ) -> EmailTemplate {
        let template = select_template(template_type, tone);
        let context = self.build_context(lead, persona);

        EmailTemplate {
            subject: fill_template(template.subject, &context),
            body: fill_template(template.body, &context),
            tone,
            template_type,
        }
    }

    /// Cold outreach in professional, friendly and corporate tones.
    pub fn generate_all_tones(&self, lead: &Lead, persona: &PersonaContext) -> Vec<EmailTemplate> {
        Tone::MULTI_TONE_ORDER
            .iter()
            .map(|tone| self.generate(lead, persona, TemplateType::ColdOutreach, *tone))
            .collect()
    }

    /// Placeholder values for a lead and persona.
    pub fn build_context(
        &self,
        lead: &Lead,
        persona: &PersonaContext,
    ) -> HashMap<&'static str, String> {
        let industry = lead.industry.as_str();
        let persona_industry = persona.industry.as_deref().unwrap_or("");

        HashMap::from([
            ("company", lead.company_name.clone()),
            ("contact_name", extract_contact_name(lead.email.as_deref())),
            ("industry", lead.industry.clone()),
            ("company_context", company_context(lead)),
            ("value_prop_context", value_prop_context(lead, persona_industry)),
            ("value_proposition", persona.value_proposition.clone()),
            ("sender_name", persona.sender_name.clone()),
            ("sender_company", persona.sender_company.clone()),
            ("sender_role", persona.sender_role.clone()),
            ("sender_title", persona.sender_role.clone()),
            ("pain_point", pain_point(industry).to_string()),
            (
                "specific_benefit",
                format!("reduce operational costs by 30% while improving {industry} performance"),
            ),
            ("example_result", example_result(industry).to_string()),
            ("example_company", example_company(industry).to_string()),
            (
                "main_benefit",
                format!("scale their {industry} operations more efficiently"),
            ),
            (
                "key_metrics",
                "up to 40% cost reduction and 60% faster implementation".to_string(),
            ),
            ("business_objective", business_objective(industry).to_string()),
            (
                "case_study_headline",
                format!("How a {industry} company improved efficiency by 45% in 3 months"),
            ),
            (
                "specific_result_detail",
                format!(
                    "They were able to streamline their {industry} processes and achieve significant cost savings while improving team productivity."
                ),
            ),
            ("business_focus", format!("{industry} innovation and growth")),
            ("benefit_1", benefit(1, industry)),
            ("benefit_2", benefit(2, industry)),
            ("benefit_3", benefit(3, industry)),
            ("availability", availability(self.reference_date)),
        ])
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is valid"))
}

/// Replaces every `{{key}}` with its context value.
///
/// Unknown keys and empty values leave the placeholder text untouched.
pub fn fill_template(template: &str, context: &HashMap<&'static str, String>) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures| match context.get(&caps[1]) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// First name from an email local part like `sarah.johnson@...`.
///
/// Needs at least two segments separated by `.`, `_` or `-`; otherwise the
/// greeting falls back to "there".
pub fn extract_contact_name(email: Option<&str>) -> String {
    const FALLBACK: &str = "there";

    let Some(email) = email.filter(|e| !e.is_empty()) else {
        return FALLBACK.to_string();
    };

    let local_part = email.split('@').next().unwrap_or("");
    let segments: Vec<&str> = local_part.split(['.', '_', '-']).collect();
    if segments.len() < 2 {
        return FALLBACK.to_string();
    }

    let mut chars = segments[0].chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn company_context(lead: &Lead) -> String {
    let industry = &lead.industry;
    let contexts = [
        format!("growing rapidly in the {industry} space"),
        format!("leading innovation in {industry}"),
        format!("scaling operations in {}", lead.country),
        format!("expanding their {industry} solutions"),
        format!("building impressive {industry} capabilities"),
    ];
    pick(&contexts, &lead.company_name).clone()
}

fn value_prop_context(lead: &Lead, persona_industry: &str) -> String {
    let industry = &lead.industry;
    let props = [
        format!("streamline their {industry} operations"),
        format!("accelerate growth in {industry}"),
        "optimize their technology stack".to_string(),
        "improve operational efficiency".to_string(),
        "scale their business more effectively".to_string(),
    ];
    let key = format!("{}{}", lead.company_name, persona_industry);
    pick(&props, &key).clone()
}

fn pain_point(industry: &str) -> &'static str {
    match industry {
        "SaaS" => "customer acquisition costs",
        "FinTech" => "regulatory compliance",
        "E-commerce" => "conversion optimization",
        "Healthcare" => "patient data management",
        "EdTech" => "student engagement",
        "MarTech" => "lead attribution",
        _ => "operational efficiency",
    }
}

fn example_result(industry: &str) -> &'static str {
    match industry {
        "SaaS" => "one client reduced churn by 40% in 6 months",
        "FinTech" => "a fintech startup improved compliance efficiency by 60%",
        "E-commerce" => "an e-commerce company increased conversions by 25%",
        _ => "clients typically see 30% efficiency improvements",
    }
}

fn example_company(industry: &str) -> &'static str {
    match industry {
        "SaaS" => "TechFlow Solutions",
        "FinTech" => "PaymentCorp",
        "E-commerce" => "ShopFast",
        _ => "InnovateCorp",
    }
}

fn business_objective(industry: &str) -> &'static str {
    match industry {
        "SaaS" => "growth and customer retention goals",
        "FinTech" => "compliance and risk management objectives",
        "E-commerce" => "conversion and revenue targets",
        _ => "strategic business objectives",
    }
}

fn benefit(index: usize, industry: &str) -> String {
    match index {
        2 => "Real-time performance analytics".to_string(),
        3 => "Seamless integration with existing tools".to_string(),
        _ => format!("{industry}-specific optimization strategies"),
    }
}

/// "<weekday a week out> or <the weekday after>", e.g. "Thursday or Friday".
pub fn availability(today: NaiveDate) -> String {
    let next_week = today + Duration::days(7);
    let day_after = next_week + Duration::days(1);
    format!("{} or {}", next_week.format("%A"), day_after.format("%A"))
}
