/// Outreach email generation across template types, tones and fixture leads
use chrono::NaiveDate;
use rust_leadgen_api::models::{PersonaContext, TemplateType, Tone};
use rust_leadgen_api::search::sample_leads;
use rust_leadgen_api::templates::{lookup_template, TemplateBuilder};

fn persona() -> PersonaContext {
    PersonaContext {
        sender_name: "Jordan Lee".to_string(),
        sender_company: "Caprae".to_string(),
        sender_role: "Head of Partnerships".to_string(),
        value_proposition: "shorten your sales cycle".to_string(),
        industry: Some("SaaS".to_string()),
    }
}

fn builder() -> TemplateBuilder {
    TemplateBuilder::with_reference_date(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
}

const SUPPORTED: [(TemplateType, Tone); 5] = [
    (TemplateType::ColdOutreach, Tone::Professional),
    (TemplateType::ColdOutreach, Tone::Friendly),
    (TemplateType::ColdOutreach, Tone::Corporate),
    (TemplateType::FollowUp, Tone::Professional),
    (TemplateType::DemoRequest, Tone::Professional),
];

#[test]
fn test_generation_is_deterministic() {
    let first = builder();
    let second = builder();

    for lead in sample_leads() {
        for (template_type, tone) in SUPPORTED {
            let a = first.generate(&lead, &persona(), template_type, tone);
            let b = second.generate(&lead, &persona(), template_type, tone);
            assert_eq!(a, b, "{} {:?}/{:?}", lead.company_name, template_type, tone);
        }
    }
}

#[test]
fn test_supported_templates_fill_every_placeholder() {
    for lead in sample_leads() {
        for (template_type, tone) in SUPPORTED {
            assert!(lookup_template(template_type, tone).is_some());
            let email = builder().generate(&lead, &persona(), template_type, tone);
            assert!(
                !email.subject.contains("{{") && !email.body.contains("{{"),
                "unfilled placeholder for {} {:?}/{:?}: {}",
                lead.company_name,
                template_type,
                tone,
                email.body
            );
        }
    }
}

#[test]
fn test_unsupported_pairs_render_cold_outreach_professional() {
    let lead = &sample_leads()[0];
    let reference = builder().generate(
        lead,
        &persona(),
        TemplateType::ColdOutreach,
        Tone::Professional,
    );

    for (template_type, tone) in [
        (TemplateType::Introduction, Tone::Professional),
        (TemplateType::FollowUp, Tone::Casual),
        (TemplateType::DemoRequest, Tone::Friendly),
        (TemplateType::ColdOutreach, Tone::Casual),
    ] {
        let email = builder().generate(lead, &persona(), template_type, tone);
        assert_eq!(email.subject, reference.subject);
        assert_eq!(email.body, reference.body);
        // The requested tags are reported back unchanged.
        assert_eq!(email.template_type, template_type);
        assert_eq!(email.tone, tone);
    }
}

#[test]
fn test_greeting_uses_contact_first_name() {
    let leads = sample_leads();

    let techflow = builder().generate(
        &leads[0],
        &persona(),
        TemplateType::ColdOutreach,
        Tone::Corporate,
    );
    assert!(techflow.body.starts_with("Dear Sarah,"));

    // "emma@growthtech.io" has a single-segment local part.
    let growthtech = builder().generate(
        &leads[2],
        &persona(),
        TemplateType::ColdOutreach,
        Tone::Professional,
    );
    assert!(growthtech.body.starts_with("Hi there,"));
}

#[test]
fn test_friendly_tone_mentions_value_proposition() {
    let lead = &sample_leads()[1];
    let email = builder().generate(lead, &persona(), TemplateType::ColdOutreach, Tone::Friendly);

    assert_eq!(email.subject, "Love what DataVault Inc is doing in FinTech!");
    assert!(email
        .body
        .contains("I work with FinTech companies to shorten your sales cycle"));
    assert!(email.body.contains("companies like PaymentCorp"));
}

#[test]
fn test_all_tones_differ_but_share_context() {
    let lead = &sample_leads()[0];
    let emails = builder().generate_all_tones(lead, &persona());

    assert_eq!(emails.len(), 3);
    assert_ne!(emails[0].body, emails[1].body);
    assert_ne!(emails[1].body, emails[2].body);
    assert!(emails.iter().all(|e| e.body.contains("TechFlow Solutions")));
}

#[test]
fn test_follow_up_case_study_uses_industry() {
    let lead = &sample_leads()[3];
    let email = builder().generate(lead, &persona(), TemplateType::FollowUp, Tone::Professional);

    assert_eq!(email.subject, "Following up on our CloudSecure conversation");
    assert!(email
        .body
        .contains("How a Cybersecurity company improved efficiency by 45% in 3 months"));
}
