/// Property-based tests using proptest
/// Tests invariants that should hold for all leads and inputs
use proptest::prelude::*;
use rust_leadgen_api::hashing::{hash_index, stable_hash};
use rust_leadgen_api::mock_data::{
    mock_company_data, mock_tech_stack, COMPANY_SIZE_BUCKETS, TECHNOLOGY_CATALOG,
};
use rust_leadgen_api::models::Lead;
use rust_leadgen_api::scoring::{LeadScorer, ScoreCategory, TARGET_TECH_STACK};

fn arb_size() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(COMPANY_SIZE_BUCKETS.to_vec()).prop_map(String::from),
        "\\PC{0,12}",
    ]
}

fn arb_tech_stack() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(TECHNOLOGY_CATALOG.to_vec()).prop_map(String::from),
            "[A-Za-z.]{1,10}",
        ],
        0..12,
    )
}

fn arb_lead() -> impl Strategy<Value = Lead> {
    (
        arb_size(),
        arb_tech_stack(),
        prop::option::of(prop::num::f64::ANY),
        prop::option::of(any::<u64>()),
        prop::option::of(prop::sample::select(vec![
            "Seed", "Series A", "Series B", "Series C",
        ])),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::num::f64::ANY),
    )
        .prop_map(
            |(size, tech_stack, da, followers, funding, news, growth)| {
                let mut lead = Lead::new("p", "Prop Co", "https://prop.co", "SaaS", size, "Canada");
                lead.tech_stack = tech_stack;
                lead.domain_authority = da;
                lead.linkedin_followers = followers;
                lead.funding_stage = funding.map(String::from);
                lead.recent_news = news;
                lead.growth_rate = growth;
                lead
            },
        )
}

// Property: scores stay in range and categories follow the overall score
proptest! {
    #[test]
    fn overall_and_factors_stay_in_range(lead in arb_lead()) {
        let score = LeadScorer::new().score(&lead);
        prop_assert!((0.0..=100.0).contains(&score.overall));
        for factor in [
            score.factors.company_size,
            score.factors.tech_stack_match,
            score.factors.domain_authority,
            score.factors.social_presence,
            score.factors.market_timing,
        ] {
            prop_assert!((0.0..=100.0).contains(&factor));
        }
        prop_assert!(score.rounded() <= 100);
    }

    #[test]
    fn category_is_a_function_of_overall(lead in arb_lead()) {
        let score = LeadScorer::new().score(&lead);
        prop_assert_eq!(score.category, ScoreCategory::from_score(score.overall));
    }

    #[test]
    fn reasoning_is_never_empty(lead in arb_lead()) {
        let score = LeadScorer::new().score(&lead);
        prop_assert!(!score.reasoning.is_empty());
        prop_assert!(score.reasoning.len() <= 5);
    }

    #[test]
    fn scoring_is_deterministic(lead in arb_lead()) {
        let scorer = LeadScorer::new();
        prop_assert_eq!(scorer.score(&lead), scorer.score(&lead.clone()));
    }

    #[test]
    fn adding_a_target_technology_never_lowers_the_score(
        lead in arb_lead(),
        tech in prop::sample::select(TARGET_TECH_STACK.to_vec()),
    ) {
        prop_assume!(!lead.tech_stack.is_empty());
        let scorer = LeadScorer::new();
        let before = scorer.score(&lead);

        let mut richer = lead.clone();
        richer.tech_stack.push(tech.to_string());
        let after = scorer.score(&richer);

        prop_assert!(after.factors.tech_stack_match >= before.factors.tech_stack_match);
        prop_assert!(after.overall >= before.overall);
    }

    #[test]
    fn more_followers_never_lowers_social_presence(a in any::<u64>(), b in any::<u64>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let mut lead = Lead::new("p", "Prop Co", "https://prop.co", "SaaS", "51-200", "Canada");

        lead.linkedin_followers = Some(low);
        let low_score = LeadScorer::new().score(&lead).factors.social_presence;
        lead.linkedin_followers = Some(high);
        let high_score = LeadScorer::new().score(&lead).factors.social_presence;

        prop_assert!(high_score >= low_score);
    }
}

// Property: hashing and mock data are pure functions of their input
proptest! {
    #[test]
    fn stable_hash_is_deterministic(input in "\\PC*") {
        prop_assert_eq!(stable_hash(&input), stable_hash(&input.clone()));
    }

    #[test]
    fn hash_index_is_in_bounds(input in "\\PC*", len in 1usize..64) {
        prop_assert!(hash_index(&input, len) < len);
    }

    #[test]
    fn mock_company_data_is_deterministic_and_in_range(domain in "[a-z0-9-]{1,20}\\.(com|io|net)") {
        let data = mock_company_data(&domain);
        prop_assert_eq!(&data, &mock_company_data(&domain));

        let size = data.company_size.clone().unwrap_or_default();
        prop_assert!(COMPANY_SIZE_BUCKETS.contains(&size.as_str()));

        let founded = data.founded_year.unwrap_or_default();
        prop_assert!((2010..=2023).contains(&founded));

        let da = data.domain_authority.unwrap_or_default();
        prop_assert!((30.0..=89.0).contains(&da));

        let employees = data.employee_count.unwrap_or_default();
        prop_assert!((10..=5120).contains(&employees));
    }

    #[test]
    fn mock_tech_stack_has_three_to_seven_catalog_entries(domain in "[a-z0-9-]{1,20}\\.(com|io|net)") {
        let stack = mock_tech_stack(&domain);
        prop_assert!((3..=7).contains(&stack.len()));
        prop_assert!(stack.iter().all(|t| TECHNOLOGY_CATALOG.contains(&t.as_str())));
        prop_assert_eq!(stack, mock_tech_stack(&domain));
    }
}
