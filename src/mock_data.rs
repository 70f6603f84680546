//! Deterministic stand-ins for third-party enrichment data.
//!
//! Used when a provider has no API key or its call fails. The values have the
//! same shape as a live response, so callers cannot tell them apart.

use crate::hashing::stable_hash;
use crate::models::{EnrichmentData, SocialProfiles};

/// Company size buckets, smallest first.
pub const COMPANY_SIZE_BUCKETS: [&str; 6] =
    ["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];

/// Technologies mock tech stacks are drawn from.
pub const TECHNOLOGY_CATALOG: [&str; 19] = [
    "React",
    "Angular",
    "Vue.js",
    "Node.js",
    "Python",
    "AWS",
    "Google Cloud",
    "Salesforce",
    "HubSpot",
    "Stripe",
    "Slack",
    "Zoom",
    "Shopify",
    "WordPress",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "Docker",
    "Kubernetes",
];

/// Firmographic mock data derived from the domain hash.
pub fn mock_company_data(domain: &str) -> EnrichmentData {
    let hash = stable_hash(domain) as u64;

    let sector = if domain.contains("tech") {
        "technology"
    } else {
        "business"
    };

    EnrichmentData {
        company_size: Some(COMPANY_SIZE_BUCKETS[(hash % 6) as usize].to_string()),
        founded_year: Some(2010 + (hash % 14) as i32),
        funding: (hash % 3 == 0).then(|| format!("${}M", hash % 50 + 1)),
        domain_authority: Some((30 + hash % 60) as f64),
        employee_count: Some(2u64.pow((hash % 10) as u32) * 10),
        description: Some(format!("Innovative company in the {} sector.", sector)),
        ..Default::default()
    }
}

/// Between three and seven consecutive catalog entries, offset by the hash.
pub fn mock_tech_stack(domain: &str) -> Vec<String> {
    let hash = stable_hash(domain) as u64;
    let count = 3 + hash % 5;

    (0..count)
        .map(|i| {
            let idx = ((hash + i) % TECHNOLOGY_CATALOG.len() as u64) as usize;
            TECHNOLOGY_CATALOG[idx].to_string()
        })
        .collect()
}

/// Likely social profile URLs for a domain or website.
pub fn social_profiles(domain: &str) -> SocialProfiles {
    let base = domain
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let base = base.strip_suffix('/').unwrap_or(base);
    let company = base.split('.').next().unwrap_or(base);

    SocialProfiles {
        linkedin: Some(format!("https://linkedin.com/company/{}", company)),
        twitter: Some(format!("https://twitter.com/{}", company)),
        facebook: Some(format!("https://facebook.com/{}", company)),
    }
}

/// Maps a head count to a size bucket. Unknown counts default to "11-50".
pub fn map_employee_count(count: Option<u64>) -> String {
    let bucket = match count.unwrap_or(0) {
        0 => "11-50",
        1..=10 => "1-10",
        11..=50 => "11-50",
        51..=200 => "51-200",
        201..=500 => "201-500",
        501..=1000 => "501-1000",
        _ => "1000+",
    };
    bucket.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_company_data_known_domain() {
        // stable_hash("techflow.com") == 1_741_910_359
        let data = mock_company_data("techflow.com");
        assert_eq!(data.company_size.as_deref(), Some("11-50"));
        assert_eq!(data.founded_year, Some(2017));
        assert_eq!(data.funding, None);
        assert_eq!(data.domain_authority, Some(49.0));
        assert_eq!(data.employee_count, Some(5120));
        assert_eq!(
            data.description.as_deref(),
            Some("Innovative company in the technology sector.")
        );
    }

    #[test]
    fn test_mock_company_data_with_funding() {
        // stable_hash("ab") == 3105, divisible by 3
        let data = mock_company_data("ab");
        assert_eq!(data.company_size.as_deref(), Some("201-500"));
        assert_eq!(data.founded_year, Some(2021));
        assert_eq!(data.funding.as_deref(), Some("$6M"));
        assert_eq!(data.domain_authority, Some(75.0));
        assert_eq!(data.employee_count, Some(320));
        assert_eq!(
            data.description.as_deref(),
            Some("Innovative company in the business sector.")
        );
    }

    #[test]
    fn test_mock_tech_stack_known_domain() {
        assert_eq!(
            mock_tech_stack("techflow.com"),
            vec!["Zoom", "Shopify", "WordPress", "PostgreSQL", "MongoDB", "Redis", "Docker"]
        );
        assert_eq!(mock_tech_stack("ab"), vec!["HubSpot", "Stripe", "Slack"]);
    }

    #[test]
    fn test_mock_tech_stack_wraps_catalog() {
        // stable_hash("") == 0
        assert_eq!(mock_tech_stack(""), vec!["React", "Angular", "Vue.js"]);
    }

    #[test]
    fn test_mock_data_is_deterministic() {
        assert_eq!(mock_company_data("acme.io"), mock_company_data("acme.io"));
        assert_eq!(mock_tech_stack("acme.io"), mock_tech_stack("acme.io"));
    }

    #[test]
    fn test_social_profiles_strip_scheme() {
        let profiles = social_profiles("https://growthtech.io/");
        assert_eq!(
            profiles.linkedin.as_deref(),
            Some("https://linkedin.com/company/growthtech")
        );
        assert_eq!(
            profiles.twitter.as_deref(),
            Some("https://twitter.com/growthtech")
        );
        assert_eq!(
            profiles.facebook.as_deref(),
            Some("https://facebook.com/growthtech")
        );
    }

    #[test]
    fn test_map_employee_count() {
        assert_eq!(map_employee_count(None), "11-50");
        assert_eq!(map_employee_count(Some(0)), "11-50");
        assert_eq!(map_employee_count(Some(10)), "1-10");
        assert_eq!(map_employee_count(Some(50)), "11-50");
        assert_eq!(map_employee_count(Some(200)), "51-200");
        assert_eq!(map_employee_count(Some(500)), "201-500");
        assert_eq!(map_employee_count(Some(1000)), "501-1000");
        assert_eq!(map_employee_count(Some(1001)), "1000+");
    }
}
