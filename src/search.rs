//! Filter catalogs and the fixture lead set served by search.

use crate::mock_data::COMPANY_SIZE_BUCKETS;
use crate::models::Lead;
use serde::{Deserialize, Serialize};

pub const INDUSTRIES: [&str; 10] = [
    "SaaS",
    "FinTech",
    "E-commerce",
    "Healthcare",
    "EdTech",
    "MarTech",
    "PropTech",
    "InsurTech",
    "HRTech",
    "LogTech",
];

pub const COUNTRIES: [&str; 8] = [
    "United States",
    "Canada",
    "United Kingdom",
    "Germany",
    "France",
    "Netherlands",
    "Australia",
    "Singapore",
];

pub const FILTER_TECHNOLOGIES: [&str; 10] = [
    "React",
    "Node.js",
    "Python",
    "AWS",
    "Salesforce",
    "HubSpot",
    "Stripe",
    "Shopify",
    "WordPress",
    "Slack",
];

/// Choices offered for each search filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub industries: Vec<&'static str>,
    pub company_sizes: Vec<&'static str>,
    pub countries: Vec<&'static str>,
    pub technologies: Vec<&'static str>,
}

pub fn filter_options() -> FilterOptions {
    FilterOptions {
        industries: INDUSTRIES.to_vec(),
        company_sizes: COMPANY_SIZE_BUCKETS.to_vec(),
        countries: COUNTRIES.to_vec(),
        technologies: FILTER_TECHNOLOGIES.to_vec(),
    }
}

/// Search criteria. Empty fields match every lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub keywords: String,
    pub industry: String,
    pub company_size: String,
    pub country: String,
    pub tech_stack: Vec<String>,
}

impl SearchFilters {
    pub fn matches(&self, lead: &Lead) -> bool {
        let keywords = self.keywords.trim().to_lowercase();
        if !keywords.is_empty() {
            let haystacks = [
                lead.company_name.as_str(),
                lead.industry.as_str(),
                lead.description.as_deref().unwrap_or(""),
            ];
            if !haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&keywords))
            {
                return false;
            }
        }

        if !field_matches(&self.industry, &lead.industry)
            || !field_matches(&self.company_size, &lead.company_size)
            || !field_matches(&self.country, &lead.country)
        {
            return false;
        }

        self.tech_stack
            .iter()
            .all(|tech| lead.tech_stack.iter().any(|t| t == tech))
    }
}

fn field_matches(filter: &str, value: &str) -> bool {
    let filter = filter.trim();
    filter.is_empty() || filter == value
}

/// Fixture leads, filtered.
pub fn search(filters: &SearchFilters) -> Vec<Lead> {
    let results: Vec<Lead> = sample_leads()
        .into_iter()
        .filter(|lead| filters.matches(lead))
        .collect();

    tracing::debug!("Search {:?} matched {} lead(s)", filters, results.len());
    results
}

/// The four demo leads.
pub fn sample_leads() -> Vec<Lead> {
    vec![
        fixture(
            "1",
            "TechFlow Solutions",
            "techflow.com",
            "SaaS",
            "51-200",
            "United States",
            "Sarah Johnson, VP Sales",
            "sarah.johnson@techflow.com",
            &["React", "AWS", "Salesforce", "HubSpot"],
            "B2B productivity software for remote teams",
        ),
        fixture(
            "2",
            "DataVault Inc",
            "datavault.com",
            "FinTech",
            "101-500",
            "Canada",
            "Michael Chen, CEO",
            "m.chen@datavault.com",
            &["Python", "AWS", "Stripe", "Slack"],
            "Enterprise data analytics platform",
        ),
        fixture(
            "3",
            "GrowthTech",
            "growthtech.io",
            "MarTech",
            "11-50",
            "United Kingdom",
            "Emma Wilson, Head of Growth",
            "emma@growthtech.io",
            &["Node.js", "MongoDB", "HubSpot"],
            "Marketing automation for e-commerce",
        ),
        fixture(
            "4",
            "CloudSecure",
            "cloudsecure.com",
            "Cybersecurity",
            "201-500",
            "Germany",
            "Hans Mueller, CTO",
            "h.mueller@cloudsecure.com",
            &["Java", "AWS", "Kubernetes"],
            "Cloud security solutions for enterprises",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn fixture(
    id: &str,
    name: &str,
    domain: &str,
    industry: &str,
    size: &str,
    country: &str,
    key_person: &str,
    email: &str,
    tech_stack: &[&str],
    description: &str,
) -> Lead {
    let slug = domain.split('.').next().unwrap_or(domain);
    let mut lead = Lead::new(
        id,
        name,
        format!("https://{}", domain),
        industry,
        size,
        country,
    );
    lead.linkedin_url = Some(format!("https://linkedin.com/company/{}", slug));
    lead.key_person = Some(key_person.to_string());
    lead.email = Some(email.to_string());
    lead.tech_stack = tech_stack.iter().map(|t| t.to_string()).collect();
    lead.description = Some(description.to_string());
    lead
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(leads: &[Lead]) -> Vec<&str> {
        leads.iter().map(|l| l.company_name.as_str()).collect()
    }

    #[test]
    fn test_filter_options_share_the_size_buckets() {
        let options = filter_options();
        assert_eq!(options.company_sizes, COMPANY_SIZE_BUCKETS.to_vec());
        assert_eq!(options.industries.len(), 10);
        assert!(options.countries.contains(&"Canada"));

        let filters = SearchFilters {
            industry: options.industries[0].to_string(),
            ..Default::default()
        };
        assert_eq!(names(&search(&filters)), vec!["TechFlow Solutions"]);
    }

    #[test]
    fn test_empty_filters_return_everything() {
        assert_eq!(search(&SearchFilters::default()).len(), 4);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let filters = SearchFilters {
            keywords: "ANALYTICS".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&search(&filters)), vec!["DataVault Inc"]);

        let filters = SearchFilters {
            keywords: "martech".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&search(&filters)), vec!["GrowthTech"]);
    }

    #[test]
    fn test_tech_filter_requires_every_selected_technology() {
        let filters = SearchFilters {
            tech_stack: vec!["AWS".to_string()],
            ..Default::default()
        };
        assert_eq!(search(&filters).len(), 3);

        let filters = SearchFilters {
            tech_stack: vec!["AWS".to_string(), "HubSpot".to_string()],
            ..Default::default()
        };
        assert_eq!(names(&search(&filters)), vec!["TechFlow Solutions"]);
    }

    #[test]
    fn test_combined_filters() {
        let filters = SearchFilters {
            country: "Germany".to_string(),
            company_size: "201-500".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&search(&filters)), vec!["CloudSecure"]);

        let filters = SearchFilters {
            country: "France".to_string(),
            ..Default::default()
        };
        assert!(search(&filters).is_empty());
    }

    #[test]
    fn test_fixture_links() {
        let leads = sample_leads();
        assert_eq!(leads[2].website, "https://growthtech.io");
        assert_eq!(
            leads[2].linkedin_url.as_deref(),
            Some("https://linkedin.com/company/growthtech")
        );
    }
}
