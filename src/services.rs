//! Clients for the third-party enrichment providers.
//!
//! Each client performs one call and reports failures as
//! `AppError::ExternalApiError`. Fallback decisions are made by
//! [`crate::enrichment::EnrichmentService`], not here.

use crate::errors::AppError;
use crate::models::{EmailStatus, EnrichmentData};
use crate::mock_data::map_employee_count;
use reqwest::Client;
use serde::Deserialize;

async fn error_for_status(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    tracing::error!("{} returned error {}: {}", provider, status, error_text);
    Err(AppError::ExternalApiError(format!(
        "{} returned status {}: {}",
        provider, status, error_text
    )))
}

// ============ Hunter (email verification) ============

#[derive(Debug, Deserialize)]
struct HunterResponse {
    data: Option<HunterVerification>,
}

#[derive(Debug, Deserialize)]
struct HunterVerification {
    status: Option<String>,
    result: Option<String>,
}

pub struct HunterClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HunterClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Verifies an email address.
    pub async fn verify_email(&self, email: &str) -> Result<EmailStatus, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/v2/email-verifier", self.base_url),
            &[("email", email), ("api_key", self.api_key.as_str())],
        )
        .map_err(|e| AppError::ExternalApiError(format!("Failed to build URL: {}", e)))?;

        tracing::debug!(
            "Hunter URL: {}/v2/email-verifier?email={}&api_key=[REDACTED]",
            self.base_url,
            email
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Hunter request failed: {}", e)))?;
        let response = error_for_status("Hunter", response).await?;

        let body: HunterResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse Hunter response: {}", e))
        })?;

        let verdict = body.data.and_then(|d| d.status.or(d.result));
        Ok(EmailStatus::from_provider(verdict.as_deref()))
    }
}

// ============ Clearbit (company data) ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClearbitCompany {
    founded_year: Option<i32>,
    description: Option<String>,
    metrics: Option<ClearbitMetrics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClearbitMetrics {
    employees: Option<u64>,
    raised: Option<u64>,
    alexa_us_rank: Option<u64>,
}

pub struct ClearbitClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ClearbitClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Looks up firmographic data for a domain.
    pub async fn find_company(&self, domain: &str) -> Result<EnrichmentData, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/v2/companies/find", self.base_url),
            &[("domain", domain)],
        )
        .map_err(|e| AppError::ExternalApiError(format!("Failed to build URL: {}", e)))?;

        tracing::info!("Fetching Clearbit company data for: {}", domain);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Clearbit request failed: {}", e)))?;
        let response = error_for_status("Clearbit", response).await?;

        let company: ClearbitCompany = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse Clearbit response: {}", e))
        })?;

        Ok(company_data_from_clearbit(company))
    }
}

fn company_data_from_clearbit(company: ClearbitCompany) -> EnrichmentData {
    let metrics = company.metrics;
    let employees = metrics.as_ref().and_then(|m| m.employees);

    EnrichmentData {
        company_size: Some(map_employee_count(employees)),
        founded_year: company.founded_year,
        funding: metrics
            .as_ref()
            .and_then(|m| m.raised)
            .filter(|raised| *raised > 0)
            .map(|raised| format!("${}", raised)),
        domain_authority: metrics
            .as_ref()
            .and_then(|m| m.alexa_us_rank)
            .filter(|rank| *rank > 0)
            .map(domain_authority_from_rank),
        employee_count: employees,
        description: company.description,
        ..Default::default()
    }
}

/// Approximates domain authority from an Alexa US rank.
pub fn domain_authority_from_rank(rank: u64) -> f64 {
    (100.0 - (rank as f64).log10() * 10.0).max(0.0)
}

// ============ BuiltWith (tech stack) ============

#[derive(Debug, Deserialize)]
struct BuiltWithResponse {
    #[serde(rename = "Results", default)]
    results: Vec<BuiltWithResult>,
}

#[derive(Debug, Deserialize)]
struct BuiltWithResult {
    #[serde(rename = "Result")]
    result: Option<BuiltWithPaths>,
}

#[derive(Debug, Deserialize)]
struct BuiltWithPaths {
    #[serde(rename = "Paths", default)]
    paths: Vec<BuiltWithPath>,
}

#[derive(Debug, Deserialize)]
struct BuiltWithPath {
    #[serde(rename = "Technologies", default)]
    technologies: Vec<BuiltWithTechnology>,
}

#[derive(Debug, Deserialize)]
struct BuiltWithTechnology {
    #[serde(rename = "Name")]
    name: String,
}

pub struct BuiltWithClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BuiltWithClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Technologies detected on the first crawled path of a domain.
    pub async fn lookup(&self, domain: &str) -> Result<Vec<String>, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/v20/api.json", self.base_url),
            &[("KEY", self.api_key.as_str()), ("LOOKUP", domain)],
        )
        .map_err(|e| AppError::ExternalApiError(format!("Failed to build URL: {}", e)))?;

        tracing::debug!(
            "BuiltWith URL: {}/v20/api.json?KEY=[REDACTED]&LOOKUP={}",
            self.base_url,
            domain
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("BuiltWith request failed: {}", e)))?;
        let response = error_for_status("BuiltWith", response).await?;

        let body: BuiltWithResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse BuiltWith response: {}", e))
        })?;

        let technologies = body
            .results
            .into_iter()
            .next()
            .and_then(|r| r.result)
            .and_then(|r| r.paths.into_iter().next())
            .map(|p| p.technologies.into_iter().map(|t| t.name).collect())
            .unwrap_or_default();

        Ok(technologies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_authority_from_rank() {
        assert_eq!(domain_authority_from_rank(1), 100.0);
        assert!((domain_authority_from_rank(1_000) - 70.0).abs() < 1e-9);
        assert_eq!(domain_authority_from_rank(u64::MAX), 0.0);
    }

    #[test]
    fn test_clearbit_mapping() {
        let company: ClearbitCompany = serde_json::from_value(serde_json::json!({
            "foundedYear": 2015,
            "description": "Payments infrastructure",
            "metrics": { "employees": 350, "raised": 12000000, "alexaUsRank": 10000 }
        }))
        .unwrap();

        let data = company_data_from_clearbit(company);
        assert_eq!(data.company_size.as_deref(), Some("201-500"));
        assert_eq!(data.founded_year, Some(2015));
        assert_eq!(data.funding.as_deref(), Some("$12000000"));
        assert!((data.domain_authority.unwrap() - 60.0).abs() < 1e-9);
        assert_eq!(data.employee_count, Some(350));
    }

    #[test]
    fn test_clearbit_mapping_without_metrics() {
        let company: ClearbitCompany = serde_json::from_value(serde_json::json!({})).unwrap();
        let data = company_data_from_clearbit(company);
        assert_eq!(data.company_size.as_deref(), Some("11-50"));
        assert_eq!(data.funding, None);
        assert_eq!(data.domain_authority, None);
    }
}
