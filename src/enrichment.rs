/// Lead enrichment with mock fallback
///
/// This module orchestrates the enrichment workflow for one lead:
/// 1. Validate the contact email (Hunter, or a basic format check)
/// 2. Fetch company data (Clearbit, or deterministic mock data)
/// 3. Detect the tech stack (BuiltWith, or deterministic mock data)
/// 4. Derive social profile URLs
///
/// A provider without a key, with a failing call, or with an open circuit is
/// replaced by its mock counterpart, so callers always get the same shape.
/// Results that needed a fallback for a keyed provider are not cached.
use crate::cache::EnrichmentCache;
use crate::circuit_breaker::{call_guarded, ProviderBreaker, ProviderBreakers};
use crate::config::Config;
use crate::errors::AppError;
use crate::mock_data::{mock_company_data, mock_tech_stack, social_profiles};
use crate::models::{
    BatchEnrichmentReport, EmailStatus, EnrichmentData, EnrichmentOptions, EnrichmentResult, Lead,
};
use crate::services::{BuiltWithClient, ClearbitClient, HunterClient};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// API keys for the enrichment providers.
///
/// Set at startup from [`Config`] and replaced on settings changes; each
/// [`EnrichmentService`] receives a snapshot at construction.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiCredentials {
    pub clearbit: Option<String>,
    pub hunter: Option<String>,
    pub builtwith: Option<String>,
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ApiCredentials")
            .field("clearbit", &redact(&self.clearbit))
            .field("hunter", &redact(&self.hunter))
            .field("builtwith", &redact(&self.builtwith))
            .finish()
    }
}

/// Partial credential update. `None` keeps the current key, an empty string
/// clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCredentialsUpdate {
    pub clearbit: Option<String>,
    pub hunter: Option<String>,
    pub builtwith: Option<String>,
}

/// Which providers have a key configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub clearbit: bool,
    pub hunter: bool,
    pub builtwith: bool,
}

impl ApiCredentials {
    pub fn from_config(config: &Config) -> Self {
        Self {
            clearbit: config.clearbit_api_key.clone(),
            hunter: config.hunter_api_key.clone(),
            builtwith: config.builtwith_api_key.clone(),
        }
    }

    pub fn apply(&mut self, update: ApiCredentialsUpdate) {
        fn merge(slot: &mut Option<String>, value: Option<String>) {
            if let Some(value) = value {
                let trimmed = value.trim();
                *slot = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
        }

        merge(&mut self.clearbit, update.clearbit);
        merge(&mut self.hunter, update.hunter);
        merge(&mut self.builtwith, update.builtwith);
    }

    pub fn status(&self) -> CredentialStatus {
        CredentialStatus {
            clearbit: self.clearbit.is_some(),
            hunter: self.hunter.is_some(),
            builtwith: self.builtwith.is_some(),
        }
    }

    pub fn any_configured(&self) -> bool {
        self.clearbit.is_some() || self.hunter.is_some() || self.builtwith.is_some()
    }
}

/// Basic `local@domain.tld` check used when no verification service is configured.
pub fn is_valid_email_format(email: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
        .is_match(email)
}

/// Reduces a website URL to its host (`https://www.acme.io/about` → `www.acme.io`).
pub fn normalize_domain(website: &str) -> String {
    let trimmed = website.trim();
    if let Ok(url) = url::Url::parse(trimmed) {
        if let Some(host) = url.host_str() {
            return host.to_lowercase();
        }
    }

    trimmed
        .split('/')
        .next()
        .unwrap_or(trimmed)
        .to_lowercase()
}

/// Runs a provider call through its breaker, logging why it fell back.
async fn guarded<T, Fut>(provider: &str, breaker: &ProviderBreaker, call: Fut) -> Option<T>
where
    Fut: Future<Output = Result<T, AppError>>,
{
    match call_guarded(breaker, call).await {
        Ok(value) => Some(value),
        Err(failsafe::Error::Inner(e)) => {
            tracing::warn!("{} call failed, using fallback: {}", provider, e);
            None
        }
        Err(failsafe::Error::Rejected) => {
            tracing::warn!("{} circuit open, using fallback", provider);
            None
        }
    }
}

pub struct EnrichmentService {
    hunter: Option<HunterClient>,
    clearbit: Option<ClearbitClient>,
    builtwith: Option<BuiltWithClient>,
    breakers: Arc<ProviderBreakers>,
    cache: Option<EnrichmentCache>,
    cache_generation: u64,
}

impl EnrichmentService {
    /// Creates a service for one set of credentials.
    ///
    /// Providers without a key are never called.
    pub fn new(
        config: &Config,
        credentials: &ApiCredentials,
        http: reqwest::Client,
        breakers: Arc<ProviderBreakers>,
    ) -> Self {
        Self {
            hunter: credentials
                .hunter
                .as_ref()
                .map(|key| HunterClient::new(http.clone(), &config.hunter_base_url, key)),
            clearbit: credentials
                .clearbit
                .as_ref()
                .map(|key| ClearbitClient::new(http.clone(), &config.clearbit_base_url, key)),
            builtwith: credentials
                .builtwith
                .as_ref()
                .map(|key| BuiltWithClient::new(http.clone(), &config.builtwith_base_url, key)),
            breakers,
            cache: None,
            cache_generation: 0,
        }
    }

    /// Attaches a result cache. `generation` must change whenever the
    /// credentials do.
    pub fn with_cache(mut self, cache: EnrichmentCache, generation: u64) -> Self {
        self.cache = Some(cache);
        self.cache_generation = generation;
        self
    }

    /// Enriches one company.
    ///
    /// Only an empty domain produces `success: false`; provider problems are
    /// absorbed by the mock fallbacks.
    pub async fn enrich_lead(
        &self,
        domain: &str,
        email: Option<&str>,
        options: &EnrichmentOptions,
    ) -> EnrichmentResult {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            tracing::warn!("Enrichment requested without a domain");
            return EnrichmentResult::failed("Domain is required for enrichment");
        }
        let email = email.map(str::trim).filter(|e| !e.is_empty());

        let cache_key = EnrichmentCache::key(self.cache_generation, &domain, email, options);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                tracing::debug!("Enrichment cache HIT for {}", domain);
                return cached;
            }
            tracing::debug!("Enrichment cache MISS for {}", domain);
        }

        tracing::info!("Starting enrichment for domain: {}", domain);
        let mut data = EnrichmentData::default();
        let mut fell_back = false;

        // Step 1: Email status
        if let Some(email) = email.filter(|_| options.validate_emails) {
            let (status, degraded) = self.validate_email(email).await;
            data.email_status = Some(status);
            fell_back |= degraded;
        }

        // Step 2: Company data
        if options.enrich_company_data {
            let (company, degraded) = self.company_data(&domain).await;
            fell_back |= degraded;
            data.company_size = company.company_size;
            data.founded_year = company.founded_year;
            data.funding = company.funding;
            data.domain_authority = company.domain_authority;
            data.employee_count = company.employee_count;
            data.description = company.description;
        }

        // Step 3: Tech stack
        if options.get_tech_stack {
            let (stack, degraded) = self.tech_stack(&domain).await;
            data.tech_stack = Some(stack);
            fell_back |= degraded;
        }

        // Step 4: Social profiles
        if options.find_social_profiles {
            data.social_profiles = Some(social_profiles(&domain));
        }

        let result = EnrichmentResult::succeeded(data);
        match &self.cache {
            Some(_) if fell_back => {
                tracing::debug!("Not caching enrichment for {}: provider fallback", domain)
            }
            Some(cache) => cache.insert(cache_key, &result).await,
            None => {}
        }

        tracing::info!("✓ Enrichment complete for {}", domain);
        result
    }

    // Each step returns its value and whether a keyed provider had to be
    // replaced by the fallback.

    async fn validate_email(&self, email: &str) -> (EmailStatus, bool) {
        let Some(hunter) = &self.hunter else {
            let status = if is_valid_email_format(email) {
                EmailStatus::Valid
            } else {
                EmailStatus::Invalid
            };
            return (status, false);
        };

        match guarded("Hunter", &self.breakers.hunter, hunter.verify_email(email)).await {
            Some(status) => (status, false),
            None => (EmailStatus::Unknown, true),
        }
    }

    async fn company_data(&self, domain: &str) -> (EnrichmentData, bool) {
        let Some(clearbit) = &self.clearbit else {
            tracing::debug!("No Clearbit key, using mock company data for {}", domain);
            return (mock_company_data(domain), false);
        };

        match guarded("Clearbit", &self.breakers.clearbit, clearbit.find_company(domain)).await {
            Some(data) => (data, false),
            None => (mock_company_data(domain), true),
        }
    }

    async fn tech_stack(&self, domain: &str) -> (Vec<String>, bool) {
        let Some(builtwith) = &self.builtwith else {
            tracing::debug!("No BuiltWith key, using mock tech stack for {}", domain);
            return (mock_tech_stack(domain), false);
        };

        match guarded("BuiltWith", &self.breakers.builtwith, builtwith.lookup(domain)).await {
            Some(stack) => (stack, false),
            None => (mock_tech_stack(domain), true),
        }
    }

    /// Enriches leads one after another, pausing `delay` between items.
    ///
    /// Each lead is patched with its result. Leads whose enrichment fails are
    /// returned unchanged and counted as failed.
    pub async fn enrich_batch(
        &self,
        leads: Vec<Lead>,
        options: &EnrichmentOptions,
        delay: Duration,
    ) -> BatchEnrichmentReport {
        let total = leads.len();
        let mut report = BatchEnrichmentReport {
            processed: 0,
            enriched: 0,
            failed: 0,
            leads: Vec::with_capacity(total),
        };

        for (idx, mut lead) in leads.into_iter().enumerate() {
            if idx > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let result = self
                .enrich_lead(&lead.website, lead.email.as_deref(), options)
                .await;

            if result.apply_to(&mut lead) {
                report.enriched += 1;
            } else {
                tracing::warn!(
                    "Failed to enrich lead {}: {}",
                    lead.id,
                    result.error.as_deref().unwrap_or("no data")
                );
                report.failed += 1;
            }

            report.processed += 1;
            report.leads.push(lead);
            tracing::info!("Batch enrichment progress: {}/{}", report.processed, total);
        }

        tracing::info!(
            "Batch enrichment complete: {} processed, {} enriched, {} failed",
            report.processed,
            report.enriched,
            report.failed
        );

        report
    }
}

/// Builds the shared HTTP client used by all provider clients.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {}", e)))
}
