//! Push leads to a user-supplied CRM webhook.

use crate::errors::AppError;
use crate::models::Lead;
use crate::scoring::LeadScorer;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookLead {
    pub company_name: String,
    pub website: String,
    pub industry: String,
    pub company_size: String,
    pub country: String,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub lead_score: u8,
    pub score_category: String,
    pub tech_stack: Vec<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub sync_id: String,
    pub leads: Vec<WebhookLead>,
}

/// Outcome of a successful sync.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookSyncReport {
    pub sync_id: String,
    pub synced: usize,
    pub status: u16,
}

pub struct WebhookSyncClient {
    client: Client,
}

impl WebhookSyncClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// POSTs the scored leads as one JSON document.
    ///
    /// # Arguments
    /// * `leads` - Leads to push, scored at send time
    /// * `webhook_url` - Absolute `http` or `https` endpoint
    ///
    /// # Returns
    /// * `Ok(WebhookSyncReport)` - Receiver answered with a 2xx status
    /// * `Err(AppError::BadRequest)` - URL is malformed or not http(s)
    /// * `Err(AppError::ExternalApiError)` - Transport failure or non-2xx status
    pub async fn sync(
        &self,
        leads: &[Lead],
        webhook_url: &str,
    ) -> Result<WebhookSyncReport, AppError> {
        let url = validate_webhook_url(webhook_url)?;
        let payload = build_payload(leads);
        let sync_id = payload.sync_id.clone();

        tracing::info!(
            "Syncing {} lead(s) to webhook {} (sync_id={})",
            leads.len(),
            url.host_str().unwrap_or(""),
            sync_id
        );

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Webhook request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Webhook returned error {}: {}", status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "Webhook returned status {}",
                status
            )));
        }

        Ok(WebhookSyncReport {
            sync_id,
            synced: leads.len(),
            status: status.as_u16(),
        })
    }
}

fn validate_webhook_url(raw: &str) -> Result<reqwest::Url, AppError> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::BadRequest(format!(
            "Webhook URL must use http or https, got '{}'",
            other
        ))),
    }
}

pub fn build_payload(leads: &[Lead]) -> WebhookPayload {
    let scorer = LeadScorer::new();
    let timestamp = Utc::now().to_rfc3339();

    let leads = leads
        .iter()
        .map(|lead| {
            let score = scorer.score(lead);
            WebhookLead {
                company_name: lead.company_name.clone(),
                website: lead.website.clone(),
                industry: lead.industry.clone(),
                company_size: lead.company_size.clone(),
                country: lead.country.clone(),
                email: lead.email.clone(),
                linkedin_url: lead.linkedin_url.clone(),
                lead_score: score.rounded(),
                score_category: score.category.to_string(),
                tech_stack: lead.tech_stack.clone(),
                tags: lead.tags.clone(),
                status: lead.status.as_str().to_string(),
                timestamp: timestamp.clone(),
            }
        })
        .collect();

    WebhookPayload {
        sync_id: Uuid::new_v4().to_string(),
        leads,
    }
}
