use crate::cache::EnrichmentCache;
use crate::circuit_breaker::ProviderBreakers;
use crate::config::Config;
use crate::enrichment::{ApiCredentials, ApiCredentialsUpdate, CredentialStatus, EnrichmentService};
use crate::errors::AppError;
use crate::export::{export_leads, ExportFormat};
use crate::models::*;
use crate::scoring::{LeadScore, LeadScorer};
use crate::search::{filter_options, search, FilterOptions, SearchFilters};
use crate::templates::TemplateBuilder;
use crate::webhook_sync::{WebhookSyncClient, WebhookSyncReport};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Provider keys together with the state that is only valid for them.
pub struct ProviderState {
    pub credentials: ApiCredentials,
    /// One circuit breaker per enrichment provider, shared across requests.
    pub breakers: Arc<ProviderBreakers>,
    /// Bumped on every key change and folded into enrichment cache keys.
    pub generation: u64,
}

impl ProviderState {
    fn new(credentials: ApiCredentials) -> Self {
        Self {
            credentials,
            breakers: Arc::new(ProviderBreakers::new()),
            generation: 0,
        }
    }

    /// Applies a key update. Breaker state earned under the old keys is
    /// discarded along with the old cache generation.
    fn rotate(&mut self, update: ApiCredentialsUpdate) {
        self.credentials.apply(update);
        self.breakers = Arc::new(ProviderBreakers::new());
        self.generation += 1;
    }
}

/// Shared application state injected into handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Provider keys, breakers and cache generation. Replaced through the
    /// settings endpoint.
    pub providers: RwLock<ProviderState>,
    /// Enrichment results keyed by generation, domain, email and options.
    pub enrichment_cache: EnrichmentCache,
    /// Shared HTTP client for providers and webhooks.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config, http: reqwest::Client) -> Self {
        let credentials = ApiCredentials::from_config(&config);
        let enrichment_cache = EnrichmentCache::new(
            Duration::from_secs(config.cache_ttl_secs),
            10_000,
        );

        Self {
            config,
            providers: RwLock::new(ProviderState::new(credentials)),
            enrichment_cache,
            http,
        }
    }

    /// Enrichment service bound to the current credential snapshot.
    async fn enrichment_service(&self) -> EnrichmentService {
        let providers = self.providers.read().await;
        EnrichmentService::new(
            &self.config,
            &providers.credentials,
            self.http.clone(),
            providers.breakers.clone(),
        )
        .with_cache(self.enrichment_cache.clone(), providers.generation)
    }
}

/// Versioned API routes, without the health check and middleware.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/leads/filters", get(lead_filters))
        .route("/api/v1/leads/search", post(search_leads))
        .route("/api/v1/leads/score", post(score_lead))
        .route("/api/v1/emails/generate", post(generate_email))
        .route("/api/v1/emails/tones", post(generate_email_tones))
        .route("/api/v1/enrich", post(enrich))
        .route("/api/v1/enrich/batch", post(enrich_batch))
        .route("/api/v1/export/:format", post(export))
        .route("/api/v1/sync/webhook", post(sync_webhook))
        .route(
            "/api/v1/settings/api-keys",
            get(get_api_keys).put(update_api_keys),
        )
}

/// A lead together with its computed score.
#[derive(Debug, Serialize)]
pub struct ScoredLead {
    #[serde(flatten)]
    pub lead: Lead,
    pub score: LeadScore,
    pub display_score: u8,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub score: LeadScore,
    pub display_score: u8,
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-leadgen-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Fallback for unknown routes.
pub async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// GET /api/v1/leads/filters
pub async fn lead_filters() -> Json<FilterOptions> {
    Json(filter_options())
}

/// POST /api/v1/leads/search
///
/// Filters the fixture lead set and scores every match.
pub async fn search_leads(Json(filters): Json<SearchFilters>) -> Json<Vec<ScoredLead>> {
    tracing::info!("POST /leads/search - filters: {:?}", filters);

    let scorer = LeadScorer::new();
    let results = search(&filters)
        .into_iter()
        .map(|lead| {
            let score = scorer.score(&lead);
            ScoredLead {
                display_score: score.rounded(),
                lead,
                score,
            }
        })
        .collect();

    Json(results)
}

/// POST /api/v1/leads/score
pub async fn score_lead(Json(lead): Json<Lead>) -> Json<ScoreResponse> {
    let score = LeadScorer::new().score(&lead);
    tracing::info!(
        "Scored lead {} ({}): {:.1} {}",
        lead.id,
        lead.company_name,
        score.overall,
        score.category
    );

    Json(ScoreResponse {
        display_score: score.rounded(),
        score,
    })
}

fn validate_persona(persona: &PersonaContext) -> Result<(), AppError> {
    let missing: Vec<&str> = [
        ("sender_name", &persona.sender_name),
        ("sender_company", &persona.sender_company),
        ("value_proposition", &persona.value_proposition),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Persona is missing {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

/// POST /api/v1/emails/generate
///
/// # Arguments
///
/// * `payload` - Lead, sender persona, template type and tone.
///
/// # Returns
///
/// * `Result<Json<EmailTemplate>, AppError>` - The filled email, or 400 when the persona is incomplete.
pub async fn generate_email(
    Json(payload): Json<GenerateEmailRequest>,
) -> Result<Json<EmailTemplate>, AppError> {
    validate_persona(&payload.persona)?;

    tracing::info!(
        "Generating {:?} email ({:?}) for {}",
        payload.template_type,
        payload.tone,
        payload.lead.company_name
    );

    let email = TemplateBuilder::new().generate(
        &payload.lead,
        &payload.persona,
        payload.template_type,
        payload.tone,
    );
    Ok(Json(email))
}

/// POST /api/v1/emails/tones
pub async fn generate_email_tones(
    Json(payload): Json<GenerateAllTonesRequest>,
) -> Result<Json<Vec<EmailTemplate>>, AppError> {
    validate_persona(&payload.persona)?;

    let emails = TemplateBuilder::new().generate_all_tones(&payload.lead, &payload.persona);
    Ok(Json(emails))
}

/// POST /api/v1/enrich
///
/// Enriches a single domain. Provider failures fall back to mock data, so
/// this only reports `success: false` for an empty domain.
pub async fn enrich(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EnrichRequest>,
) -> Json<EnrichmentResult> {
    tracing::info!("POST /enrich - domain: {}", payload.domain);

    let service = state.enrichment_service().await;
    let result = service
        .enrich_lead(&payload.domain, payload.email.as_deref(), &payload.options)
        .await;

    Json(result)
}

/// POST /api/v1/enrich/batch
///
/// Sequential run with the configured inter-item delay.
pub async fn enrich_batch(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BatchEnrichRequest>,
) -> Result<Json<BatchEnrichmentReport>, AppError> {
    if payload.leads.is_empty() {
        return Err(AppError::BadRequest("No leads to enrich".to_string()));
    }

    tracing::info!("POST /enrich/batch - {} lead(s)", payload.leads.len());

    let service = state.enrichment_service().await;
    let delay = Duration::from_millis(state.config.batch_delay_ms);
    let report = service
        .enrich_batch(payload.leads, &payload.options, delay)
        .await;

    Ok(Json(report))
}

/// POST /api/v1/export/:format
///
/// # Arguments
///
/// * `format` - One of `csv`, `excel`, `hubspot`, `salesforce`.
/// * `payload` - Leads to export.
///
/// # Returns
///
/// * `Result<impl IntoResponse, AppError>` - The file as an attachment, or 400 for an unknown format.
pub async fn export(
    Path(format): Path<String>,
    Json(payload): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let format: ExportFormat = format.parse()?;
    let file = export_leads(&payload.leads, format)?;

    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.content,
    ))
}

/// POST /api/v1/sync/webhook
pub async fn sync_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WebhookSyncRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.webhook_url.trim().is_empty() {
        return Err(AppError::BadRequest("webhook_url is required".to_string()));
    }

    let client = WebhookSyncClient::new(state.http.clone());
    let WebhookSyncReport {
        sync_id,
        synced,
        status,
    } = client.sync(&payload.leads, &payload.webhook_url).await?;

    tracing::info!("Webhook sync {} delivered {} lead(s)", sync_id, synced);

    Ok(Json(json!({
        "success": true,
        "sync_id": sync_id,
        "synced": synced,
        "status": status
    })))
}

/// GET /api/v1/settings/api-keys
pub async fn get_api_keys(State(state): State<Arc<AppState>>) -> Json<CredentialStatus> {
    Json(state.providers.read().await.credentials.status())
}

/// PUT /api/v1/settings/api-keys
///
/// Omitted keys are kept, empty strings clear a key. Keys are never echoed.
/// Cached enrichment results and breaker state are dropped since they depend
/// on which providers were live.
pub async fn update_api_keys(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ApiCredentialsUpdate>,
) -> Json<CredentialStatus> {
    let mut providers = state.providers.write().await;
    providers.rotate(update);
    let status = providers.credentials.status();
    state.enrichment_cache.clear();

    tracing::info!(
        "API credentials updated (generation {}): {:?}",
        providers.generation,
        providers.credentials
    );
    Json(status)
}
