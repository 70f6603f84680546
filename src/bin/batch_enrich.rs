//! Enriches the fixture leads and writes an export to stdout.
//!
//! Usage: `batch_enrich [csv|excel|hubspot|salesforce]` (default `csv`).
//! Progress and the run summary go to stderr.

use rust_leadgen_api::circuit_breaker::ProviderBreakers;
use rust_leadgen_api::config::Config;
use rust_leadgen_api::enrichment::{build_http_client, ApiCredentials, EnrichmentService};
use rust_leadgen_api::export::{export_leads, ExportFormat};
use rust_leadgen_api::models::EnrichmentOptions;
use rust_leadgen_api::scoring::LeadScorer;
use rust_leadgen_api::search::sample_leads;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_leadgen_api=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let format: ExportFormat = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "csv".to_string())
        .parse()?;

    let config = Config::from_env()?;
    let http = build_http_client(&config)?;
    let delay = Duration::from_millis(config.batch_delay_ms);

    let credentials = ApiCredentials::from_config(&config);
    if !credentials.any_configured() {
        eprintln!("No provider API keys configured, using mock enrichment data");
    }

    let service = EnrichmentService::new(
        &config,
        &credentials,
        http,
        Arc::new(ProviderBreakers::new()),
    );

    let leads = sample_leads();
    eprintln!("Enriching {} lead(s)...", leads.len());

    let report = service
        .enrich_batch(leads, &EnrichmentOptions::default(), delay)
        .await;

    let scorer = LeadScorer::new();
    for (i, lead) in report.leads.iter().enumerate() {
        let score = scorer.score(lead);
        eprintln!(
            "[{}/{}] {:<20} {:>3} {}",
            i + 1,
            report.processed,
            lead.company_name,
            score.rounded(),
            score.category
        );
    }
    eprintln!(
        "Done: {} processed, {} enriched, {} failed",
        report.processed, report.enriched, report.failed
    );

    let file = export_leads(&report.leads, format)?;
    eprintln!("Writing {} to stdout", file.filename);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(file.content.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
