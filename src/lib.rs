//! Lead Generation API Library
//!
//! This library provides lead scoring, outreach email generation, company
//! enrichment (Clearbit, Hunter, BuiltWith with deterministic mock fallback),
//! CRM exports and webhook sync, plus the HTTP handlers that expose them.
//!
//! # Modules
//!
//! - `cache`: Checksum-validated enrichment result cache.
//! - `circuit_breaker`: Per-provider circuit breakers.
//! - `config`: Configuration management.
//! - `enrichment`: Enrichment adapter with provider fallbacks.
//! - `errors`: Error handling types.
//! - `export`: CSV, Excel and CRM import exports.
//! - `handlers`: HTTP request handlers.
//! - `hashing`: Stable string hash for deterministic selection.
//! - `mock_data`: Deterministic mock enrichment data.
//! - `models`: Core data models.
//! - `scoring`: Rule-based lead scoring.
//! - `search`: Filter catalogs and fixture leads.
//! - `services`: External provider clients.
//! - `templates`: Outreach email templates.
//! - `webhook_sync`: CRM webhook push.

pub mod cache;
pub mod circuit_breaker;
pub mod config;
pub mod enrichment;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod hashing;
pub mod mock_data;
pub mod models;
pub mod scoring;
pub mod search;
pub mod services;
pub mod templates;
pub mod webhook_sync;
