//! Lead export to CSV, Excel-compatible TSV and CRM import formats.
//!
//! Scores are computed on demand for every exported lead. Quoting follows
//! RFC 4180: a field is quoted when it contains the delimiter, a quote or a
//! line break, and embedded quotes are doubled.

use crate::errors::{AppError, ResultExt};
use crate::models::Lead;
use crate::scoring::{LeadScore, LeadScorer};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Value written to the Salesforce `LeadSource` column.
pub const SALESFORCE_LEAD_SOURCE: &str = "Caprae Leads";

const CSV_HEADERS: [&str; 17] = [
    "Company Name",
    "Website",
    "Industry",
    "Company Size",
    "Country",
    "Key Contact",
    "Email",
    "LinkedIn",
    "Lead Score",
    "Score Category",
    "Tech Stack",
    "Tags",
    "Status",
    "Notes",
    "Domain Authority",
    "Social Followers",
    "Last Contacted",
];

const EXCEL_HEADERS: [&str; 14] = [
    "Company Name",
    "Website",
    "Industry",
    "Company Size",
    "Country",
    "Key Contact",
    "Email",
    "LinkedIn",
    "Lead Score",
    "Score Category",
    "Tech Stack",
    "Tags",
    "Status",
    "Notes",
];

const HUBSPOT_HEADERS: [&str; 13] = [
    "Company name",
    "Company domain name",
    "Industry",
    "Number of employees",
    "Country/Region",
    "First name",
    "Last name",
    "Email",
    "LinkedIn URL",
    "Lead score",
    "Lead status",
    "Technology",
    "Notes",
];

const SALESFORCE_HEADERS: [&str; 12] = [
    "Account Name",
    "Website",
    "Industry",
    "NumberOfEmployees",
    "BillingCountry",
    "FirstName",
    "LastName",
    "Email",
    "LeadSource",
    "Lead_Score__c",
    "Status",
    "Description",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Hubspot,
    Salesforce,
}

impl ExportFormat {
    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "caprae-leads-export.csv",
            ExportFormat::Excel => "caprae-leads-export.xlsx",
            ExportFormat::Hubspot => "hubspot-import-ready.csv",
            ExportFormat::Salesforce => "salesforce-import-ready.csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "application/vnd.ms-excel",
            _ => "text/csv",
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            ExportFormat::Excel => b'\t',
            _ => b',',
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" | "tsv" => Ok(ExportFormat::Excel),
            "hubspot" => Ok(ExportFormat::Hubspot),
            "salesforce" => Ok(ExportFormat::Salesforce),
            other => Err(AppError::BadRequest(format!(
                "Unsupported export format '{}'. Use csv, excel, hubspot or salesforce",
                other
            ))),
        }
    }
}

/// A rendered export ready to be served or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub content: String,
}

/// Renders leads in the requested format.
pub fn export_leads(leads: &[Lead], format: ExportFormat) -> Result<ExportFile, AppError> {
    let scorer = LeadScorer::new();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    let headers: &[&str] = match format {
        ExportFormat::Csv => &CSV_HEADERS,
        ExportFormat::Excel => &EXCEL_HEADERS,
        ExportFormat::Hubspot => &HUBSPOT_HEADERS,
        ExportFormat::Salesforce => &SALESFORCE_HEADERS,
    };
    writer
        .write_record(headers)
        .context("Failed to write export header")?;

    for lead in leads {
        let score = scorer.score(lead);
        let row = match format {
            ExportFormat::Csv => csv_row(lead, &score),
            ExportFormat::Excel => excel_row(lead, &score),
            ExportFormat::Hubspot => hubspot_row(lead, &score),
            ExportFormat::Salesforce => salesforce_row(lead, &score),
        };
        writer
            .write_record(&row)
            .with_context(|| format!("Failed to write export row for lead {}", lead.id))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("Failed to flush export: {}", e)))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| AppError::InternalError(format!("Export is not valid UTF-8: {}", e)))?;

    tracing::info!(
        "Exported {} lead(s) as {} ({} bytes)",
        leads.len(),
        format.filename(),
        content.len()
    );

    Ok(ExportFile {
        filename: format.filename(),
        content_type: format.content_type(),
        content,
    })
}

fn key_contact(lead: &Lead) -> String {
    lead.key_person
        .clone()
        .or_else(|| lead.email.clone())
        .unwrap_or_default()
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn common_columns(lead: &Lead, score: &LeadScore) -> Vec<String> {
    vec![
        lead.company_name.clone(),
        lead.website.clone(),
        lead.industry.clone(),
        lead.company_size.clone(),
        lead.country.clone(),
        key_contact(lead),
        opt(&lead.email),
        opt(&lead.linkedin_url),
        score.rounded().to_string(),
        score.category.to_string(),
        lead.tech_stack.join("; "),
        lead.tags.join("; "),
        lead.status.as_str().to_string(),
        opt(&lead.notes),
    ]
}

fn csv_row(lead: &Lead, score: &LeadScore) -> Vec<String> {
    let mut row = common_columns(lead, score);
    row.push(format_number(lead.domain_authority.unwrap_or(0.0)));
    row.push(lead.linkedin_followers.unwrap_or(0).to_string());
    row.push(
        lead.last_contacted
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );
    row
}

fn excel_row(lead: &Lead, score: &LeadScore) -> Vec<String> {
    common_columns(lead, score)
}

fn hubspot_row(lead: &Lead, score: &LeadScore) -> Vec<String> {
    let (first_name, last_name) = split_contact_name(lead.email.as_deref());
    vec![
        lead.company_name.clone(),
        strip_scheme(&lead.website),
        lead.industry.clone(),
        lead.company_size.clone(),
        lead.country.clone(),
        first_name,
        last_name,
        opt(&lead.email),
        opt(&lead.linkedin_url),
        score.rounded().to_string(),
        lead.status.as_str().to_string(),
        lead.tech_stack.join("; "),
        opt(&lead.notes),
    ]
}

fn salesforce_row(lead: &Lead, score: &LeadScore) -> Vec<String> {
    let (first_name, last_name) = split_contact_name(lead.email.as_deref());
    let employees = lead.company_size.split('-').next().unwrap_or("").to_string();
    let description = format!(
        "{} Tech: {}",
        score.reasoning.join(". "),
        lead.tech_stack.join(", ")
    );

    vec![
        lead.company_name.clone(),
        lead.website.clone(),
        lead.industry.clone(),
        employees,
        lead.country.clone(),
        first_name,
        last_name,
        opt(&lead.email),
        SALESFORCE_LEAD_SOURCE.to_string(),
        score.rounded().to_string(),
        lead.status.as_str().to_string(),
        description,
    ]
}

/// First and last name from the email local part split on `.`.
///
/// `sarah.johnson@x.com` → ("sarah", "johnson"); extra segments join the
/// last name with spaces.
pub fn split_contact_name(email: Option<&str>) -> (String, String) {
    let local_part = email
        .and_then(|e| e.split('@').next())
        .unwrap_or("");
    let mut parts = local_part.split('.');
    let first = parts.next().unwrap_or("").to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Removes the leftmost `http://` or `https://` occurrence.
fn strip_scheme(website: &str) -> String {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    SCHEME
        .get_or_init(|| Regex::new(r"https?://").expect("scheme pattern is valid"))
        .replacen(website, 1, "")
        .into_owned()
}

/// Integers without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
