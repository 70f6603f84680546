//! Rule-based lead scoring against the ideal customer profile.
//!
//! Five independent factors are scored on a 0-100 scale, combined with fixed
//! weights, and bucketed into a category. The scorer is total: missing or
//! out-of-range signals fall back to neutral values instead of failing.

use crate::models::Lead;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Weights of the ideal customer profile. They sum to 1.0.
pub const SIZE_WEIGHT: f64 = 0.25;
pub const TECH_STACK_WEIGHT: f64 = 0.20;
pub const DOMAIN_AUTHORITY_WEIGHT: f64 = 0.20;
pub const SOCIAL_PRESENCE_WEIGHT: f64 = 0.15;
pub const MARKET_TIMING_WEIGHT: f64 = 0.20;

/// Technologies the product integrates with.
pub const TARGET_TECH_STACK: [&str; 9] = [
    "Salesforce",
    "HubSpot",
    "React",
    "AWS",
    "Stripe",
    "Slack",
    "Zoom",
    "Shopify",
    "WordPress",
];

const NEUTRAL_SIZE_SCORE: f64 = 50.0;
const EMPTY_TECH_STACK_SCORE: f64 = 30.0;
const REASONING_THRESHOLD: f64 = 70.0;

const SIZE_REASON: &str = "Optimal company size for our solution";
const TECH_STACK_REASON: &str = "Strong technology stack alignment";
const DOMAIN_AUTHORITY_REASON: &str = "High domain authority indicates established presence";
const SOCIAL_PRESENCE_REASON: &str = "Strong social media presence";
const MARKET_TIMING_REASON: &str = "Excellent market timing indicators";
const FALLBACK_REASON: &str = "Standard lead profile, requires nurturing";

/// Category derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    #[serde(rename = "High Potential")]
    HighPotential,
    #[serde(rename = "Warm")]
    Warm,
    #[serde(rename = "Cold")]
    Cold,
    #[serde(rename = "Early-Stage")]
    EarlyStage,
}

impl ScoreCategory {
    /// Threshold ladder: >=80, >=60, >=40, else.
    pub fn from_score(overall: f64) -> Self {
        if overall >= 80.0 {
            ScoreCategory::HighPotential
        } else if overall >= 60.0 {
            ScoreCategory::Warm
        } else if overall >= 40.0 {
            ScoreCategory::Cold
        } else {
            ScoreCategory::EarlyStage
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::HighPotential => "High Potential",
            ScoreCategory::Warm => "Warm",
            ScoreCategory::Cold => "Cold",
            ScoreCategory::EarlyStage => "Early-Stage",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-factor breakdown, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactors {
    pub company_size: f64,
    pub tech_stack_match: f64,
    pub domain_authority: f64,
    pub social_presence: f64,
    pub market_timing: f64,
}

impl ScoreFactors {
    /// Weighted sum of the factors.
    pub fn weighted_total(&self) -> f64 {
        self.company_size * SIZE_WEIGHT
            + self.tech_stack_match * TECH_STACK_WEIGHT
            + self.domain_authority * DOMAIN_AUTHORITY_WEIGHT
            + self.social_presence * SOCIAL_PRESENCE_WEIGHT
            + self.market_timing * MARKET_TIMING_WEIGHT
    }

    /// Factors paired with their reasoning sentence, in evaluation order.
    fn with_reasons(&self) -> [(f64, &'static str); 5] {
        [
            (self.company_size, SIZE_REASON),
            (self.tech_stack_match, TECH_STACK_REASON),
            (self.domain_authority, DOMAIN_AUTHORITY_REASON),
            (self.social_presence, SOCIAL_PRESENCE_REASON),
            (self.market_timing, MARKET_TIMING_REASON),
        ]
    }
}

/// Result of scoring a lead. Recomputed on demand, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadScore {
    /// Unrounded weighted score in [0, 100].
    pub overall: f64,
    pub category: ScoreCategory,
    pub factors: ScoreFactors,
    /// One to five sentences in factor evaluation order.
    pub reasoning: Vec<String>,
}

impl LeadScore {
    /// Score rounded to the nearest integer for display.
    pub fn rounded(&self) -> u8 {
        self.overall.round().clamp(0.0, 100.0) as u8
    }
}

/// Scores leads against the ideal customer profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadScorer;

impl LeadScorer {
    pub fn new() -> Self {
        Self
    }

    /// Scores a lead. Pure and deterministic.
    pub fn score(&self, lead: &Lead) -> LeadScore {
        let factors = ScoreFactors {
            company_size: clamp_score(score_company_size(&lead.company_size)),
            tech_stack_match: clamp_score(score_tech_stack(&lead.tech_stack)),
            domain_authority: clamp_score(score_domain_authority(lead.domain_authority)),
            social_presence: clamp_score(score_social_presence(lead.linkedin_followers)),
            market_timing: clamp_score(score_market_timing(lead)),
        };

        let overall = clamp_score(factors.weighted_total());

        LeadScore {
            overall,
            category: ScoreCategory::from_score(overall),
            reasoning: reasoning_for(&factors),
            factors,
        }
    }
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Non-monotonic: mid-market companies are the sweet spot.
pub fn score_company_size(size: &str) -> f64 {
    match size {
        "1-10" => 20.0,
        "11-50" => 60.0,
        "51-200" => 85.0,
        "201-500" => 95.0,
        "501-1000" => 90.0,
        "1000+" => 75.0,
        _ => NEUTRAL_SIZE_SCORE,
    }
}

pub fn score_tech_stack(tech_stack: &[String]) -> f64 {
    if tech_stack.is_empty() {
        return EMPTY_TECH_STACK_SCORE;
    }

    let matches = tech_stack
        .iter()
        .map(String::as_str)
        .filter(|tech| TARGET_TECH_STACK.contains(tech))
        .collect::<HashSet<_>>()
        .len();

    let match_ratio = matches as f64 / TARGET_TECH_STACK.len() as f64;
    (40.0 + match_ratio * 60.0).min(100.0)
}

/// Absent, zero, negative and NaN values all land in the "unknown" band.
pub fn score_domain_authority(domain_authority: Option<f64>) -> f64 {
    let da = match domain_authority {
        Some(da) if !da.is_nan() => da.clamp(0.0, 100.0),
        _ => 0.0,
    };

    if da == 0.0 {
        40.0
    } else if da < 20.0 {
        20.0
    } else if da < 40.0 {
        50.0
    } else if da < 60.0 {
        70.0
    } else if da < 80.0 {
        85.0
    } else {
        95.0
    }
}

pub fn score_social_presence(followers: Option<u64>) -> f64 {
    match followers.unwrap_or(0) {
        0 => 30.0,
        1..=999 => 40.0,
        1_000..=4_999 => 60.0,
        5_000..=24_999 => 80.0,
        _ => 95.0,
    }
}

/// Base 50 plus bonuses; only the final sum is capped.
pub fn score_market_timing(lead: &Lead) -> f64 {
    let mut score: f64 = 50.0;

    if lead.recent_news.unwrap_or(false) {
        score += 20.0;
    }
    if matches!(
        lead.funding_stage.as_deref(),
        Some("Series A") | Some("Series B")
    ) {
        score += 25.0;
    }
    if lead.growth_rate.is_some_and(|rate| rate > 50.0) {
        score += 20.0;
    }

    score.min(100.0)
}

fn reasoning_for(factors: &ScoreFactors) -> Vec<String> {
    let mut reasoning: Vec<String> = factors
        .with_reasons()
        .iter()
        .filter(|(score, _)| *score >= REASONING_THRESHOLD)
        .map(|(_, reason)| reason.to_string())
        .collect();

    if reasoning.is_empty() {
        reasoning.push(FALLBACK_REASON.to_string());
    }

    reasoning
}
