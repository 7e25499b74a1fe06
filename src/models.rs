use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    config::Config, content::ContentEngine, database::DbPool, sender::CancelFlag,
    sources::LeadSource,
};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Lifecycle states of a lead. Transitions only move forward:
/// NEW -> ENRICHED -> MESSAGED -> SENT | FAILED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    New,
    Enriched,
    Messaged,
    Sent,
    Failed,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Enriched,
        LeadStatus::Messaged,
        LeadStatus::Sent,
        LeadStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "NEW",
            LeadStatus::Enriched => "ENRICHED",
            LeadStatus::Messaged => "MESSAGED",
            LeadStatus::Sent => "SENT",
            LeadStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(LeadStatus::New),
            "ENRICHED" => Some(LeadStatus::Enriched),
            "MESSAGED" => Some(LeadStatus::Messaged),
            "SENT" => Some(LeadStatus::Sent),
            "FAILED" => Some(LeadStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lead candidate produced by a source, before insertion.
/// Profile attributes are immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadCandidate {
    pub full_name: String,
    pub company_name: String,
    pub role: String,
    pub industry: String,
    pub website: String,
    pub email: String,
    pub linkedin_url: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub full_name: String,
    pub company_name: String,
    pub role: String,
    pub industry: String,
    pub website: String,
    pub email: String,
    pub linkedin_url: String,
    pub country: String,
    pub status: LeadStatus,
    pub enrichment_data: Option<String>,
    pub email_content_a: Option<String>,
    pub email_content_b: Option<String>,
    pub linkedin_content_a: Option<String>,
    pub linkedin_content_b: Option<String>,
    pub logs: String,
    pub last_updated: DateTime<Utc>,
}

impl Lead {
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or(&self.full_name)
    }
}

/// Structured enrichment payload, serialized to JSON in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentData {
    pub company_size: String,
    pub persona: String,
    pub pain_points: Vec<String>,
    pub buying_trigger: String,
    pub confidence_score: u8,
    pub enrichment_source: String,
}

/// The four drafted outreach variants written by the messaging stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSet {
    pub email_a: String,
    pub email_b: String,
    pub linkedin_a: String,
    pub linkedin_b: String,
}

pub struct PipelineApp {
    pub config: Config,
    pub db_pool: DbPool,
    pub source: Box<dyn LeadSource>,
    pub engine: Arc<dyn ContentEngine>,
    pub cancel: CancelFlag,
}
