use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::content::{ContentEngine, EnrichMode};
use crate::database::{self, DbPool};
use crate::models::Result;
use crate::sender::{CancelFlag, RetryPolicy, RetryingSender};
use crate::sources::LeadSource;

pub mod dedup;
pub mod runner;

pub use runner::{run_stage, BatchReport, EnrichmentStage, MessagingStage, StageProcessor};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    pub generated: usize,
    pub added: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageSummary {
    pub processed: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendSummary {
    pub sent: usize,
    pub failed: usize,
    pub mode: String,
}

/// Generation stage: source -> dedup gate -> store (NEW). Candidates whose
/// email already exists are dropped silently, so `added <= generated`.
pub async fn generate(
    pool: &DbPool,
    source: &dyn LeadSource,
    count: usize,
    seed: u64,
    industry: Option<&str>,
) -> Result<GenerateSummary> {
    let candidates = source.generate(count, seed, industry);
    let fresh = dedup::filter_new(pool, &candidates).await?;
    let added = database::insert_candidates(pool, &fresh).await?;

    info!(
        "Generated {} candidates from '{}', added {} new leads",
        count,
        source.name(),
        added
    );

    Ok(GenerateSummary {
        generated: count,
        added,
        industry: industry.map(|s| s.to_string()),
    })
}

/// NEW -> ENRICHED for up to `limit` leads.
pub async fn enrich_batch(
    pool: &DbPool,
    engine: Arc<dyn ContentEngine>,
    limit: usize,
    mode: EnrichMode,
) -> Result<StageSummary> {
    let stage = EnrichmentStage::new(engine, mode);
    let report = run_stage(pool, &stage, limit).await?;

    info!(
        "Enriched {} leads in {} mode ({} failed)",
        report.processed, mode, report.failed
    );

    Ok(StageSummary {
        processed: report.processed,
        failed: report.failed,
        mode: Some(mode.to_string()),
    })
}

/// ENRICHED -> MESSAGED for up to `limit` leads.
pub async fn compose_messages_batch(
    pool: &DbPool,
    engine: Arc<dyn ContentEngine>,
    limit: usize,
) -> Result<StageSummary> {
    let stage = MessagingStage::new(engine);
    let report = run_stage(pool, &stage, limit).await?;

    info!(
        "Drafted messages for {} leads ({} failed)",
        report.processed, report.failed
    );

    Ok(StageSummary {
        processed: report.processed,
        failed: report.failed,
        mode: None,
    })
}

/// MESSAGED -> SENT | FAILED for up to `limit` leads, with retry/backoff and
/// the inter-lead rate limit. Never raises for per-lead outcomes.
pub async fn send_batch(
    pool: &DbPool,
    policy: RetryPolicy,
    limit: usize,
    dry_run: bool,
    cancel: &CancelFlag,
) -> Result<SendSummary> {
    let sender = RetryingSender::new(policy);
    let report = sender.send_batch(pool, limit, dry_run, cancel).await?;

    let mode = if dry_run { "DRY RUN" } else { "LIVE" };
    info!(
        "Send batch complete: {} sent, {} failed ({})",
        report.sent, report.failed, mode
    );

    Ok(SendSummary {
        sent: report.sent,
        failed: report.failed,
        mode: mode.to_string(),
    })
}
