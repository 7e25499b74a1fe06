use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::content::{ContentEngine, EnrichMode};
use crate::database::{self, DbPool};
use crate::models::{Lead, LeadStatus, Result};

/// One pipeline stage: reads a lead in `source_status` and commits the next
/// stage's data plus the status advance in a single store operation.
#[async_trait::async_trait]
pub trait StageProcessor: Send + Sync {
    fn name(&self) -> &'static str;
    fn source_status(&self) -> LeadStatus;
    async fn advance(&self, pool: &DbPool, lead: &Lead) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
}

/// Generic batch driver: selects up to `limit` eligible leads and applies
/// the processor to each independently. A lead's failure is terminal for
/// that lead only (FAILED + log) and never rolls back or blocks the rest.
/// Re-running only ever touches leads still in the source status.
pub async fn run_stage(
    pool: &DbPool,
    processor: &dyn StageProcessor,
    limit: usize,
) -> Result<BatchReport> {
    let leads = database::leads_by_status(pool, processor.source_status(), limit).await?;
    debug!(
        "Stage {}: {} leads selected (limit {})",
        processor.name(),
        leads.len(),
        limit
    );

    let mut report = BatchReport::default();

    for lead in &leads {
        match processor.advance(pool, lead).await {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!(
                    "Stage {} failed for lead {} ({}): {}",
                    processor.name(),
                    lead.id,
                    lead.email,
                    e
                );
                report.failed += 1;
                // Store errors here are fatal; processor faults are per-lead
                database::update_status(
                    pool,
                    lead.id,
                    LeadStatus::Failed,
                    &format!("Error in {}: {}", processor.name(), e),
                )
                .await?;
            }
        }
    }

    Ok(report)
}

/// NEW -> ENRICHED via the content engine.
pub struct EnrichmentStage {
    engine: Arc<dyn ContentEngine>,
    mode: EnrichMode,
    rng: Mutex<fastrand::Rng>,
}

impl EnrichmentStage {
    pub fn new(engine: Arc<dyn ContentEngine>, mode: EnrichMode) -> Self {
        Self {
            engine,
            mode,
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Pins the rng so size/confidence heuristics are reproducible in tests.
    pub fn with_seed(engine: Arc<dyn ContentEngine>, mode: EnrichMode, seed: u64) -> Self {
        Self {
            engine,
            mode,
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

#[async_trait::async_trait]
impl StageProcessor for EnrichmentStage {
    fn name(&self) -> &'static str {
        "enrichment"
    }

    fn source_status(&self) -> LeadStatus {
        LeadStatus::New
    }

    async fn advance(&self, pool: &DbPool, lead: &Lead) -> Result<()> {
        let data = {
            let mut rng = self.rng.lock().unwrap();
            self.engine.enrich(lead, self.mode, &mut rng)
        };
        database::update_enrichment(pool, lead.id, &data).await
    }
}

/// ENRICHED -> MESSAGED via the content engine's templates.
pub struct MessagingStage {
    engine: Arc<dyn ContentEngine>,
}

impl MessagingStage {
    pub fn new(engine: Arc<dyn ContentEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl StageProcessor for MessagingStage {
    fn name(&self) -> &'static str {
        "messaging"
    }

    fn source_status(&self) -> LeadStatus {
        LeadStatus::Enriched
    }

    async fn advance(&self, pool: &DbPool, lead: &Lead) -> Result<()> {
        let msgs = self.engine.compose(lead);
        database::update_messages(pool, lead.id, &msgs).await
    }
}
