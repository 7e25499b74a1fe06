use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::database::{self, DbPool};
use crate::models::{Lead, LeadStatus, Result};

pub mod attempt;

pub use attempt::{DeliveryState, RetryPolicy};

/// Delivery seam. Real transports are out of scope; the simulated one
/// reproduces the reference behavior (dry-run no-op, probabilistic failure).
#[async_trait::async_trait]
pub trait OutreachTransport: Send + Sync {
    async fn deliver(&self, recipient: &str, body: &str, dry_run: bool) -> Result<bool>;
}

pub struct SimulatedTransport {
    failure_rate: f64,
    rng: Mutex<fastrand::Rng>,
}

impl SimulatedTransport {
    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate,
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    pub fn with_seed(failure_rate: f64, seed: u64) -> Self {
        Self {
            failure_rate,
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

#[async_trait::async_trait]
impl OutreachTransport for SimulatedTransport {
    async fn deliver(&self, recipient: &str, _body: &str, dry_run: bool) -> Result<bool> {
        if dry_run {
            info!("[DRY RUN] Processed email for {}", recipient);
            return Ok(true);
        }

        let roll = self.rng.lock().unwrap().f64();
        Ok(roll >= self.failure_rate)
    }
}

/// Sleep seam so backoff and rate limiting are testable without real time.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Cooperative cancellation, honored between leads only: an in-flight lead
/// always runs to its terminal status before the batch stops.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SendReport {
    pub sent: usize,
    pub failed: usize,
}

enum LeadOutcome {
    Sent,
    Failed,
}

/// Drives MESSAGED leads to SENT or FAILED with per-message retry/backoff
/// and a fixed inter-lead delay.
pub struct RetryingSender {
    transport: Arc<dyn OutreachTransport>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl RetryingSender {
    pub fn new(policy: RetryPolicy) -> Self {
        let transport = Arc::new(SimulatedTransport::new(policy.failure_rate));
        Self {
            transport,
            sleeper: Arc::new(TokioSleeper),
            policy,
        }
    }

    pub fn with_parts(
        transport: Arc<dyn OutreachTransport>,
        sleeper: Arc<dyn Sleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            sleeper,
            policy,
        }
    }

    pub async fn send_batch(
        &self,
        pool: &DbPool,
        limit: usize,
        dry_run: bool,
        cancel: &CancelFlag,
    ) -> Result<SendReport> {
        let leads = database::leads_by_status(pool, LeadStatus::Messaged, limit).await?;
        info!(
            "Sending outreach for {} leads (dry_run: {})",
            leads.len(),
            dry_run
        );

        let mut report = SendReport::default();

        for (i, lead) in leads.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(
                    "Send batch cancelled after {} of {} leads",
                    i,
                    leads.len()
                );
                break;
            }

            match self.send_one(pool, lead, dry_run).await? {
                LeadOutcome::Sent => report.sent += 1,
                LeadOutcome::Failed => report.failed += 1,
            }

            // Global rate limit: at most 1/lead_delay leads per second,
            // regardless of outcome.
            if i < leads.len() - 1 {
                self.sleeper.sleep(self.policy.lead_delay).await;
            }
        }

        Ok(report)
    }

    async fn send_one(&self, pool: &DbPool, lead: &Lead, dry_run: bool) -> Result<LeadOutcome> {
        // Primary variant is always email template A
        let body = lead.email_content_a.as_deref().unwrap_or("");
        let max = self.policy.max_attempts;
        let mut state = DeliveryState::Pending;

        loop {
            state = state.start_attempt();
            let attempt = state.attempt();
            debug!("Lead {}: delivery attempt {}/{}", lead.id, attempt, max);

            let delivered = match self.transport.deliver(&lead.email, body, dry_run).await {
                Ok(delivered) => delivered,
                Err(e) => {
                    // Unexpected fault: terminal for this lead, never for the batch
                    database::update_status(
                        pool,
                        lead.id,
                        LeadStatus::Failed,
                        &format!("Error: {}", e),
                    )
                    .await?;
                    return Ok(LeadOutcome::Failed);
                }
            };

            state = state.record(delivered, max);
            match state {
                DeliveryState::Sent { attempts } => {
                    database::update_status(
                        pool,
                        lead.id,
                        LeadStatus::Sent,
                        &format!("Email A sent successfully on attempt {}.", attempts),
                    )
                    .await?;
                    return Ok(LeadOutcome::Sent);
                }
                DeliveryState::Failed { attempts } => {
                    database::append_log(
                        pool,
                        lead.id,
                        &format!("Attempt {}/{} failed", attempts, max),
                    )
                    .await?;
                    database::update_status(
                        pool,
                        lead.id,
                        LeadStatus::Failed,
                        &format!("Failed after {} attempts.", attempts),
                    )
                    .await?;
                    return Ok(LeadOutcome::Failed);
                }
                DeliveryState::Attempting(n) => {
                    database::append_log(pool, lead.id, &format!("Attempt {}/{} failed", n, max))
                        .await?;
                    self.sleeper.sleep(self.policy.backoff).await;
                }
                DeliveryState::Pending => unreachable!("start_attempt never yields Pending"),
            }
        }
    }
}
