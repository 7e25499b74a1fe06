use rusqlite::params;
use std::collections::HashSet;
use tracing::debug;

use crate::database::DbPool;
use crate::models::{LeadCandidate, Result};

/// Filters candidates down to those whose email is not yet stored and not
/// repeated earlier in the same batch, preserving input order. Duplicates
/// are dropped silently; dedup is an expected outcome, not an error.
pub async fn filter_new(
    pool: &DbPool,
    candidates: &[LeadCandidate],
) -> Result<Vec<LeadCandidate>> {
    let conn = pool.get().await?;
    let mut stmt = conn.prepare("SELECT 1 FROM leads WHERE email = ?1")?;

    let mut seen = HashSet::new();
    let mut fresh = Vec::new();

    for candidate in candidates {
        if !seen.insert(candidate.email.clone()) {
            continue;
        }
        if !stmt.exists(params![candidate.email])? {
            fresh.push(candidate.clone());
        }
    }

    debug!(
        "Dedup gate: {} of {} candidates are new",
        fresh.len(),
        candidates.len()
    );
    Ok(fresh)
}
