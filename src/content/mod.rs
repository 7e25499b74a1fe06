use crate::models::{EnrichmentData, Lead, MessageSet};

pub mod engine;
pub mod knowledge;

pub use engine::RuleBasedEngine;

/// Enrichment flavor. Offline is rule-based and reproducible; Ai simulates
/// model variability without any external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichMode {
    Offline,
    Ai,
}

impl EnrichMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichMode::Offline => "offline",
            EnrichMode::Ai => "ai",
        }
    }

    /// "offline" selects the rule path; anything else is treated as "ai".
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("offline") {
            EnrichMode::Offline
        } else {
            EnrichMode::Ai
        }
    }
}

impl std::fmt::Display for EnrichMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplies enrichment insights and message drafts. Swappable without
/// touching the batch orchestration.
pub trait ContentEngine: Send + Sync {
    fn enrich(&self, lead: &Lead, mode: EnrichMode, rng: &mut fastrand::Rng) -> EnrichmentData;
    fn compose(&self, lead: &Lead) -> MessageSet;
}
