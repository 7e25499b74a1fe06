use std::sync::Arc;

use crate::config::Config;
use crate::content::RuleBasedEngine;
use crate::database::DbPool;
use crate::models::PipelineApp;
use crate::sender::CancelFlag;
use crate::sources::SyntheticLeadSource;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub enum MenuAction {
    GenerateLeads,
    EnrichLeads,
    ComposeMessages,
    SendOutreach,
    RunFullPipeline,
    ShowStats,
    ExportCsv,
    StartServer,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::GenerateLeads => {
                write!(f, "🧬 Generate synthetic leads (NEW)")
            }
            MenuAction::EnrichLeads => {
                write!(f, "🔍 Enrich leads (NEW → ENRICHED)")
            }
            MenuAction::ComposeMessages => {
                write!(f, "✍️  Draft outreach messages (ENRICHED → MESSAGED)")
            }
            MenuAction::SendOutreach => {
                write!(f, "📧 Send outreach (MESSAGED → SENT/FAILED)")
            }
            MenuAction::RunFullPipeline => {
                write!(f, "🚀 Run full pipeline (generate → send)")
            }
            MenuAction::ShowStats => write!(f, "📊 Show pipeline statistics"),
            MenuAction::ExportCsv => write!(f, "📤 Export leads to CSV"),
            MenuAction::StartServer => write!(f, "🌐 Start API server"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl PipelineApp {
    pub async fn new(config: Config, db_pool: DbPool) -> Result<Self> {
        Ok(Self {
            config,
            db_pool,
            source: Box::new(SyntheticLeadSource::new()),
            engine: Arc::new(RuleBasedEngine::new()),
            cancel: CancelFlag::new(),
        })
    }
}
