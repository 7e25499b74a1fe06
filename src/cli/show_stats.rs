use crate::database;
use crate::models::{LeadStatus, PipelineApp, Result};

impl PipelineApp {
    pub async fn show_stats(&self) -> Result<()> {
        let stats = database::stats_by_status(&self.db_pool).await?;

        println!("\n📊 Pipeline Status");
        println!("━━━━━━━━━━━━━━━━━━━━━");

        let mut total = 0;
        for status in LeadStatus::ALL {
            let count = stats.get(status.as_str()).copied().unwrap_or(0);
            total += count;
            let icon = match status {
                LeadStatus::New => "🆕",
                LeadStatus::Enriched => "🔍",
                LeadStatus::Messaged => "✍️ ",
                LeadStatus::Sent => "✅",
                LeadStatus::Failed => "❌",
            };
            println!("   {} {}: {}", icon, status, count);
        }
        println!("   Σ total: {}", total);

        Ok(())
    }
}
