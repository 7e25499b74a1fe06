use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::content::EnrichMode;
use crate::models::{PipelineApp, Result};
use crate::pipeline;

impl PipelineApp {
    pub async fn run_enrich(&self) -> Result<()> {
        println!("\n🔍 Enrich Leads");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let limit: usize = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("How many NEW leads to enrich?")
            .default(5)
            .interact_text()?;

        let modes = vec!["offline (rule-based)", "ai (simulated variability)"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Enrichment mode")
            .default(0)
            .items(&modes)
            .interact()?;

        let mode = match selection {
            0 => EnrichMode::Offline,
            _ => EnrichMode::Ai,
        };

        let summary =
            pipeline::enrich_batch(&self.db_pool, self.engine.clone(), limit, mode).await?;

        println!(
            "\n✅ Enriched {} leads in {} mode ({} failed)",
            summary.processed,
            mode,
            summary.failed
        );

        Ok(())
    }
}
