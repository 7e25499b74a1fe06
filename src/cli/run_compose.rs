use dialoguer::{theme::ColorfulTheme, Input};

use crate::models::{PipelineApp, Result};
use crate::pipeline;

impl PipelineApp {
    pub async fn run_compose(&self) -> Result<()> {
        println!("\n✍️  Draft Outreach Messages");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let limit: usize = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("How many ENRICHED leads to draft messages for?")
            .default(5)
            .interact_text()?;

        let summary =
            pipeline::compose_messages_batch(&self.db_pool, self.engine.clone(), limit).await?;

        println!(
            "\n✅ Drafted 4 message variants for {} leads ({} failed)",
            summary.processed, summary.failed
        );

        Ok(())
    }
}
