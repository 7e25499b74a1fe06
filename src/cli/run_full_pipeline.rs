use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::content::EnrichMode;
use crate::models::{PipelineApp, Result};
use crate::pipeline;
use crate::sender::RetryPolicy;

impl PipelineApp {
    /// Drives all four stages back to back with one batch size.
    pub async fn run_full_pipeline(&self) -> Result<()> {
        println!("\n🚀 Full Pipeline Run");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let count: usize = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Batch size")
            .default(self.config.generation.default_count)
            .interact_text()?;

        let seed: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Seed")
            .default(self.config.generation.default_seed)
            .interact_text()?;

        let dry_run = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Dry run the send stage?")
            .default(true)
            .interact()?;

        let generated =
            pipeline::generate(&self.db_pool, self.source.as_ref(), count, seed, None).await?;
        println!(
            "  1/4 generate: {} candidates, {} added",
            generated.generated, generated.added
        );

        let enriched = pipeline::enrich_batch(
            &self.db_pool,
            self.engine.clone(),
            count,
            EnrichMode::Offline,
        )
        .await?;
        println!("  2/4 enrich: {} processed", enriched.processed);

        let composed =
            pipeline::compose_messages_batch(&self.db_pool, self.engine.clone(), count).await?;
        println!("  3/4 compose: {} processed", composed.processed);

        let sent = pipeline::send_batch(
            &self.db_pool,
            RetryPolicy::from(&self.config.sending),
            count,
            dry_run,
            &self.cancel,
        )
        .await?;
        println!(
            "  4/4 send: {} sent, {} failed ({})",
            sent.sent, sent.failed, sent.mode
        );

        self.show_stats().await
    }
}
