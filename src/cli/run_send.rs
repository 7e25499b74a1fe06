use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::models::{PipelineApp, Result};
use crate::pipeline;
use crate::sender::RetryPolicy;

impl PipelineApp {
    pub async fn run_send(&self) -> Result<()> {
        println!("\n📧 Send Outreach Batch");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let limit: usize = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("How many MESSAGED leads to send?")
            .default(5)
            .interact_text()?;

        let dry_run = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Dry run (no failure simulation)?")
            .default(true)
            .interact()?;

        let policy = RetryPolicy::from(&self.config.sending);
        println!(
            "📋 Policy: {} attempts, {}ms backoff, {}ms between leads",
            policy.max_attempts,
            policy.backoff.as_millis(),
            policy.lead_delay.as_millis()
        );

        let summary =
            pipeline::send_batch(&self.db_pool, policy, limit, dry_run, &self.cancel).await?;

        println!(
            "\n🎉 Send batch complete ({})",
            summary.mode
        );
        println!("✅ Sent: {}", summary.sent);
        println!("❌ Failed: {}", summary.failed);

        Ok(())
    }
}
