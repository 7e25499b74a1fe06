use dialoguer::{theme::ColorfulTheme, Input};

use crate::models::{PipelineApp, Result};
use crate::pipeline;

impl PipelineApp {
    pub async fn run_generate(&self) -> Result<()> {
        println!("\n🧬 Generate Synthetic Leads");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let count: usize = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("How many leads to generate?")
            .default(self.config.generation.default_count)
            .interact_text()?;

        let seed: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Seed (same seed reproduces the same profiles)")
            .default(self.config.generation.default_seed)
            .interact_text()?;

        let industry: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Industry filter (empty for all)")
            .allow_empty(true)
            .default(String::new())
            .interact_text()?;

        let industry = industry.trim();
        let filter = if industry.is_empty() {
            None
        } else {
            Some(industry)
        };

        let summary =
            pipeline::generate(&self.db_pool, self.source.as_ref(), count, seed, filter).await?;

        println!(
            "\n✅ Generated {} candidates, added {} new leads ({} duplicates skipped)",
            summary.generated,
            summary.added,
            summary.generated - summary.added
        );

        Ok(())
    }
}
