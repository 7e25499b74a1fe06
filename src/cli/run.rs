use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    cli::cli::MenuAction,
    models::{PipelineApp, Result},
};
use tracing::error;

impl PipelineApp {
    pub async fn run(&self) -> Result<()> {
        println!("\n🚀 Welcome to Lead Pipeline!");
        println!("═══════════════════════════════════════");

        // Show initial stats
        self.show_stats().await?;

        loop {
            let actions = vec![
                MenuAction::GenerateLeads,
                MenuAction::EnrichLeads,
                MenuAction::ComposeMessages,
                MenuAction::SendOutreach,
                MenuAction::RunFullPipeline,
                MenuAction::ShowStats,
                MenuAction::ExportCsv,
                MenuAction::StartServer,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::GenerateLeads => {
                    if let Err(e) = self.run_generate().await {
                        error!("Generation failed: {}", e);
                    }
                }
                MenuAction::EnrichLeads => {
                    if let Err(e) = self.run_enrich().await {
                        error!("Enrichment failed: {}", e);
                    }
                }
                MenuAction::ComposeMessages => {
                    if let Err(e) = self.run_compose().await {
                        error!("Message drafting failed: {}", e);
                    }
                }
                MenuAction::SendOutreach => {
                    if let Err(e) = self.run_send().await {
                        error!("Send batch failed: {}", e);
                    }
                }
                MenuAction::RunFullPipeline => {
                    if let Err(e) = self.run_full_pipeline().await {
                        error!("Pipeline run failed: {}", e);
                    }
                }
                MenuAction::ShowStats => {
                    if let Err(e) = self.show_stats().await {
                        error!("Failed to show stats: {}", e);
                    }
                }
                MenuAction::ExportCsv => {
                    if let Err(e) = self.run_export().await {
                        error!("Export failed: {}", e);
                    }
                }
                MenuAction::StartServer => {
                    if let Err(e) = self.run_server().await {
                        error!("Server failed: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using Lead Pipeline!");
                    break;
                }
            }
        }

        Ok(())
    }
}
