use crate::database;
use crate::export;
use crate::models::{PipelineApp, Result};

impl PipelineApp {
    pub async fn run_export(&self) -> Result<()> {
        println!("\n📤 Export Leads to CSV");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let leads = database::all_leads(&self.db_pool).await?;
        if leads.is_empty() {
            println!("📭 Nothing to export yet");
            return Ok(());
        }

        let filename = export::generate_filename();
        export::write_csv_file(&leads, &filename)?;

        println!("✅ Exported {} leads to {}", leads.len(), filename);
        Ok(())
    }
}
