use crate::models::{PipelineApp, Result};
use crate::server::{build_rocket, ServerState};
use crate::sources::SyntheticLeadSource;

impl PipelineApp {
    pub async fn run_server(&self) -> Result<()> {
        println!(
            "\n🌐 Starting API server on {}:{} (Ctrl+C to stop)",
            self.config.server.address, self.config.server.port
        );

        let state = ServerState {
            config: self.config.clone(),
            db_pool: self.db_pool.clone(),
            source: Box::new(SyntheticLeadSource::new()),
            engine: self.engine.clone(),
        };

        build_rocket(state).launch().await?;
        Ok(())
    }
}
