use rocket::serde::json::Json;
use rocket::{post, State};
use serde::Deserialize;

use crate::api::ApiResponse;
use crate::content::EnrichMode;
use crate::pipeline::{self, GenerateSummary, SendSummary, StageSummary};
use crate::sender::{CancelFlag, RetryPolicy};
use crate::server::ServerState;

fn default_count() -> usize {
    5
}

fn default_seed() -> u64 {
    42
}

fn default_limit() -> usize {
    5
}

fn default_dry_run() -> bool {
    true
}

fn default_mode() -> String {
    "offline".to_string()
}

#[derive(Deserialize)]
pub struct GenRequest {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Deserialize)]
pub struct ProcessRequest {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
    #[serde(default = "default_mode")]
    pub mode: String,
}

#[post("/agent/generate", data = "<req>")]
pub async fn agent_generate(
    state: &State<ServerState>,
    req: Json<GenRequest>,
) -> Json<ApiResponse<GenerateSummary>> {
    let industry = req.industry.as_deref().filter(|s| !s.is_empty());

    match pipeline::generate(
        &state.db_pool,
        state.source.as_ref(),
        req.count,
        req.seed,
        industry,
    )
    .await
    {
        Ok(summary) => Json(ApiResponse::success(summary)),
        Err(e) => Json(ApiResponse::error(e.to_string())),
    }
}

#[post("/agent/enrich", data = "<req>")]
pub async fn agent_enrich(
    state: &State<ServerState>,
    req: Json<ProcessRequest>,
) -> Json<ApiResponse<StageSummary>> {
    let mode = EnrichMode::parse(&req.mode);

    match pipeline::enrich_batch(&state.db_pool, state.engine.clone(), req.limit, mode).await {
        Ok(summary) => Json(ApiResponse::success(summary)),
        Err(e) => Json(ApiResponse::error(e.to_string())),
    }
}

#[post("/agent/prepare-messages", data = "<req>")]
pub async fn agent_prepare_messages(
    state: &State<ServerState>,
    req: Json<ProcessRequest>,
) -> Json<ApiResponse<StageSummary>> {
    match pipeline::compose_messages_batch(&state.db_pool, state.engine.clone(), req.limit).await {
        Ok(summary) => Json(ApiResponse::success(summary)),
        Err(e) => Json(ApiResponse::error(e.to_string())),
    }
}

#[post("/agent/send", data = "<req>")]
pub async fn agent_send(
    state: &State<ServerState>,
    req: Json<ProcessRequest>,
) -> Json<ApiResponse<SendSummary>> {
    let policy = RetryPolicy::from(&state.config.sending);

    match pipeline::send_batch(
        &state.db_pool,
        policy,
        req.limit,
        req.dry_run,
        &CancelFlag::new(),
    )
    .await
    {
        Ok(summary) => Json(ApiResponse::success(summary)),
        Err(e) => Json(ApiResponse::error(e.to_string())),
    }
}
