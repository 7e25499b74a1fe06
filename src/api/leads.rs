use rocket::serde::json::Json;
use rocket::{get, State};
use serde::Serialize;
use std::collections::HashMap;

use crate::api::ApiResponse;
use crate::database;
use crate::models::Lead;
use crate::server::ServerState;

#[derive(Serialize)]
pub struct LeadsResponse {
    pub leads: Vec<Lead>,
    pub stats: HashMap<String, i64>,
}

#[get("/leads?<limit>")]
pub async fn get_leads(
    state: &State<ServerState>,
    limit: Option<usize>,
) -> Json<ApiResponse<LeadsResponse>> {
    let limit = limit.unwrap_or(500).min(1000);

    let leads = match database::recent_leads(&state.db_pool, limit).await {
        Ok(leads) => leads,
        Err(e) => return Json(ApiResponse::error(e.to_string())),
    };

    let stats = match database::stats_by_status(&state.db_pool).await {
        Ok(stats) => stats,
        Err(e) => return Json(ApiResponse::error(e.to_string())),
    };

    Json(ApiResponse::success(LeadsResponse { leads, stats }))
}

#[get("/stats")]
pub async fn get_stats(state: &State<ServerState>) -> Json<ApiResponse<HashMap<String, i64>>> {
    match database::stats_by_status(&state.db_pool).await {
        Ok(stats) => Json(ApiResponse::success(stats)),
        Err(e) => Json(ApiResponse::error(e.to_string())),
    }
}
