use std::sync::Arc;

use rocket::{routes, Build, Rocket};

use crate::api::*;
use crate::config::Config;
use crate::content::ContentEngine;
use crate::database::DbPool;
use crate::sources::LeadSource;

pub mod routes;

pub struct ServerState {
    pub config: Config,
    pub db_pool: DbPool,
    pub source: Box<dyn LeadSource>,
    pub engine: Arc<dyn ContentEngine>,
}

pub fn build_rocket(state: ServerState) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", state.config.server.address.clone()))
        .merge(("port", state.config.server.port));

    rocket::custom(figment).manage(state).mount(
        "/api",
        routes![
            // Health and info endpoints
            routes::health::health_check,
            routes::health::index,
            // Agent operations
            agent_generate,
            agent_enrich,
            agent_prepare_messages,
            agent_send,
            // Read endpoints
            get_leads,
            get_stats,
            export_csv,
        ],
    )
}
