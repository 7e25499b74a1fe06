pub mod health {
    use rocket::{get, serde::json::Json};
    use serde_json::{json, Value};

    #[get("/health")]
    pub async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "service": "lead-pipeline-api"
        }))
    }

    #[get("/")]
    pub async fn index() -> Json<Value> {
        Json(json!({
            "name": "Lead Pipeline API",
            "version": "0.1.0",
            "description": "API for driving the lead lifecycle pipeline",
            "endpoints": {
                "health": "/api/health",
                "generate": "/api/agent/generate",
                "enrich": "/api/agent/enrich",
                "prepare_messages": "/api/agent/prepare-messages",
                "send": "/api/agent/send",
                "leads": "/api/leads",
                "stats": "/api/stats",
                "export": "/api/export/csv"
            }
        }))
    }
}
