use rocket::http::{ContentType, Status};
use rocket::response::status::Custom;
use rocket::{get, State};

use crate::database;
use crate::export::render_csv;
use crate::server::ServerState;

#[get("/export/csv")]
pub async fn export_csv(
    state: &State<ServerState>,
) -> Result<(ContentType, String), Custom<String>> {
    match database::all_leads(&state.db_pool).await {
        Ok(leads) => Ok((ContentType::CSV, render_csv(&leads))),
        Err(e) => Err(Custom(Status::InternalServerError, e.to_string())),
    }
}
