use actix_web::{web, HttpResponse, Result};

use crate::dispatch::InboundEvent;
use crate::state::AppState;

pub async fn handler(
    state: web::Data<AppState>,
    event: web::Json<InboundEvent>,
) -> Result<HttpResponse> {
    let event = event.into_inner();
    tracing::debug!(user_id = %event.user_id, kind = ?event.kind, "Inbound event");

    let response = state.dispatcher.dispatch(event).await;
    Ok(HttpResponse::Ok().json(response))
}
