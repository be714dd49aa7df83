use actix_web::{HttpResponse, Responder};

pub const KEEP_ALIVE_BODY: &str = "USMON OTA bot is running!";

/// Keep-alive probe for hosting platforms that ping the root path.
pub async fn keep_alive() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(KEEP_ALIVE_BODY)
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
