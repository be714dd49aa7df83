use actix_web::{web, App, HttpServer};
use std::io;

use crate::config::Settings;
use crate::handlers;
use crate::state::AppState;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::health::keep_alive))
        .route("/health", web::get().to(handlers::health::health))
        .service(
            web::scope("/api/v1").route("/events", web::post().to(handlers::events::handler)),
        );
}

pub async fn run(settings: Settings) -> io::Result<()> {
    let state = web::Data::new(AppState::new(&settings));

    tracing::info!(
        host = %settings.host,
        port = settings.port,
        data_file = %settings.data_file.display(),
        "Starting HTTP server"
    );

    HttpServer::new(move || App::new().app_data(state.clone()).configure(app_config))
        .bind((settings.host.as_str(), settings.port))?
        .run()
        .await
}
