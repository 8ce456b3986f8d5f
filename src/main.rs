mod config;
mod db;
mod errors;
mod generator;
mod handlers;
mod models;
mod utils;
mod views;

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use crate::config::Config;
use crate::db::{PgPlanStore, PlanStore};
use crate::generator::gemini::GeminiClient;
use crate::generator::{GenerationOptions, PlanGenerator};

/// Registers every route; shared by the server and the handler tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .app_data(handlers::query_config())
        .app_data(handlers::form_config())
        .service(
            web::resource("/api/save-plan")
                .route(web::post().to(handlers::plan::save_plan)),
        )
        .service(
            web::resource("/api/get-plan")
                .route(web::get().to(handlers::plan::get_plan)),
        )
        .service(
            web::resource("/api/generate-plan")
                .route(web::post().to(handlers::plan::generate_plan)),
        )
        .service(
            web::resource(views::form::FORM_PATH)
                .route(web::get().to(handlers::form::show_form))
                .route(web::post().to(handlers::form::submit_form)),
        )
        .service(
            web::resource(views::dashboard::DASHBOARD_PATH)
                .route(web::get().to(handlers::dashboard::show_dashboard)),
        );
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    // Initialize the database pool
    let pool = db::create_pool(&config)
        .await
        .map_err(|e| startup_error("Failed to connect to the database", e))?;
    db::run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;

    let pg_store = Arc::new(PgPlanStore::new(pool));
    let store: Arc<dyn PlanStore> = pg_store.clone();

    let client = Arc::new(GeminiClient::new(config.gemini_api_key.clone(), config.gemini_base_url.clone()));
    let generator = web::Data::new(PlanGenerator::new(
        client,
        GenerationOptions::json(config.gemini_model.clone()),
        config.locale.clone(),
    ));

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "fitplan".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(|e| startup_error("Failed to create Prometheus metrics", e))?;

    info!("Starting server at {} with {} workers", config.bind_address, config.workers);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .app_data(web::Data::from(store.clone()))
            .app_data(generator.clone())
            .configure(configure_routes)
    })
    .workers(config.workers)
    .bind(&config.bind_address)?
    .run()
    .await?;

    info!("Server stopped, closing database pool");
    pg_store.close().await;
    Ok(())
}
