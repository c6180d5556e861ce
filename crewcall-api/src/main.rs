use actix_cors::Cors;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

mod config;
mod database;
mod handlers;
mod helpers;
mod integrations;

use helpers::clock::{Clock, SystemClock};
use helpers::job_cache::JobListingCache;
use helpers::rate_limit::RateLimiter;
use integrations::gemini::GeminiClient;

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "CrewCall API"
    }))
}

#[get("/health")]
async fn health(db: web::Data<Arc<database::Database>>) -> impl Responder {
    // Test database connection
    match db.connection.lock() {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "unhealthy",
            "database": "disconnected"
        })),
    }
}

#[get("/settings")]
async fn get_settings(data: web::Data<handlers::settings::SettingsAppState>) -> impl Responder {
    handlers::settings::get_settings(data).await
}

#[post("/settings/api-keys")]
async fn update_api_keys(
    data: web::Data<handlers::settings::SettingsAppState>,
    request: web::Json<shared_types::UpdateApiKeysRequest>,
) -> impl Responder {
    handlers::settings::update_api_keys(data, request).await
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("crewcall-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Initialize database
    let db = helpers::database::initialize_database().expect("Failed to initialize database");

    tracing::info!(
        "Database initialized at: {:?}",
        helpers::database::get_db_path().unwrap()
    );

    // Load config
    let (config, _) = config::ApiConfig::load().expect("Failed to load config");
    let config_arc = Arc::new(std::sync::RwLock::new(config.clone()));
    let settings_state = handlers::settings::SettingsAppState {
        config: config_arc.clone(),
    };

    // Get server config or use defaults
    let (host, port) = if let Some(server_config) = &config.server {
        (server_config.host.clone(), server_config.port)
    } else {
        ("127.0.0.1".to_string(), 8080)
    };

    tracing::info!("Server will listen on {}:{}", host, port);

    // Chat plumbing: rate limiter and job-context cache are explicit
    // process-scoped state, built here and injected into handlers
    let chat_config = config.chat.clone().unwrap_or_default();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let rate_limiter = Arc::new(RateLimiter::new(
        chat_config.rate_limit_window_seconds,
        chat_config.rate_limit_max_requests,
        clock.clone(),
    ));
    let job_cache = Arc::new(JobListingCache::new(
        chat_config.jobs_cache_ttl_seconds,
        clock.clone(),
    ));
    let gemini_client = Arc::new(GeminiClient::new(config_arc.clone()));

    // Periodically drop expired rate-limit windows
    let sweeper = rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            interval.tick().await;
            sweeper.sweep().await;
        }
    });

    println!("Starting server on {}:{}", host, port);

    let server = HttpServer::new(move || {
        // Configure CORS
        let cors = if let Some(cors_config) = &config.cors {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(db.async_connection.clone()))
            .app_data(web::Data::new(settings_state.clone()))
            .app_data(web::Data::new(rate_limiter.clone()))
            .app_data(web::Data::new(job_cache.clone()))
            .app_data(web::Data::new(gemini_client.clone()))
            .service(hello)
            .service(health)
            .service(get_settings)
            .service(update_api_keys)
            .route("/api/leads", web::get().to(handlers::leads::list_leads))
            .route("/api/leads", web::post().to(handlers::leads::create_lead))
            .route("/api/leads/import", web::post().to(handlers::leads::import_leads))
            .route("/api/leads/export", web::get().to(handlers::leads::export_leads))
            .route("/api/leads/delete", web::post().to(handlers::leads::delete_leads))
            .route("/api/leads/{id}", web::delete().to(handlers::leads::delete_lead))
            .route("/api/leads/{id}/status", web::put().to(handlers::leads::update_lead_status))
            .route("/api/leads/{id}/notes", web::put().to(handlers::leads::update_lead_notes))
            .route("/api/jobs", web::get().to(handlers::jobs::list_jobs))
            .route("/api/jobs", web::post().to(handlers::jobs::create_job))
            .route("/api/jobs/{id}", web::get().to(handlers::jobs::get_job))
            .route("/api/jobs/{id}", web::put().to(handlers::jobs::update_job))
            .route("/api/jobs/{id}", web::delete().to(handlers::jobs::delete_job))
            .route("/api/applications", web::post().to(handlers::applications::create_application))
            .route("/api/applications", web::get().to(handlers::applications::list_applications))
            .route("/api/applications/{id}/status", web::put().to(handlers::applications::update_application_status))
            .route("/api/chat", web::post().to(handlers::chat::chat))
    })
    .bind((host.as_str(), port))?
    .run();

    server.await
}
