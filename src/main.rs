use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use ride_match::config::{LoggingSettings, Settings};
use ride_match::routes::{self, AppState};
use ride_match::services::{AppwriteClient, RideMatchService};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `LOG_LEVEL` / `LOG_FORMAT` take precedence over the configured values.
fn init_logging(logging: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    match format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging);

    info!("Starting ride matching service...");

    let appwrite = AppwriteClient::from_settings(&settings.appwrite).map_err(|e| {
        error!("Failed to create Appwrite client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("Appwrite client initialized for database {}", appwrite.database_id());

    let matcher = settings.matching.matcher();

    info!(
        "Matcher initialized (max distance: {}km, strict: {})",
        matcher.max_distance_km(),
        matcher.is_strict()
    );

    let rides = RideMatchService::new(Arc::new(appwrite), matcher, settings.collection.rides.clone())
        .with_default_limit(settings.matching.default_limit)
        .with_max_limit(settings.matching.max_limit);

    let app_state = AppState {
        rides: Arc::new(rides),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
