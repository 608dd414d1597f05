// main.rs - entry point to run the API server

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use dotenvy::dotenv;
use tracing::subscriber::set_global_default;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

mod config;
mod error;
mod routes;
mod service;
mod utils;

use config::{Config, DATABASE_NAME};
use service::RecordService;

#[derive(Parser, Debug)]
struct Args {
    /// MongoDB connection string
    #[arg(
        long,
        env = "MONGODB_CONNECTION_STRING",
        default_value = "mongodb+srv://<username>:<password>@<cluster>.mongodb.net/"
    )]
    mongodb_connection_string: String,
    /// Address and port to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(long, env = "PORT", default_value_t = 5100)]
    port: u16,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();

    // Parse CLI args, using ENV vars if not provided
    let args = Args::parse();

    // Adds log tracer as the default tracer for the log crate
    LogTracer::init().map_err(std::io::Error::other)?;
    // Set log level based on env variable
    let env_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(std::io::Error::other)?;
    let fmt_layer = fmt::layer().with_target(false);
    let subscriber = Registry::default().with(env_layer).with(fmt_layer);
    set_global_default(subscriber).map_err(std::io::Error::other)?;

    info!("Starting MongoDB URL service");

    // A failed connection leaves the service up; endpoints report 503
    let records = RecordService::connect(&args.mongodb_connection_string, DATABASE_NAME).await;
    if !records.is_connected() {
        error!("Could not connect to MongoDB");
    }

    let config = Config::new(records.clone());

    info!("Listening on {}:{}", args.host, args.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(routes::configure)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await?;

    records.close().await;
    Ok(())
}
