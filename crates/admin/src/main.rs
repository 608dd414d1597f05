// admin/main.rs - scripts for seeding and inspecting the url record

use clap::{Parser, Subcommand};
use database::url::{
    query::{count_urls, get_first_url, reset_url},
    COLLECTION_NAME, DATABASE_NAME,
};
use dotenvy::dotenv;
use mongodb::Client;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(name = "admin")]
struct Args {
    #[clap(subcommand)]
    subcommand: Subcommands,
    #[arg(
        long,
        env = "MONGODB_CONNECTION_STRING",
        default_value = "mongodb+srv://<username>:<password>@<cluster>.mongodb.net/"
    )]
    mongodb_connection_string: String,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Drops the url collection and inserts a single record
    #[clap(name = "init-db")]
    InitDatabase {
        #[arg(short, long)]
        uri: String,
    },
    /// Prints the record count and the first record
    #[clap(name = "show")]
    Show,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Load environment variables from .env file
    dotenv().ok();

    // Parse CLI args, using ENV vars if not provided
    let args = Args::parse();

    let env_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| e.to_string())?;
    tracing_subscriber::fmt()
        .with_env_filter(env_layer)
        .with_target(true)
        .init();

    // Create database client
    let db_client = Client::with_uri_str(&args.mongodb_connection_string)
        .await
        .map_err(|e| format!("Failed to create database client: {}", e))?;

    match args.subcommand {
        Subcommands::InitDatabase { uri } => {
            info!(
                "Resetting {}.{} with uri {}",
                DATABASE_NAME, COLLECTION_NAME, uri
            );
            let id = reset_url(&db_client, DATABASE_NAME, &uri)
                .await
                .map_err(|e| e.to_string())?;
            info!("Inserted record {}", id);
        }
        Subcommands::Show => {
            let count = count_urls(&db_client, DATABASE_NAME)
                .await
                .map_err(|e| e.to_string())?;
            info!("{} record(s) in {}", count, COLLECTION_NAME);
            if count > 1 {
                warn!("More than one record; the service reads the lowest _id");
            }

            match get_first_url(&db_client, DATABASE_NAME)
                .await
                .map_err(|e| e.to_string())?
            {
                Some(record) => info!("First record: {:?}", record),
                None => warn!("No record found"),
            }
        }
    }

    db_client.shutdown().await;
    Ok(())
}
