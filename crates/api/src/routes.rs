// routes.rs - API routes for reading and updating the url record

use super::config::Config;
use super::error::{ApiError, ServiceError};
use super::utils::bson_to_json;
use actix_web::{
    get, put,
    web::{self, Data, Json},
    HttpResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, warn};

const URI_NOT_FOUND: &str = "not found";
const PREVIOUS_URI_MISSING: &str = "N/A";

// Envelope wrapped around every successful response
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub data: Option<Map<String, Value>>,
    pub message: String,
}

impl ResponseEnvelope {
    fn ok(data: Value, message: impl Into<String>) -> Self {
        ResponseEnvelope {
            success: true,
            data: match data {
                Value::Object(map) => Some(map),
                _ => None,
            },
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        ResponseEnvelope {
            success: false,
            data: None,
            message: message.into(),
        }
    }
}

// The count endpoint also exposes the count at the top level
#[derive(Debug, Serialize)]
struct CountEnvelope {
    #[serde(flatten)]
    envelope: ResponseEnvelope,
    count: u64,
}

#[derive(Debug, Deserialize)]
pub struct UrlUpdate {
    pub uri: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(root)
        .service(health)
        .service(get_url)
        .service(update_url)
        .service(count_url);
}

// Bodies that do not deserialize are rejected before reaching a handler
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        ApiError::InvalidBody(err.to_string()).into()
    })
}

fn infrastructure_failure(e: ServiceError) -> ApiError {
    error!("{}", e);
    e.into()
}

#[tracing::instrument(name = "/ - Returns information about the service", skip(config))]
#[get("/")]
pub async fn root(config: Data<Config>) -> HttpResponse {
    HttpResponse::Ok().json(ResponseEnvelope::ok(
        json!({
            "service": super::config::SERVICE_NAME,
            "database": config.database,
            "collection": config.collection,
            "endpoints": {
                "get_url": "/api/url",
                "update_url": "PUT /api/url",
                "count": "/api/url/count",
                "health": "/api/health",
            },
        }),
        "Service running",
    ))
}

#[tracing::instrument(name = "/api/health - Pings the database", skip(config))]
#[get("/api/health")]
pub async fn health(config: Data<Config>) -> Result<HttpResponse, ApiError> {
    config
        .records
        .health()
        .await
        .map_err(infrastructure_failure)?;

    debug!("Database ping succeeded");
    Ok(HttpResponse::Ok().json(ResponseEnvelope::ok(
        json!({ "status": "healthy", "database": config.database }),
        "MongoDB connection OK",
    )))
}

#[tracing::instrument(name = "/api/url - Returns the uri of the record", skip(config))]
#[get("/api/url")]
pub async fn get_url(config: Data<Config>) -> Result<HttpResponse, ApiError> {
    match config.records.get_record().await {
        Ok(current) => {
            let uri = current
                .uri
                .map(bson_to_json)
                .unwrap_or_else(|| Value::from(URI_NOT_FOUND));
            Ok(HttpResponse::Ok().json(ResponseEnvelope::ok(
                json!({ "uri": uri }),
                "URI value retrieved successfully",
            )))
        }
        Err(ServiceError::NoRecord) => Ok(HttpResponse::Ok().json(ResponseEnvelope::failed(
            "No record found in the collection",
        ))),
        Err(e) => Err(infrastructure_failure(e)),
    }
}

#[tracing::instrument(name = "PUT /api/url - Replaces the uri of the record", skip(config))]
#[put("/api/url")]
pub async fn update_url(
    config: Data<Config>,
    req_data: Json<UrlUpdate>,
) -> Result<HttpResponse, ApiError> {
    let UrlUpdate { uri } = req_data.into_inner();

    match config.records.update_record(&uri).await {
        Ok(updated) => {
            info!("URI updated: {}", updated.uri);
            let previous_uri = updated
                .previous_uri
                .map(bson_to_json)
                .unwrap_or_else(|| Value::from(PREVIOUS_URI_MISSING));
            Ok(HttpResponse::Ok().json(ResponseEnvelope::ok(
                json!({
                    "uri": updated.uri,
                    "previous_uri": previous_uri,
                    "_id": updated.id,
                }),
                "URI updated successfully",
            )))
        }
        Err(ServiceError::NoRecord) => Ok(HttpResponse::Ok().json(ResponseEnvelope::failed(
            "No record found to update",
        ))),
        Err(ServiceError::NotModified) => Ok(HttpResponse::Ok()
            .json(ResponseEnvelope::failed("Could not update the record"))),
        Err(e) => Err(infrastructure_failure(e)),
    }
}

#[tracing::instrument(name = "/api/url/count - Counts the records", skip(config))]
#[get("/api/url/count")]
pub async fn count_url(config: Data<Config>) -> Result<HttpResponse, ApiError> {
    let count = config
        .records
        .count_records()
        .await
        .map_err(infrastructure_failure)?;

    Ok(HttpResponse::Ok().json(CountEnvelope {
        envelope: ResponseEnvelope::ok(
            json!({ "count": count }),
            format!("The collection has {} record(s)", count),
        ),
        count,
    }))
}
