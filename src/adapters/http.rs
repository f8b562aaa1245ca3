//! HTTP surface: four JSON endpoints over the shared read-only dataset.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::dataset::Dataset;
use crate::core::query;
use crate::domain::model::{Category, CollegeRecord, PredictionResult};
use crate::utils::error::AppError;

pub const API_MESSAGE: &str = "MediPredict API is running!";
pub const API_VERSION: &str = "1.0";

pub type SharedDataset = Arc<Dataset>;

/// Create the API router
pub fn create_router(dataset: SharedDataset) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/api/predict", post(predict))
        .route("/api/colleges", get(list_colleges))
        .route("/api/college/:name", get(search_college))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(dataset)
}

#[derive(Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub total_colleges: usize,
}

/// GET /
pub async fn home(State(dataset): State<SharedDataset>) -> Json<HomeResponse> {
    Json(HomeResponse {
        message: API_MESSAGE,
        version: API_VERSION,
        total_colleges: dataset.len(),
    })
}

/// Fields as sent; an explicit `null` stays `Some(Value::Null)`.
#[derive(Debug)]
pub struct PredictRequest {
    pub rank: Option<Value>,
    pub category: Option<Value>,
}

/// `application/json` 或 `application/*+json`
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn parse_predict_request(headers: &HeaderMap, body: &[u8]) -> Result<PredictRequest, AppError> {
    if !is_json_content_type(headers) {
        return Err(AppError::BadRequestError {
            message: "request body must be JSON (Content-Type: application/json)".to_string(),
        });
    }

    let value: Value = serde_json::from_slice(body)?;
    let Value::Object(mut fields) = value else {
        return Err(AppError::BadRequestError {
            message: "request body must be a JSON object".to_string(),
        });
    };
    Ok(PredictRequest {
        rank: fields.remove("rank"),
        category: fields.remove("category"),
    })
}

fn resolve_category_name(value: Option<Value>) -> Result<String, AppError> {
    match value {
        None => Ok("general".to_string()),
        Some(Value::String(name)) => Ok(name.to_lowercase()),
        Some(other) => Err(AppError::BadRequestError {
            message: format!("category must be a string, got {}", other),
        }),
    }
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub status: &'static str,
    pub total_matches: usize,
    pub your_rank: i64,
    pub category: String,
    pub colleges: Vec<PredictionResult>,
}

/// POST /api/predict
///
/// The body must be a JSON object sent as `application/json`; anything else
/// yields the 400 error shape.
pub async fn predict(
    State(dataset): State<SharedDataset>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PredictResponse>, AppError> {
    let request = parse_predict_request(&headers, &body)?;

    let rank = query::coerce_rank(request.rank.as_ref())?;
    let category = resolve_category_name(request.category)?;

    let prediction = query::predict(&dataset, rank, Category::resolve(&category));
    tracing::debug!(
        "Prediction for rank {} ({}): {} matches",
        rank,
        category,
        prediction.total_matches
    );

    Ok(Json(PredictResponse {
        status: "success",
        total_matches: prediction.total_matches,
        your_rank: rank,
        category,
        colleges: prediction.colleges,
    }))
}

#[derive(Serialize)]
pub struct CollegesResponse<'a> {
    pub status: &'static str,
    pub total: usize,
    pub colleges: &'a [CollegeRecord],
}

/// GET /api/colleges
pub async fn list_colleges(State(dataset): State<SharedDataset>) -> Response {
    let colleges = query::list_all(&dataset);
    Json(CollegesResponse {
        status: "success",
        total: colleges.len(),
        colleges,
    })
    .into_response()
}

#[derive(Serialize)]
pub struct SearchResponse<'a> {
    pub status: &'static str,
    pub results: Vec<&'a CollegeRecord>,
}

/// GET /api/college/:name
pub async fn search_college(
    State(dataset): State<SharedDataset>,
    Path(name): Path<String>,
) -> Response {
    let results = query::search_by_name(&dataset, &name);
    tracing::debug!("Search '{}' matched {} colleges", name, results.len());
    Json(SearchResponse {
        status: "success",
        results,
    })
    .into_response()
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(
            "❌ Request failed: {} (Category: {:?})",
            self,
            self.category()
        );
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                status: "error",
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
