use std::{sync::Arc, time::Instant};

use axum::{
    extract::{Query, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{
    config::Config,
    error::{HomesError, NO_RECOMMENDATION},
    models::home::{Home, HomeFeatures, NewHome, Prediction},
    pricing::{self, Regressor},
    services::homes::{self, DEFAULT_LIST_LIMIT, DEFAULT_RECOMMENDATION_LIMIT},
};

pub const API_TITLE: &str = "Boston Housing Predictor API";
pub const WELCOME_MESSAGE: &str = "Welcome to the Boston Housing Predictor API";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub model: Arc<dyn Regressor>,
}

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_list_limit")]
    pub limit: u32,
}

#[derive(Deserialize)]
pub struct RecommendationQuery {
    pub price: f64,
    #[serde(default = "default_recommendation_limit")]
    pub limit: u32,
}

fn default_list_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

fn default_recommendation_limit() -> u32 {
    DEFAULT_RECOMMENDATION_LIMIT
}

impl IntoResponse for HomesError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            HomesError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.to_string()),
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/openapi.json", get(read_openapi))
        .route("/homes/", get(list_homes).post(create_home))
        .route("/homes", get(list_homes).post(create_home))
        .route("/predict/", post(predict_price))
        .route("/predict", post(predict_price))
        .route("/recommendation/", get(recommendation))
        .route("/recommendation", get(recommendation))
        .layer(middleware::from_fn(cors_layer))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

pub async fn start_http_server(
    listener: TcpListener,
    state: AppState,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("HTTP server listening on {}", addr);
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn log_requests(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;
    info!(
        "{} {} -> {} in {:?}",
        method,
        path,
        response.status().as_u16(),
        start.elapsed()
    );
    response
}

async fn cors_layer(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        apply_cors_headers(response.headers_mut());
        *response.status_mut() = StatusCode::NO_CONTENT;
        response
    } else {
        let mut response = next.run(req).await;
        apply_cors_headers(response.headers_mut());
        response
    }
}

fn apply_cors_headers(headers: &mut axum::http::HeaderMap) {
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
}

async fn read_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

async fn read_openapi() -> Json<serde_json::Value> {
    Json(openapi_document())
}

pub fn openapi_document() -> serde_json::Value {
    let home_fields = ["rm", "lstat", "dis", "tax", "ptratio", "age", "indus"];
    let number = json!({ "type": "number" });
    let features: serde_json::Map<_, _> = home_fields
        .iter()
        .map(|name| (name.to_string(), number.clone()))
        .collect();
    let mut new_home = features.clone();
    new_home.insert("medv".to_string(), number.clone());
    let mut home = new_home.clone();
    home.insert("id".to_string(), json!({ "type": "integer" }));

    let schema_ref = |name: &str| json!({ "$ref": format!("#/components/schemas/{name}") });
    let home_list = json!({ "type": "array", "items": schema_ref("Home") });
    let body = |schema: serde_json::Value| {
        json!({ "required": true, "content": { "application/json": { "schema": schema } } })
    };
    let ok = |schema: serde_json::Value| {
        json!({ "200": { "description": "Successful Response",
                         "content": { "application/json": { "schema": schema } } } })
    };
    let int_query = |name: &str, default: u32| {
        json!({ "name": name, "in": "query", "required": false,
                "schema": { "type": "integer", "minimum": 0, "default": default } })
    };

    let mut recommendation_responses = ok(home_list.clone());
    recommendation_responses["404"] = json!({ "description": NO_RECOMMENDATION });

    json!({
        "openapi": "3.0.3",
        "info": { "title": API_TITLE, "version": env!("CARGO_PKG_VERSION") },
        "paths": {
            "/": { "get": { "responses": ok(json!({ "type": "object" })) } },
            "/homes/": {
                "get": {
                    "parameters": [int_query("skip", 0), int_query("limit", DEFAULT_LIST_LIMIT)],
                    "responses": ok(home_list.clone())
                },
                "post": {
                    "requestBody": body(schema_ref("HomeCreate")),
                    "responses": ok(schema_ref("Home"))
                }
            },
            "/predict/": {
                "post": {
                    "requestBody": body(schema_ref("HomeFeatures")),
                    "responses": ok(schema_ref("Prediction"))
                }
            },
            "/recommendation/": {
                "get": {
                    "parameters": [
                        { "name": "price", "in": "query", "required": true,
                          "schema": { "type": "number" } },
                        int_query("limit", DEFAULT_RECOMMENDATION_LIMIT)
                    ],
                    "responses": recommendation_responses
                }
            }
        },
        "components": {
            "schemas": {
                "HomeFeatures": object_schema(features),
                "HomeCreate": object_schema(new_home),
                "Home": object_schema(home),
                "Prediction": object_schema(
                    [("predicted_price_dh".to_string(), number)].into_iter().collect()
                )
            }
        }
    })
}

fn object_schema(properties: serde_json::Map<String, serde_json::Value>) -> serde_json::Value {
    let required: Vec<String> = properties.keys().cloned().collect();
    json!({ "type": "object", "required": required, "properties": properties })
}

/// Runs a storage call on the blocking pool so SQLite waits never hold a worker.
async fn run_blocking<T, F>(task: F) -> Result<T, HomesError>
where
    F: FnOnce() -> Result<T, HomesError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await?
}

async fn create_home(
    State(state): State<AppState>,
    Json(body): Json<NewHome>,
) -> Result<Json<Home>, HomesError> {
    let config = state.config.clone();
    run_blocking(move || homes::create(&config, &body))
        .await
        .map(Json)
}

async fn list_homes(
    State(state): State<AppState>,
    Query(ListQuery { skip, limit }): Query<ListQuery>,
) -> Result<Json<Vec<Home>>, HomesError> {
    let config = state.config.clone();
    run_blocking(move || homes::list(&config, skip, limit))
        .await
        .map(Json)
}

async fn predict_price(
    State(state): State<AppState>,
    Json(features): Json<HomeFeatures>,
) -> Json<Prediction> {
    Json(pricing::predict_price(
        state.model.as_ref(),
        &features,
        state.config.dirham_rate(),
    ))
}

async fn recommendation(
    State(state): State<AppState>,
    Query(RecommendationQuery { price, limit }): Query<RecommendationQuery>,
) -> Result<Json<Vec<Home>>, HomesError> {
    let config = state.config.clone();
    run_blocking(move || homes::recommend(&config, price, limit))
        .await
        .map(Json)
}
