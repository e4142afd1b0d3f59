//! HTTP surface of the checkout service

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::catalog::Product;
use crate::domain::checkout::TransactionBuilder;
use crate::domain::pricing::sol_to_lamports;
use crate::infrastructure::blockchain::Cluster;
use crate::shared::errors::{AddressField, BuildError, ErrorKind};
use crate::shared::types::{ErrorBody, MessageBody, TransactionRequest, TransactionResponse};

#[derive(Clone)]
pub struct AppState {
    pub builder: Arc<TransactionBuilder>,
    pub cluster: Cluster,
}

#[derive(Serialize)]
struct ProductDto {
    #[serde(flatten)]
    product: Product,
    lamports: u64,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    cluster: &'static str,
    products: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/createTransaction", any(create_transaction))
        .route("/api/products", get(list_products))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until ctrl-c
pub async fn serve(bind: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {}", bind))?;
    info!("🚀 Checkout API listening on {}", bind);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server")?;

    info!("Checkout API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

pub async fn create_transaction(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    if method != Method::POST {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let request_id = Uuid::new_v4();
    let span = info_span!("create_transaction", %request_id);

    async move {
        let request = match parse_request(&body) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected malformed checkout body: {}", e);
                return message(StatusCode::BAD_REQUEST, "invalid request body");
            }
        };

        match state.builder.build(&request).await {
            Ok(prepared) => (
                StatusCode::OK,
                Json(TransactionResponse {
                    transaction: prepared.transaction,
                }),
            )
                .into_response(),
            Err(e) => error_response(&e),
        }
    }
    .instrument(span)
    .await
}

/// Empty body reads as `{}`; anything but a JSON object is rejected
fn parse_request(body: &[u8]) -> Result<TransactionRequest, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TransactionRequest::default());
    }

    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("body is not a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(MessageBody { message: text.to_string() })).into_response()
}

/// Map a build failure to the client-facing response. Upstream causes are
/// logged here and never leave the process.
fn error_response(err: &BuildError) -> Response {
    match err.kind() {
        ErrorKind::ClientInput => {
            warn!("Rejected checkout request: {}", err);
            let text = match err {
                BuildError::MissingBuyer => "missing buyer address",
                BuildError::MissingOrderID => "Missing order ID",
                BuildError::InvalidAddress { field: AddressField::Buyer, .. } => "invalid buyer address",
                _ => "invalid order ID",
            };
            message(StatusCode::BAD_REQUEST, text)
        }
        ErrorKind::NotFound => {
            warn!("Checkout for unknown item: {}", err);
            message(StatusCode::NOT_FOUND, "Item not found, please check item ID")
        }
        ErrorKind::Upstream => {
            error!("❌ Failed to create transaction: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "error creating tx".to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn list_products(State(state): State<AppState>) -> Response {
    let mut products = Vec::with_capacity(state.builder.catalog().len());
    for product in state.builder.catalog().products() {
        match sol_to_lamports(product.price) {
            Ok(lamports) => products.push(ProductDto {
                product: product.clone(),
                lamports,
            }),
            Err(e) => {
                error!("❌ Product {} has an invalid price: {}", product.id, e);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    }
    Json(products).into_response()
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cluster: state.cluster.as_str(),
        products: state.builder.catalog().len(),
    })
}
