use crate::agent::{ ChatAgent, ChatOutcome };
use crate::cli::Args;
use crate::error::ChatError;
use crate::models::chat::ChatRequest;
use crate::reply::liveness_message;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    body::Bytes,
    routing::{ get, post },
    Router,
    Json,
    extract::State,
    response::{ IntoResponse, Response },
    http::StatusCode,
};
use serde::Serialize;
use tower_http::cors::{ Any, CorsLayer };
use log::info;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Clone)]
struct AppState {
    agent: Arc<ChatAgent>,
}

pub fn create_router(agent: Arc<ChatAgent>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home_handler))
        .route("/favicon.ico", get(favicon_handler))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .with_state(AppState { agent })
}

pub async fn start_http_server(
    agent: Arc<ChatAgent>,
    args: Args,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = args.server_addr.parse::<SocketAddr>()?;
    let app = create_router(agent);

    match (args.enable_tls, args.tls_cert_path.as_ref(), args.tls_key_path.as_ref()) {
        (true, Some(cert_path), Some(key_path)) => {
            let _ = rustls::crypto::ring::default_provider().install_default();
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                cert_path,
                key_path
            ).await?;

            info!("Starting HTTPS API server on: https://{}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await?;
        }
        (true, _, _) => {
            return Err("ENABLE_TLS requires both TLS_CERT_PATH and TLS_KEY_PATH".into());
        }
        _ => {
            let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e|
                format!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e)
            )?;
            info!("Starting HTTP API server on: http://{}", addr);
            axum::serve(listener, app.into_make_service()).await?;
        }
    }

    Ok(())
}

async fn home_handler(State(state): State<AppState>) -> String {
    liveness_message(state.agent.brand_name())
}

async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn chat_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let outcome = match serde_json::from_slice::<ChatRequest>(&body) {
        Ok(request) => state.agent.respond(request).await,
        Err(e) => state.agent.fail(ChatError::InvalidRequest(e.to_string())),
    };

    match outcome {
        ChatOutcome::Reply(response) => (StatusCode::OK, Json(response)).into_response(),
        ChatOutcome::Rejected(e) =>
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })).into_response(),
        ChatOutcome::Degraded(response) =>
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response(),
    }
}
