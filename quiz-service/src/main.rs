use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tokio::signal;
use tower_http::{
    LatencyUnit,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quiz_store::store::QuizStore;

mod config;
mod error;
mod routes;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        // Log to stdout
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();

    info!("Starting server...");
    let env_vars = config::EnvVars::new();
    let port = env_vars.port;
    let request_timeout_in_ms = env_vars.request_timeout_in_ms;
    let request_body_size_limit = env_vars.request_body_size_limit;

    let store = Arc::new(RwLock::new(QuizStore::new(env_vars.reset_password.clone())));
    let app_state = config::AppState {
        store,
        env_vars,
        started_at: Instant::now(),
    };

    let app = Router::new()
        .route(
            "/questions",
            get(routes::get_questions).post(routes::post_question),
        )
        .route("/questions/reset", delete(routes::delete_questions_reset))
        .route("/questions/{id}", get(routes::get_question))
        .route("/questions/{id}/answer", put(routes::put_question_answer))
        .route("/answers", get(routes::get_answers).post(routes::post_answer))
        .route("/answers/question/{id}", get(routes::get_question_answers))
        .route("/media", get(routes::get_media).post(routes::post_media))
        .route("/media/latest", get(routes::get_latest_media))
        .route("/media/{id}", delete(routes::delete_media))
        .route("/phones", get(routes::get_phones).post(routes::post_phone))
        .route("/stats", get(routes::get_stats))
        .route("/admin/reset-all", post(routes::post_reset_all))
        .route("/api", get(routes::get_api_info))
        .route("/health", get(routes::get_health))
        .fallback(routes::fallback)
        .layer(TimeoutLayer::new(Duration::from_millis(
            request_timeout_in_ms,
        )))
        .layer(RequestBodyLimitLayer::new(request_body_size_limit))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                ),
        )
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap();
    info!("API listening on port {port}");
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        error!("Server error: {}", err);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
