//! HTTP surface over [`HardwareFacade`]

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::info;
use serde::Serialize;

use crate::facade::{ErrorKind, HardwareFacade, HardwareFlags, Reply, request::parse_body};

pub type SharedFacade = Arc<HardwareFacade>;

const ROUTES: [&str; 13] = [
    "GET /api/health",
    "POST /api/led/on",
    "POST /api/led/off",
    "POST /api/led/brightness",
    "POST /api/led/emotion",
    "POST /api/led/color",
    "POST /api/led/animation",
    "POST /api/display/update",
    "POST /api/display/clear",
    "GET /api/sensors/read",
    "GET /api/system/status",
    "GET /api/emotions/list",
    "GET /",
];

#[derive(Serialize)]
struct Banner {
    message: &'static str,
    hardware: HardwareFlags,
    routes: &'static [&'static str],
}

pub fn router(facade: SharedFacade) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/led/on", post(led_on))
        .route("/api/led/off", post(led_off))
        .route("/api/led/brightness", post(led_brightness))
        .route("/api/led/emotion", post(led_emotion))
        .route("/api/led/color", post(led_color))
        .route("/api/led/animation", post(led_animation))
        .route("/api/display/update", post(display_update))
        .route("/api/display/clear", post(display_clear))
        .route("/api/sensors/read", get(sensors_read))
        .route("/api/system/status", get(system_status))
        .route("/api/emotions/list", get(emotions_list))
        .with_state(facade)
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve(
    facade: SharedFacade,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(facade))
        .with_graceful_shutdown(shutdown)
        .await
}

/// HTTP status for a reply of the given outcome
pub fn status_code(kind: Option<ErrorKind>) -> StatusCode {
    match kind {
        None => StatusCode::OK,
        Some(ErrorKind::InvalidInput) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::Device) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond<T: Serialize>(reply: Reply<T>) -> Response {
    (status_code(reply.error_kind()), Json(reply)).into_response()
}

async fn index(State(hw): State<SharedFacade>) -> Response {
    respond(Reply::Success(Banner {
        message: "Desk Buddy hardware server running",
        hardware: hw.availability().into(),
        routes: &ROUTES,
    }))
}

async fn health(State(hw): State<SharedFacade>) -> Response {
    respond(Reply::Success(hw.health()))
}

async fn led_on(State(hw): State<SharedFacade>) -> Response {
    respond(hw.led_on().await)
}

async fn led_off(State(hw): State<SharedFacade>) -> Response {
    respond(hw.led_off().await)
}

async fn led_brightness(State(hw): State<SharedFacade>, body: Bytes) -> Response {
    respond(hw.set_brightness(&parse_body(&body)).await)
}

async fn led_emotion(State(hw): State<SharedFacade>, body: Bytes) -> Response {
    respond(hw.set_emotion(&parse_body(&body)).await)
}

async fn led_color(State(hw): State<SharedFacade>, body: Bytes) -> Response {
    respond(hw.set_color(&parse_body(&body)).await)
}

async fn led_animation(State(hw): State<SharedFacade>, body: Bytes) -> Response {
    respond(hw.start_animation(&parse_body(&body)).await)
}

async fn display_update(State(hw): State<SharedFacade>, body: Bytes) -> Response {
    respond(hw.display_message(&parse_body(&body)))
}

async fn display_clear(State(hw): State<SharedFacade>) -> Response {
    respond(hw.clear_display())
}

async fn sensors_read(State(hw): State<SharedFacade>) -> Response {
    respond(hw.read_sensors().await)
}

async fn system_status(State(hw): State<SharedFacade>) -> Response {
    respond(hw.system_status().await)
}

async fn emotions_list(State(hw): State<SharedFacade>) -> Response {
    respond(hw.emotions())
}
