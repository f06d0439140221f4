//! HTTP + WebSocket API for weld stations
//!
//! Endpoints:
//! - POST /station/new - Create station (optional config, seam, heat)
//! - GET /station/{id} - Station status
//! - POST /station/{id}/event - Feed one station event
//! - GET /station/{id}/report - Report of the last graded pass
//! - WS /ws/{id} - Live step outputs
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use crate::core::scenario::plate_under;
use crate::core::{apply_event, StationEvent, WeldRig, WeldSession};
use crate::types::{PassReport, Seam, StepOutput, Verdict, WeldConfig, WeldState};

/// One welding station: engine, simulated rig and its live channel
#[derive(Debug)]
pub struct Station {
    pub session: WeldSession,
    pub rig: WeldRig,
    pub update_tx: broadcast::Sender<StepOutput>,
}

/// App state
pub struct AppState {
    pub stations: RwLock<HashMap<String, Station>>,
    pub default_config: WeldConfig,
}

/// Create new station request
#[derive(Debug, Default, Deserialize)]
pub struct NewStationRequest {
    pub config: Option<WeldConfig>,
    pub seam: Option<Seam>,
    /// Start with gas and display on and the dial at this value
    pub ready_heat: Option<i32>,
}

/// Create new station response
#[derive(Debug, Serialize)]
pub struct NewStationResponse {
    pub station_id: String,
    pub websocket_url: String,
}

/// Station status response
#[derive(Debug, Serialize)]
pub struct StationStatusResponse {
    pub station_id: String,
    pub state: WeldState,
    pub bead_count: usize,
    pub trigger_held: bool,
    pub gas_on: bool,
    pub gas_warning_visible: bool,
    pub display_on: bool,
    pub heat: i32,
    pub display_text: String,
    pub lock_notice_visible: bool,
    pub verdict_visible: bool,
    pub last_verdict: Option<Verdict>,
    pub clock_secs: f64,
}

/// Event response
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub state: WeldState,
    pub outputs: Vec<StepOutput>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub stations_active: usize,
}

/// Create the API router
pub fn create_router(default_config: WeldConfig) -> Router {
    let state = Arc::new(AppState {
        stations: RwLock::new(HashMap::new()),
        default_config,
    });

    Router::new()
        .route("/health", get(health))
        .route("/station/new", post(create_station))
        .route("/station/:id", get(get_station))
        .route("/station/:id/event", post(post_event))
        .route("/station/:id/report", get(get_report))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stations = state.stations.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        stations_active: stations.len(),
    })
}

/// Create new station
async fn create_station(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewStationRequest>,
) -> Result<Json<NewStationResponse>, StatusCode> {
    let config = req.config.unwrap_or_else(|| state.default_config.clone());
    config.validate().map_err(|_| StatusCode::BAD_REQUEST)?;

    let seam = req.seam.unwrap_or_else(default_seam);
    let mut rig = WeldRig::new().with_plate(plate_under(&seam));
    if let Some(heat) = req.ready_heat {
        rig = rig.ready(heat);
    }

    let station_id = generate_station_id();
    let (tx, _) = broadcast::channel(100);
    let station = Station {
        session: WeldSession::new(seam, config),
        rig,
        update_tx: tx,
    };

    let mut stations = state.stations.write().await;
    stations.insert(station_id.clone(), station);
    info!(station = %station_id, "station created");

    Ok(Json(NewStationResponse {
        station_id: station_id.clone(),
        websocket_url: format!("/ws/{}", station_id),
    }))
}

/// Get station status
async fn get_station(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StationStatusResponse>, StatusCode> {
    let stations = state.stations.read().await;
    let station = stations.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let session = &station.session;
    let rig = &station.rig;

    Ok(Json(StationStatusResponse {
        station_id: id,
        state: session.state(),
        bead_count: session.beads().len(),
        trigger_held: session.trigger_held(),
        gas_on: rig.gas.is_on(),
        gas_warning_visible: rig.gas_warning_visible(),
        display_on: rig.display.is_on(),
        heat: rig.dial.value(),
        display_text: rig.dial.display_text(rig.display.is_on()),
        lock_notice_visible: session.lock_notice_visible(),
        verdict_visible: session.verdict_visible(),
        last_verdict: session.last_verdict(),
        clock_secs: session.clock().as_secs_f64(),
    }))
}

/// Feed one event to a station
async fn post_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(event): Json<StationEvent>,
) -> Result<Json<EventResponse>, StatusCode> {
    event.validate().map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut stations = state.stations.write().await;
    let station = stations.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    debug!(station = %id, ?event, "station event");
    let outputs = apply_event(&mut station.session, &mut station.rig, &event);

    // Broadcast; nobody listening is fine
    for output in &outputs {
        let _ = station.update_tx.send(output.clone());
    }

    Ok(Json(EventResponse {
        state: station.session.state(),
        outputs,
    }))
}

/// Get the report of the last graded pass
async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PassReport>, StatusCode> {
    let stations = state.stations.read().await;
    let station = stations.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let report = station.session.last_report().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(report.clone()))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let stations = state.stations.read().await;
    let station = stations.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = station.update_tx.subscribe();
    drop(stations);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Handle WebSocket connection
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<StepOutput>) {
    let (mut sender, _receiver) = socket.split();
    while let Ok(update) = rx.recv().await {
        let json = serde_json::to_string(&update).unwrap_or_default();
        if sender.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

/// 20cm seam along X, centered on the origin
fn default_seam() -> Seam {
    Seam::new(Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0))
}

/// Generate station ID
fn generate_station_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("station_{:x}_{}", nanos as u64, n)
}

/// Run the API server
pub async fn run_server(addr: &str, default_config: WeldConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(default_config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "weldpass API listening");
    println!("🔥 Weldpass API running on {}", addr);
    println!("  POST /station/new         - Create station");
    println!("  GET  /station/:id         - Get status");
    println!("  POST /station/:id/event   - Feed event");
    println!("  GET  /station/:id/report  - Last pass report");
    println!("  WS   /ws/:id              - Live updates");
    println!("  GET  /health              - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
