//! HTTP + WebSocket API for the EvoLaunch decision core
//!
//! Endpoints:
//! - POST /token/new - Register a token session
//! - GET /token/{id} - Get session status
//! - POST /token/{id}/cycle - Run an evaluation cycle
//! - POST /token/{id}/governance - Set the freeze flag
//! - GET /token/{id}/record - Get the latest cycle record
//! - POST /reputation - Score a wallet
//! - WS /ws/{id} - Live updates
//! - GET /health - Health check

use axum::{
    extract::{ws::{Message, WebSocket}, Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::core::cycle::{run_cycle, CycleInput};
use crate::core::{PhaseTracker, ReputationScorer};
use crate::types::{CycleRecord, MarketMetrics, Phase, ReputationScore, Tranche, WalletHistory};

/// Per-token session state
#[derive(Debug)]
pub struct TokenSession {
    pub id: String,
    pub token_bytes: [u8; 16],
    pub tracker: PhaseTracker,
    pub tranches: Vec<Tranche>,
    pub last_record: Option<CycleRecord>,
    pub update_tx: broadcast::Sender<TokenUpdate>,
}

/// Live update message
#[derive(Debug, Clone, Serialize)]
pub struct TokenUpdate {
    pub mss: u8,
    pub phase: String,
    pub should_transition: bool,
    pub approved_tranches: Vec<u32>,
    pub freeze_recommended: bool,
}

/// App state
pub struct AppState {
    pub tokens: RwLock<HashMap<String, TokenSession>>,
}

/// Register token request
#[derive(Debug, Deserialize)]
pub struct NewTokenRequest {
    pub initial_phase: Option<Phase>,
    pub tranches: Option<Vec<Tranche>>,
}

/// Register token response
#[derive(Debug, Serialize)]
pub struct NewTokenResponse {
    pub token_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct TokenStatusResponse {
    pub token_id: String,
    pub phase: String,
    pub last_mss: u8,
    pub governance_frozen: bool,
    pub tranche_count: usize,
    pub cycle_count: u64,
    pub record_available: bool,
}

/// Run cycle request
#[derive(Debug, Deserialize)]
pub struct CycleRequest {
    pub metrics: MarketMetrics,
}

/// Run cycle response
#[derive(Debug, Serialize)]
pub struct CycleResponse {
    pub mss: u8,
    pub phase_before: String,
    pub phase_after: String,
    pub should_transition: bool,
    pub reason: String,
    pub approved_tranches: Vec<u32>,
    pub freeze_recommended: bool,
    pub record_digest: String,
}

/// Governance flag request
#[derive(Debug, Deserialize)]
pub struct GovernanceRequest {
    pub frozen: bool,
}

/// Governance flag response
#[derive(Debug, Serialize)]
pub struct GovernanceResponse {
    pub token_id: String,
    pub governance_frozen: bool,
}

/// Reputation request
#[derive(Debug, Deserialize)]
pub struct ReputationRequest {
    pub wallet: String,
    #[serde(default)]
    pub history: WalletHistory,
}

/// Record response
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub token_id: String,
    pub record: CycleRecord,
    pub digest_hex: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub tokens_active: usize,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        tokens: RwLock::new(HashMap::new()),
    });

    Router::new()
        .route("/health", get(health))
        .route("/token/new", post(create_token))
        .route("/token/:id", get(get_token))
        .route("/token/:id/cycle", post(run_token_cycle))
        .route("/token/:id/governance", post(set_governance))
        .route("/token/:id/record", get(get_record))
        .route("/reputation", post(score_reputation))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let tokens = state.tokens.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        tokens_active: tokens.len(),
    })
}

/// Register a new token session
async fn create_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewTokenRequest>,
) -> Result<Json<NewTokenResponse>, StatusCode> {
    let token_id = generate_token_id();
    let token_bytes = generate_token_bytes();
    let (tx, _) = broadcast::channel(100);

    let session = TokenSession {
        id: token_id.clone(),
        token_bytes,
        tracker: PhaseTracker::with_phase(req.initial_phase.unwrap_or(Phase::Protective)),
        tranches: req.tranches.unwrap_or_default(),
        last_record: None,
        update_tx: tx,
    };

    let mut tokens = state.tokens.write().await;
    tokens.insert(token_id.clone(), session);

    Ok(Json(NewTokenResponse {
        token_id: token_id.clone(),
        websocket_url: format!("/ws/{}", token_id),
    }))
}

/// Get session status
async fn get_token(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TokenStatusResponse>, StatusCode> {
    let tokens = state.tokens.read().await;
    let session = tokens.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(TokenStatusResponse {
        token_id: id,
        phase: session.tracker.phase().to_string(),
        last_mss: session.tracker.last_mss(),
        governance_frozen: session.tracker.governance_frozen(),
        tranche_count: session.tranches.len(),
        cycle_count: session.tracker.update_count(),
        record_available: session.last_record.is_some(),
    }))
}

/// Run one evaluation cycle for a token
async fn run_token_cycle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CycleRequest>,
) -> Result<Json<CycleResponse>, StatusCode> {
    let mut tokens = state.tokens.write().await;
    let session = tokens.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let input = CycleInput {
        token_id: session.token_bytes,
        metrics: req.metrics,
        current_phase: session.tracker.phase(),
        governance_frozen: session.tracker.governance_frozen(),
        tranches: session.tranches.clone(),
    };
    let outcome = run_cycle(&input);

    // Apply the decision to the session
    session.tracker.apply(&outcome.phase);
    session.last_record = Some(outcome.record.clone());

    // Broadcast update
    let update = TokenUpdate {
        mss: outcome.stability.mss,
        phase: outcome.phase.next_phase.to_string(),
        should_transition: outcome.phase.should_transition,
        approved_tranches: outcome.record.approved_tranches.clone(),
        freeze_recommended: outcome.record.freeze_recommended,
    };
    let _ = session.update_tx.send(update);

    Ok(Json(CycleResponse {
        mss: outcome.stability.mss,
        phase_before: outcome.phase.current_phase.to_string(),
        phase_after: outcome.phase.next_phase.to_string(),
        should_transition: outcome.phase.should_transition,
        reason: outcome.phase.reason.clone(),
        approved_tranches: outcome.record.approved_tranches.clone(),
        freeze_recommended: outcome.record.freeze_recommended,
        record_digest: outcome.record.digest_hex(),
    }))
}

/// Set or clear the governance freeze flag
async fn set_governance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<GovernanceRequest>,
) -> Result<Json<GovernanceResponse>, StatusCode> {
    let mut tokens = state.tokens.write().await;
    let session = tokens.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    session.tracker.set_governance_frozen(req.frozen);

    Ok(Json(GovernanceResponse {
        token_id: id,
        governance_frozen: req.frozen,
    }))
}

/// Get the latest cycle record
async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecordResponse>, StatusCode> {
    let tokens = state.tokens.read().await;
    let session = tokens.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    let record = session.last_record.as_ref().ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(RecordResponse {
        token_id: id,
        record: record.clone(),
        digest_hex: record.digest_hex(),
    }))
}

/// Score a wallet (stateless)
async fn score_reputation(
    Json(req): Json<ReputationRequest>,
) -> Json<ReputationScore> {
    let scorer = ReputationScorer::new();
    Json(scorer.score(req.wallet, &req.history))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let tokens = state.tokens.read().await;
    let session = tokens.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(tokens);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Handle WebSocket connection
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<TokenUpdate>) {
    while let Ok(update) = rx.recv().await {
        let json = serde_json::to_string(&update).unwrap_or_default();
        if socket.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

/// Generate token session ID
fn generate_token_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("token_{:x}", nanos as u64)
}

/// Generate token session bytes
fn generate_token_bytes() -> [u8; 16] {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut bytes = [0u8; 16];
    bytes[0..16].copy_from_slice(&nanos.to_le_bytes()[0..16]);
    bytes
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("EvoLaunch decision API running on {}", addr);
    println!("  POST /token/new            - Register token");
    println!("  GET  /token/:id            - Get status");
    println!("  POST /token/:id/cycle      - Run evaluation cycle");
    println!("  POST /token/:id/governance - Set freeze flag");
    println!("  GET  /token/:id/record     - Get latest record");
    println!("  POST /reputation           - Score wallet");
    println!("  WS   /ws/:id               - Live updates");
    println!("  GET  /health               - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
