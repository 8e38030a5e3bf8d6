pub mod middleware;
pub mod prompt;
pub mod routes;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, warn};

use crate::board::render::LIST_CLICK_ACTION;
use crate::board::{BoardElements, BoardState};
use crate::errors::HostError;
use crate::services::activities_api_service::HttpActivitiesApi;
use middleware::visitor::visitor_session;
use prompt::PendingConfirmation;
use routes::{board_actions, page};

/// Visitors kept in memory; the least recently seen one is dropped beyond this.
pub const MAX_VISITORS: usize = 1024;

/// One visitor's copy of the board.
#[derive(Debug)]
pub struct VisitorPage {
    pub state: BoardState,
    pub pending: Option<PendingConfirmation>,
    last_seen: Instant,
}

impl VisitorPage {
    fn new() -> Self {
        Self {
            state: BoardState::default(),
            pending: None,
            last_seen: Instant::now(),
        }
    }
}

/// Shared by all requests. Visitor pages are only locked to read or apply a step, never while
/// the activities service is being called.
#[derive(Clone)]
pub struct AppState {
    pub api: HttpActivitiesApi,
    pub elements: Arc<BoardElements>,
    visitors: Arc<Mutex<HashMap<String, VisitorPage>>>,
}

impl AppState {
    pub fn new(api: HttpActivitiesApi, elements: BoardElements) -> Self {
        Self {
            api,
            elements: Arc::new(elements),
            visitors: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Runs `f` on the visitor's page, creating it on first sight.
    pub fn with_visitor<R>(&self, id: &str, f: impl FnOnce(&mut VisitorPage) -> R) -> R {
        let mut visitors = self.visitors.lock().unwrap_or_else(PoisonError::into_inner);
        if !visitors.contains_key(id) && visitors.len() >= MAX_VISITORS {
            evict_least_recent(&mut visitors);
        }
        let page = visitors
            .entry(id.to_string())
            .or_insert_with(VisitorPage::new);
        page.last_seen = Instant::now();
        f(page)
    }

    pub fn visitor_count(&self) -> usize {
        self.visitors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn evict_least_recent(visitors: &mut HashMap<String, VisitorPage>) {
    let oldest = visitors
        .iter()
        .min_by_key(|(_, page)| page.last_seen)
        .map(|(id, _)| id.clone());
    if let Some(id) = oldest {
        debug!("Dropping board state of visitor {}", id);
        visitors.remove(&id);
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::board_page))
        .route("/signup-form", post(board_actions::signup_handler))
        .route(LIST_CLICK_ACTION, post(board_actions::list_click_handler))
        .layer(from_fn(visitor_session))
        .route("/health", get(|| async { "ok" }))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

/// Binds `host:port`, or `host:port+1` when the preferred port is taken.
pub async fn bind_with_fallback(host: &str, port: u16) -> Result<TcpListener, HostError> {
    let addr = socket_addr(host, port)?;
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            let fallback_port = port
                .checked_add(1)
                .ok_or_else(|| HostError::Address(format!("{}:{}", host, port)))?;
            warn!(
                "⚠️  Kon niet binden op {}: {}. Probeer fallback {}:{}",
                addr, e, host, fallback_port
            );
            let fallback = socket_addr(host, fallback_port)?;
            Ok(TcpListener::bind(fallback).await?)
        }
    }
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, HostError> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|_| HostError::Address(format!("{}:{}", host, port)))
}
