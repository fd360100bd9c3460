//! HTTP front end for the medication registry.

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::model::{Medication, MedicationPayload, NameQuery};
use crate::storage::{create_store, MedicationStore};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

const MAX_BODY_BYTES: usize = 64 * 1024;

type SharedStore = Arc<dyn MedicationStore>;

#[derive(Clone)]
struct AppState {
    store: SharedStore,
}

/// Builds the registry routes on top of the given store.
///
/// Every path answers any HTTP method.
pub fn router(store: SharedStore) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/add", any(add_medication))
        .route("/get", any(get_medication))
        .route("/getAll", any(get_all_medications))
        .route("/update", any(update_medication_count))
        .route("/delete", any(delete_medication))
        .layer(
            tower::ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

/// A registry server running on a background task.
///
/// Used when the caller needs the bound address back, e.g. tests that bind
/// an ephemeral port.
pub struct RegistryServer {
    addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl RegistryServer {
    /// Binds according to `config` and starts serving with a fresh, empty store.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use medication_registry::{RegistryConfig, RegistryServer};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let server = RegistryServer::new(RegistryConfig::new()).await?;
    /// println!("Registry URL: {}", server.url());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: RegistryConfig) -> Result<Self> {
        Self::with_store(config, create_store()).await
    }

    /// Like [`RegistryServer::new`], serving an existing store.
    pub async fn with_store(config: RegistryConfig, store: SharedStore) -> Result<Self> {
        let app = router(store);

        let listener = TcpListener::bind(config.bind_addr()).await?;
        let addr = listener.local_addr()?;

        info!("Medication registry listening on {}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Returns the socket address the server is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the base URL of the server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Returns the port number the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Binds according to `config` and serves in the foreground until Ctrl-C.
pub async fn serve(config: RegistryConfig) -> Result<()> {
    let app = router(create_store());

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", bind_addr, e);
        e
    })?;
    info!("Medication registry listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Medication registry stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

fn log_rejected(op: &str, err: RegistryError) -> RegistryError {
    warn!("{} rejected: {}", op, err);
    err
}

async fn add_medication(State(state): State<AppState>, body: Bytes) -> Result<StatusCode> {
    let medication = MedicationPayload::from_json(&body)
        .and_then(MedicationPayload::into_new_medication)
        .map_err(|e| log_rejected("add", e))?;
    let name = medication.name.clone();

    state
        .store
        .add(medication)
        .await
        .map_err(|e| log_rejected("add", e))?;

    info!("Added medication: {}", name);
    Ok(StatusCode::CREATED)
}

async fn get_medication(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Medication>> {
    let name = query.into_name().map_err(|e| log_rejected("get", e))?;
    debug!("Getting medication: {}", name);

    let medication = state
        .store
        .get(&name)
        .await
        .map_err(|e| log_rejected("get", e))?;
    Ok(Json(medication))
}

async fn get_all_medications(State(state): State<AppState>) -> Result<Json<Vec<Medication>>> {
    let medications = state.store.list().await?;
    debug!("Listing {} medications", medications.len());
    Ok(Json(medications))
}

async fn update_medication_count(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode> {
    let (name, count) = MedicationPayload::from_json(&body)
        .and_then(MedicationPayload::into_count_update)
        .map_err(|e| log_rejected("update", e))?;

    state
        .store
        .update_count(&name, count)
        .await
        .map_err(|e| log_rejected("update", e))?;

    info!("Updated medication count: {} -> {}", name, count);
    Ok(StatusCode::OK)
}

async fn delete_medication(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<StatusCode> {
    let name = query.into_name().map_err(|e| log_rejected("delete", e))?;

    state
        .store
        .delete(&name)
        .await
        .map_err(|e| log_rejected("delete", e))?;

    info!("Deleted medication: {}", name);
    Ok(StatusCode::OK)
}
