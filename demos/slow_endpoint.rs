//! Demo: request-scoped resource binding around slow handlers.
//!
//! Run with `cargo run --example slow_endpoint`, then:
//!
//! ```text
//! curl http://127.0.0.1:8080/fast   # completes, session left to the caller
//! curl http://127.0.0.1:8080/slow   # exceeds the deadline, session closed
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use request_scope::config::load_config;
use request_scope::{
    BoxError, LocalRegistry, RegistryKey, ResourceFactory, ScopeConfig, ScopeError, ScopeLayer,
    ScopedResource,
};

/// A stand-in database session.
struct DemoSession {
    id: u64,
    open: AtomicBool,
}

impl ScopedResource for DemoSession {
    fn close(&self) -> Result<(), BoxError> {
        self.open.store(false, Ordering::Relaxed);
        tracing::info!(session = self.id, "demo session closed");
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }
}

/// Opens one demo session per request.
#[derive(Default)]
struct DemoSessionFactory {
    opened: AtomicU64,
}

impl ResourceFactory for DemoSessionFactory {
    fn open(&self) -> Result<Arc<dyn ScopedResource>, ScopeError> {
        let id = self.opened.fetch_add(1, Ordering::Relaxed);
        tracing::info!(session = id, "demo session opened");
        Ok(Arc::new(DemoSession {
            id,
            open: AtomicBool::new(true),
        }))
    }

    fn registry_key(&self) -> RegistryKey {
        RegistryKey::new("demo-session")
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "request_scope=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = Path::new("demos/scope.toml");
    let config = if config_path.exists() {
        load_config(config_path)?
    } else {
        ScopeConfig::default()
    };

    tracing::info!(
        deadline_secs = config.timeouts.request_secs,
        close_on_timeout = config.policy.close_on_timeout,
        close_on_error = config.policy.close_on_error,
        "configuration loaded"
    );

    let registry = Arc::new(LocalRegistry::new());
    let factory = Arc::new(DemoSessionFactory::default());

    let app = Router::new()
        .route("/fast", get(|| async { "done" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        )
        .layer(ScopeLayer::new(registry, factory, config))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind("127.0.0.1:8080").await?;
    tracing::info!(address = %listener.local_addr()?, "demo server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
