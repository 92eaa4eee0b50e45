//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::ports::PostRepository;
use inkwell_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use inkwell_infra::PostgresPostRepository;

/// Which store backs the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub store: StoreKind,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or it cannot be reached.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match inkwell_infra::database::connect(config).await {
                Ok(conn) => Self {
                    posts: Arc::new(PostgresPostRepository::new(conn)),
                    store: StoreKind::Postgres,
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            Self::in_memory()
        };

        tracing::info!(store = state.store.as_str(), "Application state initialized");
        state
    }

    /// State over a fresh, empty in-memory repository.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            store: StoreKind::Memory,
        }
    }
}
