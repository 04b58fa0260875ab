mod schema;
pub mod queries;

pub use schema::init_db;

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::Result;
use crate::payments::RazorpayClient;

pub type DbPool = Pool<SqliteConnectionManager>;

/// How long to wait for a pooled connection before giving up.
const POOL_TIMEOUT: Duration = Duration::from_secs(5);

pub fn create_pool(database_path: &str) -> std::result::Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path);
    Pool::builder()
        .max_size(10)
        .connection_timeout(POOL_TIMEOUT)
        .build(manager)
}

/// Lazily-opened handle to the subscriber store.
///
/// The pool is opened on first use and memoized for the process lifetime.
/// Initialization is single-flight: concurrent first callers block on the
/// cell instead of racing to open duplicate pools.
#[derive(Clone)]
pub struct Store {
    database_path: String,
    pool: Arc<OnceCell<DbPool>>,
}

impl Store {
    pub fn new(database_path: &str) -> Self {
        Self {
            database_path: database_path.to_string(),
            pool: Arc::new(OnceCell::new()),
        }
    }

    /// Wrap an already-open pool. Tests use this to inject in-memory stores.
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            database_path: String::new(),
            pool: Arc::new(OnceCell::with_value(pool)),
        }
    }

    /// Get the store handle, opening it (and the schema) on first call.
    pub fn get(&self) -> Result<&DbPool> {
        self.pool.get_or_try_init(|| {
            let pool = create_pool(&self.database_path)?;
            let conn = pool.get()?;
            schema::init_db(&conn)?;
            tracing::info!("Subscriber store opened at {}", self.database_path);
            Ok(pool)
        })
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Subscriber store; opened lazily on the first subscription.
    pub store: Store,
    /// Razorpay gateway client (order creation + signature verification).
    pub razorpay: RazorpayClient,
}
