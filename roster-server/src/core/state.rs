use shared::AppResult;

use crate::core::Config;
use crate::db::DbService;
use crate::services::EmployeeService;

/// Shared application state
///
/// Holds the configuration and the database service. Cloning is cheap:
/// the underlying connection pool is reference counted.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Database service (SQLite pool)
    pub db: DbService,
}

impl ServerState {
    /// Open the database, run migrations, and build the state
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            config: config.clone(),
            db,
        })
    }

    /// State backed by an in-memory database, for tests
    pub async fn in_memory() -> AppResult<Self> {
        let db = DbService::in_memory().await?;
        Ok(Self {
            config: Config::with_overrides(":memory:", 0),
            db,
        })
    }

    /// Employee service bound to this state's database
    pub fn employee_service(&self) -> EmployeeService {
        EmployeeService::new(self.db.clone())
    }
}
