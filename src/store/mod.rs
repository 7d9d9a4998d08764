//! Persistence layer — plans and progress, in memory or in libSQL.

pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::Store;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::DatabaseError;

/// Open the store selected by configuration: libSQL when a database path is
/// set, memory otherwise.
pub async fn open_store(config: &ServerConfig) -> Result<Arc<dyn Store>, DatabaseError> {
    match &config.db_path {
        Some(path) => Ok(Arc::new(LibSqlStore::new_local(path).await?)),
        None => {
            tracing::warn!("No database path configured, plans will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
