//! Storage layer
//!
//! Two backends behind the `Storage` port: SQLite (embedded) for durable
//! deployments and DashMap (in-memory) for development and tests.

#[cfg(test)]
pub mod conformance;
pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;

use crate::config::{StorageBackend, StorageConfig};
use anyhow::Context;
use financeai_core::ports::Storage;
use financeai_core::NewUser;
use std::sync::Arc;
use tracing::info;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_EMAIL: &str = "admin@financeai.com";

/// Open the configured backend
pub async fn open(config: &StorageConfig) -> anyhow::Result<Arc<dyn Storage>> {
    let store: Arc<dyn Storage> = match config.backend {
        StorageBackend::Memory => {
            info!(
                "Using in-memory storage (unique constraints: {})",
                config.enforce_unique
            );
            if config.enforce_unique {
                Arc::new(MemoryStore::with_unique_constraints())
            } else {
                Arc::new(MemoryStore::new())
            }
        }
        StorageBackend::Sqlite => {
            info!("Using SQLite storage at: {}", config.database_path);
            Arc::new(
                Database::new(&config.database_path)
                    .await
                    .context("Failed to initialize database")?,
            )
        }
    };

    if let Some(password) = &config.admin_password {
        seed_admin(store.as_ref(), password)
            .await
            .context("Failed to seed admin user")?;
    }

    Ok(store)
}

/// Create the admin account unless one already exists
pub async fn seed_admin(store: &dyn Storage, password: &str) -> financeai_core::Result<()> {
    if store.get_user_by_username(ADMIN_USERNAME).await?.is_some() {
        info!("Admin user already present");
        return Ok(());
    }

    store
        .create_user(NewUser {
            username: ADMIN_USERNAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password: password.to_string(),
            is_admin: Some(true),
        })
        .await?;
    info!("Seeded admin user");

    Ok(())
}
