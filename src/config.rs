use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub db_url: String,
    pub app_name: String,
    pub deployment: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load from .env file if available
        let db_url = match env::var("DB_URL") {
            Ok(url) => url,
            Err(_) => format!(
                "{}://{}:{}@{}:{}/{}",
                env::var("DB_PREFIX").unwrap_or_else(|_| "postgresql".to_string()),
                env::var("DB_USER").context("DB_USER must be set when DB_URL is not")?,
                env::var("DB_PASSWORD").context("DB_PASSWORD must be set when DB_URL is not")?,
                env::var("DB_HOST").context("DB_HOST must be set when DB_URL is not")?,
                env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string()),
                env::var("DB_NAME").context("DB_NAME must be set when DB_URL is not")?,
            ),
        };

        Ok(Config {
            db_url,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "wellplated".to_string()),
            deployment: env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            db_url: "sqlite::memory:".to_string(),
            app_name: "wellplated-test".to_string(),
            deployment: "test".to_string(),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::sentinels::ensure_sentinels;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// Fresh, migrated in-memory database with the sentinels in place.
    ///
    /// A single pooled connection keeps the in-memory database alive for the
    /// whole test and serializes concurrent transactions.
    pub async fn setup_test_db() -> DatabaseConnection {
        let config = Config::for_tests();
        let mut options = ConnectOptions::new(config.db_url);
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .expect("Failed to connect to test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run database migrations");
        ensure_sentinels(&db)
            .await
            .expect("Failed to create sentinel records");
        db
    }
}
