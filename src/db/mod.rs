use crate::entities::restaurants;
use crate::models::PlaceResult;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // Every pooled connection to `:memory:` would see its own empty database.
        if in_memory {
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn restaurant_repo(&self) -> repositories::restaurant::RestaurantRepository {
        repositories::restaurant::RestaurantRepository::new(self.conn.clone())
    }

    pub async fn get_restaurant(&self, google_place_id: &str) -> Result<Option<restaurants::Model>> {
        self.restaurant_repo().get_by_place_id(google_place_id).await
    }

    pub async fn get_fresh_restaurant(
        &self,
        google_place_id: &str,
        fresh_since: DateTime<Utc>,
    ) -> Result<Option<restaurants::Model>> {
        self.restaurant_repo()
            .get_fresh(google_place_id, fresh_since)
            .await
    }

    pub async fn upsert_restaurant(
        &self,
        place: &PlaceResult,
        cached_at: DateTime<Utc>,
    ) -> Result<restaurants::Model> {
        self.restaurant_repo().upsert(place, cached_at).await
    }

    pub async fn restaurant_row_count(&self, google_place_id: &str) -> Result<u64> {
        self.restaurant_repo()
            .count_for_place_id(google_place_id)
            .await
    }

    pub async fn restaurant_count(&self) -> Result<u64> {
        self.restaurant_repo().count().await
    }
}
