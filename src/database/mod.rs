use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use std::sync::Once;

mod messages;
mod push_tokens;
mod rooms;
mod sessions;
mod users;

static INSTALL_DRIVERS: Once = Once::new();

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);

        let mut options = AnyPoolOptions::new().max_connections(20).min_connections(5);

        // Foreign key enforcement is per-connection in SQLite
        if database_url.starts_with("sqlite") {
            options = options.after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA foreign_keys = ON")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            });
        }

        let pool = options.connect(database_url).await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("migrations/sqlite").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}
