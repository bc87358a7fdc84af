use std::path::PathBuf;

use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

pub async fn prepare_test_env(url: &str) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    run_migrations(url).await;
}

/// A uniquely named SQLite file in the temp dir. The file and its journal siblings are deleted when this is dropped.
pub struct TempDatabase {
    path: PathBuf,
    url: String,
}

impl TempDatabase {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("test_store_payments_{}.db", rand::random::<u64>()));
        let url = format!("sqlite://{}", path.display());
        Self { path, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Creates and migrates the database.
    pub async fn prepare(self) -> Self {
        prepare_test_env(&self.url).await;
        self
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            match std::fs::remove_file(&file) {
                Ok(()) => trace!("🚀️ Removed {}", file.to_string_lossy()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
                Err(e) => warn!("🚀️ Could not remove test database file {}: {e}", file.to_string_lossy()),
            }
        }
    }
}

pub async fn run_migrations(url: &str) {
    let db = SqliteDatabase::new_with_url(url, 1).await.expect("Error creating connection to database");
    db.migrate().await.expect("Error running DB migrations");
    db.close().await;
    info!("🚀️ Migrations complete");
}

pub async fn create_database(url: &str) {
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("Error dropping database {url}: {e:?}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("Created Sqlite database {url}");
}
