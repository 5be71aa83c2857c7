use crate::domain::error::AppError;
use crate::domain::traits::SnapshotStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;
use tokio_rusqlite::Connection;

/// Name of the single snapshot slot the result cache writes to.
pub const CACHE_SNAPSHOT: &str = "result-cache";

async fn init_database(db: &Connection) -> Result<(), AppError> {
    db.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshot (
                name TEXT PRIMARY KEY,
                data BLOB NOT NULL,
                compressed_size INTEGER NOT NULL,
                original_size INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )
        .map(|_| ())
    })
    .await?;

    Ok(())
}

/// SQLite-backed snapshot store
///
/// Blobs are zstd-compressed; one row per snapshot name.
pub struct SqliteSnapshotStore {
    conn: Connection,
    name: String,
}

impl SqliteSnapshotStore {
    pub async fn open(db_path: &Path) -> Result<Self, AppError> {
        let conn = Connection::open(db_path.to_path_buf()).await?;
        init_database(&conn).await?;
        Ok(Self {
            conn,
            name: CACHE_SNAPSHOT.to_string(),
        })
    }

    pub async fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory().await?;
        init_database(&conn).await?;
        Ok(Self {
            conn,
            name: CACHE_SNAPSHOT.to_string(),
        })
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, AppError> {
        use rusqlite::OptionalExtension;
        use std::io::Cursor;
        use tokio_rusqlite::params;
        use zstd::stream::decode_all;

        let name = self.name.clone();
        let compressed: Option<Vec<u8>> = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT data FROM snapshot WHERE name = ?",
                    params![name],
                    |row| row.get(0),
                )
                .optional()
            })
            .await?;

        match compressed {
            Some(data) => Ok(Some(decode_all(Cursor::new(&data))?)),
            None => Ok(None),
        }
    }

    async fn save(&self, blob: Vec<u8>) -> Result<(), AppError> {
        use std::io::Cursor;
        use tokio_rusqlite::params;
        use zstd::stream::encode_all;

        let compressed = encode_all(Cursor::new(&blob), 0)?;
        let compressed_len = compressed.len();
        let original_len = blob.len();
        let now = chrono::Utc::now().timestamp();
        let name = self.name.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO snapshot (name, data, compressed_size, original_size, updated_at)
                     VALUES (?, ?, ?, ?, ?)",
                    params![name, compressed, compressed_len, original_len, now],
                )
            })
            .await?;

        Ok(())
    }
}

/// Process-local snapshot store, for tests and runs without a cache directory.
#[derive(Default)]
pub struct MemorySnapshotStore {
    slot: Mutex<Option<Vec<u8>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, AppError> {
        Ok(self.slot.lock().clone())
    }

    async fn save(&self, blob: Vec<u8>) -> Result<(), AppError> {
        *self.slot.lock() = Some(blob);
        Ok(())
    }
}
