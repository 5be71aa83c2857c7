pub mod cache;
pub mod db;

pub use cache::ResultCache;
pub use db::{MemorySnapshotStore, SqliteSnapshotStore};
