//! Multi-service translation with ordered fallback.
//!
//! - `domain`: request/result types, error taxonomy, language codes, service descriptors
//! - `infrastructure`: service adapters, result cache, snapshot store, config
//! - `application`: registry, fallback orchestrator, cached query entry point
//! - `presentation` / `interfaces`: terminal output and the CLI definition

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use application::orchestrator::{translate_direct, translate_with_fallback};
pub use application::registry::ProviderRegistry;
pub use domain::error::{AppError, ErrorKind, TranslationError};
pub use domain::model::{
    Credential, ServiceId, StoredApiKeys, Tier, TranslateRequest, TranslateResult,
    TranslateResultWithMeta, UserPreferences,
};
pub use domain::traits::{SnapshotStore, Translator};
pub use infrastructure::storage::ResultCache;
pub use state::AppState;
