// Main entry point
use clap::Parser;
use colored::Colorize;
use omnilate::application::credentials::validate_and_store;
use omnilate::application::input::parse_input;
use omnilate::application::query::{translate_query, QueryOptions};
use omnilate::domain::model::ServiceId;
use omnilate::domain::service::get_all_service_definitions;
use omnilate::domain::traits::SnapshotStore;
use omnilate::infrastructure::config::{self, load_config, Logging};
use omnilate::infrastructure::storage::{MemorySnapshotStore, SqliteSnapshotStore};
use omnilate::interfaces::cli::Cli;
use omnilate::presentation::output::{format_error, format_result};
use omnilate::presentation::theme::Theme;
use omnilate::AppState;
use std::sync::Arc;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Spawn signal handler task
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    // Handle commands (flags) that need no state
    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.list_services {
        print_services();
        return Ok(());
    }

    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    // Initialize AppState
    let snapshots = open_snapshot_store().await;
    let state = AppState::new(config.clone(), snapshots)?;
    if config.cache.enable {
        match state.cache.restore(state.snapshots.as_ref()).await {
            Ok(count) => tracing::debug!(count, "restored cached translations"),
            Err(e) => warn!(error = %e, "could not restore cache snapshot"),
        }
    }

    if cli.status {
        print_status(&state).await;
        return Ok(());
    }
    if cli.prune_cache {
        let removed = state.cache.prune();
        state.cache.backup(state.snapshots.as_ref()).await?;
        println!("Removed {} expired cache entries", removed);
        return Ok(());
    }
    if let Some(service) = cli.validate.as_deref() {
        return validate_key(&state, service, cli.key.clone()).await;
    }

    // Handle query
    if cli.query.is_empty() {
        eprintln!("{}", "Please provide text to translate".red());
        std::process::exit(1);
    }

    let service = match cli.service.as_deref().map(str::parse::<ServiceId>) {
        Some(Ok(id)) => Some(id),
        Some(Err(e)) => {
            eprintln!("{}", e.as_str().red());
            std::process::exit(1);
        }
        None => None,
    };

    let mut request = parse_input(&cli.query.join(" "), &config.preferences)?;
    if let Some(from) = cli.from {
        request.source = from;
    }
    if let Some(to) = cli.to {
        request.target = to;
    }
    let options = QueryOptions {
        service,
        no_cache: cli.nocache,
    };

    // Use select! so an interrupted request still exits cleanly
    let outcome = tokio::select! {
        outcome = translate_query(&state, &request, options) => outcome,
        _ = shutdown_rx => {
            eprintln!("Interrupted");
            return Ok(());
        }
    };

    if config.cache.enable && !cli.nocache {
        if let Err(e) = state.cache.backup(state.snapshots.as_ref()).await {
            warn!(error = %e, "could not save cache snapshot");
        }
    }

    match outcome {
        Ok(result) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", format_result(&result, &theme));
            }
            Ok(())
        }
        Err(err) => {
            if cli.json {
                let body = serde_json::json!({
                    "error": err.kind,
                    "message": err.user_message(),
                    "service": err.service,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                eprintln!("{}", format_error(&err, &theme));
            }
            std::process::exit(1);
        }
    }
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// SQLite snapshot store in the cache directory, or a process-local one if
/// that cannot be opened.
async fn open_snapshot_store() -> Arc<dyn SnapshotStore> {
    let path = config::get_snapshot_path();
    if let Some(parent) = path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            warn!(error = %e, "cannot create cache directory");
        }
    }

    match SqliteSnapshotStore::open(&path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "snapshot store unavailable, cache will not persist");
            Arc::new(MemorySnapshotStore::new())
        }
    }
}

async fn validate_key(state: &AppState, service: &str, key: Option<String>) -> anyhow::Result<()> {
    let service: ServiceId = service.parse().map_err(anyhow::Error::msg)?;

    let mut config = state.config.write().await;
    let key = key
        .or_else(|| config.keys.for_service(service).map(|c| c.key.clone()))
        .ok_or_else(|| anyhow::anyhow!("No API key given for {} (use --key)", service))?;

    let validation = validate_and_store(&state.registry, &mut config.keys, service, key).await?;
    config::save_config(&config)?;

    if validation.valid {
        let tier = validation
            .tier
            .map(|t| format!(" ({} tier)", t))
            .unwrap_or_default();
        println!("{}", format!("✔ {} key is valid{}", service, tier).green());
    } else {
        let reason = validation
            .error
            .map(|e| e.user_message())
            .unwrap_or("The API key is missing or invalid.");
        println!("{}", format!("✘ {} key rejected: {}", service, reason).red());
    }

    Ok(())
}

fn print_services() {
    for def in get_all_service_definitions() {
        let key = if def.requires_credential {
            "API key required"
        } else {
            "no key"
        };
        println!(
            "{:<8} {:<18} {:?}, {}",
            def.id.as_str().bold(),
            def.name,
            def.kind,
            key
        );
    }
}

async fn print_status(state: &AppState) {
    println!("{}", "omnilate Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = state.config.read().await;
    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!(
        "Install ID: {}",
        config.install_id.as_deref().unwrap_or("not generated")
    );

    // Services in fallback order
    for (i, id) in config.preferences.enabled_services.iter().enumerate() {
        let role = if i == 0 { "primary" } else { "fallback" };
        let available = if state.registry.is_available(*id, &config.keys) {
            "available".green()
        } else {
            "unavailable".red()
        };
        println!("  {}. {:<8} {:<9} {}", i + 1, id.as_str(), role, available);
    }

    // Cache status
    let stats = state.cache.stats();
    println!(
        "Cache: {} entries ({} hits, {} misses, {} expired)",
        state.cache.size(),
        stats.hits,
        stats.misses,
        stats.expired
    );
    println!("Snapshot: {}", config::get_snapshot_path().display());
}
