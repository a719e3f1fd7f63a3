use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use lexi_persistence::{
    DocumentStore, RemoteDocumentStore, SqliteDocumentStore, connection::connect_and_migrate,
};
use lexi_server::{
    auth::{AuthService, IdentityConfig},
    config::{Config, DocumentStoreKind},
    create_routes,
    dictionary::DictionaryClient,
    game_manager::GameManager,
    handlers::documents::DocumentServices,
    session::SessionRegistry,
};

async fn create_document_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.document_store {
        DocumentStoreKind::Sqlite => {
            let db = connect_and_migrate(&config.database_url).await?;
            Ok(Arc::new(SqliteDocumentStore::new(db)))
        }
        DocumentStoreKind::Remote => {
            let url = config
                .document_store_url
                .as_deref()
                .context("DOCUMENT_STORE_URL is required when DOCUMENT_STORE=remote")?;
            info!("Using remote document store at {}", url);
            Ok(Arc::new(RemoteDocumentStore::new(
                url,
                config.document_store_token.clone(),
            )))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting LexiLearn server...");

    let config = Config::new();

    let game_manager = match &config.word_list_path {
        Some(path) => {
            info!("Loading words from {}", path);
            GameManager::new_with_word_list(path)
                .with_context(|| format!("Failed to load word list '{}'", path))?
        }
        None => GameManager::new_with_default_words(),
    };
    let game_manager = Arc::new(game_manager);

    let store = create_document_store(&config)
        .await
        .context("Failed to initialise document store")?;
    let documents = Arc::new(DocumentServices::new(store));

    let auth_service = if config.auth_dev_mode {
        info!("Starting in development authentication mode - ID token validation disabled");
        Arc::new(AuthService::new_dev_mode())
    } else {
        Arc::new(AuthService::new(IdentityConfig {
            api_url: config.identity_api_url.clone(),
            api_key: config.identity_api_key.clone(),
            project_id: config.identity_project_id.clone(),
            jwks_url: config.identity_jwks_url.clone(),
        }))
    };

    let sessions = Arc::new(SessionRegistry::new());
    let dictionary = Arc::new(DictionaryClient::new(&config.dictionary_api_url));

    let routes = create_routes(
        auth_service,
        sessions.clone(),
        dictionary,
        game_manager.clone(),
        documents,
    );

    // Evict idle sessions and the games they leave behind
    let cleanup_sessions = sessions.clone();
    let cleanup_game_manager = game_manager.clone();
    let session_timeout = Duration::from_secs(config.session_timeout_minutes * 60);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            let signed_out: Vec<String> = cleanup_sessions
                .cleanup_expired(session_timeout)
                .into_iter()
                .filter(|uid| !cleanup_sessions.is_signed_in(uid))
                .collect();
            cleanup_game_manager.end_games_for(&signed_out).await;
            cleanup_game_manager
                .cleanup_abandoned_games(session_timeout)
                .await;
        }
    });

    info!("Server starting on {}:{}", config.host, config.port);

    let ip: std::net::IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST '{}'", config.host))?;

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), async {
        #[cfg(unix)]
        {
            let sigint = signal::unix::signal(signal::unix::SignalKind::interrupt());
            let sigterm = signal::unix::signal(signal::unix::SignalKind::terminate());
            match (sigint, sigterm) {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully..."),
                        _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully..."),
                    }
                }
                _ => {
                    let _ = signal::ctrl_c().await;
                    info!("Received Ctrl+C, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = signal::ctrl_c().await;
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!("Server started successfully on {}. Press Ctrl+C to stop.", addr);
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}
