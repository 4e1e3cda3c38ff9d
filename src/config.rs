use crate::auth::AuthConfig;
use crate::schemas::AppState;
use crate::storage::ResumeStore;
use anyhow::Result;
use sea_orm::Database;

/// Initialize application state against a specific database URL
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    // Connect to database
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    // Prepare the resume upload directory
    let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
    let storage = ResumeStore::new(&upload_dir);
    storage.ensure_root().await?;
    tracing::info!("Resume upload directory ready at {}", upload_dir);

    let auth = AuthConfig::from_env();

    Ok(AppState { db, storage, auth })
}
