use anyhow::Context;

use gubae_auth::TokenCodec;
use gubae_config::{CorsConfig, DatabaseConfig, JwtConfig};
use gubae_db::{DocumentStore, SharedStore, connect_store};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: SharedStore,
    pub tokens: TokenCodec,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: SharedStore, jwt_config: &JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            tokens: TokenCodec::new(jwt_config),
            cors_config,
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

/// Loads configuration from the environment and connects the document store.
///
/// A missing `JWT_SECRET` or `DATABASE_URL` is fatal: the server never starts
/// with a guessable signing secret.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let database_config = DatabaseConfig::from_env()?;

    let store = connect_store(&database_config)
        .await
        .context("Failed to connect to the document store")?;

    Ok(AppState::new(store, &jwt_config, CorsConfig::from_env()))
}
