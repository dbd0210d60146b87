use anyhow::anyhow;
use serde_json::Value;
use tracing::{info, instrument, warn};

use gubae_auth::TokenCodec;
use gubae_core::{AppError, hash_password, verify_password};
use gubae_db::{Document, DocumentStore, Filter};
use gubae_models::{AdminResponse, Credential, LoginRequest, LoginResponse, RegisterRequest};

use crate::utils::records::{decode, duplicate_as};

pub const ADMIN_EXISTS: &str = "Admin already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    async fn find_credential(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<Credential>, AppError> {
        match store
            .find_one(Credential::COLLECTION, &Filter::new().eq("email", email))
            .await?
        {
            Some(document) => Ok(Some(decode(document)?)),
            None => Ok(None),
        }
    }

    /// Stores a new administrator with a bcrypt-hashed password.
    ///
    /// The early lookup skips hashing for known emails; the unique insert is
    /// what settles concurrent registrations of the same email.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn register(
        store: &dyn DocumentStore,
        dto: RegisterRequest,
    ) -> Result<AdminResponse, AppError> {
        if Self::find_credential(store, &dto.email).await?.is_some() {
            return Err(AppError::conflict(anyhow!(ADMIN_EXISTS)));
        }

        let password_hash = hash_password(&dto.password)?;

        let mut document = Document::new();
        document.insert("email".to_string(), Value::String(dto.email));
        document.insert("password".to_string(), Value::String(password_hash));

        let stored = store
            .insert_unique(Credential::COLLECTION, "email", document)
            .await
            .map_err(duplicate_as(ADMIN_EXISTS))?;
        let credential: Credential = decode(stored)?;
        info!(admin_id = %credential.id, "Admin registered");

        Ok(credential.into())
    }

    /// Checks credentials and issues an access token.
    ///
    /// Unknown email and wrong password share one message so responses do not
    /// reveal which accounts exist; only the status differs.
    #[instrument(skip(store, tokens, dto), fields(email = %dto.email))]
    pub async fn login(
        store: &dyn DocumentStore,
        tokens: &TokenCodec,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let Some(credential) = Self::find_credential(store, &dto.email).await? else {
            warn!("Login attempt for unknown admin");
            return Err(AppError::not_found(anyhow!(INVALID_CREDENTIALS)));
        };

        if !verify_password(&dto.password, &credential.password)? {
            warn!("Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let access_token = tokens.issue(&credential.email)?;
        info!("Admin logged in");

        Ok(LoginResponse { access_token })
    }
}
