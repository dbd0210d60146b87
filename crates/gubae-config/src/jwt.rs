use std::env;

use crate::ConfigError;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl JwtConfig {
    /// Reads `JWT_SECRET`, which must be set and non-blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self { secret })
    }

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

// The secret never shows up in logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_env::{ENV_LOCK, set_env};

    #[test]
    fn test_from_env_requires_secret() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        set_env("JWT_SECRET", None);
        assert!(matches!(
            JwtConfig::from_env(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));

        set_env("JWT_SECRET", Some("   "));
        assert!(matches!(
            JwtConfig::from_env(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));

        set_env("JWT_SECRET", Some("a-real-secret"));
        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "a-real-secret");

        set_env("JWT_SECRET", None);
    }

    #[test]
    fn test_missing_secret_message_names_variable() {
        assert_eq!(
            ConfigError::Missing("JWT_SECRET").to_string(),
            "JWT_SECRET must be set"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("super-secret-value");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
