use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Production endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://gsg.pw/api/v1";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub project: u64,
    pub secret: Secret<String>,
    pub endpoint: String,
}

// Custom Serialize implementation - never expose the secret in serialization
impl Serialize for GatewayConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("GatewayConfig", 3)?;
        state.serialize_field("project", &self.project)?;
        state.serialize_field("secret", "[REDACTED]")?;
        state.serialize_field("endpoint", &self.endpoint)?;
        state.end()
    }
}

// Custom Deserialize implementation
impl<'de> Deserialize<'de> for GatewayConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct GatewayConfigHelper {
            project: u64,
            secret: String,
            endpoint: Option<String>,
        }

        let helper = GatewayConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            project: helper.project,
            secret: Secret::new(helper.secret),
            endpoint: helper
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}

impl GatewayConfig {
    /// Create a new configuration with gateway credentials and the default
    /// production endpoint.
    #[must_use]
    pub fn new(project: u64, secret: String) -> Self {
        Self {
            project,
            secret: Secret::new(secret),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_PROJECT` (e.g., `GSG_PROJECT`)
    /// - `{PREFIX}_SECRET` (e.g., `GSG_SECRET`)
    /// - `{PREFIX}_ENDPOINT` (optional, defaults to the production endpoint)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let project_var = format!("{}_PROJECT", prefix.to_uppercase());
        let secret_var = format!("{}_SECRET", prefix.to_uppercase());
        let endpoint_var = format!("{}_ENDPOINT", prefix.to_uppercase());

        let project = env::var(&project_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(project_var.clone()))?
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{}: {}", project_var, e))
            })?;

        let secret =
            env::var(&secret_var).map_err(|_| ConfigError::MissingEnvironmentVariable(secret_var))?;

        let endpoint = env::var(&endpoint_var).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            project,
            secret: Secret::new(secret),
            endpoint,
        })
    }

    /// Create configuration from .env file and environment variables
    ///
    /// This method first loads environment variables from a .env file (if it
    /// exists), then reads the configuration using the standard environment
    /// variable names.
    ///
    /// **Security Warning**: Never commit .env files to version control!
    /// Add .env to your .gitignore file.
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        // Load .env file if it exists
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // .env file doesn't exist, that's okay - continue with system env vars
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Check if this configuration carries usable credentials
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.project != 0 && !self.secret.expose_secret().is_empty()
    }

    /// Set a custom endpoint URL
    #[must_use]
    pub fn endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Get the shared secret (use carefully - exposes secret)
    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_endpoint() {
        let config = GatewayConfig::new(1290, "secret".to_string());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.project, 1290);
        assert!(config.has_credentials());
    }

    #[test]
    fn empty_credentials_detected() {
        let config = GatewayConfig::new(0, String::new());
        assert!(!config.has_credentials());
    }

    #[test]
    fn serialization_redacts_secret() {
        let config = GatewayConfig::new(1290, "super-secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("[REDACTED]"));
    }

    #[test]
    fn from_env_reads_variables() {
        std::env::set_var("GSGTEST_PROJECT", "42");
        std::env::set_var("GSGTEST_SECRET", "s3cret");
        let config = GatewayConfig::from_env("gsgtest").unwrap();
        assert_eq!(config.project, 42);
        assert_eq!(config.secret(), "s3cret");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        std::env::remove_var("GSGTEST_PROJECT");
        std::env::remove_var("GSGTEST_SECRET");
    }

    #[test]
    fn from_env_rejects_non_numeric_project() {
        std::env::set_var("GSGBAD_PROJECT", "not-a-number");
        std::env::set_var("GSGBAD_SECRET", "s");
        let err = GatewayConfig::from_env("gsgbad").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration(_)));
        std::env::remove_var("GSGBAD_PROJECT");
        std::env::remove_var("GSGBAD_SECRET");
    }
}
