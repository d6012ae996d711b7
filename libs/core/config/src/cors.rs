use crate::{ConfigError, FromEnv};

/// Allowed CORS origins, read from `CORS_ALLOWED_ORIGIN` (comma-separated).
///
/// An empty list means the variable was not set; the server decides what that
/// implies for the current [`Environment`](crate::Environment).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_configured(&self) -> bool {
        !self.allowed_origins.is_empty()
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
            return Ok(Self::default());
        };

        let allowed_origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if allowed_origins.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "no origins listed".to_string(),
            });
        }

        Ok(Self { allowed_origins })
    }
}
