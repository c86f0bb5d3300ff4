use crate::{env_or_default, FromEnv, ConfigError};

/// Allowed CORS origins, read from the comma-separated `CORS_ALLOWED_ORIGIN`.
///
/// An empty list means "no restriction configured"; the HTTP layer decides
/// what that implies for the current [`Environment`](crate::Environment).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_restricted(&self) -> bool {
        !self.allowed_origins.is_empty()
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("CORS_ALLOWED_ORIGIN", "");
        Ok(Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        ))
    }
}
