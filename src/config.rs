//! Backend configuration parsed from environment variables.

use uuid::Uuid;

pub const DEFAULT_IMAGE_BUCKET: &str = "advertisement-images";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Project URL without a trailing slash.
    pub backend_url: String,
    pub anon_key: String,
    /// Signed-in user's access token; requests fall back to the anon key.
    pub access_token: Option<String>,
    /// Office to post under when the session does not resolve one.
    pub office_id: Option<Uuid>,
    pub image_bucket: String,
    pub timeouts: Timeouts,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY`
    ///
    /// Optional:
    /// - `SUPABASE_ACCESS_TOKEN`
    /// - `ADBOARD_OFFICE_ID`
    /// - `ADBOARD_IMAGE_BUCKET`: default `advertisement-images`
    /// - `ADBOARD_REQUEST_TIMEOUT_SECS`: default 120
    /// - `ADBOARD_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend_url = parse_url(get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?)?;
        let anon_key = get("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
        let access_token = get("SUPABASE_ACCESS_TOKEN");
        let office_id = get("ADBOARD_OFFICE_ID")
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map_err(|e| ConfigError::Invalid { var: "ADBOARD_OFFICE_ID", message: e.to_string() })
            })
            .transpose()?;
        let image_bucket = get("ADBOARD_IMAGE_BUCKET").unwrap_or_else(|| DEFAULT_IMAGE_BUCKET.to_string());
        let timeouts = Timeouts {
            request_secs: parse_secs(get("ADBOARD_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_secs(get("ADBOARD_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { backend_url, anon_key, access_token, office_id, image_bucket, timeouts })
    }
}

fn parse_url(raw: String) -> Result<String, ConfigError> {
    if !(raw.starts_with("https://") || raw.starts_with("http://")) {
        return Err(ConfigError::Invalid { var: "SUPABASE_URL", message: format!("expected http(s) URL, got '{raw}'") });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Unparseable or zero values fall back to the default.
fn parse_secs(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
