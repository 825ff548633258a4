use std::fmt;
use std::time::Duration;

use phf::phf_map;
use serde_json::Value;
use tracing::warn;

use crate::error::ClientError;
use crate::normalize::{CaseFolding, DIAGNOSTICS_TARGET, KnownValue, coerce_enum};

pub const DEFAULT_BULK_URL: &str = "https://bulkapi.zerobounce.net/v2";
pub const DEFAULT_SCORING_URL: &str = "https://bulkapi.zerobounce.net/v2/scoring";

pub const ENV_API_KEY: &str = "ZEROBOUNCE_API_KEY";
pub const ENV_API_REGION: &str = "ZEROBOUNCE_API_REGION";
pub const ENV_API_URL: &str = "ZEROBOUNCE_API_URL";

/// Regional deployments of the single-address API.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApiUrlRegion {
    #[default]
    Default,
    Usa,
    Eu,
}

static API_URL_REGION: phf::Map<&'static str, ApiUrlRegion> = phf_map! {
    "default" => ApiUrlRegion::Default,
    "usa" => ApiUrlRegion::Usa,
    "eu" => ApiUrlRegion::Eu,
};

impl ApiUrlRegion {
    pub fn url(self) -> &'static str {
        match self {
            Self::Default => "https://api.zerobounce.net/v2/",
            Self::Usa => "https://api-us.zerobounce.net/v2/",
            Self::Eu => "https://api-eu.zerobounce.net/v2/",
        }
    }
}

impl KnownValue for ApiUrlRegion {
    const KIND: &'static str = "api region";

    fn lookup(wire: &str) -> Option<Self> {
        API_URL_REGION.get(wire).copied()
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Usa => "usa",
            Self::Eu => "eu",
        }
    }
}

/// Per-client settings. The API key is checked once, here.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    bulk_url: String,
    scoring_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClientError::EmptyParameter { name: "api_key" });
        }
        Ok(Self {
            api_key,
            base_url: ApiUrlRegion::Default.url().to_string(),
            bulk_url: DEFAULT_BULK_URL.to_string(),
            scoring_url: DEFAULT_SCORING_URL.to_string(),
            timeout: None,
        })
    }

    /// Build from `ZEROBOUNCE_API_KEY`, `ZEROBOUNCE_API_REGION` and
    /// `ZEROBOUNCE_API_URL`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(ENV_API_KEY).unwrap_or_default())?;

        if let Some(region) = lookup(ENV_API_REGION) {
            let raw = Value::String(region);
            let region =
                coerce_enum::<ApiUrlRegion>(Some(&raw), ENV_API_REGION, CaseFolding::Lowercase)
                    .unwrap_or_default();
            config = config.with_region(region);
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|url| !url.trim().is_empty()) {
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    pub fn with_region(mut self, region: ApiUrlRegion) -> Self {
        self.base_url = region.url().to_string();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_bulk_url(mut self, url: impl Into<String>) -> Self {
        self.bulk_url = url.into();
        self
    }

    pub fn with_scoring_url(mut self, url: impl Into<String>) -> Self {
        self.scoring_url = url.into();
        self
    }

    /// Forwarded to the transport on every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if timeout.is_zero() {
            warn!(target: DIAGNOSTICS_TARGET, "zero timeout ignored");
            self.timeout = None;
        } else {
            self.timeout = Some(timeout);
        }
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn bulk_url(&self) -> &str {
        &self.bulk_url
    }

    pub fn scoring_url(&self) -> &str {
        &self.scoring_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// The key must never end up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("bulk_url", &self.bulk_url)
            .field("scoring_url", &self.scoring_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}
