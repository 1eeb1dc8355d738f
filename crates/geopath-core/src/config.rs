// crates/geopath-core/src/config.rs
use crate::dispatch::{RouteSpec, RouteTable};
use crate::error::{GeoPathError, Result};
use crate::model::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const BACKEND_URL_ENV: &str = "GEOPATH_BACKEND_URL";
pub const BACKEND_KEY_ENV: &str = "GEOPATH_BACKEND_KEY";

/// Where the hosted backend lives and the public key that opens it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

impl BackendConfig {
    /// Reads [`BACKEND_URL_ENV`] and [`BACKEND_KEY_ENV`].
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`BackendConfig::from_env`] with an explicit variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| {
            var(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| GeoPathError::Config(format!("missing environment variable {name}")))
        };
        Ok(Self {
            url: read(BACKEND_URL_ENV)?,
            anon_key: read(BACKEND_KEY_ENV)?,
        })
    }

    /// REST endpoint for `table`.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url.trim_end_matches('/'))
    }
}

/// Router settings, usually read from a TOML file:
///
/// ```toml
/// default_locale = "es"
///
/// [[routes]]
/// pattern = "/admin"
/// page = "admin-dashboard"
/// ```
///
/// Omitting `routes` keeps the builtin table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default = "RouteSpec::builtin")]
    pub routes: Vec<RouteSpec>,
    #[serde(default)]
    pub default_locale: Locale,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            routes: RouteSpec::builtin(),
            default_locale: Locale::default(),
        }
    }
}

impl RouterConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GeoPathError::NotFound(format!("Router config not found at {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Compiles the configured routes.
    pub fn route_table(&self) -> Result<RouteTable> {
        RouteTable::compile(&self.routes)
    }
}
