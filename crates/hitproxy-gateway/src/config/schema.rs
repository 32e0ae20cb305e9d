use std::net::SocketAddr;

use hitproxy_core::capacity::validate_read_capacity;
use hitproxy_core::error::{HitProxyError, Result};
use serde::Deserialize;

use crate::dashboard::SortKey;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub counter: CounterSection,

    pub downstream: DownstreamSection,

    #[serde(default)]
    pub dashboard: DashboardSection,
}

impl ProxyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HitProxyError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.counter.validate()?;
        self.downstream.validate()?;
        self.dashboard.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_admin_listen")]
    pub admin_listen: String,

    #[serde(default = "default_increment_timeout_ms")]
    pub increment_timeout_ms: u64,

    #[serde(default = "default_invoke_timeout_ms")]
    pub invoke_timeout_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            admin_listen: default_admin_listen(),
            increment_timeout_ms: default_increment_timeout_ms(),
            invoke_timeout_ms: default_invoke_timeout_ms(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        let listen = self.listen_addr()?;
        let admin = self.admin_listen_addr()?;
        if listen == admin {
            return Err(HitProxyError::InvalidConfiguration(
                "gateway.admin_listen must differ from gateway.listen".into(),
            ));
        }
        if !(10..=30_000).contains(&self.increment_timeout_ms) {
            return Err(HitProxyError::InvalidConfiguration(
                "gateway.increment_timeout_ms must be between 10 and 30000".into(),
            ));
        }
        if !(100..=900_000).contains(&self.invoke_timeout_ms) {
            return Err(HitProxyError::InvalidConfiguration(
                "gateway.invoke_timeout_ms must be between 100 and 900000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("gateway.listen", &self.listen)
    }

    pub fn admin_listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("gateway.admin_listen", &self.admin_listen)
    }
}

fn parse_addr(field: &str, s: &str) -> Result<SocketAddr> {
    s.parse().map_err(|e| {
        HitProxyError::InvalidConfiguration(format!("{field} must be a valid SocketAddr: {e}"))
    })
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_admin_listen() -> String {
    "127.0.0.1:8081".into()
}
fn default_increment_timeout_ms() -> u64 {
    1000
}
fn default_invoke_timeout_ms() -> u64 {
    10000
}

/// Where hit counters live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CounterBackend {
    /// Process-local; counts are lost on restart.
    #[default]
    Memory,
    /// One Redis hash per table.
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterSection {
    #[serde(default)]
    pub backend: CounterBackend,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default)]
    pub redis_url: Option<String>,

    #[serde(default)]
    pub read_capacity: Option<i64>,
}

impl Default for CounterSection {
    fn default() -> Self {
        Self {
            backend: CounterBackend::default(),
            table: default_table(),
            redis_url: None,
            read_capacity: None,
        }
    }
}

impl CounterSection {
    pub fn validate(&self) -> Result<()> {
        validate_read_capacity(self.read_capacity)?;

        if self.table.trim().is_empty() {
            return Err(HitProxyError::InvalidConfiguration(
                "counter.table must not be empty".into(),
            ));
        }
        if self.backend == CounterBackend::Redis && self.redis_url.is_none() {
            return Err(HitProxyError::InvalidConfiguration(
                "counter.redis_url is required for the redis backend".into(),
            ));
        }
        Ok(())
    }
}

fn default_table() -> String {
    "hits".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownstreamSection {
    /// Invocation endpoint that accepts the request event as a JSON POST.
    pub url: String,
}

impl DownstreamSection {
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.url).map_err(|e| {
            HitProxyError::InvalidConfiguration(format!("downstream.url is invalid: {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HitProxyError::InvalidConfiguration(
                "downstream.url must use http or https".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardSection {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_sort_by")]
    pub sort_by: String,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            sort_by: default_sort_by(),
        }
    }
}

impl DashboardSection {
    pub fn validate(&self) -> Result<()> {
        self.sort_key().map(|_| ())
    }

    pub fn sort_key(&self) -> Result<SortKey> {
        self.sort_by.parse()
    }
}

fn default_title() -> String {
    "Hello Hits".into()
}
fn default_sort_by() -> String {
    "-hits".into()
}
