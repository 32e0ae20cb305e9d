//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use hitproxy_core::error::{HitProxyError, Result};

pub use schema::{
    CounterBackend, CounterSection, DashboardSection, DownstreamSection, GatewaySection,
    ProxyConfig,
};

pub fn load_from_file(path: &str) -> Result<ProxyConfig> {
    let s = fs::read_to_string(path).map_err(|e| {
        HitProxyError::InvalidConfiguration(format!("read config failed ({path}): {e}"))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ProxyConfig> {
    let cfg: ProxyConfig = serde_yaml::from_str(s)
        .map_err(|e| HitProxyError::InvalidConfiguration(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
