use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The fixed dispatch origin all distances are measured from.
///
/// Routing legs are always shop → customer, so this is configuration rather
/// than request input.
#[derive(Debug, Clone)]
pub struct ShopOrigin {
    pub lat: f64,
    pub lon: f64,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base URL of the forward-geocoding provider (Nominatim-shaped API).
    pub geocoder_base_url: String,
    /// Base URL of the routing provider (OSRM-shaped API).
    pub router_base_url: String,
    /// Descriptive client identifier sent on every outbound provider call.
    pub http_user_agent: String,
    /// Per-request timeout for outbound geocoding/routing calls.
    pub request_timeout_secs: u64,
    pub shop_origin: ShopOrigin,
}
