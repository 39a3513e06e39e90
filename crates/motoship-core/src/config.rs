use crate::app_config::{AppConfig, Environment, ShopOrigin};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse. Every variable has a
/// default, so a bare environment always loads.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("MOTOSHIP_ENV", "development"));

    let bind_addr = parse_addr("MOTOSHIP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("MOTOSHIP_LOG_LEVEL", "info");

    let geocoder_base_url = or_default(
        "MOTOSHIP_GEOCODER_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let router_base_url = or_default(
        "MOTOSHIP_ROUTER_BASE_URL",
        "https://router.project-osrm.org",
    );
    let http_user_agent = or_default(
        "MOTOSHIP_HTTP_USER_AGENT",
        "motoship/0.1 (shipping-estimator)",
    );
    let request_timeout_secs = parse_u64("MOTOSHIP_REQUEST_TIMEOUT_SECS", "10")?;

    let shop_origin = ShopOrigin {
        lat: parse_f64("MOTOSHIP_SHOP_LAT", "17.385044")?,
        lon: parse_f64("MOTOSHIP_SHOP_LON", "78.486671")?,
        address: or_default("MOTOSHIP_SHOP_ADDRESS", "Hyderabad, Telangana, India"),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        geocoder_base_url,
        router_base_url,
        http_user_agent,
        request_timeout_secs,
        shop_origin,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_on_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should load");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.geocoder_base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(cfg.router_base_url, "https://router.project-osrm.org");
        assert_eq!(cfg.http_user_agent, "motoship/0.1 (shipping-estimator)");
        assert_eq!(cfg.request_timeout_secs, 10);
        assert!((cfg.shop_origin.lat - 17.385_044).abs() < 1e-9);
        assert!((cfg.shop_origin.lon - 78.486_671).abs() < 1e-9);
        assert_eq!(cfg.shop_origin.address, "Hyderabad, Telangana, India");
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("MOTOSHIP_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MOTOSHIP_BIND_ADDR"),
            "expected InvalidEnvVar(MOTOSHIP_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_shop_lat() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("MOTOSHIP_SHOP_LAT", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MOTOSHIP_SHOP_LAT"),
            "expected InvalidEnvVar(MOTOSHIP_SHOP_LAT), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_request_timeout_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("MOTOSHIP_REQUEST_TIMEOUT_SECS", "30");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn build_app_config_request_timeout_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("MOTOSHIP_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MOTOSHIP_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(MOTOSHIP_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_provider_base_url_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("MOTOSHIP_GEOCODER_BASE_URL", "http://127.0.0.1:8080");
        map.insert("MOTOSHIP_ROUTER_BASE_URL", "http://127.0.0.1:8081");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.geocoder_base_url, "http://127.0.0.1:8080");
        assert_eq!(cfg.router_base_url, "http://127.0.0.1:8081");
    }
}
