use welfare_cloud::geolocation::DEFAULT_GEOLOCATION_URL;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Outbound integrations (`CLOUDINARY_*`, `MEEZAN_*`) read their own
/// variables in `welfare_cloud`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Whether `POST /api/admin/register` accepts new accounts.
    pub admin_registration_enabled: bool,
    /// Base URL of the ip-api compatible lookup service.
    pub geolocation_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                                         |
    /// |------------------------------|-------------------------------------------------|
    /// | `HOST`                       | `0.0.0.0`                                       |
    /// | `PORT`                       | `5000`                                          |
    /// | `CORS_ORIGINS`               | `http://localhost:5173,http://localhost:3000`   |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                                            |
    /// | `ADMIN_REGISTRATION_ENABLED` | `true`                                          |
    /// | `GEOLOCATION_URL`            | `http://ip-api.com/json`                        |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers and when `JWT_SECRET` is missing, so a
    /// misconfigured server fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_registration_enabled = std::env::var("ADMIN_REGISTRATION_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let geolocation_url = std::env::var("GEOLOCATION_URL")
            .unwrap_or_else(|_| DEFAULT_GEOLOCATION_URL.to_string());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            admin_registration_enabled,
            geolocation_url,
        }
    }
}

/// `false`, `0`, `no` and `off` (any case) disable a flag; anything else
/// enables it.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" off "));
        assert!(!parse_flag("0"));
    }
}
