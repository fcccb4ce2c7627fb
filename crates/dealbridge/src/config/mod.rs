use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Deployment stage the service believes it is running in. Anything not
/// recognized as production or test reads as development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Runtime configuration for the marketplace service, assembled from the
/// process environment (a `.env` file is honored when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Read `APP_ENV`, `APP_HOST`, `APP_PORT` and `APP_LOG_LEVEL`, filling
    /// in defaults for whatever is unset.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let raw_port = env::var("APP_PORT").unwrap_or_else(|_| "8080".to_string());
        let port = raw_port
            .parse::<u16>()
            .map_err(|_| ConfigError::Port { raw: raw_port })?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the HTTP listener binds.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// The host must be `localhost` or an IP literal; DNS names are not
    /// resolved here.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::Host { source })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Knobs consumed by [`crate::telemetry::init`].
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Port { raw: String },
    Host { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Port { raw } => {
                write!(f, "APP_PORT '{raw}' is not a port number in 0-65535")
            }
            ConfigError::Host { .. } => {
                write!(f, "APP_HOST must be 'localhost' or an IP literal")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Port { .. } => None,
            ConfigError::Host { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    // Env vars are process-global; tests that touch them take this lock.
    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn clear_app_env() {
        for key in ["APP_ENV", "APP_HOST", "APP_PORT", "APP_LOG_LEVEL"] {
            env::remove_var(key);
        }
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let _guard = env_lock();
        clear_app_env();

        let config = AppConfig::load().expect("defaults load");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn unparseable_port_is_reported_with_its_raw_value() {
        let _guard = env_lock();
        clear_app_env();
        env::set_var("APP_PORT", "eight-thousand");

        let result = AppConfig::load();
        env::remove_var("APP_PORT");

        match result {
            Err(ConfigError::Port { raw }) => assert_eq!(raw, "eight-thousand"),
            other => panic!("expected a port error, got {other:?}"),
        }
    }

    #[test]
    fn localhost_binds_to_loopback() {
        let _guard = env_lock();
        clear_app_env();
        env::set_var("APP_HOST", "localhost");
        env::set_var("APP_ENV", "production");

        let config = AppConfig::load().expect("config loads");
        clear_app_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        let addr = config.server.socket_addr().expect("loopback resolves");
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn hostnames_other_than_localhost_must_be_ip_literals() {
        let config = ServerConfig {
            host: "dealbridge.internal".to_string(),
            port: 9000,
        };
        assert!(matches!(
            config.socket_addr(),
            Err(ConfigError::Host { .. })
        ));
    }
}
