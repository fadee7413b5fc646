//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// `envy` lowercases variable names before matching, so `DbUrl` arrives as
/// `dburl` and `FUNCTIONS_CUSTOMHANDLER_PORT` as `functions_customhandler_port`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Cosmos DB Connection ===
    /// Account endpoint, e.g. `https://myaccount.documents.azure.com:443/`.
    #[serde(rename = "dburl", default)]
    pub db_url: String,

    /// Base64 master key for the account.
    #[serde(rename = "dbkey", default)]
    pub db_key: String,

    /// Database holding the `elevator` container.
    #[serde(rename = "dbname", default)]
    pub db_name: String,

    /// Upper bound on a single store query, in milliseconds.
    #[serde(default = "default_db_timeout_ms")]
    pub db_timeout_ms: u64,

    // === Server Configuration ===
    /// HTTP port, set by the Functions host for custom handlers.
    #[serde(rename = "functions_customhandler_port", default = "default_port")]
    pub port: u16,

    /// Serve Prometheus metrics on a separate listener.
    #[serde(default)]
    pub metrics_enabled: bool,

    /// Port for the Prometheus exporter.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Tracing filter directive, e.g. `info` or `elevator_snapshot=debug,warn`.
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_db_timeout_ms() -> u64 {
    5_000
}

fn default_port() -> u16 {
    8080
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_url: String::new(),
            db_key: String::new(),
            db_name: String::new(),
            db_timeout_ms: default_db_timeout_ms(),
            port: default_port(),
            metrics_enabled: false,
            metrics_port: default_metrics_port(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    ///
    /// Connection parameters are not checked here: empty values go straight
    /// to the store client, which reports its own failure per request.
    pub fn validate(&self) -> Result<(), String> {
        if self.db_timeout_ms == 0 {
            return Err("DB_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.metrics_enabled && self.metrics_port == self.port {
            return Err(format!(
                "METRICS_PORT must differ from the HTTP port ({})",
                self.port
            ));
        }

        Ok(())
    }

    /// Filter directive for the tracing subscriber.
    ///
    /// `verbose` raises this crate to debug on top of `RUST_LOG`.
    pub fn log_directive(&self, verbose: bool) -> String {
        if verbose {
            format!("elevator_snapshot=debug,{}", self.rust_log)
        } else {
            self.rust_log.clone()
        }
    }

    /// Store query timeout as a [`std::time::Duration`].
    pub fn db_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.db_timeout_ms)
    }
}
