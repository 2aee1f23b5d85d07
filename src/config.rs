//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;
use std::fmt;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `GPIO_PIN` (optional): BCM number of the controlled output line, defaults to 23
/// - `API_USERNAME` (optional): Basic auth username, defaults to "admin"
/// - `API_PASSWORD` (optional): Basic auth password, defaults to "password"
/// - `LOG_LEVEL` (optional): tracing filter used when `RUST_LOG` is unset, defaults to "info"
/// - `SERVER_HOST` (optional): bind address, defaults to 127.0.0.1
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 5000
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_gpio_pin")]
    pub gpio_pin: u8,

    #[serde(default = "default_username")]
    pub api_username: String,

    #[serde(default = "default_password")]
    pub api_password: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_host")]
    pub server_host: String,

    #[serde(default = "default_port")]
    pub server_port: u16,
}

fn default_gpio_pin() -> u8 {
    23
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into its expected type (e.g. `GPIO_PIN=abc`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Build a config from arbitrary key/value pairs.
    ///
    /// Field names are converted the same way as for the process environment:
    /// gpio_pin -> GPIO_PIN.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
    }

    /// `LOG_LEVEL` as a tracing filter directive.
    ///
    /// Accepts the usual tracing levels plus the names `WARNING` and
    /// `CRITICAL`, case-insensitively.
    pub fn log_filter(&self) -> String {
        match self.log_level.to_lowercase().as_str() {
            "warning" => "warn".to_string(),
            "critical" | "fatal" => "error".to_string(),
            other => other.to_string(),
        }
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

// Credentials must never reach the logs, so Debug is written by hand.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gpio_pin", &self.gpio_pin)
            .field("api_username", &"<redacted>")
            .field("api_password", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}
