use secrecy::Secret;
use serde::Deserialize;
use service_core::error::AppError;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub person_service: PersonServiceSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    5002
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// HS256 secret shared with the token-issuing service.
    pub secret: Secret<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PersonServiceSettings {
    /// Base URL of the person registry, e.g. http://person-service:5001.
    pub url: String,
    /// Bounded wait for registry calls; past this, the registry counts as
    /// unreachable.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    /// Path of the JSON snapshot holding the full id -> document mapping.
    pub data_file: PathBuf,
}

pub fn get_configuration() -> Result<Settings, AppError> {
    service_core::config::load("health-service")
}
