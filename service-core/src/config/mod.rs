use crate::error::AppError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load a service configuration from `<service_dir>/config/base.yaml`,
/// overridable through `APP`-prefixed environment variables
/// (`APP_SERVER__PORT=9000` sets `server.port`).
///
/// The file lookup works both from the workspace root and from inside the
/// service directory, so `cargo run` behaves the same from either place.
pub fn load<T: DeserializeOwned>(service_dir: &str) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let base_path = std::env::current_dir()?;
    let configuration_directory = if base_path.ends_with(service_dir) {
        base_path.join("config")
    } else {
        base_path.join(service_dir).join("config")
    };

    load_from(&configuration_directory)
}

/// Load configuration from an explicit directory. Split out so tests can
/// point at a scratch directory instead of the process working directory.
pub fn load_from<T: DeserializeOwned>(configuration_directory: &Path) -> Result<T, AppError> {
    let settings = config::Config::builder()
        .add_source(
            config::File::from(configuration_directory.join("base.yaml")).required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<T>()?)
}
