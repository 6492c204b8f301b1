use std::sync::Arc;

use axum::Router;
use pitchcraft_agent::DialogueEngine;
use pitchcraft_core::config::{AppConfig, ConfigError};
use pitchcraft_core::errors::ApplicationError;
use pitchcraft_core::sales::catalog::configured_source;
use thiserror::Error;
use tracing::info;

use crate::{chat, health};

pub struct Application {
    pub config: AppConfig,
    pub engine: Arc<DialogueEngine>,
    pub catalog_source: String,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog load failed: {0}")]
    Catalog(#[source] ApplicationError),
    #[error("dialogue engine initialization failed: {0}")]
    Engine(#[source] ApplicationError),
}

impl Application {
    pub fn router(&self) -> Router {
        chat::router(self.engine.clone())
            .merge(health::router(self.engine.clone(), self.catalog_source.clone()))
    }
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );
    let source = configured_source(config.catalog.path.as_deref());
    let catalog_source = source.describe();
    let catalog = source.load().map_err(BootstrapError::Catalog)?;
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        catalog_source = %catalog_source,
        catalog_size = catalog.len(),
        "catalog loaded"
    );

    let engine =
        DialogueEngine::new(catalog, config.signals.clone()).map_err(BootstrapError::Engine)?;
    info!(
        event_name = "system.bootstrap.engine_ready",
        correlation_id = "bootstrap",
        "dialogue engine initialized"
    );

    Ok(Application { config, engine: Arc::new(engine), catalog_source })
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::sync::{Mutex, OnceLock};

    use pitchcraft_core::config::{AppConfig, ConfigOverrides, LoadOptions};
    use tempfile::TempDir;

    use crate::bootstrap::{bootstrap_with_config, Application, BootstrapError};

    const ENV_KEYS: [&str; 12] = [
        "PITCHCRAFT_SERVER_BIND_ADDRESS",
        "PITCHCRAFT_SERVER_PORT",
        "PITCHCRAFT_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "PITCHCRAFT_LOGGING_LEVEL",
        "PITCHCRAFT_LOGGING_FORMAT",
        "PITCHCRAFT_LOG_LEVEL",
        "PITCHCRAFT_LOG_FORMAT",
        "PITCHCRAFT_CATALOG_PATH",
        "PITCHCRAFT_SIGNALS_QUESTION",
        "PITCHCRAFT_SIGNALS_INTEREST",
        "PITCHCRAFT_SIGNALS_HESITATION",
        "PITCHCRAFT_SIGNALS_BUY",
    ];

    /// Loads config with every `PITCHCRAFT_*` variable cleared, then bootstraps.
    fn bootstrap(overrides: ConfigOverrides) -> Result<Application, BootstrapError> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        let _guard = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env mutex should not be poisoned");

        let previous_values: Vec<(&str, Option<String>)> =
            ENV_KEYS.iter().map(|key| (*key, env::var(key).ok())).collect();
        for key in ENV_KEYS {
            env::remove_var(key);
        }

        let loaded = AppConfig::load(LoadOptions { overrides, ..LoadOptions::default() });

        for (key, value) in previous_values {
            if let Some(value) = value {
                env::set_var(key, value);
            }
        }

        bootstrap_with_config(loaded?)
    }

    #[test]
    fn bootstrap_defaults_to_builtin_catalog() {
        let app = bootstrap(ConfigOverrides::default()).expect("bootstrap should succeed");

        assert_eq!(app.catalog_source, "builtin");
        assert_eq!(app.engine.catalog().len(), 5);
    }

    #[test]
    fn bootstrap_loads_catalog_file_override() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"id":7,"name":"Copywriting Sprint","price":90,"category":"course",
                "tags":["writing"],"description":"Write copy that sells","benefits":["Live review"]}]"#,
        )
        .expect("write catalog");

        let app =
            bootstrap(ConfigOverrides { catalog_path: Some(path), ..ConfigOverrides::default() })
                .expect("bootstrap should succeed with a catalog file");

        assert!(app.catalog_source.starts_with("file:"));
        assert_eq!(app.engine.catalog().first().name, "Copywriting Sprint");
    }

    #[test]
    fn bootstrap_fails_fast_on_missing_catalog_file() {
        let dir = TempDir::new().expect("temp dir");
        let result = bootstrap(ConfigOverrides {
            catalog_path: Some(dir.path().join("absent.json")),
            ..ConfigOverrides::default()
        });

        assert!(matches!(result, Err(BootstrapError::Catalog(_))));
    }

    #[test]
    fn bootstrap_rejects_invalid_port() {
        let result = bootstrap(ConfigOverrides { port: Some(0), ..ConfigOverrides::default() });

        let message = result.err().expect("error").to_string();
        assert!(message.contains("server.port"));
    }
}
