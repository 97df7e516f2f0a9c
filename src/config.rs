use dotenvy::dotenv;
use log::{error, info};
use serde::Deserialize;
use std::env;

use crate::pricing::DEFAULT_DIRHAM_RATE;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

pub const DEFAULT_DB_PATH: &str = "homes.db";
pub const DEFAULT_MODEL_PATH: &str = "models/pipeline.json";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/selva86/datasets/master/BostonHousing.csv";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_model_path")]
    pub model_path: String,
    pub http_bind_address: Option<String>,
    pub dataset_url: Option<String>,
    pub dirham_rate: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: default_db_path(),
            model_path: default_model_path(),
            http_bind_address: None,
            dataset_url: None,
            dirham_rate: None,
        }
    }
}

impl Config {
    pub fn bind_address(&self) -> &str {
        self.http_bind_address
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    pub fn dataset_source(&self) -> &str {
        self.dataset_url.as_deref().unwrap_or(DEFAULT_DATASET_URL)
    }

    pub fn dirham_rate(&self) -> f64 {
        self.dirham_rate.unwrap_or(DEFAULT_DIRHAM_RATE)
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.dirham_rate {
            Some(rate) if !(rate.is_finite() && rate > 0.0) => {
                Err(format!("dirham_rate must be a positive number, got {rate}"))
            }
            _ => Ok(()),
        }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_model_path() -> String {
    DEFAULT_MODEL_PATH.to_string()
}

/// Config backed by a fresh SQLite file in the system temp directory.
pub fn create_test_config() -> Config {
    let db_file = env::temp_dir().join(format!("homepricer-{}.db", rand::random::<u64>()));
    Config {
        db_path: db_file.to_string_lossy().into_owned(),
        model_path: concat!(env!("CARGO_MANIFEST_DIR"), "/models/pipeline.json").to_string(),
        http_bind_address: Some("127.0.0.1:0".to_string()),
        dataset_url: None,
        dirham_rate: None,
    }
}

pub fn read_config() -> Config {
    dotenv().ok();
    let Ok(config_path) = env::var(CONFIG_PATH_ENV) else {
        info!("{CONFIG_PATH_ENV} not set, using default config");
        return Config::default();
    };

    std::fs::read(&config_path)
        .map_err(|e| format!("{config_path}: {e}"))
        .and_then(|bytes| toml::from_slice::<Config>(&bytes).map_err(|e| e.to_string()))
        .and_then(|config| config.validate().map(|_| config))
        .unwrap_or_else(|err| {
            error!("failed to read config: {err}");
            std::process::exit(1);
        })
}
