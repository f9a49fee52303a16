use crate::errors::CoffeeError;
use crate::intents::Dispatcher;
use crate::resources::localizer::Localizer;
use crate::resources::resource::Resource;
use crate::services::CounterStore;
use actix_web::web;
use serde::Deserialize;
use std::sync::Arc;
use std::{env, fs};

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Dynamodb,
    Memory,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StoreCfg {
    pub backend: StoreBackend,
    pub table_name: Option<String>,
    pub region: Option<String>,
    /// Overrides the AWS endpoint, e.g. for DynamoDB Local.
    pub endpoint_url: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    pub store: StoreCfg,
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, CoffeeError> {
        let config = toml::from_str::<Config>(contents)?;

        Ok(config)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_locale() -> String {
    crate::constants::DEFAULT_LOCALE.to_string()
}

#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub counter_store: CounterStore,
    pub localizer: Arc<Localizer>,
    pub dispatcher: Arc<Dispatcher>,
}

impl App {
    pub async fn new() -> Result<Self, CoffeeError> {
        dotenv::dotenv().ok();

        let env = env::var("ENV").map_err(|_| CoffeeError::ConfigError("ENV must be set".to_string()))?;
        let config_file = format!("config.{}.toml", env);
        let contents = fs::read_to_string(&config_file)
            .map_err(|e| CoffeeError::ConfigError(format!("Unable to read {}: {}", config_file, e)))?;
        let config = Config::parse(&contents)?;

        Self::from_config(config).await
    }

    pub async fn from_config(config: Config) -> Result<Self, CoffeeError> {
        let counter_store = CounterStore::init_resource(&config.store).await?;
        let localizer = Localizer::init_resource(&config).await?;

        log::info!(
            "Counter store: {}, default locale: {}",
            config.store.backend,
            config.default_locale
        );

        Ok(Self {
            config,
            counter_store,
            localizer: Arc::new(localizer),
            dispatcher: Arc::new(Dispatcher::default()),
        })
    }

    pub fn init_logger() {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    /// Malformed request bodies are answered with a 400 JSON error.
    pub fn json_config(&self) -> web::JsonConfig {
        web::JsonConfig::default().error_handler(|err, _req| CoffeeError::BadRequest(err.to_string()).into())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.config.host.clone(), self.config.port)
    }
}
