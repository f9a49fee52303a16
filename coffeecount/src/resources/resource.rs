use crate::app::{Config, StoreBackend, StoreCfg};
use crate::errors::CoffeeError;
use crate::resources::localizer::Localizer;
use crate::resources::random::ThreadRandom;
use crate::services::{CounterStore, DynamoBackend, MemoryBackend};
use aws_config::{BehaviorVersion, Region};
use std::sync::Arc;

/// Resource's should be alive during application runtime.
/// It's usually related to external services like the counter table client.
#[allow(async_fn_in_trait)]
pub trait Resource<'a>: Sized {
    type Cfg;

    async fn init_resource(config: Self::Cfg) -> Result<Self, CoffeeError>;
}

impl<'a> Resource<'a> for aws_sdk_dynamodb::Client {
    type Cfg = &'a StoreCfg;

    async fn init_resource(config: Self::Cfg) -> Result<Self, CoffeeError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;

        Ok(aws_sdk_dynamodb::Client::new(&sdk_config))
    }
}

impl<'a> Resource<'a> for CounterStore {
    type Cfg = &'a StoreCfg;

    async fn init_resource(config: Self::Cfg) -> Result<Self, CoffeeError> {
        match config.backend {
            StoreBackend::Dynamodb => {
                let table_name = config.table_name.clone().ok_or_else(|| {
                    CoffeeError::ConfigError("Missing store.table_name for dynamodb backend".to_string())
                })?;
                let client = aws_sdk_dynamodb::Client::init_resource(config).await?;

                Ok(CounterStore::new(Arc::new(DynamoBackend::new(client, table_name))))
            }
            StoreBackend::Memory => {
                log::warn!("Using in-memory counter store, counts are lost on restart");

                Ok(CounterStore::new(Arc::new(MemoryBackend::new())))
            }
        }
    }
}

impl<'a> Resource<'a> for Localizer {
    type Cfg = &'a Config;

    async fn init_resource(config: Self::Cfg) -> Result<Self, CoffeeError> {
        Localizer::new(&config.default_locale, Arc::new(ThreadRandom))
    }
}
