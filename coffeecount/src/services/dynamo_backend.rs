use crate::constants::{COUNT_ATTR, ID_ATTR, LAST_MAINTENANCE_ATTR};
use crate::errors::CoffeeError;
use crate::models::UserCounter;
use crate::services::{Conditional, CounterBackend};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use std::collections::HashMap;

// `count` is a reserved word in DynamoDB expressions
const INCREMENT_EXPRESSION: &str = "SET #count = if_not_exists(#count, :zero) + :one";
const RECORD_EXISTS: &str = "attribute_exists(#id)";
const RECORD_ABSENT: &str = "attribute_not_exists(#id)";
const MAINTENANCE_EXPRESSION: &str = "SET #lastMaintenance = :lastMaintenance";

pub struct DynamoBackend {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoBackend {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

#[async_trait]
impl CounterBackend for DynamoBackend {
    async fn find(&self, id: &str) -> Result<Option<UserCounter>, CoffeeError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_ATTR, Self::key(id))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| CoffeeError::StoreError(format!("Failed to get counter: {}", DisplayErrorContext(&e))))?;

        output.item().map(|item| counter_from_item(id, item)).transpose()
    }

    async fn increment_existing(&self, id: &str) -> Result<Conditional<UserCounter>, CoffeeError> {
        let res = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_ATTR, Self::key(id))
            .update_expression(INCREMENT_EXPRESSION)
            .condition_expression(RECORD_EXISTS)
            .expression_attribute_names("#id", ID_ATTR)
            .expression_attribute_names("#count", COUNT_ATTR)
            .expression_attribute_values(":zero", AttributeValue::N("0".to_string()))
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match res {
            Ok(output) => {
                let item = output.attributes().ok_or_else(|| {
                    CoffeeError::StoreError(format!("Increment of counter {} returned no attributes", id))
                })?;

                Ok(Conditional::Applied(counter_from_item(id, item)?))
            }
            Err(e)
                if e.as_service_error()
                    .is_some_and(|service_err| service_err.is_conditional_check_failed_exception()) =>
            {
                Ok(Conditional::Rejected)
            }
            Err(e) => Err(CoffeeError::StoreError(format!(
                "Failed to increment counter: {}",
                DisplayErrorContext(&e)
            ))),
        }
    }

    async fn insert_if_absent(&self, counter: &UserCounter) -> Result<Conditional<()>, CoffeeError> {
        let res = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item(ID_ATTR, Self::key(&counter.id))
            .item(COUNT_ATTR, AttributeValue::N(counter.count.to_string()))
            .item(LAST_MAINTENANCE_ATTR, AttributeValue::N(counter.last_maintenance.to_string()))
            .condition_expression(RECORD_ABSENT)
            .expression_attribute_names("#id", ID_ATTR)
            .send()
            .await;

        match res {
            Ok(_) => Ok(Conditional::Applied(())),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|service_err| service_err.is_conditional_check_failed_exception()) =>
            {
                Ok(Conditional::Rejected)
            }
            Err(e) => Err(CoffeeError::StoreError(format!(
                "Failed to create counter: {}",
                DisplayErrorContext(&e)
            ))),
        }
    }

    async fn set_last_maintenance(&self, id: &str, last_maintenance: u64) -> Result<(), CoffeeError> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_ATTR, Self::key(id))
            .update_expression(MAINTENANCE_EXPRESSION)
            .expression_attribute_names("#lastMaintenance", LAST_MAINTENANCE_ATTR)
            .expression_attribute_values(":lastMaintenance", AttributeValue::N(last_maintenance.to_string()))
            .send()
            .await
            .map_err(|e| {
                CoffeeError::StoreError(format!("Failed to record maintenance: {}", DisplayErrorContext(&e)))
            })?;

        Ok(())
    }
}

fn counter_from_item(id: &str, item: &HashMap<String, AttributeValue>) -> Result<UserCounter, CoffeeError> {
    Ok(UserCounter {
        id: id.to_string(),
        count: number_attr(item, COUNT_ATTR)?,
        last_maintenance: number_attr(item, LAST_MAINTENANCE_ATTR)?,
    })
}

/// Missing numeric attributes read as zero.
fn number_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<u64, CoffeeError> {
    match item.get(name) {
        None => Ok(0),
        Some(AttributeValue::N(value)) => value
            .parse::<u64>()
            .map_err(|e| CoffeeError::StoreError(format!("Attribute {} is not a counter value: {}", name, e))),
        Some(other) => Err(CoffeeError::StoreError(format!(
            "Attribute {} has unexpected type: {:?}",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CounterStore;
    use aws_sdk_dynamodb::config::retry::RetryConfig;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

    const TABLE: &str = "coffee-counters";
    const AMZ_JSON: &str = "application/x-amz-json-1.0";

    fn backend(server: &MockServer) -> DynamoBackend {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-central-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url(server.uri())
            .retry_config(RetryConfig::disabled())
            .build();

        DynamoBackend::new(aws_sdk_dynamodb::Client::from_conf(config), TABLE.to_string())
    }

    fn ok(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), AMZ_JSON)
    }

    fn service_error(code: &str) -> ResponseTemplate {
        let body = json!({
            "__type": format!("com.amazonaws.dynamodb.v20120810#{}", code),
            "message": "mocked failure"
        });

        ResponseTemplate::new(400).set_body_raw(body.to_string(), AMZ_JSON)
    }

    fn operation(name: &str) -> MockBuilder {
        Mock::given(method("POST")).and(header("x-amz-target", format!("DynamoDB_20120810.{}", name).as_str()))
    }

    fn counter_item(count: u64, last_maintenance: u64) -> serde_json::Value {
        json!({
            "id": { "S": "user-1" },
            "count": { "N": count.to_string() },
            "lastMaintenance": { "N": last_maintenance.to_string() }
        })
    }

    fn item(attrs: &[(&str, AttributeValue)]) -> HashMap<String, AttributeValue> {
        attrs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn reads_counter_attributes() {
        let item = item(&[
            (ID_ATTR, AttributeValue::S("user-1".to_string())),
            (COUNT_ATTR, AttributeValue::N("12".to_string())),
            (LAST_MAINTENANCE_ATTR, AttributeValue::N("4".to_string())),
        ]);

        let counter = counter_from_item("user-1", &item).unwrap();

        assert_eq!(counter.count, 12);
        assert_eq!(counter.last_maintenance, 4);
    }

    #[test]
    fn missing_attributes_read_as_zero() {
        let item = item(&[(ID_ATTR, AttributeValue::S("user-1".to_string()))]);

        assert_eq!(counter_from_item("user-1", &item).unwrap(), UserCounter::empty("user-1"));
    }

    #[test]
    fn rejects_non_numeric_count() {
        let item = item(&[(COUNT_ATTR, AttributeValue::S("twelve".to_string()))]);

        assert!(matches!(
            counter_from_item("user-1", &item),
            Err(CoffeeError::StoreError(_))
        ));
    }

    #[tokio::test]
    async fn increment_returns_updated_attributes() {
        let server = MockServer::start().await;
        operation("UpdateItem")
            .respond_with(ok(json!({ "Attributes": counter_item(5, 2) })))
            .expect(1)
            .mount(&server)
            .await;

        let res = backend(&server).increment_existing("user-1").await.unwrap();

        assert_eq!(
            res,
            Conditional::Applied(UserCounter {
                id: "user-1".to_string(),
                count: 5,
                last_maintenance: 2,
            })
        );
    }

    #[tokio::test]
    async fn failed_increment_condition_is_rejected() {
        let server = MockServer::start().await;
        operation("UpdateItem")
            .respond_with(service_error("ConditionalCheckFailedException"))
            .mount(&server)
            .await;

        let res = backend(&server).increment_existing("user-1").await.unwrap();

        assert_eq!(res, Conditional::Rejected);
    }

    #[tokio::test]
    async fn failed_create_condition_is_rejected() {
        let server = MockServer::start().await;
        operation("PutItem")
            .respond_with(service_error("ConditionalCheckFailedException"))
            .mount(&server)
            .await;

        let res = backend(&server)
            .insert_if_absent(&UserCounter::first_coffee("user-1"))
            .await
            .unwrap();

        assert_eq!(res, Conditional::Rejected);
    }

    #[tokio::test]
    async fn throttling_is_a_store_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(service_error("ProvisionedThroughputExceededException"))
            .mount(&server)
            .await;
        let backend = backend(&server);

        assert!(matches!(
            backend.increment_existing("user-1").await,
            Err(CoffeeError::StoreError(_))
        ));
        assert!(matches!(
            backend.insert_if_absent(&UserCounter::first_coffee("user-1")).await,
            Err(CoffeeError::StoreError(_))
        ));
        assert!(matches!(
            backend.set_last_maintenance("user-1", 40).await,
            Err(CoffeeError::StoreError(_))
        ));
    }

    #[tokio::test]
    async fn find_reads_item_or_nothing() {
        let server = MockServer::start().await;
        operation("GetItem")
            .respond_with(ok(json!({ "Item": counter_item(12, 4) })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        operation("GetItem").respond_with(ok(json!({}))).mount(&server).await;
        let backend = backend(&server);

        let found = backend.find("user-1").await.unwrap().unwrap();
        assert_eq!((found.count, found.last_maintenance), (12, 4));

        assert!(backend.find("user-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn records_maintenance() {
        let server = MockServer::start().await;
        operation("UpdateItem")
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        backend(&server).set_last_maintenance("user-1", 40).await.unwrap();
    }

    #[tokio::test]
    async fn first_coffee_creates_record() {
        let server = MockServer::start().await;
        operation("UpdateItem")
            .respond_with(service_error("ConditionalCheckFailedException"))
            .expect(1)
            .mount(&server)
            .await;
        operation("PutItem").respond_with(ok(json!({}))).expect(1).mount(&server).await;
        let store = CounterStore::new(Arc::new(backend(&server)));

        let counter = store.increment_count("user-1").await.unwrap();

        assert_eq!(counter, UserCounter::first_coffee("user-1"));
    }

    #[tokio::test]
    async fn lost_create_race_retries_increment() {
        let server = MockServer::start().await;
        operation("UpdateItem")
            .respond_with(service_error("ConditionalCheckFailedException"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        operation("PutItem")
            .respond_with(service_error("ConditionalCheckFailedException"))
            .expect(1)
            .mount(&server)
            .await;
        operation("UpdateItem")
            .respond_with(ok(json!({ "Attributes": counter_item(2, 0) })))
            .expect(1)
            .mount(&server)
            .await;
        let store = CounterStore::new(Arc::new(backend(&server)));

        let counter = store.increment_count("user-1").await.unwrap();

        assert_eq!((counter.count, counter.last_maintenance), (2, 0));
    }
}
