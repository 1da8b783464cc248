use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use serde_json::Value;
use tracing::debug;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

pub type Item = HashMap<String, AttributeValue>;

/// The four item calls a table-backed repository issues.
///
/// `condition` is a DynamoDB condition expression; when it does not hold the
/// put fails with [`LibraryError::AlreadyExists`] and the delete with
/// [`LibraryError::NotFound`].
#[async_trait]
pub trait TableClient: Sync + Send {
    async fn put(&self, table_name: &str, item: Item, condition: Option<&str>) -> LibraryResult<()>;
    async fn get(&self, table_name: &str, key: Item) -> LibraryResult<Option<Item>>;
    async fn scan_with_limit(&self, table_name: &str, limit: i32) -> LibraryResult<Vec<Item>>;
    async fn delete(&self, table_name: &str, key: Item, condition: Option<&str>) -> LibraryResult<()>;
}

#[async_trait]
impl TableClient for Client {
    async fn put(&self, table_name: &str, item: Item, condition: Option<&str>) -> LibraryResult<()> {
        self.put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .set_condition_expression(condition.map(str::to_string))
            .send()
            .await.map(|_| ()).map_err(LibraryError::from)
    }

    async fn get(&self, table_name: &str, key: Item) -> LibraryResult<Option<Item>> {
        self.get_item()
            .table_name(table_name)
            .set_key(Some(key))
            .consistent_read(true)
            .send()
            .await.map(|out| out.item).map_err(LibraryError::from)
    }

    async fn scan_with_limit(&self, table_name: &str, limit: i32) -> LibraryResult<Vec<Item>> {
        self.scan()
            .table_name(table_name)
            .consistent_read(false)
            .limit(limit)
            .send()
            .await.map(|out| out.items.unwrap_or_default()).map_err(LibraryError::from)
    }

    async fn delete(&self, table_name: &str, key: Item, condition: Option<&str>) -> LibraryResult<()> {
        self.delete_item()
            .table_name(table_name)
            .set_key(Some(key))
            .set_condition_expression(condition.map(str::to_string))
            .send()
            .await.map(|_| ()).map_err(LibraryError::from)
    }
}

pub async fn create_table(client: &Client, table_name: &str, pk: &str) -> LibraryResult<()> {
    match client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(pk)
                .key_type(KeyType::Hash)
                .build(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(pk)
                .attribute_type(ScalarAttributeType::S)
                .build(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build(),
        )
        .send()
        .await
    {
        Ok(_) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Creating).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to create {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

pub async fn delete_table(client: &Client, table_name: &str) -> LibraryResult<()> {
    match client.delete_table().table_name(table_name).send().await {
        Ok(_) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Deleting).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to delete {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

// creating against an existing table is not an error for local runs
pub async fn ensure_table(client: &Client, table_name: &str, pk: &str) -> LibraryResult<()> {
    if describe_table(client, table_name).await.is_ok() {
        return Ok(());
    }
    create_table(client, table_name, pk).await
}

async fn wait_until_table_status_is_not(client: &Client, table_name: &str, other_status: TableStatus) {
    for _ in 0..30 {
        if let Ok(status) = describe_table(client, table_name).await {
            if status != other_status {
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn describe_table(client: &Client, table_name: &str) -> LibraryResult<TableStatus> {
    match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(out) => {
            out.table()
                .and_then(|table| table.table_status())
                .cloned()
                .ok_or_else(|| LibraryError::database(format!("failed to describe {} table",
                                                              table_name).as_str(), None, false))
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to describe {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

pub fn parse_item(value: Value) -> LibraryResult<Item> {
    match value_to_item(value) {
        AttributeValue::M(map) => Ok(map),
        other => Err(LibraryError::serialization(format!("failed to parse {:?}", other).as_str())),
    }
}

// a missing string is empty, any other attribute type is corrupt
pub fn parse_string_field(name: &str, map: &Item) -> LibraryResult<String> {
    match map.get(name) {
        None => Ok(String::new()),
        Some(AttributeValue::S(str)) => Ok(str.clone()),
        Some(other) => Err(LibraryError::serialization(
            format!("unexpected {} attribute {:?}", name, other).as_str())),
    }
}

// a missing number is zero, anything else that does not parse is corrupt
pub fn parse_number_attribute(name: &str, map: &Item) -> LibraryResult<i64> {
    match map.get(name) {
        None => Ok(0),
        Some(AttributeValue::N(str)) => str.parse::<i64>().map_err(|err| LibraryError::serialization(
            format!("failed to parse {} number {:?} due to {}", name, str, err).as_str())),
        Some(other) => Err(LibraryError::serialization(
            format!("unexpected {} attribute {:?}", name, other).as_str())),
    }
}

pub fn value_to_item(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_item).collect()),
        Value::Object(o) => {
            AttributeValue::M(o.into_iter().map(|(k, v)| (k, value_to_item(v))).collect())
        }
    }
}

pub async fn build_db_client(config: &Configuration) -> Client {
    match (config.store(), config.endpoint()) {
        (RepositoryStore::LocalDynamoDB, Some(endpoint)) => {
            debug!(endpoint, "using local dynamodb endpoint");
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url(endpoint)
                .build();
            Client::from_conf(dynamodb_local_config)
        }
        _ => {
            let sdk_config = aws_config::load_from_env().await;
            Client::new(&sdk_config)
        }
    }
}

impl From<SdkError<PutItemError>> for LibraryError {
    fn from(err: SdkError<PutItemError>) -> Self {
        if let SdkError::ServiceError(ctx) = &err {
            if ctx.err().is_conditional_check_failed_exception() {
                return LibraryError::already_exists("item already exists");
            }
        }
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<GetItemError>> for LibraryError {
    fn from(err: SdkError<GetItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<ScanError>> for LibraryError {
    fn from(err: SdkError<ScanError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<DeleteItemError>> for LibraryError {
    fn from(err: SdkError<DeleteItemError>) -> Self {
        if let SdkError::ServiceError(ctx) = &err {
            if ctx.err().is_conditional_check_failed_exception() {
                return LibraryError::not_found("item not found");
            }
        }
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            let status = ctx.raw().http().status();
            (status.is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()), Some(status.to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

// throttling responses are 400s whose body mentions "...Exceeded..."
fn has_exceeded_limit(body: Option<&[u8]>) -> bool {
    body.map_or(false, |b| b.windows(6).any(|w| w == b"ceeded"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use aws_sdk_dynamodb::error::SdkError;
    use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
    use aws_sdk_dynamodb::operation::put_item::PutItemError;
    use aws_sdk_dynamodb::types::AttributeValue;
    use aws_sdk_dynamodb::types::error::{ConditionalCheckFailedException, InternalServerError, ProvisionedThroughputExceededException, ResourceNotFoundException};
    use aws_smithy_http::body::SdkBody;
    use aws_smithy_http::operation::Response;
    use serde_json::json;
    use crate::core::library::LibraryError;
    use crate::utils::ddb::{has_exceeded_limit, parse_item, parse_number_attribute, parse_string_field};

    #[tokio::test]
    async fn test_should_parse_item() {
        let item = parse_item(json!({"id": "abc", "pages": 310})).expect("should parse");
        assert_eq!(Some(&AttributeValue::S("abc".to_string())), item.get("id"));
        assert_eq!(Some(&AttributeValue::N("310".to_string())), item.get("pages"));
        assert_eq!("abc", parse_string_field("id", &item).expect("should parse id"));
        assert_eq!(310, parse_number_attribute("pages", &item).expect("should parse pages"));

        assert!(matches!(parse_item(json!("scalar")), Err(LibraryError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_should_parse_number_attribute() {
        let mut item = HashMap::new();
        assert_eq!(0, parse_number_attribute("pages", &item).expect("missing is zero"));
        item.insert("pages".to_string(), AttributeValue::N("many".to_string()));
        assert!(matches!(parse_number_attribute("pages", &item), Err(LibraryError::Serialization { .. })));
        item.insert("pages".to_string(), AttributeValue::S("12".to_string()));
        assert!(matches!(parse_number_attribute("pages", &item), Err(LibraryError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_should_parse_string_field() {
        let mut item = HashMap::new();
        assert_eq!("", parse_string_field("title", &item).expect("missing is empty"));
        item.insert("title".to_string(), AttributeValue::S("The Hobbit".to_string()));
        assert_eq!("The Hobbit", parse_string_field("title", &item).expect("should parse title"));
        item.insert("title".to_string(), AttributeValue::N("42".to_string()));
        assert!(matches!(parse_string_field("title", &item), Err(LibraryError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_should_detect_exceeded_limit() {
        assert!(has_exceeded_limit(Some(&b"ProvisionedThroughputExceededException"[..])));
        assert!(!has_exceeded_limit(Some(&b"abc"[..])));
        assert!(!has_exceeded_limit(Some(&b""[..])));
        assert!(!has_exceeded_limit(None));
    }

    fn raw_response(status: u16, body: &str) -> Response {
        Response::new(http::Response::builder()
            .status(status)
            .body(SdkBody::from(body.to_string()))
            .expect("valid http response"))
    }

    #[tokio::test]
    async fn test_should_map_failed_put_condition_to_already_exists() {
        let err: SdkError<PutItemError> = SdkError::service_error(
            PutItemError::ConditionalCheckFailedException(ConditionalCheckFailedException::builder()
                .message("The conditional request failed").build()),
            raw_response(400, r#"{"__type":"ConditionalCheckFailedException"}"#));
        let err = LibraryError::from(err);
        assert!(matches!(err, LibraryError::AlreadyExists { .. }));
        assert_eq!("item already exists", err.message());
    }

    #[tokio::test]
    async fn test_should_map_failed_delete_condition_to_not_found() {
        let err: SdkError<DeleteItemError> = SdkError::service_error(
            DeleteItemError::ConditionalCheckFailedException(ConditionalCheckFailedException::builder()
                .message("The conditional request failed").build()),
            raw_response(400, r#"{"__type":"ConditionalCheckFailedException"}"#));
        let err = LibraryError::from(err);
        assert!(matches!(err, LibraryError::NotFound { .. }));
        assert_eq!("item not found", err.message());
    }

    #[tokio::test]
    async fn test_should_classify_service_failures() {
        let err: SdkError<PutItemError> = SdkError::service_error(
            PutItemError::InternalServerError(InternalServerError::builder().message("boom").build()),
            raw_response(500, r#"{"__type":"InternalServerError"}"#));
        let err = LibraryError::from(err);
        assert!(matches!(err, LibraryError::CurrentlyUnavailable { .. }));
        assert!(err.retryable());

        let err: SdkError<DeleteItemError> = SdkError::service_error(
            DeleteItemError::ProvisionedThroughputExceededException(
                ProvisionedThroughputExceededException::builder().message("slow down").build()),
            raw_response(400, r#"{"__type":"ProvisionedThroughputExceededException"}"#));
        let err = LibraryError::from(err);
        assert!(matches!(err, LibraryError::CurrentlyUnavailable { .. }));
        assert!(!err.is_not_found());

        let err: SdkError<DeleteItemError> = SdkError::service_error(
            DeleteItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder().message("no table").build()),
            raw_response(400, r#"{"__type":"ResourceNotFoundException"}"#));
        let err = LibraryError::from(err);
        assert!(matches!(err, LibraryError::Database { retryable: false, .. }));
        assert!(!err.is_not_found());
    }
}
