use aws_sdk_s3::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects;

const JSON: Option<&str> = Some("application/json");

/// Load a JSON document. Returns the value and its ETag.
pub async fn load<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<(T, String), StorageError> {
    let output = objects::get_object(client, bucket, key).await?;
    let value: T = serde_json::from_slice(&output.body)?;
    Ok((value, output.etag.unwrap_or_default()))
}

/// Load a JSON document, mapping a missing key to `None`.
pub async fn load_optional<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Option<(T, String)>, StorageError> {
    match load(client, bucket, key).await {
        Ok(found) => Ok(Some(found)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write a JSON document unconditionally. Returns the new ETag.
pub async fn save<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec(value)?;
    objects::put_object(client, bucket, key, body, JSON).await
}

/// Write a JSON document only if its ETag is still `expected_etag`.
pub async fn save_if_match<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec(value)?;
    objects::put_object_if_match(client, bucket, key, body, JSON, expected_etag).await
}

/// Load every document under a prefix, in key order.
pub async fn load_all<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    load_first(client, bucket, prefix, usize::MAX).await
}

/// Load the first `limit` documents under a prefix, in key order.
pub async fn load_first<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    prefix: &str,
    limit: usize,
) -> Result<Vec<T>, StorageError> {
    let keys = objects::list_objects_limited(client, bucket, prefix, limit).await?;
    let mut out = Vec::with_capacity(keys.len());
    for key in &keys {
        let (value, _) = load(client, bucket, key).await?;
        out.push(value);
    }
    Ok(out)
}
