use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

/// Result of a GET operation, including the body and ETag.
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

/// Get an object from S3.
pub async fn get_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<GetObjectOutput, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let etag = resp.e_tag().map(|s| s.to_string());
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(GetObjectOutput { body, etag })
}

/// Put an object to S3. Returns the new ETag.
pub async fn put_object(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
) -> Result<String, StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body));

    if let Some(ct) = content_type {
        req = req.content_type(ct);
    }

    let resp = req
        .send()
        .await
        .map_err(|e| StorageError::PutObject(e.into_service_error().to_string()))?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Put an object to S3 with an If-Match precondition (ETag optimistic locking).
/// Returns the new ETag on success, or `StorageError::VersionConflict` if the
/// object changed since `expected_etag` was read.
pub async fn put_object_if_match(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .if_match(expected_etag);

    if let Some(ct) = content_type {
        req = req.content_type(ct);
    }

    let resp = req.send().await.map_err(|e| {
        let err = e.into_service_error();
        // S3 returns 412 Precondition Failed when If-Match doesn't match
        if err.to_string().contains("PreconditionFailed") {
            StorageError::VersionConflict {
                key: key.to_string(),
            }
        } else {
            StorageError::PutObject(err.to_string())
        }
    })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// List at most `limit` keys under a prefix, in lexicographic order. Stops
/// paging as soon as `limit` keys are collected.
pub async fn list_objects_limited(
    client: &Client,
    bucket: &str,
    prefix: &str,
    limit: usize,
) -> Result<Vec<String>, StorageError> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    while keys.len() < limit {
        let page_size = i32::try_from(limit - keys.len()).unwrap_or(1000).min(1000);
        let mut req = client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .max_keys(page_size);

        if let Some(token) = &continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                keys.push(key.to_string());
            }
        }
        keys.truncate(limit);

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(|s| s.to_string());
        } else {
            break;
        }
    }

    Ok(keys)
}
