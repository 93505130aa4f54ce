//! Bucket-bound S3 session
//!
//! Builds an SDK client from a profile's static credentials and custom
//! endpoint, pins it to the profile's bucket, and implements the
//! [`ObjectStore`] trait on top of it. Custom endpoints require
//! path-style addressing since most S3-compatible services do not serve
//! virtual-hosted buckets.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use oss_core::{Error, ListingPage, ObjectStore, PageRequest, Profile, Result};

/// A client bound to one profile's endpoint and bucket
#[derive(Debug, Clone)]
pub struct S3Session {
    client: Client,
    bucket: String,
}

impl S3Session {
    /// Build a session from a validated profile.
    ///
    /// Only constructs the client; no request is sent. Use
    /// `TransferEngine::check_connection` to probe reachability.
    pub async fn connect(profile: &Profile) -> Result<Self> {
        profile.validate()?;

        let credentials = Credentials::new(
            &profile.access_key,
            &profile.secret_access_key,
            None,
            None,
            "oss-static-credentials",
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(profile.region.clone()))
            .endpoint_url(&profile.endpoint_url)
            .credentials_provider(credentials)
            .load()
            .await;
        let config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        debug!(endpoint = %profile.endpoint_url, bucket = %profile.buckets, "session configured");
        Ok(Self {
            client: Client::from_conf(config),
            bucket: profile.buckets.clone(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn classify(&self, action: &str, err: impl std::error::Error + 'static) -> Error {
        classify_text(action, &format!("{}", DisplayErrorContext(&err)))
    }
}

#[async_trait]
impl ObjectStore for S3Session {
    async fn list_page(&self, page: PageRequest) -> Result<ListingPage> {
        let mut builder = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(page.max_keys)
            .set_continuation_token(page.continuation_token);
        if !page.start_after.is_empty() {
            builder = builder.start_after(&page.start_after);
        }

        let output = builder
            .send()
            .await
            .map_err(|e| self.classify("list objects", e))?;

        Ok(ListingPage {
            keys: output
                .contents()
                .iter()
                .filter_map(|object| object.key().map(str::to_string))
                .collect(),
            truncated: output.is_truncated().unwrap_or(false),
            continuation_token: output.next_continuation_token().map(str::to_string),
        })
    }

    async fn object_exists(&self, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(self.classify("head object", service_error))
                }
            }
        }
    }

    async fn put_object<'a>(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|e| self.classify("put object", e))?;
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    Error::NotFound(format!("object {key}"))
                } else {
                    self.classify("get object", service_error)
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| Error::Network(format!("reading body of {key}: {e}")))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| self.classify("delete object", e))?;
        Ok(())
    }
}

/// Map an SDK error chain onto the crate's error categories by the
/// well-known S3 error codes appearing in it.
fn classify_text(action: &str, text: &str) -> Error {
    if text.contains("InvalidAccessKeyId")
        || text.contains("SignatureDoesNotMatch")
        || text.contains("AccessDenied")
    {
        Error::Auth(format!("{action}: {text}"))
    } else if text.contains("NoSuchBucket") || text.contains("NoSuchKey") || text.contains("NotFound")
    {
        Error::NotFound(format!("{action}: {text}"))
    } else if text.contains("dispatch failure")
        || text.contains("connection")
        || text.contains("timeout")
    {
        Error::Network(format!("{action}: {text}"))
    } else {
        Error::General(format!("{action}: {text}"))
    }
}
