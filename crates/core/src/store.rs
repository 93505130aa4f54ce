//! ObjectStore trait definition
//!
//! The interface the listing and transfer logic is written against. A
//! store implementation is bound to exactly one bucket, so every method
//! takes bare object keys. The trait is mocked in tests.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Keys requested per listing page
pub const PAGE_SIZE: i32 = 100;

/// Parameters for one listing page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Return only keys sorting strictly after this value
    pub start_after: String,

    /// Cursor from the previous page, None for the first page
    pub continuation_token: Option<String>,

    /// Maximum number of keys to return
    pub max_keys: i32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            start_after: String::new(),
            continuation_token: None,
            max_keys: PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Request the first page of keys sorting after `start_after`
    pub fn starting_after(start_after: impl Into<String>) -> Self {
        Self {
            start_after: start_after.into(),
            ..Default::default()
        }
    }
}

/// One page of a key listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPage {
    /// Keys in the store's native (lexicographic) order
    pub keys: Vec<String>,

    /// Whether the store reports more results after this page
    pub truncated: bool,

    /// Cursor for the next page, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

/// Operations against a single bucket of an S3-compatible store
///
/// Implemented by the SDK adapter and mocked for testing. Transport and
/// auth failures surface as errors; a missing object on an existence
/// check is a normal negative result, not an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one page of the bucket's key listing
    async fn list_page(&self, request: PageRequest) -> Result<ListingPage>;

    /// Check whether an object exists (HEAD; 404 maps to false)
    async fn object_exists(&self, key: &str) -> Result<bool>;

    /// Store an object, replacing any previous content
    async fn put_object<'a>(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> Result<()>;

    /// Fetch an object's content
    async fn get_object(&self, key: &str) -> Result<Vec<u8>>;

    /// Delete an object; deleting an absent key is not an error
    async fn delete_object(&self, key: &str) -> Result<()>;
}
