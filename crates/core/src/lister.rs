//! Paginated prefix listing
//!
//! Enumerates every key under a "directory" prefix using cursor-based
//! pagination. Listing is seeded with `start_after = prefix` rather than
//! the store's prefix filter, and stops as soon as the enumeration moves
//! past the prefix region. This saves round trips but assumes the store
//! returns keys in lexicographic order.

use crate::error::Result;
use crate::store::{ObjectStore, PageRequest};

/// Normalize a prefix to directory form: trailing slashes stripped, then
/// exactly one appended. Guarantees "foo" matches only "foo/..." keys,
/// never "foobar/...".
pub fn normalize_prefix(prefix: &str) -> String {
    format!("{}/", prefix.trim_end_matches('/'))
}

/// List every key under `prefix`, in lexicographic order.
///
/// Pagination continues only while the store reports truncation and the
/// last key of the current page still lies inside the prefix region; once
/// the last key diverges, later pages cannot contain matches (ordered
/// listing assumed) and enumeration stops early.
///
/// Transport errors propagate to the caller unhandled.
pub async fn list_under_prefix<S: ObjectStore + ?Sized>(
    store: &S,
    prefix: &str,
) -> Result<Vec<String>> {
    let prefix = normalize_prefix(prefix);
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let page = store
            .list_page(PageRequest {
                start_after: prefix.clone(),
                continuation_token: continuation_token.take(),
                ..Default::default()
            })
            .await?;

        keys.extend(
            page.keys
                .iter()
                .filter(|key| key.starts_with(&prefix))
                .cloned(),
        );

        let last_in_prefix = page
            .keys
            .last()
            .is_some_and(|key| key.starts_with(&prefix));
        if !page.truncated || !last_in_prefix {
            break;
        }
        continuation_token = page.continuation_token;
        if continuation_token.is_none() {
            break;
        }
    }

    Ok(keys)
}
