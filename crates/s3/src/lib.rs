//! AWS SDK adapter for the oss CLI
//!
//! Binds one configured profile and bucket to an [`oss_core::ObjectStore`]
//! implementation backed by `aws-sdk-s3`. Everything above this crate is
//! SDK-independent.

mod session;

pub use session::S3Session;
