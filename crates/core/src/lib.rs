//! oss-core: Core library for the oss CLI
//!
//! This crate provides the SDK-independent parts of the oss CLI:
//! - YAML profile configuration
//! - The ObjectStore trait the transfer logic is written against
//! - Paginated prefix listing
//! - Local tree walking and ignore rules
//! - The transfer engine (upload / download / delete, single and batch)
//!
//! Keeping this crate free of any specific S3 SDK allows the listing and
//! transfer logic to be tested against a mock store.

pub mod config;
pub mod error;
pub mod ignore;
pub mod lister;
pub mod store;
pub mod transfer;
pub mod walker;

pub use config::{Profile, ProfileStore, DEFAULT_PROFILE};
pub use error::{Error, Result};
pub use ignore::IgnoreRules;
pub use lister::{list_under_prefix, normalize_prefix};
pub use store::{ListingPage, ObjectStore, PageRequest, PAGE_SIZE};
pub use transfer::{BatchReport, ItemReport, Outcome, TransferEngine};
