//! Common utilities for the inlay renderer.
//!
//! This crate provides shared infrastructure used by all inlay components:
//! - **Warning System** - deduplicated warnings for unsupported features
//! - **Fetching** - script source loading over http(s) and `data:` URLs
//! - **URL resolution** - resolving script `src` values against a base URL

pub mod net;
pub mod url;
pub mod warning;

pub use net::{FetchError, fetch_text};
pub use url::resolve_url;
