//! Common utilities for the Strata converter.
//!
//! This crate provides shared infrastructure used by every other crate:
//! - **Warning System** - deduplicated, colored terminal diagnostics
//! - **URL Resolution** - resolving resource references against a base URL
//! - **Resource Fetching** - obtaining bytes for a reference (`http(s):`,
//!   `file:`, `data:`, plain paths) and encoding bytes back into `data:` URLs

pub mod net;
pub mod url;
pub mod warning;
