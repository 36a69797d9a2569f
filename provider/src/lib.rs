//! Zone registries and identifier-keyed conversions for `zoneinfo_core`.
//!
//! A `ZoneinfoSource` supplies raw TZif bytes for an identifier, a
//! `ZoneinfoCache` decodes and shares each zone on first use, and
//! `TimeZoneUtil` converts between UTC and local times by identifier.
//!
//! ```rust
//! use zoneinfo_core::{DstPolicy, LocalTimeValidity};
//! use zoneinfo_provider::{InMemorySource, TimeZoneUtil, ZoneinfoCache};
//!
//! # let (_, data) = jiff_tzdb::get("America/New_York").unwrap();
//! let source: InMemorySource = [("America/New_York", data)].into_iter().collect();
//! let cache = ZoneinfoCache::new(source);
//! let util = TimeZoneUtil::new(&cache);
//!
//! let local = "2006-04-02T02:30:00".parse().unwrap();
//! let (zoned, validity) = util
//!     .init_local_time(&local, "America/New_York", DstPolicy::Unspecified)
//!     .unwrap();
//! assert_eq!(validity, LocalTimeValidity::Invalid);
//! assert_eq!(zoned.to_string(), "2006-04-02T03:30:00-04:00[America/New_York]");
//! ```
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod cache;
mod source;
mod util;

pub use cache::ZoneinfoCache;
#[cfg(feature = "tzdb")]
pub use source::TzdbSource;
pub use source::{InMemorySource, ZoneinfoSource};
pub use util::TimeZoneUtil;
