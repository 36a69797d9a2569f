//! The `zoneinfo_core` crate decodes TZif ("Zoneinfo") binary time zone
//! data and resolves UTC and local (wall-clock) times against it.
//!
//! ```rust
//! use zoneinfo_core::{
//!     DstPolicy, LocalDateTime, LocalTimeDescriptor, LocalTimeValidity, ZoneinfoBuilder,
//!     MIN_EPOCH_SECONDS,
//! };
//!
//! let est = LocalTimeDescriptor::try_new(-18_000, false, "EST").unwrap();
//! let edt = LocalTimeDescriptor::try_new(-14_400, true, "EDT").unwrap();
//! let zone = ZoneinfoBuilder::new("America/New_York")
//!     .add_transition(MIN_EPOCH_SECONDS, est)
//!     .add_transition(1_143_961_200, edt) // 2006-04-02T07:00:00Z
//!     .add_transition(1_162_101_600, est) // 2006-10-29T06:00:00Z
//!     .build()
//!     .unwrap();
//!
//! // 02:30 was skipped when clocks moved forward.
//! let skipped: LocalDateTime = "2006-04-02T02:30:00".parse().unwrap();
//! let resolution = zone.resolve(&skipped, DstPolicy::Unspecified);
//! assert_eq!(resolution.validity(), LocalTimeValidity::Invalid);
//! assert_eq!(resolution.utc_time(), None);
//!
//! // 01:30 happened twice when clocks moved back.
//! let repeated: LocalDateTime = "2006-10-29T01:30:00".parse().unwrap();
//! let dst = zone.resolve(&repeated, DstPolicy::Dst).utc_time().unwrap();
//! let standard = zone.resolve(&repeated, DstPolicy::Standard).utc_time().unwrap();
//! assert_eq!(standard - dst, 3_600);
//! ```
//!
//! Data flows one way: a `BinaryHeader` and the bytes after it become the
//! `LocalTimeDescriptor`s and `TransitionTable` of a `Zoneinfo`, which then
//! answers `descriptor_at`, `period_containing` and `resolve` queries.
//! Instants after the last transition follow the POSIX TZ rule of the TZif
//! footer, when the data has one. A
//! `Zoneinfo` is immutable after construction and may be shared freely
//! across threads.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_panics_doc
)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod error;
pub mod iso;
pub mod options;
pub mod resolver;
pub mod tzif;

mod descriptor;
mod leap;
mod period;
mod posix;
mod transition;
mod zoneinfo;

#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use error::{ErrorCode, ZoneinfoError};

/// The `zoneinfo_core` result type
pub type ZoneinfoResult<T> = Result<T, ZoneinfoError>;

pub use crate::{
    descriptor::{Abbreviation, LocalTimeDescriptor},
    iso::{LocalDateTime, OffsetDateTime, ZonedLocalTime, MAX_EPOCH_SECONDS, MIN_EPOCH_SECONDS},
    leap::LeapCorrection,
    options::{DstPolicy, LocalTimeValidity},
    period::LocalTimePeriod,
    resolver::{
        Candidate, LocalTimeCandidates, LocalTimeGap, LocalTimeResolution, LocalTimeResolver,
        RelevantTransitions,
    },
    transition::{Transition, TransitionTable},
    tzif::BinaryHeader,
    zoneinfo::{Zoneinfo, ZoneinfoBuilder, ZoneinfoTransition},
};
