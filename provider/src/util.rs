//! Time zone conversions keyed by identifier.

use zoneinfo_core::{
    DstPolicy, LocalDateTime, LocalTimePeriod, LocalTimeResolver, LocalTimeValidity,
    OffsetDateTime, ZonedLocalTime, Zoneinfo, ZoneinfoResult,
};

use crate::{source::ZoneinfoSource, ZoneinfoCache};

/// Conversions between UTC and local times in zones named by identifier,
/// backed by a `ZoneinfoCache`.
///
/// Every operation fails with `UnsupportedId` when the cache cannot supply
/// the named zone.
#[derive(Debug)]
pub struct TimeZoneUtil<'a, S> {
    cache: &'a ZoneinfoCache<S>,
}

impl<S> Clone for TimeZoneUtil<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for TimeZoneUtil<'_, S> {}

impl<'a, S: ZoneinfoSource> TimeZoneUtil<'a, S> {
    #[must_use]
    pub const fn new(cache: &'a ZoneinfoCache<S>) -> Self {
        Self { cache }
    }

    /// Returns the local time in `time_zone_id` at the UTC instant `utc_time`.
    pub fn convert_utc_to_local_time(
        &self,
        utc_time: i64,
        time_zone_id: &str,
    ) -> ZoneinfoResult<ZonedLocalTime> {
        let zone = self.cache.get(time_zone_id)?;
        let (datetime, _) = zone.convert_utc_to_local_time(utc_time)?;
        Ok(ZonedLocalTime::new(datetime, zone.identifier()))
    }

    /// Returns the zoned value for `local` in `time_zone_id`, with the
    /// classification of `local`.
    ///
    /// `local` is read with the offset of the descriptor `policy` selects
    /// (see `LocalTimeResolver::policy_descriptor`), and the result is the
    /// local time at the instant that reading denotes. A `Dst` reading of a
    /// winter time therefore comes back an hour earlier in standard time,
    /// and a skipped time comes back outside the gap.
    pub fn init_local_time(
        &self,
        local: &LocalDateTime,
        time_zone_id: &str,
        policy: DstPolicy,
    ) -> ZoneinfoResult<(ZonedLocalTime, LocalTimeValidity)> {
        let zone = self.cache.get(time_zone_id)?;
        let (utc, validity) = utc_for_policy(&zone, local, policy);
        let (datetime, _) = zone.convert_utc_to_local_time(utc)?;
        Ok((ZonedLocalTime::new(datetime, zone.identifier()), validity))
    }

    /// Returns the UTC instant for `local` in `time_zone_id`, following the
    /// same conventions as `init_local_time`.
    pub fn convert_local_to_utc(
        &self,
        local: &LocalDateTime,
        time_zone_id: &str,
        policy: DstPolicy,
    ) -> ZoneinfoResult<(i64, LocalTimeValidity)> {
        let zone = self.cache.get(time_zone_id)?;
        Ok(utc_for_policy(&zone, local, policy))
    }

    /// Returns the period of `time_zone_id` containing `utc_time`.
    pub fn load_local_time_period_for_utc(
        &self,
        time_zone_id: &str,
        utc_time: i64,
    ) -> ZoneinfoResult<LocalTimePeriod> {
        Ok(self.cache.get(time_zone_id)?.period_containing(utc_time))
    }

    /// Returns the local time in `time_zone_id` at the instant `source`
    /// denotes.
    pub fn convert_local_to_local_time(
        &self,
        source: &OffsetDateTime,
        time_zone_id: &str,
    ) -> ZoneinfoResult<ZonedLocalTime> {
        self.convert_utc_to_local_time(source.to_utc_epoch_seconds(), time_zone_id)
    }

    /// Returns whether `local` names exactly one instant in `time_zone_id`.
    pub fn is_valid_local_time(
        &self,
        local: &LocalDateTime,
        time_zone_id: &str,
    ) -> ZoneinfoResult<LocalTimeValidity> {
        let zone = self.cache.get(time_zone_id)?;
        Ok(zone.relevant_transitions(local).validity())
    }
}

fn utc_for_policy(
    zone: &Zoneinfo,
    local: &LocalDateTime,
    policy: DstPolicy,
) -> (i64, LocalTimeValidity) {
    let (descriptor, validity) = LocalTimeResolver::new(zone).policy_descriptor(local, policy);
    (
        local.to_epoch_seconds() - i64::from(descriptor.utc_offset_in_seconds()),
        validity,
    )
}
