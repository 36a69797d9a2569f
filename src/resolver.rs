//! Resolution of local (wall-clock) times against a `Zoneinfo`.
//!
//! Each transition at UTC instant `T` moving from offset `before` to offset
//! `after` shapes the local time line around it:
//!
//! - when `after > before`, the local times in `[T + before, T + after)`
//!   never occur and are `Invalid`;
//! - when `after < before`, the local times in `[T + after, T + before)`
//!   occur twice and are `ValidAmbiguous`.
//!
//! Every other local time is `ValidUnique`. Resolution works on "local
//! seconds", the epoch seconds a local datetime would have if it were UTC,
//! so that the local start of entry `i` is `T_i + offset_i`.

use crate::{
    iso::OffsetDateTime, DstPolicy, LocalDateTime, LocalTimeDescriptor, LocalTimeValidity,
    Transition, Zoneinfo, ZoneinfoResult,
};

/// The classification of a local time and the one or two transitions that
/// decide it.
///
/// For ambiguous and invalid times `first` is the entry in effect before
/// the transition and `second` the entry in effect after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelevantTransitions {
    validity: LocalTimeValidity,
    first: usize,
    second: Option<usize>,
}

impl RelevantTransitions {
    #[inline]
    #[must_use]
    pub const fn validity(&self) -> LocalTimeValidity {
        self.validity
    }

    #[inline]
    #[must_use]
    pub const fn first(&self) -> usize {
        self.first
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> Option<usize> {
        self.second
    }
}

/// A UTC instant that displays as the resolved local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    utc_time: i64,
    transition_index: usize,
    descriptor: &'a LocalTimeDescriptor,
}

impl<'a> Candidate<'a> {
    #[inline]
    #[must_use]
    pub const fn utc_time(&self) -> i64 {
        self.utc_time
    }

    /// The index of the transition whose descriptor produced this candidate.
    #[inline]
    #[must_use]
    pub const fn transition_index(&self) -> usize {
        self.transition_index
    }

    #[inline]
    #[must_use]
    pub const fn descriptor(&self) -> &'a LocalTimeDescriptor {
        self.descriptor
    }
}

/// A local time skipped by a forward transition.
///
/// No UTC instant displays as the local time. The methods offer the
/// conventional substitutes; none is applied unless the caller asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeGap<'a> {
    local_seconds: i64,
    transition_utc_time: i64,
    before: &'a LocalTimeDescriptor,
    after: &'a LocalTimeDescriptor,
}

impl<'a> LocalTimeGap<'a> {
    /// The UTC instant of the transition that opened the gap.
    #[inline]
    #[must_use]
    pub const fn transition_utc_time(&self) -> i64 {
        self.transition_utc_time
    }

    #[inline]
    #[must_use]
    pub const fn descriptor_before(&self) -> &'a LocalTimeDescriptor {
        self.before
    }

    #[inline]
    #[must_use]
    pub const fn descriptor_after(&self) -> &'a LocalTimeDescriptor {
        self.after
    }

    /// The length of the gap in seconds.
    #[inline]
    #[must_use]
    pub const fn gap_seconds(&self) -> i64 {
        self.after.offset() - self.before.offset()
    }

    /// Reads the local time with the offset in effect before the gap, which
    /// lands after the transition: 02:30 in a 02:00-03:00 gap becomes 03:30.
    #[inline]
    #[must_use]
    pub const fn utc_if_shifted_forward(&self) -> i64 {
        self.local_seconds - self.before.offset()
    }

    /// Reads the local time with the offset in effect after the gap, which
    /// lands before the transition: 02:30 in a 02:00-03:00 gap becomes 01:30.
    #[inline]
    #[must_use]
    pub const fn utc_if_shifted_backward(&self) -> i64 {
        self.local_seconds - self.after.offset()
    }

    /// Reads the local time with the offset of the side matching `policy`.
    /// `Unspecified`, or a policy both or neither side matches, shifts
    /// forward.
    #[must_use]
    pub const fn utc_for_policy(&self, policy: DstPolicy) -> i64 {
        let before = policy.prefers(self.before.dst_in_effect());
        let after = policy.prefers(self.after.dst_in_effect());
        if after && !before {
            self.utc_if_shifted_backward()
        } else {
            self.utc_if_shifted_forward()
        }
    }
}

/// The UTC instants a local time maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTimeCandidates<'a> {
    /// The local time falls in a gap.
    Zero(LocalTimeGap<'a>),
    /// The local time is unique.
    One(Candidate<'a>),
    /// The local time is repeated; the earlier instant comes first.
    Two(Candidate<'a>, Candidate<'a>),
}

/// The outcome of resolving a local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeResolution<'a> {
    local: LocalDateTime,
    candidates: LocalTimeCandidates<'a>,
    selected: Option<Candidate<'a>>,
}

impl<'a> LocalTimeResolution<'a> {
    #[inline]
    #[must_use]
    pub const fn local(&self) -> LocalDateTime {
        self.local
    }

    #[must_use]
    pub const fn validity(&self) -> LocalTimeValidity {
        match self.candidates {
            LocalTimeCandidates::Zero(_) => LocalTimeValidity::Invalid,
            LocalTimeCandidates::One(_) => LocalTimeValidity::ValidUnique,
            LocalTimeCandidates::Two(..) => LocalTimeValidity::ValidAmbiguous,
        }
    }

    #[inline]
    #[must_use]
    pub const fn candidates(&self) -> &LocalTimeCandidates<'a> {
        &self.candidates
    }

    /// The candidate chosen by the `DstPolicy`, or `None` for an invalid
    /// local time.
    #[inline]
    #[must_use]
    pub const fn selected(&self) -> Option<Candidate<'a>> {
        self.selected
    }

    #[must_use]
    pub fn utc_time(&self) -> Option<i64> {
        self.selected.map(|c| c.utc_time())
    }

    #[must_use]
    pub const fn gap(&self) -> Option<&LocalTimeGap<'a>> {
        match &self.candidates {
            LocalTimeCandidates::Zero(gap) => Some(gap),
            _ => None,
        }
    }

    /// The local time with the offset of the selected candidate.
    #[must_use]
    pub fn offset_date_time(&self) -> Option<OffsetDateTime> {
        self.selected
            .map(|c| OffsetDateTime::new(self.local, c.descriptor().utc_offset_in_seconds()))
    }
}

/// Resolves local times against one `Zoneinfo`.
#[derive(Debug, Clone, Copy)]
pub struct LocalTimeResolver<'a> {
    zoneinfo: &'a Zoneinfo,
}

impl<'a> LocalTimeResolver<'a> {
    #[inline]
    #[must_use]
    pub const fn new(zoneinfo: &'a Zoneinfo) -> Self {
        Self { zoneinfo }
    }

    /// Classifies `local` and returns the transitions that bound it.
    #[must_use]
    pub fn relevant_transitions(&self, local: &LocalDateTime) -> RelevantTransitions {
        self.classify(local.to_epoch_seconds()).0
    }

    /// Classifies `local_seconds`, also returning the instant of the
    /// transition that opened a gap or overlap.
    fn classify(&self, local_seconds: i64) -> (RelevantTransitions, Option<i64>) {
        let zone = self.zoneinfo;
        let offset = |i: usize| zone.descriptor_for(i).offset();
        let local_start = |i: usize, t: Transition| t.utc_time().saturating_add(offset(i));

        // Offsets stay within a day, so entries a day before the local time
        // start before it in local time too, and entries a day after it
        // start after it.
        let max_offset = i64::from(LocalTimeDescriptor::MAX_UTC_OFFSET_IN_SECONDS);
        let floor = zone.find_entry(local_seconds.saturating_sub(max_offset));
        // The last entry whose local start is at or before the local time.
        // Entry 0 has no local start and always qualifies.
        let mut current = zone.find_entry(local_seconds.saturating_add(max_offset));
        while current > floor
            && zone
                .entry(current)
                .is_some_and(|t| local_start(current, t) > local_seconds)
        {
            current -= 1;
        }

        if let Some(next) = zone.entry(current + 1) {
            if local_seconds >= next.utc_time().saturating_add(offset(current)) {
                let relevant = RelevantTransitions {
                    validity: LocalTimeValidity::Invalid,
                    first: current,
                    second: Some(current + 1),
                };
                return (relevant, Some(next.utc_time()));
            }
        }
        if current > 0 {
            if let Some(this) = zone.entry(current) {
                if local_seconds < this.utc_time().saturating_add(offset(current - 1)) {
                    let relevant = RelevantTransitions {
                        validity: LocalTimeValidity::ValidAmbiguous,
                        first: current - 1,
                        second: Some(current),
                    };
                    return (relevant, Some(this.utc_time()));
                }
            }
        }
        let relevant = RelevantTransitions {
            validity: LocalTimeValidity::ValidUnique,
            first: current,
            second: None,
        };
        (relevant, None)
    }

    /// Resolves `local`, choosing between the candidates of an ambiguous
    /// time with `policy`.
    #[must_use]
    pub fn resolve(&self, local: &LocalDateTime, policy: DstPolicy) -> LocalTimeResolution<'a> {
        let local_seconds = local.to_epoch_seconds();
        let (relevant, transition_utc_time) = self.classify(local_seconds);
        let candidate = |index: usize| {
            let descriptor = self.zoneinfo.descriptor_for(index);
            Candidate {
                utc_time: local_seconds - descriptor.offset(),
                transition_index: index,
                descriptor,
            }
        };

        let (candidates, selected) = match (relevant.validity, relevant.second, transition_utc_time)
        {
            (LocalTimeValidity::Invalid, Some(after), Some(transition_utc_time)) => {
                let gap = LocalTimeGap {
                    local_seconds,
                    transition_utc_time,
                    before: self.zoneinfo.descriptor_for(relevant.first),
                    after: self.zoneinfo.descriptor_for(after),
                };
                (LocalTimeCandidates::Zero(gap), None)
            }
            (LocalTimeValidity::ValidAmbiguous, Some(after), _) => {
                let earlier = candidate(relevant.first);
                let later = candidate(after);
                let selected = select(earlier, later, policy);
                (LocalTimeCandidates::Two(earlier, later), Some(selected))
            }
            _ => {
                let only = candidate(relevant.first);
                (LocalTimeCandidates::One(only), Some(only))
            }
        };

        #[cfg(feature = "log")]
        log::trace!(
            "{}: resolved {local} as {} with {policy}",
            self.zoneinfo.identifier(),
            relevant.validity
        );

        LocalTimeResolution {
            local: *local,
            candidates,
            selected,
        }
    }

    /// Returns the descriptor whose offset `policy` reads `local` with,
    /// alongside the classification of `local`.
    ///
    /// `Dst` and `Standard` pick, among the descriptors bounding `local`,
    /// the one with the matching DST flag:
    ///
    /// - a unique time uses its own descriptor when it matches, otherwise
    ///   the matching descriptor of the previous or next transition, and
    ///   its own when neither matches;
    /// - an ambiguous or invalid time uses the descriptor before the
    ///   transition when only it matches, otherwise the one after.
    ///
    /// `Unspecified` uses the own descriptor of a unique time, the one
    /// after the transition for an ambiguous time and the one before it
    /// for an invalid time.
    ///
    /// The offset is applied even where it does not belong to `local`, so
    /// a standard time read with `Dst` lands an hour earlier.
    #[must_use]
    pub fn policy_descriptor(
        &self,
        local: &LocalDateTime,
        policy: DstPolicy,
    ) -> (&'a LocalTimeDescriptor, LocalTimeValidity) {
        let zone = self.zoneinfo;
        let (relevant, _) = self.classify(local.to_epoch_seconds());
        let descriptor = match relevant.second {
            Some(second) => {
                let before = zone.descriptor_for(relevant.first);
                let after = zone.descriptor_for(second);
                let only_before = policy.prefers(before.dst_in_effect())
                    && !policy.prefers(after.dst_in_effect());
                let gap_default = policy == DstPolicy::Unspecified
                    && relevant.validity == LocalTimeValidity::Invalid;
                if only_before || gap_default {
                    before
                } else {
                    after
                }
            }
            None => {
                let own = zone.descriptor_for(relevant.first);
                if policy == DstPolicy::Unspecified || policy.prefers(own.dst_in_effect()) {
                    own
                } else {
                    [relevant.first.checked_sub(1), relevant.first.checked_add(1)]
                        .into_iter()
                        .flatten()
                        .filter_map(|i| zone.entry(i))
                        .map(|t| &zone.descriptors()[t.descriptor_index()])
                        .find(|d| policy.prefers(d.dst_in_effect()))
                        .unwrap_or(own)
                }
            }
        };
        (descriptor, relevant.validity)
    }

    /// Resolves `local` and returns its selected UTC instant, substituting
    /// `LocalTimeGap::utc_for_policy` for an invalid local time.
    pub fn resolve_to_utc(
        &self,
        local: &LocalDateTime,
        policy: DstPolicy,
    ) -> (i64, LocalTimeValidity) {
        let resolution = self.resolve(local, policy);
        let utc = match resolution.candidates() {
            LocalTimeCandidates::Zero(gap) => gap.utc_for_policy(policy),
            LocalTimeCandidates::One(only) => only.utc_time(),
            LocalTimeCandidates::Two(earlier, later) => select(*earlier, *later, policy).utc_time(),
        };
        (utc, resolution.validity())
    }

    /// Resolves `local` and returns the local time the resulting instant
    /// displays as, with its offset. Invalid local times come back shifted
    /// out of the gap.
    pub fn normalize(
        &self,
        local: &LocalDateTime,
        policy: DstPolicy,
    ) -> ZoneinfoResult<(OffsetDateTime, LocalTimeValidity)> {
        let (utc, validity) = self.resolve_to_utc(local, policy);
        let (datetime, _) = self.zoneinfo.convert_utc_to_local_time(utc)?;
        Ok((datetime, validity))
    }
}

/// Picks the candidate of a repeated local time whose DST flag `policy`
/// prefers, or the earlier one when the flags do not decide.
fn select<'a>(earlier: Candidate<'a>, later: Candidate<'a>, policy: DstPolicy) -> Candidate<'a> {
    let prefers_earlier = policy.prefers(earlier.descriptor.dst_in_effect());
    let prefers_later = policy.prefers(later.descriptor.dst_in_effect());
    if prefers_later && !prefers_earlier {
        later
    } else {
        earlier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        iso::MIN_EPOCH_SECONDS,
        zoneinfo::fixtures::{edt, est, eastern_2006, FALL_BACK, SPRING_FORWARD},
        ZoneinfoBuilder,
    };

    fn local(month: u8, day: u8, hour: u8, minute: u8) -> LocalDateTime {
        LocalDateTime::try_new(2006, month, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn spring_forward_hour_is_invalid() {
        let zone = eastern_2006();
        let resolver = LocalTimeResolver::new(&zone);

        for minute in [0, 1, 30, 59] {
            let relevant = resolver.relevant_transitions(&local(4, 2, 2, minute));
            assert_eq!(relevant.validity(), LocalTimeValidity::Invalid);
            assert_eq!((relevant.first(), relevant.second()), (0, Some(1)));
        }
        assert_eq!(
            resolver.relevant_transitions(&local(4, 2, 1, 59)).validity(),
            LocalTimeValidity::ValidUnique
        );
        assert_eq!(
            resolver.relevant_transitions(&local(4, 2, 3, 0)).validity(),
            LocalTimeValidity::ValidUnique
        );
    }

    #[test]
    fn invalid_resolution_has_no_utc() {
        let zone = eastern_2006();
        let resolution = zone.resolve(&local(4, 2, 2, 30), DstPolicy::Unspecified);
        assert_eq!(resolution.validity(), LocalTimeValidity::Invalid);
        assert_eq!(resolution.utc_time(), None);
        assert_eq!(resolution.selected(), None);
        assert_eq!(resolution.offset_date_time(), None);

        let gap = resolution.gap().unwrap();
        assert_eq!(gap.transition_utc_time(), SPRING_FORWARD);
        assert_eq!(gap.gap_seconds(), 3_600);
        assert_eq!(gap.descriptor_before(), &est());
        assert_eq!(gap.descriptor_after(), &edt());
        // 02:30 EST is 07:30Z, 02:30 EDT is 06:30Z.
        assert_eq!(gap.utc_if_shifted_forward(), SPRING_FORWARD + 1_800);
        assert_eq!(gap.utc_if_shifted_backward(), SPRING_FORWARD - 1_800);
        assert_eq!(gap.utc_for_policy(DstPolicy::Unspecified), SPRING_FORWARD + 1_800);
        assert_eq!(gap.utc_for_policy(DstPolicy::Standard), SPRING_FORWARD + 1_800);
        assert_eq!(gap.utc_for_policy(DstPolicy::Dst), SPRING_FORWARD - 1_800);
    }

    #[test]
    fn fall_back_hour_is_ambiguous() {
        let zone = eastern_2006();
        let local_time = local(10, 29, 1, 30);

        let relevant = zone.relevant_transitions(&local_time);
        assert_eq!(relevant.validity(), LocalTimeValidity::ValidAmbiguous);
        assert_eq!((relevant.first(), relevant.second()), (1, Some(2)));

        let dst = zone.resolve(&local_time, DstPolicy::Dst);
        let standard = zone.resolve(&local_time, DstPolicy::Standard);
        let unspecified = zone.resolve(&local_time, DstPolicy::Unspecified);
        for resolution in [dst, standard, unspecified] {
            assert_eq!(resolution.validity(), LocalTimeValidity::ValidAmbiguous);
        }
        let dst_utc = dst.utc_time().unwrap();
        let standard_utc = standard.utc_time().unwrap();
        assert_eq!(standard_utc - dst_utc, 3_600);
        assert_eq!(dst_utc, FALL_BACK - 1_800);
        assert_eq!(unspecified.utc_time(), Some(dst_utc));
        assert!(dst.selected().unwrap().descriptor().dst_in_effect());
        assert!(!standard.selected().unwrap().descriptor().dst_in_effect());

        match dst.candidates() {
            LocalTimeCandidates::Two(earlier, later) => {
                assert_eq!(earlier.utc_time(), dst_utc);
                assert_eq!(later.utc_time(), standard_utc);
                assert_eq!(earlier.transition_index(), 1);
                assert_eq!(later.transition_index(), 2);
            }
            other => panic!("expected two candidates, found {other:?}"),
        }

        assert_eq!(
            zone.relevant_transitions(&local(10, 29, 0, 59)).validity(),
            LocalTimeValidity::ValidUnique
        );
        assert_eq!(
            zone.relevant_transitions(&local(10, 29, 2, 0)).validity(),
            LocalTimeValidity::ValidUnique
        );
        assert_eq!(
            zone.relevant_transitions(&local(10, 29, 1, 0)).validity(),
            LocalTimeValidity::ValidAmbiguous
        );
    }

    #[test]
    fn unique_times_use_single_descriptor() {
        let zone = eastern_2006();
        let summer = zone.resolve(&local(7, 4, 12, 0), DstPolicy::Standard);
        assert_eq!(summer.validity(), LocalTimeValidity::ValidUnique);
        let candidate = summer.selected().unwrap();
        assert_eq!(candidate.descriptor(), &edt());
        assert_eq!(candidate.transition_index(), 1);
        assert_eq!(
            candidate.utc_time(),
            local(7, 4, 12, 0).to_epoch_seconds() + 14_400
        );
        assert_eq!(
            summer.offset_date_time().unwrap().to_utc_epoch_seconds(),
            candidate.utc_time()
        );

        let winter = zone.resolve(&local(12, 25, 9, 0), DstPolicy::Dst);
        assert_eq!(winter.selected().unwrap().descriptor(), &est());
        assert_eq!(winter.selected().unwrap().transition_index(), 2);
    }

    #[test]
    fn resolution_is_idempotent() {
        let zone = eastern_2006();
        let resolver = LocalTimeResolver::new(&zone);
        for local_time in [local(4, 2, 2, 30), local(10, 29, 1, 30), local(1, 1, 0, 0)] {
            for policy in [DstPolicy::Dst, DstPolicy::Standard, DstPolicy::Unspecified] {
                assert_eq!(
                    resolver.resolve(&local_time, policy),
                    resolver.resolve(&local_time, policy)
                );
            }
        }
    }

    #[test]
    fn edges_of_the_table() {
        let zone = eastern_2006();
        let first = LocalDateTime::try_new(1, 1, 1, 0, 0, 0).unwrap();
        let resolution = zone.resolve(&first, DstPolicy::Unspecified);
        assert_eq!(resolution.validity(), LocalTimeValidity::ValidUnique);
        assert_eq!(resolution.utc_time(), Some(MIN_EPOCH_SECONDS + 18_000));

        let last = LocalDateTime::try_new(9999, 12, 31, 23, 59, 59).unwrap();
        let resolution = zone.resolve(&last, DstPolicy::Unspecified);
        assert_eq!(resolution.selected().unwrap().transition_index(), 2);

        let plus_one = LocalTimeDescriptor::try_new(3_600, false, "X").unwrap();
        let fixed = ZoneinfoBuilder::new("Test/Fixed")
            .add_transition(MIN_EPOCH_SECONDS, plus_one)
            .build()
            .unwrap();
        let june = local(6, 1, 0, 0);
        let resolution = fixed.resolve(&june, DstPolicy::Dst);
        assert_eq!(resolution.validity(), LocalTimeValidity::ValidUnique);
        assert_eq!(resolution.utc_time(), Some(june.to_epoch_seconds() - 3_600));
    }

    #[test]
    fn footer_rule_times() {
        let zone = ZoneinfoBuilder::new("Test/Eastern")
            .add_transition(MIN_EPOCH_SECONDS, est())
            .add_transition(SPRING_FORWARD, edt())
            .add_transition(FALL_BACK, est())
            .set_extended_range_description("EST5EDT,M3.2.0,M11.1.0")
            .build()
            .unwrap();
        let at = |s: &str| s.parse::<LocalDateTime>().unwrap();

        let skipped = zone.resolve(&at("2010-03-14T02:30:00"), DstPolicy::Unspecified);
        assert_eq!(skipped.validity(), LocalTimeValidity::Invalid);
        let gap = skipped.gap().unwrap();
        // 2010-03-14T07:00:00Z
        assert_eq!(gap.transition_utc_time(), 1_268_550_000);
        assert_eq!(gap.descriptor_before(), &est());
        assert_eq!(gap.descriptor_after(), &edt());

        let repeated = at("2010-11-07T01:30:00");
        let relevant = zone.relevant_transitions(&repeated);
        assert_eq!(relevant.validity(), LocalTimeValidity::ValidAmbiguous);
        let (first, second) = (relevant.first(), relevant.second().unwrap());
        assert_eq!(second, first + 1);
        assert!(first >= zone.num_transitions());
        assert_eq!(zone.transition(second).unwrap().descriptor(), &est());
        let standard = zone.resolve(&repeated, DstPolicy::Standard);
        // 01:30 EST is 06:30Z.
        assert_eq!(standard.utc_time(), Some(1_289_111_400));
        assert_eq!(standard.selected().unwrap().transition_index(), second);
        let dst = zone.resolve(&repeated, DstPolicy::Dst);
        assert_eq!(dst.utc_time(), Some(1_289_111_400 - 3_600));

        let summer = zone.resolve(&at("2010-07-01T12:00:00"), DstPolicy::Standard);
        assert_eq!(summer.validity(), LocalTimeValidity::ValidUnique);
        assert_eq!(summer.selected().unwrap().descriptor(), &edt());
        let winter = zone.resolve(&at("2010-01-01T12:00:00"), DstPolicy::Dst);
        assert_eq!(winter.selected().unwrap().descriptor(), &est());
        assert_eq!(
            zone.relevant_transitions(&at("9999-12-31T23:59:59")).validity(),
            LocalTimeValidity::ValidUnique
        );
        // The last rule transition before 9999-12-31 is a fall back.
        assert_eq!(
            zone.resolve(&at("9999-12-31T23:59:59"), DstPolicy::Dst)
                .selected()
                .unwrap()
                .descriptor(),
            &est()
        );
    }

    #[test]
    fn resolve_to_utc_per_classification() {
        let zone = eastern_2006();
        let resolver = LocalTimeResolver::new(&zone);
        assert_eq!(
            resolver.resolve_to_utc(&local(4, 2, 2, 30), DstPolicy::Dst),
            (SPRING_FORWARD - 1_800, LocalTimeValidity::Invalid)
        );
        assert_eq!(
            resolver.resolve_to_utc(&local(10, 29, 1, 30), DstPolicy::Standard),
            (FALL_BACK + 1_800, LocalTimeValidity::ValidAmbiguous)
        );
        assert_eq!(
            resolver.resolve_to_utc(&local(10, 29, 1, 30), DstPolicy::Unspecified),
            (FALL_BACK - 1_800, LocalTimeValidity::ValidAmbiguous)
        );
        let noon = local(7, 4, 12, 0);
        assert_eq!(
            resolver.resolve_to_utc(&noon, DstPolicy::Standard),
            (noon.to_epoch_seconds() + 14_400, LocalTimeValidity::ValidUnique)
        );
    }

    #[test]
    fn policy_descriptors() {
        let zone = eastern_2006();
        let resolver = LocalTimeResolver::new(&zone);
        let offset = |local_time: LocalDateTime, policy| {
            let (descriptor, validity) = resolver.policy_descriptor(&local_time, policy);
            (descriptor.utc_offset_in_seconds(), validity)
        };
        let (est, edt) = (-18_000, -14_400);
        let (unique, ambiguous, invalid) = (
            LocalTimeValidity::ValidUnique,
            LocalTimeValidity::ValidAmbiguous,
            LocalTimeValidity::Invalid,
        );

        // Winter borrows the daylight offset of the next transition.
        assert_eq!(offset(local(1, 1, 12, 0), DstPolicy::Unspecified), (est, unique));
        assert_eq!(offset(local(1, 1, 12, 0), DstPolicy::Standard), (est, unique));
        assert_eq!(offset(local(1, 1, 12, 0), DstPolicy::Dst), (edt, unique));
        // Summer borrows the standard offset of the previous transition.
        assert_eq!(offset(local(7, 4, 12, 0), DstPolicy::Standard), (est, unique));
        assert_eq!(offset(local(7, 4, 12, 0), DstPolicy::Dst), (edt, unique));

        assert_eq!(offset(local(4, 2, 2, 30), DstPolicy::Unspecified), (est, invalid));
        assert_eq!(offset(local(4, 2, 2, 30), DstPolicy::Standard), (est, invalid));
        assert_eq!(offset(local(4, 2, 2, 30), DstPolicy::Dst), (edt, invalid));

        assert_eq!(offset(local(10, 29, 1, 30), DstPolicy::Unspecified), (est, ambiguous));
        assert_eq!(offset(local(10, 29, 1, 30), DstPolicy::Standard), (est, ambiguous));
        assert_eq!(offset(local(10, 29, 1, 30), DstPolicy::Dst), (edt, ambiguous));

        // Two standard descriptors: no flag decides, so the later one wins
        // except for an unspecified gap.
        let seven = LocalTimeDescriptor::try_new(25_200, false, "ICT").unwrap();
        let eight = LocalTimeDescriptor::try_new(28_800, false, "ICT").unwrap();
        let fixed = ZoneinfoBuilder::new("Test/Saigon")
            .add_transition(MIN_EPOCH_SECONDS, seven)
            // 1912-04-30T17:00:00Z
            .add_transition(-1_819_954_800, eight)
            .build()
            .unwrap();
        let resolver = LocalTimeResolver::new(&fixed);
        let skipped = LocalDateTime::try_new(1912, 5, 1, 0, 30, 0).unwrap();
        for (policy, expected) in [
            (DstPolicy::Unspecified, 25_200),
            (DstPolicy::Dst, 28_800),
            (DstPolicy::Standard, 28_800),
        ] {
            let (descriptor, validity) = resolver.policy_descriptor(&skipped, policy);
            assert_eq!(validity, invalid);
            assert_eq!(descriptor.utc_offset_in_seconds(), expected, "{policy}");
        }
        let before = LocalDateTime::try_new(1912, 4, 30, 23, 0, 0).unwrap();
        let (descriptor, _) = resolver.policy_descriptor(&before, DstPolicy::Dst);
        assert_eq!(descriptor, &seven);
    }

    #[test]
    fn normalize_shifts_invalid_times() {
        let zone = eastern_2006();
        let resolver = LocalTimeResolver::new(&zone);

        let (datetime, validity) = resolver
            .normalize(&local(4, 2, 2, 30), DstPolicy::Unspecified)
            .unwrap();
        assert_eq!(validity, LocalTimeValidity::Invalid);
        assert_eq!(datetime.local(), local(4, 2, 3, 30));
        assert_eq!(datetime.offset_seconds(), -14_400);

        let (datetime, _) = resolver
            .normalize(&local(4, 2, 2, 30), DstPolicy::Dst)
            .unwrap();
        assert_eq!(datetime.local(), local(4, 2, 1, 30));
        assert_eq!(datetime.offset_seconds(), -18_000);

        let (datetime, validity) = resolver
            .normalize(&local(10, 29, 1, 30), DstPolicy::Standard)
            .unwrap();
        assert_eq!(validity, LocalTimeValidity::ValidAmbiguous);
        assert_eq!(datetime.local(), local(10, 29, 1, 30));
        assert_eq!(datetime.offset_seconds(), -18_000);
    }
}
