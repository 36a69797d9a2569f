//! The decoded transition history of one time zone.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use hashbrown::HashMap;

use crate::{
    iso::{OffsetDateTime, MAX_EPOCH_SECONDS, MIN_EPOCH_SECONDS},
    posix::PosixTimeZone,
    resolver::{LocalTimeResolution, LocalTimeResolver, RelevantTransitions},
    utils, DstPolicy, LeapCorrection, LocalDateTime, LocalTimeDescriptor, LocalTimePeriod,
    Transition, TransitionTable, ZoneinfoError, ZoneinfoResult,
};

/// A transition joined with the descriptor it switches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneinfoTransition<'a> {
    utc_time: i64,
    descriptor: &'a LocalTimeDescriptor,
}

impl<'a> ZoneinfoTransition<'a> {
    #[inline]
    #[must_use]
    pub const fn utc_time(&self) -> i64 {
        self.utc_time
    }

    #[inline]
    #[must_use]
    pub const fn descriptor(&self) -> &'a LocalTimeDescriptor {
        self.descriptor
    }
}

/// The transitions of the footer rule, numbered from 0 after the last
/// transition of the table.
///
/// Position `p` counts rule transitions from the first one in
/// `first_year`; the first `skip` positions precede the start of the rule
/// and are never produced.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RuleExtension {
    rule: PosixTimeZone,
    std_index: usize,
    dst_index: usize,
    first_year: i32,
    skip: usize,
}

impl RuleExtension {
    /// Starts the rule at its first transition after `after` that changes
    /// the descriptor from `last`. Descriptor indices are left at 0.
    fn new(rule: PosixTimeZone, after: i64, last: &LocalTimeDescriptor) -> Option<Self> {
        let std = rule.std_descriptor();
        let dst = rule.dst_descriptor()?;
        let mut first_year = utils::epoch_seconds_to_year(after) - 1;
        for _ in 0..3 {
            let pair = rule.transitions_in_year(first_year)?;
            if pair[0].utc_time == pair[1].utc_time {
                return None;
            }
            let skip = pair.iter().position(|t| {
                let descriptor = if t.is_dst { dst } else { std };
                t.utc_time > after && descriptor != *last
            });
            if let Some(skip) = skip {
                return Some(Self {
                    rule,
                    std_index: 0,
                    dst_index: 0,
                    first_year,
                    skip,
                });
            }
            first_year += 1;
        }
        None
    }

    fn at_position(&self, year: i32, position: usize) -> Option<Transition> {
        let transition = self.rule.transitions_in_year(year)?[position % 2];
        let index = if transition.is_dst {
            self.dst_index
        } else {
            self.std_index
        };
        (transition.utc_time <= MAX_EPOCH_SECONDS)
            .then_some(Transition::new(transition.utc_time, index))
    }

    /// Returns rule transition `k`, or `None` past year 9999.
    fn get(&self, k: usize) -> Option<Transition> {
        let position = k.checked_add(self.skip)?;
        let years = i32::try_from(position / 2).ok()?;
        let year = self.first_year.checked_add(years)?;
        if year > utils::epoch_seconds_to_year(MAX_EPOCH_SECONDS) + 1 {
            return None;
        }
        self.at_position(year, position)
    }

    /// Returns the last rule transition `k` at or before `utc_time`.
    fn find(&self, utc_time: i64) -> Option<usize> {
        let utc_time = utc_time.min(MAX_EPOCH_SECONDS);
        let mut year = utils::epoch_seconds_to_year(utc_time) + 1;
        while year >= self.first_year {
            let first_position = usize::try_from(year - self.first_year).ok()? * 2;
            for position in [first_position + 1, first_position] {
                if position < self.skip {
                    continue;
                }
                if self
                    .at_position(year, position)
                    .is_some_and(|t| t.utc_time() <= utc_time)
                {
                    return Some(position - self.skip);
                }
            }
            year -= 1;
        }
        None
    }
}

/// The transitions, local time types and leap corrections of one zone.
///
/// A `Zoneinfo` is immutable once built. Every descriptor index in its
/// transition table refers to one of its descriptors.
///
/// When the data carries a POSIX TZ rule with daylight-saving time, the
/// transitions it implies after the last table entry, through year 9999,
/// follow the table. Indices past `num_transitions` name them; they are
/// computed on demand. `transitions`, `num_transitions` and
/// `transition_table` cover the table alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zoneinfo {
    identifier: String,
    descriptors: Vec<LocalTimeDescriptor>,
    transitions: TransitionTable,
    leap_corrections: Vec<LeapCorrection>,
    extended_range_description: Option<String>,
    extension: Option<RuleExtension>,
}

impl Zoneinfo {
    /// Decodes TZif data into a `Zoneinfo` named `identifier`.
    pub fn from_tzif_bytes(identifier: &str, bytes: &[u8]) -> ZoneinfoResult<Self> {
        crate::tzif::parse(identifier, bytes)
    }

    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    #[must_use]
    pub fn descriptors(&self) -> &[LocalTimeDescriptor] {
        &self.descriptors
    }

    #[inline]
    #[must_use]
    pub fn transition_table(&self) -> &TransitionTable {
        &self.transitions
    }

    #[inline]
    #[must_use]
    pub fn leap_corrections(&self) -> &[LeapCorrection] {
        &self.leap_corrections
    }

    /// Returns the POSIX TZ string describing times after the last
    /// transition, when the source data had one.
    #[inline]
    #[must_use]
    pub fn extended_range_description(&self) -> Option<&str> {
        self.extended_range_description.as_deref()
    }

    /// Returns whether transitions after the table come from the
    /// `extended_range_description` rule.
    #[inline]
    #[must_use]
    pub fn follows_extended_range_rule(&self) -> bool {
        self.extension.is_some()
    }

    /// The number of transitions in the table, not counting those the
    /// footer rule adds.
    #[inline]
    #[must_use]
    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    #[must_use]
    pub fn first_transition(&self) -> ZoneinfoTransition<'_> {
        self.join(self.transitions.as_slice()[0])
    }

    /// Returns transition `index`, counting the footer rule's transitions
    /// after the table.
    #[must_use]
    pub fn transition(&self, index: usize) -> Option<ZoneinfoTransition<'_>> {
        self.entry(index).map(|t| self.join(t))
    }

    /// Iterates the transitions of the table.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = ZoneinfoTransition<'_>> + '_ {
        self.transitions.iter().map(|t| self.join(*t))
    }

    /// Returns the descriptor in effect at `utc_time`.
    #[must_use]
    pub fn descriptor_at(&self, utc_time: i64) -> &LocalTimeDescriptor {
        self.descriptor_for(self.find_entry(utc_time))
    }

    /// Returns the period containing `utc_time`.
    #[must_use]
    pub fn period_containing(&self, utc_time: i64) -> LocalTimePeriod {
        self.period_for(self.find_entry(utc_time))
    }

    /// Returns the period that begins at transition `index`.
    #[must_use]
    pub fn period_for_transition(&self, index: usize) -> Option<LocalTimePeriod> {
        self.entry(index).map(|_| self.period_for(index))
    }

    /// Returns, in order, every period that intersects `[utc_start, utc_end)`.
    pub fn periods_overlapping(
        &self,
        utc_start: i64,
        utc_end: i64,
    ) -> impl Iterator<Item = LocalTimePeriod> + '_ {
        let first = self.find_entry(utc_start);
        (first..)
            .map_while(move |i| self.entry(i).map(|t| (i, t)))
            .take_while(move |&(i, t)| {
                utc_start < utc_end && (i == first || t.utc_time() < utc_end)
            })
            .map(|(i, _)| self.period_for(i))
    }

    /// Converts a UTC instant to the local datetime it displays as, returning
    /// the index of the transition in effect alongside it.
    pub fn convert_utc_to_local_time(
        &self,
        utc_time: i64,
    ) -> ZoneinfoResult<(OffsetDateTime, usize)> {
        let index = self.find_entry(utc_time);
        let offset = self.descriptor_for(index).utc_offset_in_seconds();
        Ok((OffsetDateTime::from_utc(utc_time, offset)?, index))
    }

    /// Classifies `local` and returns the transitions that bound it.
    #[must_use]
    pub fn relevant_transitions(&self, local: &LocalDateTime) -> RelevantTransitions {
        LocalTimeResolver::new(self).relevant_transitions(local)
    }

    /// Resolves `local` against this zone, applying `policy` when it is
    /// ambiguous.
    #[must_use]
    pub fn resolve(&self, local: &LocalDateTime, policy: DstPolicy) -> LocalTimeResolution<'_> {
        LocalTimeResolver::new(self).resolve(local, policy)
    }

    /// Returns whether the table starts at 0001-01-01T00:00:00Z and no
    /// transition in it moves local time back past the local time reached
    /// at the previous transition.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let slice = self.transitions.as_slice();
        if slice[0].utc_time() != MIN_EPOCH_SECONDS {
            return false;
        }
        let offset = |i: usize| self.descriptors[slice[i].descriptor_index()].offset();
        let mut latest_local = slice[0].utc_time().saturating_add(offset(0));
        for (i, transition) in slice.iter().enumerate().skip(1) {
            let before = transition.utc_time().saturating_add(offset(i - 1));
            let after = transition.utc_time().saturating_add(offset(i));
            if before.min(after) < latest_local {
                return false;
            }
            latest_local = before.max(after);
        }
        true
    }

    /// Returns transition `index` of the table followed by the footer rule.
    pub(crate) fn entry(&self, index: usize) -> Option<Transition> {
        let table = self.transitions.as_slice();
        match index.checked_sub(table.len()) {
            None => table.get(index).copied(),
            Some(k) => self.extension.as_ref()?.get(k),
        }
    }

    /// Returns the index of the transition in effect at `utc_time`.
    pub(crate) fn find_entry(&self, utc_time: i64) -> usize {
        let index = self.transitions.find_transition(utc_time);
        let table_len = self.transitions.len();
        if index + 1 < table_len || utc_time <= self.transitions.as_slice()[index].utc_time() {
            return index;
        }
        self.extension
            .as_ref()
            .and_then(|extension| extension.find(utc_time))
            .map_or(index, |k| table_len + k)
    }

    pub(crate) fn descriptor_for(&self, transition_index: usize) -> &LocalTimeDescriptor {
        // NOTE: an index past the last transition reads the descriptor of
        // the last table entry.
        let transition = self
            .entry(transition_index)
            .unwrap_or(self.transitions.as_slice()[self.transitions.len() - 1]);
        &self.descriptors[transition.descriptor_index()]
    }

    fn join(&self, transition: Transition) -> ZoneinfoTransition<'_> {
        ZoneinfoTransition {
            utc_time: transition.utc_time(),
            descriptor: &self.descriptors[transition.descriptor_index()],
        }
    }

    fn period_for(&self, index: usize) -> LocalTimePeriod {
        let start = (index > 0)
            .then(|| self.entry(index).map(|t| t.utc_time()))
            .flatten();
        let end = self.entry(index + 1).map(|t| t.utc_time());
        LocalTimePeriod::new_unchecked(*self.descriptor_for(index), start, end)
    }
}

/// Assembles a `Zoneinfo` one transition at a time.
#[derive(Debug, Default, Clone)]
pub struct ZoneinfoBuilder {
    identifier: String,
    descriptors: Vec<LocalTimeDescriptor>,
    interned: HashMap<LocalTimeDescriptor, usize>,
    transitions: BTreeMap<i64, usize>,
    leap_corrections: Vec<LeapCorrection>,
    extended_range_description: Option<String>,
}

impl ZoneinfoBuilder {
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn set_identifier(&mut self, identifier: impl Into<String>) -> &mut Self {
        self.identifier = identifier.into();
        self
    }

    /// Adds `descriptor` if no equal descriptor was added before, and
    /// returns its index.
    pub fn add_descriptor(&mut self, descriptor: LocalTimeDescriptor) -> usize {
        *self.interned.entry(descriptor).or_insert_with(|| {
            self.descriptors.push(descriptor);
            self.descriptors.len() - 1
        })
    }

    /// Adds a transition to `descriptor` at `utc_time`. A transition already
    /// at `utc_time` is replaced.
    pub fn add_transition(&mut self, utc_time: i64, descriptor: LocalTimeDescriptor) -> &mut Self {
        let index = self.add_descriptor(descriptor);
        self.insert_transition(utc_time, index);
        self
    }

    /// Adds a transition to the descriptor at `descriptor_index`.
    pub fn add_transition_to_index(
        &mut self,
        utc_time: i64,
        descriptor_index: usize,
    ) -> ZoneinfoResult<&mut Self> {
        if descriptor_index >= self.descriptors.len() {
            return Err(ZoneinfoError::malformed_data()
                .with_message("transition refers to an unknown local time type."));
        }
        self.insert_transition(utc_time, descriptor_index);
        Ok(self)
    }

    pub fn add_leap_correction(&mut self, correction: LeapCorrection) -> &mut Self {
        self.leap_corrections.push(correction);
        self
    }

    pub fn set_extended_range_description(
        &mut self,
        description: impl Into<String>,
    ) -> &mut Self {
        self.extended_range_description = Some(description.into());
        self
    }

    #[must_use]
    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Produces the `Zoneinfo`. Fails when no transition was added or the
    /// leap corrections are not strictly increasing.
    pub fn build(&self) -> ZoneinfoResult<Zoneinfo> {
        if self
            .leap_corrections
            .windows(2)
            .any(|pair| pair[0].utc_time() >= pair[1].utc_time())
        {
            return Err(ZoneinfoError::malformed_data()
                .with_message("leap corrections must be strictly increasing."));
        }
        let transitions = TransitionTable::try_new(
            self.transitions
                .iter()
                .map(|(&utc, &index)| Transition::new(utc, index))
                .collect(),
        )?;
        let mut descriptors = self.descriptors.clone();
        let extension = self
            .extended_range_description
            .as_deref()
            .and_then(|text| self.rule_extension(text, &transitions, &mut descriptors));
        Ok(Zoneinfo {
            identifier: self.identifier.clone(),
            descriptors,
            transitions,
            leap_corrections: self.leap_corrections.clone(),
            extended_range_description: self.extended_range_description.clone(),
            extension,
        })
    }

    /// Decodes the footer rule that continues `transitions`, adding its
    /// descriptors to `descriptors` when they are new.
    ///
    /// A rule that cannot be decoded is logged and ignored, as is a rule
    /// without daylight-saving time: the last transition then stays in
    /// effect.
    fn rule_extension(
        &self,
        text: &str,
        transitions: &TransitionTable,
        descriptors: &mut Vec<LocalTimeDescriptor>,
    ) -> Option<RuleExtension> {
        let rule = match PosixTimeZone::parse(text) {
            Ok(rule) => rule,
            Err(_err) => {
                #[cfg(feature = "log")]
                log::warn!(
                    "{}: ignoring extended range description {text:?}: {_err}",
                    self.identifier
                );
                return None;
            }
        };
        let std = rule.std_descriptor();
        let dst = rule.dst_descriptor()?;
        if rule.is_permanent_dst() {
            return None;
        }
        let last = transitions.as_slice()[transitions.len() - 1];
        let after = last.utc_time();
        if !(MIN_EPOCH_SECONDS..MAX_EPOCH_SECONDS).contains(&after) {
            return None;
        }
        let mut extension =
            RuleExtension::new(rule, after, &descriptors[last.descriptor_index()])?;
        let mut intern = |descriptor: LocalTimeDescriptor| match self.interned.get(&descriptor) {
            Some(&index) => index,
            None => {
                descriptors.push(descriptor);
                descriptors.len() - 1
            }
        };
        extension.std_index = intern(std);
        extension.dst_index = intern(dst);
        #[cfg(feature = "log")]
        log::debug!("{}: following {text:?} after {after}", self.identifier);
        Some(extension)
    }

    fn insert_transition(&mut self, utc_time: i64, index: usize) {
        if let Some(_replaced) = self.transitions.insert(utc_time, index) {
            #[cfg(feature = "log")]
            log::debug!(
                "{}: transition at {utc_time} replaced local time type {_replaced} with {index}",
                self.identifier
            );
        }
    }
}
