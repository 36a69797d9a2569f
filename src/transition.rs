//! The sorted table of transition instants of a zone.

use alloc::vec::Vec;

use crate::{ZoneinfoError, ZoneinfoResult};

/// A single entry of a `TransitionTable`: from `utc_time` on, the local time
/// type at `descriptor_index` is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    utc_time: i64,
    descriptor_index: usize,
}

impl Transition {
    #[inline]
    #[must_use]
    pub const fn new(utc_time: i64, descriptor_index: usize) -> Self {
        Self {
            utc_time,
            descriptor_index,
        }
    }

    #[inline]
    #[must_use]
    pub const fn utc_time(&self) -> i64 {
        self.utc_time
    }

    #[inline]
    #[must_use]
    pub const fn descriptor_index(&self) -> usize {
        self.descriptor_index
    }
}

/// A non-empty sequence of transitions with strictly increasing instants.
///
/// Entry 0 covers every instant before the next entry, so any instant maps
/// to some entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable(Vec<Transition>);

impl TransitionTable {
    /// Creates a table from entries sorted by strictly increasing instant.
    pub fn try_new(transitions: Vec<Transition>) -> ZoneinfoResult<Self> {
        if transitions.is_empty() {
            return Err(ZoneinfoError::empty_transition_table());
        }
        if transitions
            .windows(2)
            .any(|pair| pair[0].utc_time >= pair[1].utc_time)
        {
            return Err(ZoneinfoError::malformed_data()
                .with_message("transition instants must be strictly increasing."));
        }
        Ok(Self(transitions))
    }

    /// Returns the index of the last entry whose instant is at or before
    /// `utc_time`, or 0 when `utc_time` precedes every entry.
    #[must_use]
    pub fn find_transition(&self, utc_time: i64) -> usize {
        self.0
            .partition_point(|t| t.utc_time <= utc_time)
            .saturating_sub(1)
    }

    /// Returns the descriptor index stored in entry `transition_index`.
    #[inline]
    #[must_use]
    pub fn descriptor_index(&self, transition_index: usize) -> Option<usize> {
        self.0.get(transition_index).map(Transition::descriptor_index)
    }

    /// Returns the instant of entry `transition_index`.
    #[inline]
    #[must_use]
    pub fn utc_time(&self, transition_index: usize) -> Option<i64> {
        self.0.get(transition_index).map(Transition::utc_time)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a table holds at least one entry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Transition] {
        &self.0
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Transition> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a TransitionTable {
    type Item = &'a Transition;
    type IntoIter = core::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use alloc::vec;

    fn table() -> TransitionTable {
        TransitionTable::try_new(vec![
            Transition::new(100, 0),
            Transition::new(200, 1),
            Transition::new(300, 2),
        ])
        .unwrap()
    }

    #[test]
    fn binary_search_boundaries() {
        let table = table();
        assert_eq!(table.find_transition(50), 0);
        assert_eq!(table.find_transition(100), 0);
        assert_eq!(table.find_transition(199), 0);
        assert_eq!(table.find_transition(200), 1);
        assert_eq!(table.find_transition(250), 1);
        assert_eq!(table.find_transition(300), 2);
        assert_eq!(table.find_transition(1000), 2);
        assert_eq!(table.find_transition(i64::MIN), 0);
        assert_eq!(table.find_transition(i64::MAX), 2);
    }

    #[test]
    fn accessors() {
        let table = table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.descriptor_index(1), Some(1));
        assert_eq!(table.utc_time(2), Some(300));
        assert_eq!(table.descriptor_index(3), None);
        assert_eq!(table.iter().count(), 3);
    }

    #[test]
    fn rejects_bad_tables() {
        let err = TransitionTable::try_new(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorCode::EmptyTransitionTable);

        let err = TransitionTable::try_new(vec![Transition::new(5, 0), Transition::new(5, 1)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorCode::MalformedData);
    }
}
