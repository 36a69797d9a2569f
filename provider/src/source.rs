//! Sources of raw TZif bytes.

use std::borrow::Cow;

use hashbrown::HashMap;
use zoneinfo_core::{ZoneinfoError, ZoneinfoResult};

/// Supplies the TZif data for a time zone identifier.
///
/// Implementations fail with `ErrorCode::UnsupportedId` for identifiers
/// they do not know.
pub trait ZoneinfoSource {
    fn load(&self, identifier: &str) -> ZoneinfoResult<Cow<'_, [u8]>>;
}

impl<T: ZoneinfoSource + ?Sized> ZoneinfoSource for &T {
    fn load(&self, identifier: &str) -> ZoneinfoResult<Cow<'_, [u8]>> {
        (**self).load(identifier)
    }
}

/// A source backed by TZif data held in memory, for tests and for
/// applications that ship their own data.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    data: HashMap<String, Vec<u8>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the data for `identifier`.
    pub fn insert(&mut self, identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.data.insert(identifier.into(), bytes.into());
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.data.contains_key(identifier)
    }
}

impl<I: Into<String>, B: Into<Vec<u8>>> FromIterator<(I, B)> for InMemorySource {
    fn from_iter<T: IntoIterator<Item = (I, B)>>(iter: T) -> Self {
        let mut source = Self::new();
        for (identifier, bytes) in iter {
            source.insert(identifier, bytes);
        }
        source
    }
}

impl ZoneinfoSource for InMemorySource {
    fn load(&self, identifier: &str) -> ZoneinfoResult<Cow<'_, [u8]>> {
        self.data
            .get(identifier)
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
            .ok_or_else(|| unsupported(identifier))
    }
}

/// A source reading the IANA database bundled by `jiff-tzdb`.
#[cfg(feature = "tzdb")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TzdbSource;

#[cfg(feature = "tzdb")]
impl ZoneinfoSource for TzdbSource {
    fn load(&self, identifier: &str) -> ZoneinfoResult<Cow<'_, [u8]>> {
        jiff_tzdb::get(identifier)
            .map(|(_, bytes)| Cow::Borrowed(bytes))
            .ok_or_else(|| unsupported(identifier))
    }
}

fn unsupported(identifier: &str) -> ZoneinfoError {
    ZoneinfoError::unsupported_id()
        .with_message(format!("time zone identifier `{identifier}` does not exist."))
}
