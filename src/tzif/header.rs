//! The fixed-size header that opens each TZif data block.

use core::fmt;

use super::cursor::ByteCursor;
use crate::{ZoneinfoError, ZoneinfoResult};

/// The header of a TZif data block: the format version and the record
/// counts of the block that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryHeader {
    version: u8,
    num_is_gmt: i32,
    num_is_std: i32,
    num_leaps: i32,
    num_transitions: i32,
    num_local_time_types: i32,
    abbrev_data_size: i32,
}

impl BinaryHeader {
    /// The encoded size of a header in bytes.
    pub const SIZE: usize = 44;
    /// The magic number every header starts with.
    pub const MAGIC: [u8; 4] = *b"TZif";
    /// The version byte of the first format revision.
    pub const VERSION_1: u8 = 0;
    /// The version byte of the format with 64-bit times and a POSIX footer.
    pub const VERSION_2: u8 = b'2';
    /// The version byte of the format with extended POSIX footers.
    pub const VERSION_3: u8 = b'3';

    /// Creates a header, failing with `UnsupportedVersion` for a later
    /// revision of the format and `MalformedHeader` for any other unknown
    /// version byte or invalid counts.
    pub fn try_new(
        version: u8,
        num_is_gmt: i32,
        num_is_std: i32,
        num_leaps: i32,
        num_transitions: i32,
        num_local_time_types: i32,
        abbrev_data_size: i32,
    ) -> ZoneinfoResult<Self> {
        if !Self::is_valid_version(version) {
            return Err(Self::version_error(version));
        }
        if !Self::is_valid_num_is_gmt(num_is_gmt)
            || !Self::is_valid_num_is_std(num_is_std)
            || !Self::is_valid_num_leaps(num_leaps)
            || !Self::is_valid_num_transitions(num_transitions)
            || !Self::is_valid_num_local_time_types(num_local_time_types)
            || !Self::is_valid_abbrev_data_size(abbrev_data_size)
        {
            return Err(ZoneinfoError::malformed_header().with_message("invalid record count."));
        }
        // Indicator arrays are either absent or parallel to the local time types.
        if ![0, num_local_time_types].contains(&num_is_gmt)
            || ![0, num_local_time_types].contains(&num_is_std)
        {
            return Err(ZoneinfoError::malformed_header()
                .with_message("indicator counts do not match the local time type count."));
        }
        Ok(Self {
            version,
            num_is_gmt,
            num_is_std,
            num_leaps,
            num_transitions,
            num_local_time_types,
            abbrev_data_size,
        })
    }

    /// Reads a header from the front of `bytes`.
    pub fn parse(bytes: &[u8]) -> ZoneinfoResult<Self> {
        Self::read(&mut ByteCursor::new(bytes))
    }

    pub(crate) fn read(cursor: &mut ByteCursor<'_>) -> ZoneinfoResult<Self> {
        cursor.ensure(Self::SIZE, "data ends inside a header.")?;
        if cursor.take(4)? != Self::MAGIC {
            return Err(ZoneinfoError::malformed_header().with_message("bad magic number."));
        }
        let version = cursor.read_u8()?;
        if !Self::is_valid_version(version) {
            return Err(Self::version_error(version));
        }
        cursor.skip(15)?;
        let num_is_gmt = cursor.read_i32()?;
        let num_is_std = cursor.read_i32()?;
        let num_leaps = cursor.read_i32()?;
        let num_transitions = cursor.read_i32()?;
        let num_local_time_types = cursor.read_i32()?;
        let abbrev_data_size = cursor.read_i32()?;
        Self::try_new(
            version,
            num_is_gmt,
            num_is_std,
            num_leaps,
            num_transitions,
            num_local_time_types,
            abbrev_data_size,
        )
    }

    /// Digits past the newest known version name later format revisions.
    fn version_error(version: u8) -> ZoneinfoError {
        if version.is_ascii_digit() && version > Self::VERSION_3 {
            ZoneinfoError::unsupported_version()
        } else {
            ZoneinfoError::malformed_header().with_message("unrecognized version byte.")
        }
    }

    #[must_use]
    pub const fn is_valid_version(value: u8) -> bool {
        matches!(value, Self::VERSION_1 | Self::VERSION_2 | Self::VERSION_3)
    }

    #[must_use]
    pub const fn is_valid_num_is_gmt(value: i32) -> bool {
        value >= 0
    }

    #[must_use]
    pub const fn is_valid_num_is_std(value: i32) -> bool {
        value >= 0
    }

    #[must_use]
    pub const fn is_valid_num_leaps(value: i32) -> bool {
        value >= 0
    }

    #[must_use]
    pub const fn is_valid_num_transitions(value: i32) -> bool {
        value >= 0
    }

    /// A zone needs at least one local time type.
    #[must_use]
    pub const fn is_valid_num_local_time_types(value: i32) -> bool {
        value >= 1
    }

    /// Every local time type needs an abbreviation, so at least one byte.
    #[must_use]
    pub const fn is_valid_abbrev_data_size(value: i32) -> bool {
        value >= 1
    }

    #[inline]
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    #[inline]
    #[must_use]
    pub const fn num_is_gmt(&self) -> i32 {
        self.num_is_gmt
    }

    #[inline]
    #[must_use]
    pub const fn num_is_std(&self) -> i32 {
        self.num_is_std
    }

    #[inline]
    #[must_use]
    pub const fn num_leaps(&self) -> i32 {
        self.num_leaps
    }

    #[inline]
    #[must_use]
    pub const fn num_transitions(&self) -> i32 {
        self.num_transitions
    }

    #[inline]
    #[must_use]
    pub const fn num_local_time_types(&self) -> i32 {
        self.num_local_time_types
    }

    #[inline]
    #[must_use]
    pub const fn abbrev_data_size(&self) -> i32 {
        self.abbrev_data_size
    }

    /// The byte length of the data block this header describes, with
    /// transition and leap times stored in `time_size` bytes, or `None` when
    /// it does not fit in a `usize`.
    #[must_use]
    pub fn data_block_len(&self, time_size: usize) -> Option<usize> {
        let count = |c: i32| usize::try_from(c).unwrap_or_default();
        let records = |c: i32, size: usize| count(c).checked_mul(size);
        [
            records(self.num_transitions, time_size.checked_add(1)?)?,
            records(self.num_local_time_types, 6)?,
            count(self.abbrev_data_size),
            records(self.num_leaps, time_size.checked_add(4)?)?,
            count(self.num_is_std),
            count(self.num_is_gmt),
        ]
        .into_iter()
        .try_fold(0usize, usize::checked_add)
    }
}

impl fmt::Display for BinaryHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = if self.version == Self::VERSION_1 {
            "\\0"
        } else if self.version == Self::VERSION_2 {
            "2"
        } else {
            "3"
        };
        write!(
            f,
            "[ version = '{version}' isGmtCount = {} isStdCount = {} leapCount = {} \
             timeCount = {} typeCount = {} charCount = {} ]",
            self.num_is_gmt,
            self.num_is_std,
            self.num_leaps,
            self.num_transitions,
            self.num_local_time_types,
            self.abbrev_data_size
        )
    }
}
