//! This module implements `ZoneinfoError` and its `ErrorCode`.

use alloc::{borrow::Cow, format};
use core::{fmt, str::FromStr};

use crate::options::UNKNOWN_ASCII;

/// The reason a `Zoneinfo` lookup or construction failed.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The requested time zone identifier is not known.
    UnsupportedId = 1,
    /// The binary header has a bad magic number or inconsistent counts.
    MalformedHeader = 2,
    /// The data ends before the header's counts are satisfied.
    TruncatedData = 3,
    /// The binary header carries an unrecognized version byte.
    UnsupportedVersion = 4,
    /// A transition table was built without any entry.
    EmptyTransitionTable = 5,
    /// A record in the data body is out of range.
    MalformedData = 6,
    /// A civil datetime is outside 0001-01-01..=9999-12-31 or has an
    /// out-of-range field.
    InvalidDatetime = 7,
}

impl ErrorCode {
    const ALL: [Self; 7] = [
        Self::UnsupportedId,
        Self::MalformedHeader,
        Self::TruncatedData,
        Self::UnsupportedVersion,
        Self::EmptyTransitionTable,
        Self::MalformedData,
        Self::InvalidDatetime,
    ];

    /// Returns the ASCII name of this code.
    #[must_use]
    pub const fn as_ascii(self) -> &'static str {
        match self {
            Self::UnsupportedId => "UNSUPPORTED_ID",
            Self::MalformedHeader => "MALFORMED_HEADER",
            Self::TruncatedData => "TRUNCATED_DATA",
            Self::UnsupportedVersion => "UNSUPPORTED_VERSION",
            Self::EmptyTransitionTable => "EMPTY_TRANSITION_TABLE",
            Self::MalformedData => "MALFORMED_DATA",
            Self::InvalidDatetime => "INVALID_DATETIME",
        }
    }

    /// Returns the code with the integer value `value`, if any.
    #[must_use]
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|code| *code as i32 == value)
    }

    /// Returns the ASCII name for an integer value, or `"(* UNKNOWN *)"` when
    /// `value` names no code.
    #[must_use]
    pub fn ascii_for_value(value: i32) -> &'static str {
        Self::from_i32(value).map_or(UNKNOWN_ASCII, Self::as_ascii)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ascii().fmt(f)
    }
}

/// A parsing error for `ErrorCode`.
#[derive(Debug, Clone, Copy)]
pub struct ParseErrorCodeError;

impl fmt::Display for ParseErrorCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid error code")
    }
}

impl FromStr for ErrorCode {
    type Err = ParseErrorCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_ascii() == s)
            .ok_or(ParseErrorCodeError)
    }
}

/// The error type for `zoneinfo_core`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneinfoError {
    kind: ErrorCode,
    msg: Cow<'static, str>,
}

impl ZoneinfoError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorCode) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create an unsupported identifier error.
    #[inline]
    #[must_use]
    pub const fn unsupported_id() -> Self {
        Self::new(ErrorCode::UnsupportedId)
    }

    /// Create a malformed header error.
    #[inline]
    #[must_use]
    pub const fn malformed_header() -> Self {
        Self::new(ErrorCode::MalformedHeader)
    }

    /// Create a truncated data error.
    #[inline]
    #[must_use]
    pub const fn truncated_data() -> Self {
        Self::new(ErrorCode::TruncatedData)
    }

    /// Create an unsupported version error.
    #[inline]
    #[must_use]
    pub const fn unsupported_version() -> Self {
        Self::new(ErrorCode::UnsupportedVersion)
    }

    /// Create an empty transition table error.
    #[inline]
    #[must_use]
    pub const fn empty_transition_table() -> Self {
        Self::new(ErrorCode::EmptyTransitionTable)
    }

    /// Create a malformed data error.
    #[inline]
    #[must_use]
    pub const fn malformed_data() -> Self {
        Self::new(ErrorCode::MalformedData)
    }

    /// Create an invalid datetime error.
    #[inline]
    #[must_use]
    pub const fn invalid_datetime() -> Self {
        Self::new(ErrorCode::InvalidDatetime)
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorCode {
        self.kind
    }

    /// Returns the error message, which may be empty.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for ZoneinfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl core::error::Error for ZoneinfoError {}

impl From<ixdtf::ParseError> for ZoneinfoError {
    fn from(value: ixdtf::ParseError) -> Self {
        Self::invalid_datetime().with_message(format!("{value}"))
    }
}
