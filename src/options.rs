//! Resolution options and outcome classifications.

use core::{fmt, str::FromStr};

/// The name returned by `ascii_for_value` for integers that name no enumerator.
pub(crate) const UNKNOWN_ASCII: &str = "(* UNKNOWN *)";

/// The caller's preference for resolving an ambiguous local time.
#[repr(i32)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DstPolicy {
    /// Prefer the daylight-saving interpretation.
    Dst = 0,
    /// Prefer the standard-time interpretation.
    Standard = 1,
    /// No preference; the earlier UTC instant is used.
    #[default]
    Unspecified = 2,
}

impl DstPolicy {
    const ALL: [Self; 3] = [Self::Dst, Self::Standard, Self::Unspecified];

    /// Returns the ASCII name of this policy.
    #[must_use]
    pub const fn as_ascii(self) -> &'static str {
        match self {
            Self::Dst => "DST",
            Self::Standard => "STANDARD",
            Self::Unspecified => "UNSPECIFIED",
        }
    }

    /// Returns the policy with the integer value `value`, if any.
    #[must_use]
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|policy| *policy as i32 == value)
    }

    /// Returns the ASCII name for an integer value, or `"(* UNKNOWN *)"`.
    #[must_use]
    pub fn ascii_for_value(value: i32) -> &'static str {
        Self::from_i32(value).map_or(UNKNOWN_ASCII, Self::as_ascii)
    }

    /// Returns whether a descriptor with the given DST flag satisfies this
    /// policy. `Unspecified` is satisfied by neither.
    pub(crate) const fn prefers(self, is_dst: bool) -> bool {
        match self {
            Self::Dst => is_dst,
            Self::Standard => !is_dst,
            Self::Unspecified => false,
        }
    }
}

/// A parsing error for `DstPolicy`.
#[derive(Debug, Clone, Copy)]
pub struct ParseDstPolicyError;

impl fmt::Display for ParseDstPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid dst policy")
    }
}

impl FromStr for DstPolicy {
    type Err = ParseDstPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DST" => Ok(Self::Dst),
            "STANDARD" => Ok(Self::Standard),
            "UNSPECIFIED" => Ok(Self::Unspecified),
            _ => Err(ParseDstPolicyError),
        }
    }
}

impl fmt::Display for DstPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ascii().fmt(f)
    }
}

/// The classification of a local (wall-clock) time against a zone.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalTimeValidity {
    /// The local time corresponds to exactly one UTC instant.
    ValidUnique = 0,
    /// The local time occurs twice, in the overlap after clocks move back.
    ValidAmbiguous = 1,
    /// The local time never occurs, in the gap after clocks move forward.
    Invalid = 2,
}

impl LocalTimeValidity {
    const ALL: [Self; 3] = [Self::ValidUnique, Self::ValidAmbiguous, Self::Invalid];

    /// Returns the ASCII name of this classification.
    #[must_use]
    pub const fn as_ascii(self) -> &'static str {
        match self {
            Self::ValidUnique => "VALID_UNIQUE",
            Self::ValidAmbiguous => "VALID_AMBIGUOUS",
            Self::Invalid => "INVALID",
        }
    }

    /// Returns the classification with the integer value `value`, if any.
    #[must_use]
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|validity| *validity as i32 == value)
    }

    /// Returns the ASCII name for an integer value, or `"(* UNKNOWN *)"`.
    #[must_use]
    pub fn ascii_for_value(value: i32) -> &'static str {
        Self::from_i32(value).map_or(UNKNOWN_ASCII, Self::as_ascii)
    }

    /// Returns whether some UTC instant displays as the local time.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// A parsing error for `LocalTimeValidity`.
#[derive(Debug, Clone, Copy)]
pub struct ParseLocalTimeValidityError;

impl fmt::Display for ParseLocalTimeValidityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid local time validity")
    }
}

impl FromStr for LocalTimeValidity {
    type Err = ParseLocalTimeValidityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VALID_UNIQUE" => Ok(Self::ValidUnique),
            "VALID_AMBIGUOUS" => Ok(Self::ValidAmbiguous),
            "INVALID" => Ok(Self::Invalid),
            _ => Err(ParseLocalTimeValidityError),
        }
    }
}

impl fmt::Display for LocalTimeValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ascii().fmt(f)
    }
}
