//! Decoding of TZif binary data into a `Zoneinfo`.
//!
//! A version 1 file holds one data block with 32-bit times. Versions 2 and
//! 3 follow that block with a second header, a data block with 64-bit
//! times and a newline-delimited POSIX TZ footer; only the 64-bit block is
//! decoded for them.

use alloc::{string::String, vec::Vec};

use crate::{
    iso::{MAX_EPOCH_SECONDS, MIN_EPOCH_SECONDS},
    LeapCorrection, LocalTimeDescriptor, Zoneinfo, ZoneinfoBuilder, ZoneinfoError,
    ZoneinfoResult,
};

mod cursor;
mod header;

use cursor::ByteCursor;
pub use header::BinaryHeader;

/// A local time type record as stored in the file.
struct TypeRecord {
    utc_offset: i32,
    is_dst: u8,
    abbreviation_index: u8,
}

/// The records of one data block, before validation.
struct DataBlock<'a> {
    transition_times: Vec<i64>,
    transition_types: &'a [u8],
    types: Vec<TypeRecord>,
    abbreviations: &'a [u8],
    leaps: Vec<(i64, i32)>,
    is_std: &'a [u8],
    is_ut: &'a [u8],
}

impl<'a> DataBlock<'a> {
    fn read(
        cursor: &mut ByteCursor<'a>,
        header: &BinaryHeader,
        time_size: usize,
    ) -> ZoneinfoResult<Self> {
        cursor.ensure(
            data_block_len(header, time_size)?,
            "data ends before the records the header announces.",
        )?;
        let count = |c: i32| usize::try_from(c).unwrap_or_default();

        let transition_times = (0..count(header.num_transitions()))
            .map(|_| cursor.read_time(time_size))
            .collect::<ZoneinfoResult<Vec<_>>>()?;
        let transition_types = cursor.take(count(header.num_transitions()))?;
        let types = (0..count(header.num_local_time_types()))
            .map(|_| {
                Ok::<_, ZoneinfoError>(TypeRecord {
                    utc_offset: cursor.read_i32()?,
                    is_dst: cursor.read_u8()?,
                    abbreviation_index: cursor.read_u8()?,
                })
            })
            .collect::<ZoneinfoResult<Vec<_>>>()?;
        let abbreviations = cursor.take(count(header.abbrev_data_size()))?;
        let leaps = (0..count(header.num_leaps()))
            .map(|_| Ok::<_, ZoneinfoError>((cursor.read_time(time_size)?, cursor.read_i32()?)))
            .collect::<ZoneinfoResult<Vec<_>>>()?;
        let is_std = cursor.take(count(header.num_is_std()))?;
        let is_ut = cursor.take(count(header.num_is_gmt()))?;

        Ok(Self {
            transition_times,
            transition_types,
            types,
            abbreviations,
            leaps,
            is_std,
            is_ut,
        })
    }

    fn descriptors(&self) -> ZoneinfoResult<Vec<LocalTimeDescriptor>> {
        self.types
            .iter()
            .map(|record| {
                let is_dst = match record.is_dst {
                    0 => false,
                    1 => true,
                    _ => {
                        return Err(ZoneinfoError::malformed_data()
                            .with_message("local time type DST flag is not 0 or 1."))
                    }
                };
                let abbreviation = self.abbreviation(usize::from(record.abbreviation_index))?;
                LocalTimeDescriptor::try_new(record.utc_offset, is_dst, abbreviation)
            })
            .collect()
    }

    /// Returns the NUL-terminated abbreviation starting at `index`.
    fn abbreviation(&self, index: usize) -> ZoneinfoResult<&'a str> {
        let tail = self.abbreviations.get(index..).ok_or(
            ZoneinfoError::malformed_data().with_message("abbreviation index is out of range."),
        )?;
        let len = tail.iter().position(|&b| b == 0).ok_or(
            ZoneinfoError::malformed_data().with_message("abbreviation is not NUL-terminated."),
        )?;
        core::str::from_utf8(&tail[..len]).map_err(|_| {
            ZoneinfoError::malformed_data().with_message("abbreviation is not ASCII.")
        })
    }

    fn check_indicators(&self) -> ZoneinfoResult<()> {
        if self.is_std.iter().chain(self.is_ut).any(|&b| b > 1) {
            return Err(ZoneinfoError::malformed_data()
                .with_message("standard/wall or UT/local indicator is not 0 or 1."));
        }
        Ok(())
    }
}

/// Decodes `bytes` as TZif data describing the zone `identifier`.
pub(crate) fn parse(identifier: &str, bytes: &[u8]) -> ZoneinfoResult<Zoneinfo> {
    let mut cursor = ByteCursor::new(bytes);
    let header = BinaryHeader::read(&mut cursor)?;

    if header.version() == BinaryHeader::VERSION_1 {
        let block = DataBlock::read(&mut cursor, &header, 4)?;
        return build(identifier, &block, None);
    }

    cursor.skip(data_block_len(&header, 4)?)?;
    let header = BinaryHeader::read(&mut cursor)?;
    #[cfg(feature = "log")]
    log::debug!("{identifier}: decoding the 64-bit data block, {header}");
    let block = DataBlock::read(&mut cursor, &header, 8)?;
    let footer = read_footer(&mut cursor);
    build(identifier, &block, footer)
}

/// The length of the data block `header` announces. A length past
/// `usize::MAX` can never be present.
fn data_block_len(header: &BinaryHeader, time_size: usize) -> ZoneinfoResult<usize> {
    header.data_block_len(time_size).ok_or(
        ZoneinfoError::truncated_data()
            .with_message("data ends before the records the header announces."),
    )
}

/// Reads the `\n<POSIX TZ>\n` footer that ends version 2+ data.
fn read_footer(cursor: &mut ByteCursor<'_>) -> Option<String> {
    let rest = cursor.rest();
    let footer = rest
        .strip_prefix(b"\n")
        .and_then(|body| body.iter().position(|&b| b == b'\n').map(|end| &body[..end]))
        .and_then(|body| core::str::from_utf8(body).ok());
    match footer {
        Some(text) => {
            cursor.skip(text.len() + 2).ok()?;
            (!text.is_empty()).then(|| String::from(text))
        }
        None => {
            #[cfg(feature = "log")]
            log::warn!("TZif footer is missing or malformed; ignoring it");
            None
        }
    }
}

fn build(
    identifier: &str,
    block: &DataBlock<'_>,
    footer: Option<String>,
) -> ZoneinfoResult<Zoneinfo> {
    block.check_indicators()?;
    let mut builder = ZoneinfoBuilder::new(identifier);

    // File type index to interned descriptor index.
    let interned: Vec<usize> = block
        .descriptors()?
        .into_iter()
        .map(|descriptor| builder.add_descriptor(descriptor))
        .collect();

    // Before its first transition a zone observes local time type 0.
    builder.add_transition_to_index(MIN_EPOCH_SECONDS, interned[0])?;

    let mut previous = None;
    for (&utc_time, &file_type) in block.transition_times.iter().zip(block.transition_types) {
        let descriptor_index = *interned.get(usize::from(file_type)).ok_or(
            ZoneinfoError::malformed_data()
                .with_message("transition refers to an unknown local time type."),
        )?;
        if previous.is_some_and(|previous| utc_time < previous) {
            return Err(ZoneinfoError::malformed_data()
                .with_message("transition times are not in ascending order."));
        }
        previous = Some(utc_time);

        if utc_time > MAX_EPOCH_SECONDS {
            #[cfg(feature = "log")]
            log::debug!("{identifier}: dropping transition at {utc_time} past year 9999");
            continue;
        }
        // The table starts at 0001-01-01; earlier transitions only decide
        // which descriptor is in effect at that instant.
        if utc_time <= MIN_EPOCH_SECONDS {
            #[cfg(feature = "log")]
            log::debug!("{identifier}: folding transition at {utc_time} into the first entry");
        }
        builder.add_transition_to_index(utc_time.max(MIN_EPOCH_SECONDS), descriptor_index)?;
    }

    for &(utc_time, correction) in &block.leaps {
        builder.add_leap_correction(LeapCorrection::new(utc_time, correction));
    }
    if let Some(footer) = footer {
        builder.set_extended_range_description(footer);
    }
    builder.build()
}
