//! Standard and daylight saving offsets read from TZif data.
//!
//! The offsets come from the POSIX TZ string in the TZif footer, which
//! describes the rules a zone follows after its last listed transition.
//! Its standard variant is the zone's current standard offset and its
//! optional DST variant the current daylight saving offset.

use core::fmt;

use combine::Parser;
use tzif::data::{posix::PosixTzString, tzif::TzifData};

use crate::TimeZoneRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TzifError {
    UnknownIdentifier,
    Illformed,
    MissingDataBlock,
}

impl fmt::Display for TzifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIdentifier => f.write_str("time zone identifier does not exist"),
            Self::Illformed => f.write_str("illformed TZif data"),
            Self::MissingDataBlock => f.write_str("TZif data has no local time types"),
        }
    }
}

impl std::error::Error for TzifError {}

/// Looks up `identifier` in the bundled tzdb and computes its offsets.
pub fn zone_record(identifier: &str) -> Result<TimeZoneRecord, TzifError> {
    let (_canonical, data) = jiff_tzdb::get(identifier).ok_or(TzifError::UnknownIdentifier)?;
    zone_record_from_bytes(data)
}

/// Computes the offsets of the zone encoded in `data`.
pub fn zone_record_from_bytes(data: &[u8]) -> Result<TimeZoneRecord, TzifError> {
    let Ok((tzif, _)) = tzif::parse::tzif::tzif().parse(data) else {
        return Err(TzifError::Illformed);
    };
    match tzif.footer.as_ref() {
        Some(posix) => Ok(record_from_posix(posix)),
        None => record_from_local_time_types(&tzif),
    }
}

fn record_from_posix(posix: &PosixTzString) -> TimeZoneRecord {
    // The POSIX tz string stores offsets as negative offsets;
    // i.e. "seconds that must be added to reach UTC"
    let std_offset = -posix.std_info.offset.0;
    let dst_offset = posix
        .dst_info
        .as_ref()
        .map_or(std_offset, |dst| -dst.variant_info.offset.0);
    TimeZoneRecord::from_seconds(std_offset, dst_offset)
}

// Version 1 files have no footer; the most recent local time types are
// the best remaining description of the zone.
fn record_from_local_time_types(tzif: &TzifData) -> Result<TimeZoneRecord, TzifError> {
    let block = tzif.data_block2.as_ref().unwrap_or(&tzif.data_block1);
    let records = &block.local_time_type_records;
    let std_offset = records
        .iter()
        .rev()
        .find(|record| !record.is_dst)
        .or(records.last())
        .ok_or(TzifError::MissingDataBlock)?
        .utoff
        .0;
    let dst_offset = records
        .iter()
        .rev()
        .find(|record| record.is_dst)
        .map_or(std_offset, |record| record.utoff.0);
    Ok(TimeZoneRecord::from_seconds(std_offset, dst_offset))
}

#[cfg(test)]
mod tests {
    use super::{zone_record, TzifError};

    #[test]
    fn new_york_observes_dst() {
        let record = zone_record("America/New_York").unwrap();
        assert_eq!(record.utc_offset, Some(-300));
        assert_eq!(record.dst_offset, Some(-240));
    }

    #[test]
    fn tokyo_has_no_dst() {
        let record = zone_record("Asia/Tokyo").unwrap();
        assert_eq!(record.utc_offset, Some(540));
        assert_eq!(record.dst_offset, Some(540));
    }

    #[test]
    fn zero_offsets_are_present() {
        let record = zone_record("Etc/UTC").unwrap();
        assert_eq!(record.utc_offset, Some(0));
        assert_eq!(record.dst_offset, Some(0));

        let london = zone_record("Europe/London").unwrap();
        assert_eq!(london.utc_offset, Some(0));
        assert_eq!(london.dst_offset, Some(60));
    }

    #[test]
    fn half_hour_offsets() {
        let record = zone_record("Asia/Kolkata").unwrap();
        assert_eq!(record.utc_offset, Some(330));
        let record = zone_record("America/St_Johns").unwrap();
        assert_eq!(record.utc_offset, Some(-210));
        assert_eq!(record.dst_offset, Some(-150));
    }

    #[test]
    fn unknown_identifier() {
        assert_eq!(
            zone_record("Mars/Olympus_Mons"),
            Err(TzifError::UnknownIdentifier)
        );
    }
}
