//! The `CountryTimeZoneProvider` trait.

use crate::CountryCode;

/// What a provider knows about one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryRecord<'data> {
    /// The usual English name of the country, when the data has one.
    pub name: Option<&'data str>,
    /// The IANA identifiers of the country's zones, most populous area first.
    pub timezones: &'data [String],
}

/// The offsets of a named time zone, in minutes east of UTC.
///
/// `utc_offset` is the zone's standard offset and `dst_offset` the offset
/// observed during daylight saving time. For zones that never change their
/// clocks both values are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeZoneRecord {
    pub utc_offset: Option<i32>,
    pub dst_offset: Option<i32>,
}

impl TimeZoneRecord {
    /// Builds a record from offsets in seconds east of UTC.
    pub fn from_seconds(utc_offset: i64, dst_offset: i64) -> Self {
        Self {
            utc_offset: minutes(utc_offset),
            dst_offset: minutes(dst_offset),
        }
    }
}

fn minutes(seconds: i64) -> Option<i32> {
    i32::try_from(seconds / 60).ok()
}

/// The `CountryTimeZoneProvider` trait provides the two lookups needed to
/// map a country to its time zones.
pub trait CountryTimeZoneProvider {
    fn get_country(&self, code: &CountryCode) -> Option<CountryRecord<'_>>;

    fn get_timezone(&self, identifier: &str) -> Option<TimeZoneRecord>;
}

impl<T: CountryTimeZoneProvider + ?Sized> CountryTimeZoneProvider for &T {
    fn get_country(&self, code: &CountryCode) -> Option<CountryRecord<'_>> {
        (**self).get_country(code)
    }

    fn get_timezone(&self, identifier: &str) -> Option<TimeZoneRecord> {
        (**self).get_timezone(identifier)
    }
}

/// A provider that knows no countries and no zones.
pub struct NeverProvider;

impl CountryTimeZoneProvider for NeverProvider {
    fn get_country(&self, _: &CountryCode) -> Option<CountryRecord<'_>> {
        None
    }

    fn get_timezone(&self, _: &str) -> Option<TimeZoneRecord> {
        None
    }
}
