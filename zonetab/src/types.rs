//! Zone table types

use alloc::{string::String, vec::Vec};

use tinystr::TinyAsciiStr;

/// An upper case ISO 3166-1 alpha-2 country code.
pub type CountryCode = TinyAsciiStr<2>;

/// One line of `iso3166.tab`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iso3166Entry {
    pub code: CountryCode,
    /// The usual English name of the country or territory.
    pub name: String,
}

/// One line of `zone.tab` or `zone1970.tab`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTabEntry {
    /// The countries using this zone. Always a single code in `zone.tab`.
    pub countries: Vec<CountryCode>,
    /// ISO 6709 latitude and longitude of the zone's principal location.
    pub coordinates: String,
    /// The IANA identifier of the zone.
    pub zone: String,
    pub comments: Option<String>,
}

/// The zones of a single country, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryZones {
    pub name: Option<String>,
    pub zones: Vec<String>,
}

impl CountryZones {
    pub(crate) fn push_zone(&mut self, zone: &str) {
        if !self.zones.iter().any(|z| z == zone) {
            self.zones.push(zone.into());
        }
    }
}
