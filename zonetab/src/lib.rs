//! A library for parsing the tzdb tables that tie countries to
//! time zones.
//!
//! The time zone database ships three small tab separated tables next to
//! its zoneinfo sources:
//!
//!   - `iso3166.tab`: country code to English country name
//!   - `zone.tab`: one row per country and zone
//!   - `zone1970.tab`: one row per zone, listing every country using it
//!
//! [`ZoneTab`] merges a country table with either zone table into an
//! ordered, per country view of the zones.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::{string::String, vec::Vec};
use core::fmt;

use hashbrown::HashMap;

#[cfg(feature = "std")]
use std::{io, path::Path};

pub mod parser;
pub mod types;

use parser::{ZoneTabParseError, ZoneTabParser};
use types::{CountryCode, CountryZones, Iso3166Entry, ZoneTabEntry};

/// File name of the country table.
pub const ISO3166_TAB: &str = "iso3166.tab";
/// File name of the single country zone table.
pub const ZONE_TAB: &str = "zone.tab";
/// File name of the multi country zone table.
pub const ZONE1970_TAB: &str = "zone1970.tab";

/// The general error type for `ZoneTab` operations
#[derive(Debug)]
pub enum ZoneTabError {
    Parse(ZoneTabParseError),
    #[cfg(feature = "std")]
    Io(io::Error),
}

impl fmt::Display for ZoneTabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid zone table: {e}"),
            #[cfg(feature = "std")]
            Self::Io(e) => write!(f, "could not read zone table: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZoneTabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<ZoneTabParseError> for ZoneTabError {
    fn from(value: ZoneTabParseError) -> Self {
        Self::Parse(value)
    }
}

#[cfg(feature = "std")]
impl From<io::Error> for ZoneTabError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Countries and their time zones, keyed by ISO 3166 code.
///
/// Countries keep the order in which they were first seen, and each
/// country's zones keep the order of the zone table.
#[derive(Debug, Clone, Default)]
pub struct ZoneTab {
    index: HashMap<CountryCode, usize>,
    countries: Vec<(CountryCode, CountryZones)>,
}

// ==== ZoneTab parsing methods ====

impl ZoneTab {
    /// Reads `iso3166.tab` and `zone.tab` from a tzdata directory.
    #[cfg(feature = "std")]
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self, ZoneTabError> {
        let dir = dir.as_ref();
        let iso3166 = std::fs::read_to_string(dir.join(ISO3166_TAB))?;
        let zone_tab = std::fs::read_to_string(dir.join(ZONE_TAB))?;
        Self::from_tables(&iso3166, &zone_tab)
    }

    /// Builds a `ZoneTab` from the contents of a country table and a
    /// zone table (`zone.tab` or `zone1970.tab`).
    pub fn from_tables(iso3166: &str, zone_tab: &str) -> Result<Self, ZoneTabError> {
        let mut table = Self::default();
        table.add_countries(ZoneTabParser::from_table_str(iso3166).parse::<Iso3166Entry>()?);
        table.add_zones(ZoneTabParser::from_table_str(zone_tab).parse::<ZoneTabEntry>()?);
        Ok(table)
    }

    /// Adds country names, creating countries that are not known yet.
    pub fn add_countries<I: IntoIterator<Item = Iso3166Entry>>(&mut self, entries: I) {
        for entry in entries {
            self.entry_mut(entry.code).name = Some(entry.name);
        }
    }

    /// Attaches zones to every country their entry lists.
    pub fn add_zones<I: IntoIterator<Item = ZoneTabEntry>>(&mut self, entries: I) {
        for entry in entries {
            for code in &entry.countries {
                self.entry_mut(*code).push_zone(&entry.zone);
            }
        }
    }

    fn entry_mut(&mut self, code: CountryCode) -> &mut CountryZones {
        let idx = match self.index.get(&code) {
            Some(idx) => *idx,
            None => {
                self.countries.push((code, CountryZones::default()));
                let idx = self.countries.len() - 1;
                self.index.insert(code, idx);
                idx
            }
        };
        &mut self.countries[idx].1
    }
}

// ==== ZoneTab accessors ====

impl ZoneTab {
    pub fn get(&self, code: &CountryCode) -> Option<&CountryZones> {
        self.index.get(code).map(|idx| &self.countries[*idx].1)
    }

    pub fn countries(&self) -> impl Iterator<Item = (&CountryCode, &CountryZones)> {
        self.countries.iter().map(|(code, zones)| (code, zones))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Every distinct zone named by the table, in first seen order.
    pub fn zones(&self) -> Vec<&str> {
        let mut seen = hashbrown::HashSet::new();
        self.countries
            .iter()
            .flat_map(|(_, country)| country.zones.iter())
            .filter(|zone| seen.insert(zone.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinystr::tinystr;

    const ISO3166: &str = "\
#country-
#code\tname of country, territory, area, or subdivision
AQ\tAntarctica
AU\tAustralia
JP\tJapan
US\tUnited States
";

    const ZONE_TAB: &str = "\
# tzdb timezone descriptions
#
US\t+404251-0740023\tAmerica/New_York\tEastern (most areas)
US\t+415100-0873900\tAmerica/Chicago\tCentral (most areas)
JP\t+353916+1394441\tAsia/Tokyo
AU\t-3352+15113\tAustralia/Sydney\tNew South Wales (most areas)
";

    const ZONE1970_TAB: &str = "\
AU,AQ\t-3352+15113\tAustralia/Sydney\tNew South Wales (most areas)
JP\t+353916+1394441\tAsia/Tokyo
";

    #[test]
    fn zones_follow_table_order() {
        let table = ZoneTab::from_tables(ISO3166, ZONE_TAB).unwrap();
        let us = table.get(&tinystr!(2, "US")).unwrap();
        assert_eq!(us.name.as_deref(), Some("United States"));
        assert_eq!(us.zones, ["America/New_York", "America/Chicago"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn country_without_zones() {
        let table = ZoneTab::from_tables(ISO3166, ZONE_TAB).unwrap();
        let aq = table.get(&tinystr!(2, "AQ")).unwrap();
        assert_eq!(aq.name.as_deref(), Some("Antarctica"));
        assert!(aq.zones.is_empty());
        assert!(table.get(&tinystr!(2, "ZZ")).is_none());
    }

    #[test]
    fn zone1970_shares_zones() {
        let table = ZoneTab::from_tables(ISO3166, ZONE1970_TAB).unwrap();
        assert_eq!(
            table.get(&tinystr!(2, "AQ")).unwrap().zones,
            ["Australia/Sydney"]
        );
        assert_eq!(
            table.get(&tinystr!(2, "AU")).unwrap().zones,
            ["Australia/Sydney"]
        );
        assert_eq!(table.zones(), ["Australia/Sydney", "Asia/Tokyo"]);
    }

    #[test]
    fn zones_without_country_name() {
        let table = ZoneTab::from_tables("", ZONE_TAB).unwrap();
        let jp = table.get(&tinystr!(2, "JP")).unwrap();
        assert_eq!(jp.name, None);
        assert_eq!(jp.zones, ["Asia/Tokyo"]);
    }
}
