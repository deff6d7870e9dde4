//! `TzdbCountryProvider`: countries from the tzdb country tables, offsets
//! from the bundled TZif data.

use log::{debug, warn};
use rustc_hash::FxHashMap;
use zonetab_rs::ZoneTab;

use crate::{
    tzif, CountryCode, CountryRecord, CountryTimeZoneProvider, ProviderError, TimeZoneRecord,
};

const BUNDLED_ISO3166: &str = include_str!("./data/iso3166.tab");
const BUNDLED_ZONE_TAB: &str = include_str!("./data/zone.tab");

/// A [`CountryTimeZoneProvider`] over the tzdb's `iso3166.tab` and
/// `zone.tab` tables.
///
/// The offsets of every zone named by the tables are computed once, when
/// the provider is built.
#[derive(Debug, Clone)]
pub struct TzdbCountryProvider {
    zone_tab: ZoneTab,
    offsets: FxHashMap<String, TimeZoneRecord>,
}

impl TzdbCountryProvider {
    /// Builds the provider from the tables compiled into this crate.
    pub fn try_new() -> Result<Self, ProviderError> {
        Self::try_from_zone_tab(ZoneTab::from_tables(BUNDLED_ISO3166, BUNDLED_ZONE_TAB)?)
    }

    /// Builds the provider from the tables of a tzdata directory.
    pub fn try_from_directory<P: AsRef<std::path::Path>>(dir: P) -> Result<Self, ProviderError> {
        Self::try_from_zone_tab(ZoneTab::from_directory(dir)?)
    }

    pub fn try_from_zone_tab(zone_tab: ZoneTab) -> Result<Self, ProviderError> {
        let mut offsets = FxHashMap::default();
        for zone in zone_tab.zones() {
            match tzif::zone_record(zone) {
                Ok(record) => {
                    offsets.insert(String::from(zone), record);
                }
                Err(e) => warn!("no offsets for time zone `{zone}`: {e}"),
            }
        }
        debug!(
            "loaded {} countries and {} time zones",
            zone_tab.len(),
            offsets.len()
        );
        Ok(Self { zone_tab, offsets })
    }

    pub fn country_count(&self) -> usize {
        self.zone_tab.len()
    }

    pub fn zone_count(&self) -> usize {
        self.offsets.len()
    }
}

impl CountryTimeZoneProvider for TzdbCountryProvider {
    fn get_country(&self, code: &CountryCode) -> Option<CountryRecord<'_>> {
        let country = self.zone_tab.get(&code.to_ascii_uppercase())?;
        Some(CountryRecord {
            name: country.name.as_deref(),
            timezones: &country.zones,
        })
    }

    fn get_timezone(&self, identifier: &str) -> Option<TimeZoneRecord> {
        if let Some(record) = self.offsets.get(identifier) {
            return Some(*record);
        }
        // Zones outside the country tables, e.g. links or `Etc/*`.
        tzif::zone_record(identifier).ok()
    }
}

#[cfg(test)]
mod tests {
    use tinystr::tinystr;

    use super::TzdbCountryProvider;
    use crate::CountryTimeZoneProvider;

    #[test]
    fn bundled_tables_load() {
        let provider = TzdbCountryProvider::try_new().unwrap();
        assert!(provider.country_count() > 240);
        assert!(provider.zone_count() > 300);
    }

    #[test]
    fn us_lists_new_york_first() {
        let provider = TzdbCountryProvider::try_new().unwrap();
        let us = provider.get_country(&tinystr!(2, "US")).unwrap();
        assert_eq!(us.name, Some("United States"));
        assert_eq!(us.timezones.first().map(String::as_str), Some("America/New_York"));
        assert!(us.timezones.iter().any(|zone| zone == "America/Los_Angeles"));
        assert!(us.timezones.iter().any(|zone| zone == "Pacific/Honolulu"));
    }

    #[test]
    fn single_zone_country() {
        let provider = TzdbCountryProvider::try_new().unwrap();
        let jp = provider.get_country(&tinystr!(2, "JP")).unwrap();
        assert_eq!(jp.name, Some("Japan"));
        assert_eq!(jp.timezones, ["Asia/Tokyo"]);
    }

    #[test]
    fn lowercase_code_lookup() {
        let provider = TzdbCountryProvider::try_new().unwrap();
        let ca = provider.get_country(&tinystr!(2, "ca")).unwrap();
        assert_eq!(ca.name, Some("Canada"));
        assert!(ca.timezones.iter().any(|zone| zone == "America/Toronto"));
    }

    #[test]
    fn unknown_country() {
        let provider = TzdbCountryProvider::try_new().unwrap();
        assert!(provider.get_country(&tinystr!(2, "ZZ")).is_none());
    }

    #[test]
    fn timezone_offsets() {
        let provider = TzdbCountryProvider::try_new().unwrap();
        let chicago = provider.get_timezone("America/Chicago").unwrap();
        assert_eq!(chicago.utc_offset, Some(-360));
        assert_eq!(chicago.dst_offset, Some(-300));

        let utc = provider.get_timezone("UTC").unwrap();
        assert_eq!(utc.utc_offset, Some(0));
        assert_eq!(utc.dst_offset, Some(0));

        assert!(provider.get_timezone("Not/AZone").is_none());
    }
}
