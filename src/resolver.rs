//! Resolution of a country's candidate time zones.

use alloc::{string::String, vec::Vec};

use country_tz_provider::{CountryCode, CountryTimeZoneProvider, TimeZoneRecord};
use indexmap::IndexMap;
use serde::Serialize;

/// One IANA time zone used in a country, with its offsets in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeZoneCandidate {
    #[serde(rename = "timeZone")]
    pub iana_name: String,
    #[serde(rename = "rawOffsetMin", skip_serializing_if = "Option::is_none")]
    pub raw_offset_minutes: Option<i32>,
    #[serde(rename = "dstOffsetMin", skip_serializing_if = "Option::is_none")]
    pub dst_offset_minutes: Option<i32>,
    pub has_dst: bool,
}

impl TimeZoneCandidate {
    /// Creates a candidate from the offsets a provider reported, if any.
    pub fn new(iana_name: &str, record: Option<TimeZoneRecord>) -> Self {
        let raw_offset_minutes = record.and_then(|r| r.utc_offset);
        let dst_offset_minutes = record.and_then(|r| r.dst_offset);
        Self {
            iana_name: iana_name.into(),
            raw_offset_minutes,
            dst_offset_minutes,
            // Zero is a valid offset, only a missing DST offset means "no DST".
            has_dst: dst_offset_minutes.is_some() && dst_offset_minutes != raw_offset_minutes,
        }
    }
}

/// Returns the distinct time zones of `country`, in the order the provider
/// lists them.
///
/// An absent or unknown country resolves to no candidates.
pub fn resolve_country_time_zones<P>(
    provider: &P,
    country: Option<CountryCode>,
) -> Vec<TimeZoneCandidate>
where
    P: CountryTimeZoneProvider + ?Sized,
{
    let Some(code) = country else {
        return Vec::new();
    };
    let Some(record) = provider.get_country(&code) else {
        return Vec::new();
    };

    let mut unique: IndexMap<&str, TimeZoneCandidate> = IndexMap::new();
    for name in record.timezones.iter().map(String::as_str) {
        if name.is_empty() {
            continue;
        }
        unique
            .entry(name)
            .or_insert_with(|| TimeZoneCandidate::new(name, provider.get_timezone(name)));
    }
    unique.into_values().collect()
}
