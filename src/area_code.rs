//! North American Numbering Plan area codes with a known time zone.
//!
//! The table is deliberately partial. Area codes missing from it are not an
//! error, the caller falls back to another guess.

use country_tz_provider::CountryCode;
use phf::phf_map;
use tinystr::tinystr;

static NANP_TIME_ZONES: phf::Map<&'static str, &'static str> = phf_map! {
    "212" => "America/New_York",
    "315" => "America/New_York",
    "347" => "America/New_York",
    "310" => "America/Los_Angeles",
    "424" => "America/Los_Angeles",
    "702" => "America/Los_Angeles",
    "312" => "America/Chicago",
    "214" => "America/Chicago",
    "602" => "America/Denver",
    "480" => "America/Denver",
    "416" => "America/Toronto",
    "647" => "America/Toronto",
    "604" => "America/Vancouver",
    "778" => "America/Vancouver",
};

const NANP_COUNTRIES: [CountryCode; 2] = [tinystr!(2, "US"), tinystr!(2, "CA")];

/// A national number needs an area code and a seven digit subscriber number.
const MIN_NATIONAL_NUMBER_LEN: usize = 10;

/// Returns the time zone of the area code that starts `national_number`.
///
/// Only US and Canadian numbers are looked up.
pub fn lookup(country: Option<CountryCode>, national_number: &str) -> Option<&'static str> {
    if !country.is_some_and(|c| NANP_COUNTRIES.contains(&c)) {
        return None;
    }
    if national_number.len() < MIN_NATIONAL_NUMBER_LEN {
        return None;
    }
    let area_code = national_number.get(..3)?;
    NANP_TIME_ZONES.get(area_code).copied()
}
