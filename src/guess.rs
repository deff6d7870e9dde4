//! Selection of the single best-guess time zone.

use country_tz_provider::CountryCode;

use crate::{area_code, resolver::TimeZoneCandidate};

/// Picks the best-guess IANA time zone for a parsed phone number.
///
/// The first rule that applies wins:
///
/// 1. Without a country there is no guess.
/// 2. A country with exactly one candidate uses that candidate.
/// 3. US and Canadian numbers use the area code table when it knows the code.
/// 4. Otherwise the first candidate is used, or no guess if there is none.
pub fn select_best<'a>(
    country: Option<CountryCode>,
    national_number: &str,
    candidates: &'a [TimeZoneCandidate],
) -> Option<&'a str> {
    country?;

    if let [only] = candidates {
        return Some(&only.iana_name);
    }

    if let Some(zone) = area_code::lookup(country, national_number) {
        return Some(zone);
    }

    candidates.first().map(|c| c.iana_name.as_str())
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use tinystr::tinystr;

    use super::select_best;
    use crate::resolver::TimeZoneCandidate;

    fn candidates(names: &[&str]) -> Vec<TimeZoneCandidate> {
        names
            .iter()
            .map(|n| TimeZoneCandidate::new(n, None))
            .collect()
    }

    #[test]
    fn no_country_no_guess() {
        let zones = candidates(&["Asia/Tokyo"]);
        assert_eq!(select_best(None, "2125551234", &zones), None);
    }

    #[test]
    fn single_candidate_wins_over_area_code() {
        let zones = candidates(&["America/Chicago"]);
        assert_eq!(
            select_best(Some(tinystr!(2, "US")), "2125551234", &zones),
            Some("America/Chicago")
        );
    }

    #[test]
    fn area_code_for_north_america() {
        let zones = candidates(&["America/New_York", "America/Chicago", "America/Los_Angeles"]);
        let us = Some(tinystr!(2, "US"));
        assert_eq!(
            select_best(us, "3105551234", &zones),
            Some("America/Los_Angeles")
        );
        // Not listed for the country, the table entry still applies.
        assert_eq!(select_best(us, "6025551234", &zones), Some("America/Denver"));
    }

    #[test]
    fn falls_back_to_first_candidate() {
        let zones = candidates(&["America/New_York", "America/Chicago"]);
        let us = Some(tinystr!(2, "US"));
        // Unknown area code.
        assert_eq!(select_best(us, "9075551234", &zones), Some("America/New_York"));
        // Too short for an area code lookup.
        assert_eq!(select_best(us, "31055512", &zones), Some("America/New_York"));

        let au = candidates(&["Australia/Sydney", "Australia/Perth"]);
        assert_eq!(
            select_best(Some(tinystr!(2, "AU")), "291234567", &au),
            Some("Australia/Sydney")
        );
    }

    #[test]
    fn no_candidates() {
        assert_eq!(select_best(Some(tinystr!(2, "AQ")), "12345", &[]), None);
        assert_eq!(
            select_best(Some(tinystr!(2, "CA")), "4165551234", &[]),
            Some("America/Toronto")
        );
    }
}
