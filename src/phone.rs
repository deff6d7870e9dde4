//! Phone number normalization and parsing.

use alloc::string::String;

use country_tz_provider::CountryCode;
use tinystr::TinyAsciiStr;

/// The outcome of parsing a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPhone {
    /// Whether the number is a valid, dialable number.
    pub is_valid: bool,
    /// The number's region, if the parser could determine one.
    pub country: Option<CountryCode>,
    /// The national significant number, digits only.
    pub national_number: String,
    /// The number in E.164 form.
    pub e164: String,
}

/// A phone number parser.
pub trait PhoneNumberParser {
    /// Parses a normalized number in international form, returning `None`
    /// when the input is not a phone number at all.
    fn parse(&self, normalized: &str) -> Option<ParsedPhone>;
}

impl<T: PhoneNumberParser + ?Sized> PhoneNumberParser for &T {
    fn parse(&self, normalized: &str) -> Option<ParsedPhone> {
        (**self).parse(normalized)
    }
}

/// Prefixes `raw` with a `+` when it does not already start with one.
///
/// Returns `None` for empty input. No other reformatting happens.
#[must_use]
pub fn normalize_phone_input(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with('+') {
        return Some(raw.into());
    }
    let mut normalized = String::with_capacity(raw.len() + 1);
    normalized.push('+');
    normalized.push_str(raw);
    Some(normalized)
}

/// Parses a two letter region identifier into a [`CountryCode`].
pub(crate) fn country_code_from_region(region: &str) -> Option<CountryCode> {
    let code = TinyAsciiStr::<2>::try_from_str(region).ok()?;
    code.is_ascii_alphabetic().then(|| code.to_ascii_uppercase())
}

#[cfg(feature = "phonenumber")]
pub use self::libphonenumber::LibPhoneNumberParser;

#[cfg(feature = "phonenumber")]
mod libphonenumber {
    use alloc::{format, string::ToString};

    use phonenumber::Mode;

    use super::{country_code_from_region, ParsedPhone, PhoneNumberParser};

    /// A [`PhoneNumberParser`] backed by the `phonenumber` crate's copy of
    /// libphonenumber's metadata.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LibPhoneNumberParser;

    impl PhoneNumberParser for LibPhoneNumberParser {
        fn parse(&self, normalized: &str) -> Option<ParsedPhone> {
            let number = phonenumber::parse(None, normalized)
                .map_err(|err| log::debug!("could not parse phone number: {err:?}"))
                .ok()?;

            let country = number
                .country()
                .id()
                .and_then(|id| country_code_from_region(&format!("{id:?}")));

            Some(ParsedPhone {
                is_valid: phonenumber::is_valid(&number),
                country,
                national_number: number.national().to_string(),
                e164: number.format().mode(Mode::E164).to_string(),
            })
        }
    }

}
