//! The HTTP-agnostic request handler.
//!
//! [`TimeZoneService::handle`] turns an [`ApiRequest`] into an
//! [`ApiResponse`]. The server binary only moves bytes between the socket
//! and these types.

use alloc::{borrow::Cow, string::String, vec::Vec};

use country_tz_provider::{CountryCode, CountryTimeZoneProvider};
use http::{Method, StatusCode};
use serde::Serialize;
use url::form_urlencoded;

use crate::{
    guess::select_best,
    phone::{normalize_phone_input, PhoneNumberParser},
    resolver::{resolve_country_time_zones, TimeZoneCandidate},
    PhoneTzResult,
};

/// The service name reported by the health route.
pub const SERVICE_NAME: &str = "phone-to-timezone";

/// The service version reported by the health route.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The zone reported for valid numbers without a better guess.
pub const FALLBACK_TIME_ZONE: &str = "UTC";

/// Headers sent with every response.
pub const RESPONSE_HEADERS: [(&str, &str); 5] = [
    ("content-type", "application/json; charset=utf-8"),
    ("cache-control", "public, max-age=300"),
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET,POST,OPTIONS"),
    ("access-control-allow-headers", "content-type"),
];

const TIMEZONE_PATH: &str = "/api/timezone";
const MISSING_PHONE: &str = "Missing \"phone\"";
const INVALID_PHONE: &str = "Invalid phone number";

// ==== Request and response ====

/// An incoming request, reduced to what the handler reads.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    pub method: Method,
    pub path: &'a str,
    /// The raw query string, without the leading `?`.
    pub query: Option<&'a str>,
    pub body: &'a [u8],
}

impl<'a> ApiRequest<'a> {
    /// A `GET` request for `path` with an optional query string.
    pub fn get(path: &'a str, query: Option<&'a str>) -> Self {
        Self {
            method: Method::GET,
            path,
            query,
            body: &[],
        }
    }

    /// A `POST` request for `path` carrying `body`.
    pub fn post(path: &'a str, query: Option<&'a str>, body: &'a [u8]) -> Self {
        Self {
            method: Method::POST,
            path,
            query,
            body,
        }
    }

    /// Returns the first value of the query parameter `name`.
    fn query_param(&self, name: &str) -> Option<Cow<'a, str>> {
        let query = self.query?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// A JSON response. Every response carries [`RESPONSE_HEADERS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    fn json<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> PhoneTzResult<Self> {
        let body = serde_json::to_vec_pretty(payload)?;
        Ok(Self { status, body })
    }

    /// The response sent when a payload could not be encoded.
    #[must_use]
    pub fn internal_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: b"{\n  \"error\": \"Internal error\"\n}".to_vec(),
        }
    }

    /// Returns the headers to send with this response.
    pub fn headers(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        RESPONSE_HEADERS.into_iter()
    }
}

// ==== Payloads ====

#[derive(Serialize)]
struct HealthPayload {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'static str>,
}

#[derive(Serialize)]
struct ErrorPayload {
    error: &'static str,
}

#[derive(Serialize)]
struct InvalidPhonePayload {
    valid: bool,
    iana_timezone: Option<&'static str>,
    country: Option<&'static str>,
    note: &'static str,
}

#[derive(Serialize)]
struct ValidPhonePayload<'a> {
    valid: bool,
    iana_timezone: &'a str,
    country: Option<&'a str>,
    #[serde(rename = "Phone")]
    phone: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<LookupMeta<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupMeta<'a> {
    e164: &'a str,
    country_name: Option<&'a str>,
    possible_timezones: &'a [TimeZoneCandidate],
}

// ==== Lookup ====

/// A phone number as submitted, plus whether verbose output was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneQuery {
    pub raw_input: String,
    pub verbose: bool,
}

/// The result of looking up a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneLookup {
    /// The number could not be parsed or is not valid.
    Invalid,
    /// A valid number with its best-guess zone.
    Valid(ValidLookup),
}

/// Details of a valid number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLookup {
    /// The best-guess zone, [`FALLBACK_TIME_ZONE`] when there is none.
    pub iana_timezone: String,
    pub country: Option<CountryCode>,
    pub country_name: Option<String>,
    pub e164: String,
    pub candidates: Vec<TimeZoneCandidate>,
}

/// Answers time zone queries with a phone number parser `C` and a country
/// database `P`.
///
/// The service holds no mutable state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct TimeZoneService<P, C> {
    provider: P,
    parser: C,
}

impl<P, C> TimeZoneService<P, C>
where
    P: CountryTimeZoneProvider,
    C: PhoneNumberParser,
{
    /// Creates a service from its two collaborators.
    pub fn new(provider: P, parser: C) -> Self {
        Self { provider, parser }
    }

    /// Returns the country database.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the distinct candidate zones for `country`.
    pub fn resolve(&self, country: Option<CountryCode>) -> Vec<TimeZoneCandidate> {
        resolve_country_time_zones(&self.provider, country)
    }

    /// Looks up a phone number as the user typed it.
    ///
    /// Empty input is [`PhoneLookup::Invalid`]; the request handler rejects
    /// it as missing before it gets here.
    pub fn lookup(&self, raw_input: &str) -> PhoneLookup {
        let parsed = match normalize_phone_input(raw_input).and_then(|n| self.parser.parse(&n)) {
            Some(parsed) if parsed.is_valid => parsed,
            _ => return PhoneLookup::Invalid,
        };

        let candidates = self.resolve(parsed.country);
        let iana_timezone = select_best(parsed.country, &parsed.national_number, &candidates)
            .unwrap_or(FALLBACK_TIME_ZONE)
            .into();
        let country_name = parsed
            .country
            .and_then(|code| self.provider.get_country(&code))
            .and_then(|record| record.name)
            .map(String::from);

        PhoneLookup::Valid(ValidLookup {
            iana_timezone,
            country: parsed.country,
            country_name,
            e164: parsed.e164,
            candidates,
        })
    }

    /// Routes and answers a request.
    ///
    /// Failures never escape: a response that cannot be encoded is logged
    /// and replaced with [`ApiResponse::internal_error`].
    pub fn handle(&self, request: &ApiRequest<'_>) -> ApiResponse {
        let response = self.route(request).unwrap_or_else(|err| {
            log::error!("{} {}: {err}", request.method, request.path);
            ApiResponse::internal_error()
        });
        log::debug!(
            "{} {} -> {}",
            request.method,
            request.path,
            response.status.as_u16()
        );
        response
    }

    fn route(&self, request: &ApiRequest<'_>) -> PhoneTzResult<ApiResponse> {
        if request.method == Method::OPTIONS {
            let payload = HealthPayload {
                ok: true,
                name: None,
                version: None,
            };
            return ApiResponse::json(StatusCode::OK, &payload);
        }

        match request.path {
            "/" | "/health" => {
                let payload = HealthPayload {
                    ok: true,
                    name: Some(SERVICE_NAME),
                    version: Some(SERVICE_VERSION),
                };
                ApiResponse::json(StatusCode::OK, &payload)
            }
            TIMEZONE_PATH => self.timezone(request),
            _ => ApiResponse::json(
                StatusCode::NOT_FOUND,
                &ErrorPayload { error: "Not found" },
            ),
        }
    }

    fn timezone(&self, request: &ApiRequest<'_>) -> PhoneTzResult<ApiResponse> {
        let Some(raw_input) = phone_from_request(request) else {
            return ApiResponse::json(
                StatusCode::BAD_REQUEST,
                &ErrorPayload {
                    error: MISSING_PHONE,
                },
            );
        };
        let query = PhoneQuery {
            raw_input,
            verbose: request.query_param("verbose").is_some_and(|v| v == "1"),
        };

        match self.lookup(&query.raw_input) {
            PhoneLookup::Invalid => ApiResponse::json(
                StatusCode::OK,
                &InvalidPhonePayload {
                    valid: false,
                    iana_timezone: None,
                    country: None,
                    note: INVALID_PHONE,
                },
            ),
            PhoneLookup::Valid(found) => {
                let meta = query.verbose.then(|| LookupMeta {
                    e164: &found.e164,
                    country_name: found.country_name.as_deref(),
                    possible_timezones: &found.candidates,
                });
                let payload = ValidPhonePayload {
                    valid: true,
                    iana_timezone: &found.iana_timezone,
                    country: found.country.as_ref().map(|c| c.as_str()),
                    phone: &found.e164,
                    meta,
                };
                ApiResponse::json(StatusCode::OK, &payload)
            }
        }
    }
}

#[cfg(all(feature = "tzdb", feature = "phonenumber"))]
impl TimeZoneService<country_tz_provider::TzdbCountryProvider, crate::phone::LibPhoneNumberParser> {
    /// Creates a service backed by the tzdb country tables and the
    /// `phonenumber` crate.
    ///
    /// The bundled tables are used unless `tzdata_dir` names a directory
    /// holding `iso3166.tab` and `zone.tab`.
    pub fn try_from_tzdb(tzdata_dir: Option<&std::path::Path>) -> PhoneTzResult<Self> {
        use country_tz_provider::TzdbCountryProvider;

        let provider = match tzdata_dir {
            Some(dir) if !dir.is_dir() => {
                return Err(crate::PhoneTzError::general(alloc::format!(
                    "tzdata directory `{}` does not exist",
                    dir.display()
                )));
            }
            Some(dir) => TzdbCountryProvider::try_from_directory(dir)?,
            None => TzdbCountryProvider::try_new()?,
        };
        log::info!(
            "loaded {} countries and {} time zones",
            provider.country_count(),
            provider.zone_count()
        );
        Ok(Self::new(provider, crate::phone::LibPhoneNumberParser))
    }
}

/// Reads the phone number from the query string for `GET` and from the JSON
/// body for `POST`.
///
/// A body that is not JSON, or whose `phone` is not a string, has no phone.
fn phone_from_request(request: &ApiRequest<'_>) -> Option<String> {
    let phone = match request.method {
        Method::GET => request.query_param("phone").map(Cow::into_owned),
        Method::POST => serde_json::from_slice::<serde_json::Value>(request.body)
            .ok()?
            .get("phone")?
            .as_str()
            .map(String::from),
        _ => None,
    };
    phone.filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};

    use super::{phone_from_request, ApiRequest, ApiResponse};

    #[test]
    fn phone_from_query() {
        let request = ApiRequest::get("/api/timezone", Some("verbose=1&phone=%2B44%2020"));
        assert_eq!(phone_from_request(&request).as_deref(), Some("+44 20"));

        let request = ApiRequest::get("/api/timezone", Some("phone=1&phone=2"));
        assert_eq!(phone_from_request(&request).as_deref(), Some("1"));

        let request = ApiRequest::get("/api/timezone", Some("phone="));
        assert_eq!(phone_from_request(&request), None);

        let request = ApiRequest::get("/api/timezone", None);
        assert_eq!(phone_from_request(&request), None);
    }

    #[test]
    fn phone_from_body() {
        let request = ApiRequest::post("/api/timezone", None, br#"{"phone":"12125551234"}"#);
        assert_eq!(phone_from_request(&request).as_deref(), Some("12125551234"));

        // POST ignores the query string's phone.
        let request = ApiRequest::post("/api/timezone", Some("phone=1"), b"{}");
        assert_eq!(phone_from_request(&request), None);

        let request = ApiRequest::post("/api/timezone", None, b"{\"phone\":");
        assert_eq!(phone_from_request(&request), None);

        let request = ApiRequest::post("/api/timezone", None, br#"{"phone":12125551234}"#);
        assert_eq!(phone_from_request(&request), None);

        let request = ApiRequest::post("/api/timezone", None, br#"["12125551234"]"#);
        assert_eq!(phone_from_request(&request), None);
    }

    #[test]
    fn other_methods_have_no_phone() {
        let request = ApiRequest {
            method: Method::PUT,
            path: "/api/timezone",
            query: Some("phone=12125551234"),
            body: br#"{"phone":"12125551234"}"#,
        };
        assert_eq!(phone_from_request(&request), None);
    }

    #[test]
    fn internal_error_body() {
        let response = ApiResponse::internal_error();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        let value: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "Internal error" }));
        assert_eq!(response.headers().count(), 5);
    }
}
