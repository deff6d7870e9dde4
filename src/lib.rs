//! The `phone_tz` crate guesses the IANA time zone and the country of a
//! phone number.
//!
//! ```rust
//! use phone_tz::{ApiRequest, TimeZoneService};
//!
//! let service = TimeZoneService::try_from_tzdb(None).unwrap();
//!
//! let response = service.handle(&ApiRequest::get("/api/timezone", Some("phone=81312345678")));
//! let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
//! assert_eq!(body["iana_timezone"], "Asia/Tokyo");
//! assert_eq!(body["country"], "JP");
//! ```
//!
//! A lookup has three steps:
//!
//! 1. the number is parsed by a [`PhoneNumberParser`], which reports its
//!    validity, its country and its national number;
//! 2. the country's zones are resolved with a
//!    [`CountryTimeZoneProvider`][country_tz_provider::CountryTimeZoneProvider]
//!    into [`TimeZoneCandidate`]s;
//! 3. [`select_best`] picks one of them, using the area code of North
//!    American numbers when the country has more than one zone.
//!
//! Both collaborators are traits. The default features provide
//! [`LibPhoneNumberParser`] and the tzdb backed
//! [`TzdbCountryProvider`][country_tz_provider::TzdbCountryProvider].
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::missing_errors_doc
)]

extern crate alloc;

pub mod area_code;
pub mod error;
pub mod guess;
pub mod phone;
pub mod resolver;
pub mod service;

#[doc(inline)]
pub use error::{ErrorKind, PhoneTzError};

#[doc(inline)]
pub use guess::select_best;

#[doc(inline)]
pub use phone::{normalize_phone_input, ParsedPhone, PhoneNumberParser};

#[cfg(feature = "phonenumber")]
#[doc(inline)]
pub use phone::LibPhoneNumberParser;

#[doc(inline)]
pub use resolver::{resolve_country_time_zones, TimeZoneCandidate};

#[doc(inline)]
pub use service::{
    ApiRequest, ApiResponse, PhoneLookup, PhoneQuery, TimeZoneService, ValidLookup,
    RESPONSE_HEADERS,
};

pub use country_tz_provider::{CountryCode, CountryTimeZoneProvider};

/// The `phone_tz` result type
pub type PhoneTzResult<T> = Result<T, PhoneTzError>;
