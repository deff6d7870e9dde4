//! Data providers for country and time zone data
//!
//! This crate provides the [`CountryTimeZoneProvider`] trait, which maps an
//! ISO 3166 country code to the IANA time zones used in that country and
//! reports the offsets of a named zone.
//!
//! With the default `tzdb` feature, [`TzdbCountryProvider`] implements it
//! with the tzdb country tables compiled into the crate and the TZif data
//! bundled by `jiff-tzdb`.

use core::fmt;

pub mod provider;

#[cfg(feature = "tzdb")]
pub mod tzif;

#[cfg(feature = "tzdb")]
mod tzdb;

#[doc(inline)]
pub use provider::{CountryRecord, CountryTimeZoneProvider, NeverProvider, TimeZoneRecord};

#[cfg(feature = "tzdb")]
pub use tzdb::TzdbCountryProvider;

#[doc(inline)]
pub use zonetab_rs::types::CountryCode;

/// Errors raised while building a provider.
#[derive(Debug)]
pub enum ProviderError {
    ZoneTab(zonetab_rs::ZoneTabError),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoneTab(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ZoneTab(e) => Some(e),
        }
    }
}

impl From<zonetab_rs::ZoneTabError> for ProviderError {
    fn from(value: zonetab_rs::ZoneTabError) -> Self {
        Self::ZoneTab(value)
    }
}
