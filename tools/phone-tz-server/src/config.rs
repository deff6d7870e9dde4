use std::{net::IpAddr, path::PathBuf};

use clap::Parser;
use log::LevelFilter;

/// Serves best-guess IANA time zones for phone numbers over HTTP.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Config {
    /// Address to bind to.
    #[arg(long, env = "PHONE_TZ_HOST", default_value = "0.0.0.0")]
    pub(crate) host: IpAddr,

    /// Port to listen on.
    #[arg(long, short, env = "PHONE_TZ_PORT", default_value_t = 8787)]
    pub(crate) port: u16,

    /// Directory holding `iso3166.tab` and `zone.tab`, replacing the
    /// bundled tables.
    #[arg(long, env = "PHONE_TZ_TZDATA_DIR")]
    pub(crate) tzdata_dir: Option<PathBuf>,

    /// Log level. `RUST_LOG` takes precedence when set.
    #[arg(long, env = "PHONE_TZ_LOG", default_value = "info")]
    pub(crate) log_level: LevelFilter,
}
