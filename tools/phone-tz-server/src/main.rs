//! HTTP front end for `phone_tz`.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

mod config;
mod server;

use std::{net::SocketAddr, sync::Arc};

use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use log::info;
use phone_tz::TimeZoneService;
use simple_logger::SimpleLogger;
use tokio::net::TcpListener;

use self::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::parse();

    SimpleLogger::new()
        .with_level(config.log_level)
        .env()
        .init()?;

    let service = TimeZoneService::try_from_tzdb(config.tzdata_dir.as_deref())
        .wrap_err("failed to load country time zone data")?;

    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    tokio::select! {
        result = server::run(listener, Arc::new(service)) => result,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("shutting down");
            Ok(())
        }
    }
}
