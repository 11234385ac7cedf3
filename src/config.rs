//! Process configuration loaded from environment variables.
//!
//! Every setting has a default so the planner starts with zero configuration.

use std::{env, net::SocketAddr, path::PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Env: `PORT`. Default: `3000`.
    pub port: u16,

    /// Directory holding one JSON file per domain.
    /// Env: `PLANNER_DATA_DIR`. Default: `data`.
    pub data_dir: PathBuf,

    /// Hourly pay rate applied to timed entries.
    /// Env: `PLANNER_HOURLY_RATE`. Default: `18`.
    pub hourly_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: PathBuf::from("data"),
            hourly_rate: 18.0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = parse_var("PORT").unwrap_or(defaults.port);
        let data_dir = env::var("PLANNER_DATA_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let hourly_rate = parse_var::<f64>("PLANNER_HOURLY_RATE")
            .filter(|rate| rate.is_finite() && *rate >= 0.0)
            .unwrap_or(defaults.hourly_rate);

        Self {
            port,
            data_dir,
            hourly_rate,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring invalid {name}={raw:?}, using default");
            None
        }
    }
}
