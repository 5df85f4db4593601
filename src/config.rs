use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

pub const DEFAULT_ENDPOINT: &str = "https://shrill-art-f2e6.zaabudarin.workers.dev/";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub data_dir: PathBuf,
    pub rtl_override: Option<bool>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            catalog_path: PathBuf::from(load_string("ROUTINE_STUDIO_CATALOG", "products.json")),
            endpoint: load_string("ROUTINE_STUDIO_ENDPOINT", DEFAULT_ENDPOINT),
            model: load_string("ROUTINE_STUDIO_MODEL", DEFAULT_MODEL),
            timeout_secs: try_load("ROUTINE_STUDIO_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            data_dir: var("ROUTINE_STUDIO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
            rtl_override: var("ROUTINE_STUDIO_RTL")
                .ok()
                .and_then(|raw| parse_flag("ROUTINE_STUDIO_RTL", &raw)),
        }
    }
}

fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_data_dir() -> PathBuf {
    home_dir().join(".routine-studio")
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("{key} not set, using default");
    })
}

fn load_string(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|_| default.to_string())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or_default(key, var(key).ok().as_deref(), default)
}

fn parse_or_default<T>(key: &str, raw: Option<&str>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(err) => {
            warn!("Invalid {key} value: {err}, using default: {default}");
            default
        }
    }
}

fn parse_flag(key: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            warn!("Invalid {key} value: {other}, ignoring");
            None
        }
    }
}
