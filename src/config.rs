use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub host: IpAddr,
  pub server_port: u16,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
      server_port: DEFAULT_PORT,
    }
  }
}

impl Config {
  pub fn from_env() -> Self {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Builds a config from any key lookup. Unset keys and unparseable values keep their defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let defaults = Self::default();
    Self {
      host: parse_or("PILGRIM_HOST", lookup("PILGRIM_HOST"), defaults.host),
      server_port: parse_or("SERVER_PORT", lookup("SERVER_PORT"), defaults.server_port),
    }
  }
}

fn parse_or<T: FromStr + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
  match raw {
    None => default,
    Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
      warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
      default
    }),
  }
}
