//! Process configuration.
//!
//! The only external input is the listening port: `PORT` from the
//! environment if set, else 3000.

use std::net::{Ipv4Addr, SocketAddr};

use crate::error::Error;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Resolved process configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// An empty `PORT` counts as unset. A `PORT` that is not a valid port
    /// number is an error rather than a silent fallback.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<u16>()
                .map_err(|e| Error::Config(format!("PORT `{raw}` is not a valid port: {e}")))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { port })
    }

    /// Address to bind: all interfaces on the configured port.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(port: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| (key == "PORT").then_some(port).flatten().map(str::to_owned)
    }

    #[test]
    fn defaults_to_3000() {
        let config = Config::from_lookup(env(None)).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn honours_port() {
        assert_eq!(Config::from_lookup(env(Some("5000"))).unwrap().port, 5000);
        assert_eq!(Config::from_lookup(env(Some(" 8080 "))).unwrap().port, 8080);
    }

    #[test]
    fn empty_port_counts_as_unset() {
        assert_eq!(Config::from_lookup(env(Some(""))).unwrap(), Config::default());
    }

    #[test]
    fn rejects_garbage_port() {
        assert!(matches!(Config::from_lookup(env(Some("http"))), Err(Error::Config(_))));
        assert!(matches!(Config::from_lookup(env(Some("70000"))), Err(Error::Config(_))));
    }
}
