//! Configuration for FrameKV
//!
//! Centralized configuration with sensible defaults.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use crate::error::{KvError, Result};

/// Main configuration for a FrameKV server or client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address (server) or default dial address (client)
    pub listen_addr: String,

    /// Disable Nagle's algorithm on every connection
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Timeouts (0 disables)
    // -------------------------------------------------------------------------
    /// Connection read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8999".to_string(),
            nodelay: true,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Resolve `listen_addr` to a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .to_socket_addrs()
            .map_err(|e| KvError::Config(format!("invalid address {}: {}", self.listen_addr, e)))?
            .next()
            .ok_or_else(|| {
                KvError::Config(format!("address {} did not resolve", self.listen_addr))
            })
    }

    pub(crate) fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    pub(crate) fn write_timeout(&self) -> Option<Duration> {
        (self.write_timeout_ms > 0).then(|| Duration::from_millis(self.write_timeout_ms))
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
