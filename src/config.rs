use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;

/// Command line configuration for the fixture server
#[derive(Debug, Clone, Parser)]
#[command(name = "old-page-fixture")]
#[command(about = "Serves an HTTP response that looks long cached", long_about = None)]
pub struct ServerConfig {
    /// IP address or host name to bind
    #[arg(long, env = "OLD_PAGE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "OLD_PAGE_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Seconds to wait for a client to send its request head
    #[arg(long, env = "OLD_PAGE_READ_TIMEOUT", default_value_t = 10)]
    pub read_timeout_secs: u64,
}

impl ServerConfig {
    /// Resolves `host` to the first matching socket address
    pub fn bind_address(&self) -> anyhow::Result<SocketAddr> {
        if let Ok(ip) = self.host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.port));
        }

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("failed to resolve host {:?}", self.host))?
            .next()
            .ok_or_else(|| anyhow!("host {:?} resolved to no addresses", self.host))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs.max(1))
    }
}
