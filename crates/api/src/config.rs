//! Environment-driven server configuration.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;

use billsplit_session::SessionConfig;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub port: u16,
    pub session: SessionConfig,
}

impl ApiConfig {
    /// Read `PORT` and `BILLSPLIT_MAX_PARTICIPANTS` from the process env.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => {
                tracing::warn!("PORT not set; defaulting to {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let max_participants = lookup("BILLSPLIT_MAX_PARTICIPANTS")
            .map(|raw| {
                raw.trim().parse::<usize>().with_context(|| {
                    format!("BILLSPLIT_MAX_PARTICIPANTS must be a count, got {raw:?}")
                })
            })
            .transpose()?;

        Ok(Self {
            port,
            session: SessionConfig { max_participants },
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
