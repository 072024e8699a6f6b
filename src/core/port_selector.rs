//! Port selection for the development server.
//!
//! Candidates are probed by binding and immediately releasing a listener; the
//! server rebinds the winning port afterwards. Another process can claim the
//! port between the probe and the real bind; that window is accepted for a
//! local development tool.

use crate::config::ServerConfig;
use crate::utils::error::{DevToolsError, Result};
use std::net::{IpAddr, SocketAddr, TcpListener};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortPlan {
    pub host: IpAddr,
    pub preferred: u16,
    pub fallbacks: Vec<u16>,
}

impl PortPlan {
    pub fn new(host: IpAddr, preferred: u16, fallbacks: Vec<u16>) -> Self {
        Self {
            host,
            preferred,
            fallbacks,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.host, config.port, config.fallback_ports.clone())
    }

    /// 偏好埠在前，備用埠依設定順序
    pub fn candidates(&self) -> impl Iterator<Item = u16> + '_ {
        std::iter::once(self.preferred).chain(self.fallbacks.iter().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSource {
    Preferred,
    /// index into `PortPlan::fallbacks`
    Fallback(usize),
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortProbe {
    pub port: u16,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSelection {
    pub port: u16,
    pub source: PortSource,
    pub rejected: Vec<PortProbe>,
}

impl PortSelection {
    pub fn used_fallback(&self) -> bool {
        self.source != PortSource::Preferred
    }
}

fn probe(host: IpAddr, port: u16) -> std::io::Result<u16> {
    let listener = TcpListener::bind(SocketAddr::new(host, port))?;
    let bound = listener.local_addr()?.port();
    drop(listener);
    Ok(bound)
}

pub fn select_port(plan: &PortPlan) -> Result<PortSelection> {
    let mut rejected = Vec::new();

    for (index, port) in plan.candidates().enumerate() {
        match probe(plan.host, port) {
            Ok(bound) => {
                let source = if index == 0 {
                    PortSource::Preferred
                } else {
                    PortSource::Fallback(index - 1)
                };
                tracing::debug!("Port {} is available ({:?})", bound, source);
                return Ok(PortSelection {
                    port: bound,
                    source,
                    rejected,
                });
            }
            Err(e) => {
                tracing::debug!("Port {} unavailable: {}", port, e);
                rejected.push(PortProbe {
                    port,
                    reason: e.to_string(),
                });
            }
        }
    }

    // 所有預設埠都被占用時，交給作業系統分配
    let port = probe(plan.host, 0).map_err(|e| DevToolsError::PortExhausted {
        message: format!(
            "all {} candidate ports are busy and the OS could not assign one: {}",
            rejected.len(),
            e
        ),
    })?;
    tracing::debug!("Using OS-assigned port {}", port);

    Ok(PortSelection {
        port,
        source: PortSource::Ephemeral,
        rejected,
    })
}
