//! Datagram transport
//!
//! One `send` per transmission unit, fire-and-forget. Failures are returned
//! to the caller; nothing here retries.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use crate::config::LinkConfig;
use crate::error::{LinkError, Result};

/// Outbound datagram channel
pub trait Transport {
    /// Send one payload as a single datagram, returning the bytes sent
    fn send(&mut self, payload: &[u8]) -> Result<usize>;
}

/// UDP transport bound to an ephemeral local port
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    dest: SocketAddr,
}

impl UdpTransport {
    /// Resolve the destination and open a local socket
    pub fn connect(config: &LinkConfig) -> Result<Self> {
        config.validate()?;
        let target = config.destination();

        let dest = target
            .to_socket_addrs()
            .map_err(|source| LinkError::ResourceUnavailable {
                what: format!("resolve {}", target),
                source,
            })?
            .next()
            .ok_or_else(|| LinkError::ResourceUnavailable {
                what: format!("resolve {}", target),
                source: std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    "no addresses found",
                ),
            })?;

        let local: SocketAddr = if dest.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).map_err(|source| LinkError::ResourceUnavailable {
            what: format!("bind {}", local),
            source,
        })?;

        tracing::debug!(%dest, local = ?socket.local_addr().ok(), "udp transport ready");
        Ok(Self { socket, dest })
    }

    pub fn destination(&self) -> SocketAddr {
        self.dest
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, payload: &[u8]) -> Result<usize> {
        let sent = self
            .socket
            .send_to(payload, self.dest)
            .map_err(|source| LinkError::TransmissionFailure {
                dest: self.dest.to_string(),
                source,
            })?;

        if sent != payload.len() {
            return Err(LinkError::ShortWrite {
                dest: self.dest.to_string(),
                sent,
                expected: payload.len(),
            });
        }
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn receiver() -> (UdpSocket, LinkConfig) {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let port = socket.local_addr().unwrap().port();
        (socket, LinkConfig::new("127.0.0.1", port).unwrap())
    }

    #[test]
    fn test_send_loopback() {
        let (rx, config) = receiver();
        let mut tx = UdpTransport::connect(&config).unwrap();

        assert_eq!(tx.send(b"hello").unwrap(), 5);

        let mut buf = [0u8; 64];
        let (n, _) = rx.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hello");
    }

    #[test]
    fn test_unresolvable_host() {
        let config = LinkConfig::new("host.invalid.", 9090).unwrap();
        assert!(matches!(
            UdpTransport::connect(&config),
            Err(LinkError::ResourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_oversized_datagram_is_transmission_failure() {
        let (_rx, config) = receiver();
        let mut tx = UdpTransport::connect(&config).unwrap();

        let err = tx.send(&vec![0u8; 70_000]).unwrap_err();
        assert!(err.is_transmission_failure(), "{}", err);
    }
}
