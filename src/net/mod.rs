//! Multicast datagram source
//!
//! Socket creation and group membership live here; the capture loop sees
//! only the [`DatagramSource`] read interface.

use std::io;
use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket as StdUdpSocket};

use async_trait::async_trait;
use bytes::Bytes;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tracing::debug;

use crate::capture::DatagramSource;
use crate::error::SapListError;
use crate::protocol::sap::{SAP_MULTICAST_GROUP, SAP_PORT};

/// Maximum UDP datagram size we accept
const MAX_DATAGRAM_SIZE: usize = 2048;

/// Multicast listener configuration
#[derive(Debug, Clone)]
pub struct MulticastConfig {
    /// Multicast group to join (default: the well-known SAP group)
    pub group: Ipv4Addr,
    /// Port to bind (default: the well-known SAP port)
    pub port: u16,
    /// Local interface address to join on; `None` lets the OS pick
    pub interface: Option<Ipv4Addr>,
}

impl Default for MulticastConfig {
    fn default() -> Self {
        Self {
            group: SAP_MULTICAST_GROUP,
            port: SAP_PORT,
            interface: None,
        }
    }
}

/// Datagram source backed by a UDP socket joined to a multicast group
pub struct UdpSource {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpSource {
    /// Bind the SAP port and join the multicast group.
    ///
    /// The socket is created with `SO_REUSEADDR` so other SAP listeners on
    /// the host keep working.
    ///
    /// # Errors
    ///
    /// Returns [`SapListError::SocketSetup`] when the socket cannot be
    /// created, bound, or joined to the group.
    pub fn bind(config: &MulticastConfig) -> Result<Self, SapListError> {
        Self::bind_inner(config).map_err(|source| SapListError::SocketSetup {
            group: config.group,
            port: config.port,
            source,
        })
    }

    fn bind_inner(config: &MulticastConfig) -> io::Result<Self> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_reuse_address(true)?;
        socket.set_nonblocking(true)?;
        socket.bind(&SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, config.port).into())?;

        let local = config.interface.unwrap_or(Ipv4Addr::UNSPECIFIED);
        socket.join_multicast_v4(&config.group, &local)?;
        debug!(group = %config.group, port = config.port, interface = %local, "joined multicast group");

        let socket = UdpSocket::from_std(StdUdpSocket::from(socket))?;
        Ok(Self {
            socket,
            buf: vec![0; MAX_DATAGRAM_SIZE],
        })
    }

    /// Local address the socket is bound to
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the socket has no local address.
    pub fn local_addr(&self) -> io::Result<std::net::SocketAddr> {
        self.socket.local_addr()
    }
}

#[async_trait]
impl DatagramSource for UdpSource {
    async fn recv(&mut self) -> io::Result<Option<Bytes>> {
        let (len, _src) = self.socket.recv_from(&mut self.buf).await?;
        Ok(Some(Bytes::copy_from_slice(&self.buf[..len])))
    }
}
