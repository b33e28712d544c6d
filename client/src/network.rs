use bincode::{deserialize, serialize};
use log::{debug, warn};
use shared::{MatchReport, Packet, MAX_DATAGRAM_SIZE};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{timeout_at, Instant};

/// Sends match queries to a server and waits for the matching reply
pub struct QueryClient {
    socket: UdpSocket,
    server_addr: SocketAddr,
    timeout: Duration,
    next_request_id: u32,
}

impl QueryClient {
    pub async fn new(
        server_addr: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        let server_addr = server_addr.parse()?;

        Ok(QueryClient {
            socket,
            server_addr,
            timeout,
            next_request_id: 1,
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    /// All matches in the server's log, in log order
    pub async fn list_matches(&mut self) -> Result<Vec<MatchReport>, Box<dyn std::error::Error>> {
        match self
            .request(|request_id| Packet::ListMatches { request_id })
            .await?
        {
            Packet::MatchList { matches, .. } => Ok(matches),
            Packet::Unavailable { reason, .. } => {
                Err(format!("Server unavailable: {}", reason).into())
            }
            other => Err(format!("Unexpected reply: {:?}", other).into()),
        }
    }

    /// One match by name; `Ok(None)` when the server has no such match
    pub async fn find_match(
        &mut self,
        name: &str,
    ) -> Result<Option<MatchReport>, Box<dyn std::error::Error>> {
        let reply = self
            .request(|request_id| Packet::FindMatch {
                request_id,
                name: name.to_string(),
            })
            .await?;

        match reply {
            Packet::MatchFound { report, .. } => Ok(Some(report)),
            Packet::MatchNotFound { .. } => Ok(None),
            Packet::Unavailable { reason, .. } => {
                Err(format!("Server unavailable: {}", reason).into())
            }
            other => Err(format!("Unexpected reply: {:?}", other).into()),
        }
    }

    async fn send_packet(&self, packet: &Packet) -> Result<(), Box<dyn std::error::Error>> {
        let data = serialize(packet)?;
        self.socket.send_to(&data, self.server_addr).await?;
        Ok(())
    }

    /// Sends one request and returns the first reply carrying its id
    async fn request(
        &mut self,
        build: impl FnOnce(u32) -> Packet,
    ) -> Result<Packet, Box<dyn std::error::Error>> {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);

        self.send_packet(&build(request_id)).await?;
        debug!("Sent request {} to {}", request_id, self.server_addr);

        let deadline = Instant::now() + self.timeout;
        let mut buffer = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            let (len, addr) = timeout_at(deadline, self.socket.recv_from(&mut buffer))
                .await
                .map_err(|_| {
                    format!(
                        "No reply from {} within {}ms",
                        self.server_addr,
                        self.timeout.as_millis()
                    )
                })??;

            match deserialize::<Packet>(&buffer[0..len]) {
                Ok(packet) if packet.request_id() == request_id && !packet.is_request() => {
                    return Ok(packet);
                }
                Ok(packet) => {
                    warn!(
                        "Ignoring stray packet for request {} from {}",
                        packet.request_id(),
                        addr
                    );
                }
                Err(e) => warn!("Failed to deserialize packet from {}: {}", addr, e),
            }
        }
    }
}
