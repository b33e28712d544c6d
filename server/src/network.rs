//! Server network layer answering match queries over UDP

use crate::log_source::{find_match_from, list_matches_from, LineSource};
use bincode::{deserialize, serialize};
use log::{debug, error, info, warn};
use shared::{Packet, MAX_DATAGRAM_SIZE};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;

/// Messages sent from network tasks to main server loop
#[derive(Debug)]
pub enum ServerMessage {
    PacketReceived { packet: Packet, addr: SocketAddr },
    Shutdown,
}

/// Messages sent from query workers to the network sender
#[derive(Debug)]
pub enum ReplyMessage {
    SendPacket { packet: Packet, addr: SocketAddr },
}

/// Query server reading matches from a shared line source
pub struct Server {
    socket: Arc<UdpSocket>,
    source: Arc<dyn LineSource>,

    // Communication channels
    server_tx: mpsc::UnboundedSender<ServerMessage>,
    server_rx: mpsc::UnboundedReceiver<ServerMessage>,
    reply_tx: mpsc::UnboundedSender<ReplyMessage>,
    reply_rx: mpsc::UnboundedReceiver<ReplyMessage>,
}

impl Server {
    pub async fn new(
        addr: &str,
        source: Arc<dyn LineSource>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let socket = Arc::new(UdpSocket::bind(addr).await?);
        info!("Server listening on {}", socket.local_addr()?);

        let (server_tx, server_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();

        Ok(Server {
            socket,
            source,
            server_tx,
            server_rx,
            reply_tx,
            reply_rx,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Handle for stopping `run` from another task
    pub fn shutdown_handle(&self) -> mpsc::UnboundedSender<ServerMessage> {
        self.server_tx.clone()
    }

    /// Spawns task that continuously listens for incoming packets
    fn spawn_network_receiver(&self) {
        let socket = Arc::clone(&self.socket);
        let server_tx = self.server_tx.clone();

        tokio::spawn(async move {
            let mut buffer = vec![0u8; MAX_DATAGRAM_SIZE];

            loop {
                match socket.recv_from(&mut buffer).await {
                    Ok((len, addr)) => {
                        if let Ok(packet) = deserialize::<Packet>(&buffer[0..len]) {
                            if let Err(e) =
                                server_tx.send(ServerMessage::PacketReceived { packet, addr })
                            {
                                error!("Failed to send packet to main loop: {}", e);
                                break;
                            }
                        } else {
                            warn!("Failed to deserialize packet from {}", addr);
                        }
                    }
                    Err(e) => {
                        error!("Error receiving packet: {}", e);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                }
            }
        });
    }

    /// Spawns task that processes outgoing packet queue
    fn spawn_network_sender(&mut self) {
        let socket = Arc::clone(&self.socket);
        let mut reply_rx = std::mem::replace(&mut self.reply_rx, mpsc::unbounded_channel().1);

        tokio::spawn(async move {
            while let Some(message) = reply_rx.recv().await {
                match message {
                    ReplyMessage::SendPacket { packet, addr } => {
                        if let Err(e) = Self::send_packet_impl(&socket, &packet, addr).await {
                            error!("Failed to send packet to {}: {}", addr, e);
                        }
                    }
                }
            }
        });
    }

    async fn send_packet_impl(
        socket: &UdpSocket,
        packet: &Packet,
        addr: SocketAddr,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let data = encode_reply(packet)?;
        socket.send_to(&data, addr).await?;
        Ok(())
    }

    /// Answers a query on a blocking worker so slow reads don't stall the loop
    fn handle_packet(&self, packet: Packet, addr: SocketAddr) {
        if !packet.is_request() {
            warn!("Unexpected packet type from client at {}", addr);
            return;
        }

        debug!("Query {:?} from {}", packet, addr);
        let source = Arc::clone(&self.source);
        let reply_tx = self.reply_tx.clone();

        tokio::task::spawn_blocking(move || {
            if let Some(reply) = answer_query(source.as_ref(), &packet) {
                if let Err(e) = reply_tx.send(ReplyMessage::SendPacket {
                    packet: reply,
                    addr,
                }) {
                    error!("Failed to queue reply for {}: {}", addr, e);
                }
            }
        });
    }

    /// Main server loop dispatching queries until shutdown
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.spawn_network_receiver();
        self.spawn_network_sender();

        info!("Server started successfully");

        while let Some(message) = self.server_rx.recv().await {
            match message {
                ServerMessage::PacketReceived { packet, addr } => {
                    self.handle_packet(packet, addr);
                }
                ServerMessage::Shutdown => break,
            }
        }

        info!("Server shutting down");
        Ok(())
    }
}

/// Builds the reply for a request packet; `None` for anything that isn't a request
pub fn answer_query(source: &dyn LineSource, packet: &Packet) -> Option<Packet> {
    match packet {
        Packet::ListMatches { request_id } => {
            let request_id = *request_id;
            Some(match list_matches_from(source) {
                Ok(matches) => Packet::MatchList {
                    request_id,
                    matches,
                },
                Err(e) => unavailable(request_id, &e),
            })
        }

        Packet::FindMatch { request_id, name } => {
            let request_id = *request_id;
            Some(match find_match_from(source, name) {
                Ok(Some(report)) => Packet::MatchFound { request_id, report },
                Ok(None) => Packet::MatchNotFound {
                    request_id,
                    name: name.clone(),
                },
                Err(e) => unavailable(request_id, &e),
            })
        }

        _ => None,
    }
}

fn unavailable(request_id: u32, err: &dyn std::error::Error) -> Packet {
    warn!("Request {} failed: {}", request_id, err);
    Packet::Unavailable {
        request_id,
        reason: err.to_string(),
    }
}

/// Serializes a reply, swapping in `Unavailable` if it can't fit in one datagram
pub fn encode_reply(packet: &Packet) -> Result<Vec<u8>, bincode::Error> {
    let data = serialize(packet)?;
    if data.len() <= MAX_DATAGRAM_SIZE {
        return Ok(data);
    }

    warn!(
        "Reply to request {} is {} bytes, over the {} byte limit",
        packet.request_id(),
        data.len(),
        MAX_DATAGRAM_SIZE
    );
    serialize(&Packet::Unavailable {
        request_id: packet.request_id(),
        reason: format!("response too large ({} bytes)", data.len()),
    })
}
