//! Transport over TCP, one connection per worker.
//!
//! The coordinator accepts exactly `workers` connections and hands out
//! ranks in accept order with an [`Packet::Assign`] handshake. Writes are
//! buffered; everything pending is flushed before the endpoint waits for a
//! reply, and control packets are flushed immediately.

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::info;
use tokio::io::{AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

use super::frame::{read_packet, write_packet};
use super::{check_link, Packet, Transport};
use crate::{Error, Result, WorkerId, COORDINATOR};

#[derive(Debug)]
struct Peer {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    dirty: bool,
}

impl Peer {
    fn new(stream: TcpStream) -> Result<Self> {
        stream.set_nodelay(true)?;
        let (read, write) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read),
            writer: BufWriter::new(write),
            dirty: false,
        })
    }

    async fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.writer.flush().await?;
            self.dirty = false;
        }
        Ok(())
    }
}

/// One participant of a TCP cluster.
#[derive(Debug)]
pub struct TcpEndpoint {
    rank: WorkerId,
    size: u32,
    peers: BTreeMap<WorkerId, Peer>,
}

impl TcpEndpoint {
    /// Coordinator side: waits until `workers` workers have connected.
    pub async fn accept(listener: &TcpListener, workers: u32) -> Result<Self> {
        if workers == 0 {
            return Err(Error::NoWorkers);
        }
        let size = workers + 1;
        let mut peers = BTreeMap::new();
        for rank in 1..=workers {
            let (stream, addr) = listener.accept().await?;
            let mut peer = Peer::new(stream)?;
            write_packet(&mut peer.writer, &Packet::Assign { rank, size }).await?;
            peer.writer.flush().await?;
            info!("worker {} joined from {}", rank, addr);
            peers.insert(rank, peer);
        }
        Ok(Self {
            rank: COORDINATOR,
            size,
            peers,
        })
    }

    /// Worker side: connects and learns its rank from the coordinator.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let mut peer = Peer::new(stream)?;
        let (rank, size) = match read_packet(&mut peer.reader).await? {
            Packet::Assign { rank, size } => (rank, size),
            other => {
                return Err(Error::UnexpectedPacket {
                    peer: COORDINATOR,
                    expected: "assign",
                    actual: other.kind(),
                })
            }
        };
        info!("joined cluster as worker {} of {}", rank, size - 1);
        Ok(Self {
            rank,
            size,
            peers: BTreeMap::from([(COORDINATOR, peer)]),
        })
    }

    fn peer(&mut self, id: WorkerId) -> Result<&mut Peer> {
        check_link(self.rank, self.size, id)?;
        let rank = self.rank;
        self.peers
            .get_mut(&id)
            .ok_or(Error::UnknownPeer { rank, peer: id })
    }
}

#[async_trait]
impl Transport for TcpEndpoint {
    fn rank(&self) -> WorkerId {
        self.rank
    }

    fn size(&self) -> u32 {
        self.size
    }

    async fn send_packet(&mut self, to: WorkerId, packet: Packet) -> Result<()> {
        let peer = self.peer(to)?;
        write_packet(&mut peer.writer, &packet).await?;
        peer.dirty = true;
        if !matches!(packet, Packet::Data(_)) {
            peer.flush().await?;
        }
        Ok(())
    }

    async fn recv_packet(&mut self, from: WorkerId) -> Result<Packet> {
        for peer in self.peers.values_mut() {
            peer.flush().await?;
        }
        let peer = self.peer(from)?;
        read_packet(&mut peer.reader).await.map_err(|err| match err {
            Error::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                Error::ChannelClosed { peer: from }
            }
            err => err,
        })
    }
}
