//! Point-to-point message passing between the coordinator and its workers.
//!
//! The topology is a star: the coordinator (rank 0) has one link to every
//! worker and workers never talk to each other. On top of raw packet
//! exchange the [`Transport`] trait provides the three operations the
//! counting protocol needs: length-tagged byte buffers, a rooted scalar
//! broadcast and a barrier.

use async_trait::async_trait;
use bytes::Bytes;
use log::trace;

use crate::{Error, Result, WorkerId, COORDINATOR};

pub mod frame;
pub mod local;
pub mod tcp;

/// A message on a coordinator↔worker link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// Arbitrary bytes: a corpus line or an encoded table.
    Data(Bytes),
    /// A broadcast value.
    Scalar(u64),
    Barrier,
    /// Rank handshake sent by a TCP coordinator right after accepting.
    Assign { rank: WorkerId, size: u32 },
}

impl Packet {
    pub fn kind(&self) -> &'static str {
        match self {
            Packet::Data(_) => "data",
            Packet::Scalar(_) => "scalar",
            Packet::Barrier => "barrier",
            Packet::Assign { .. } => "assign",
        }
    }
}

/// One participant's view of the cluster.
///
/// Implementors only move packets; the collective operations are provided.
/// Links are FIFO, and every operation blocks until its peer answers. There
/// is no timeout: a peer that never answers blocks the caller forever.
#[async_trait]
pub trait Transport: Send {
    /// This participant's rank; `0` is the coordinator.
    fn rank(&self) -> WorkerId;

    /// Number of participants including the coordinator.
    fn size(&self) -> u32;

    async fn send_packet(&mut self, to: WorkerId, packet: Packet) -> Result<()>;

    async fn recv_packet(&mut self, from: WorkerId) -> Result<Packet>;

    /// Number of worker participants.
    fn workers(&self) -> u32 {
        self.size().saturating_sub(1)
    }

    fn is_coordinator(&self) -> bool {
        self.rank() == COORDINATOR
    }

    /// Sends a length-tagged byte buffer.
    async fn send(&mut self, to: WorkerId, payload: Bytes) -> Result<()> {
        trace!("{} -> {}: {} bytes", self.rank(), to, payload.len());
        self.send_packet(to, Packet::Data(payload)).await
    }

    /// Receives the next byte buffer from `from`.
    async fn recv(&mut self, from: WorkerId) -> Result<Bytes> {
        match self.recv_packet(from).await? {
            Packet::Data(payload) => Ok(payload),
            other => Err(unexpected(from, "data", &other)),
        }
    }

    /// Rooted broadcast from the coordinator.
    ///
    /// `value` is only read on the coordinator; every participant returns
    /// the coordinator's value.
    async fn broadcast(&mut self, value: u64) -> Result<u64> {
        if self.is_coordinator() {
            for worker in 1..=self.workers() {
                self.send_packet(worker, Packet::Scalar(value)).await?;
            }
            Ok(value)
        } else {
            match self.recv_packet(COORDINATOR).await? {
                Packet::Scalar(value) => Ok(value),
                other => Err(unexpected(COORDINATOR, "scalar", &other)),
            }
        }
    }

    /// Returns once every participant has entered the barrier.
    async fn barrier(&mut self) -> Result<()> {
        if self.is_coordinator() {
            for worker in 1..=self.workers() {
                match self.recv_packet(worker).await? {
                    Packet::Barrier => {}
                    other => return Err(unexpected(worker, "barrier", &other)),
                }
            }
            for worker in 1..=self.workers() {
                self.send_packet(worker, Packet::Barrier).await?;
            }
        } else {
            self.send_packet(COORDINATOR, Packet::Barrier).await?;
            match self.recv_packet(COORDINATOR).await? {
                Packet::Barrier => {}
                other => return Err(unexpected(COORDINATOR, "barrier", &other)),
            }
        }
        trace!("{} passed barrier", self.rank());
        Ok(())
    }
}

fn unexpected(peer: WorkerId, expected: &'static str, actual: &Packet) -> Error {
    Error::UnexpectedPacket {
        peer,
        expected,
        actual: actual.kind(),
    }
}

/// Checks that `peer` is a direct neighbour of `rank` in the star.
pub(crate) fn check_link(rank: WorkerId, size: u32, peer: WorkerId) -> Result<()> {
    let linked = if rank == COORDINATOR {
        peer != COORDINATOR && peer < size
    } else {
        peer == COORDINATOR
    };
    if linked {
        Ok(())
    } else {
        Err(Error::UnknownPeer { rank, peer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_links() {
        assert!(check_link(0, 3, 1).is_ok());
        assert!(check_link(0, 3, 2).is_ok());
        assert!(check_link(0, 3, 3).is_err());
        assert!(check_link(0, 3, 0).is_err());
        assert!(check_link(2, 3, 0).is_ok());
        assert!(check_link(2, 3, 1).is_err());
    }
}
