//! In-process transport over bounded tokio channels.
//!
//! Every worker gets one channel from the coordinator and one back. The
//! channels are bounded, so a fast sender waits for a slow receiver the
//! way it would on a socket.

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use tokio::sync::mpsc::{self, Receiver, Sender};

use super::{check_link, Packet, Transport};
use crate::{Error, Result, WorkerId, COORDINATOR};

/// Packets buffered per link direction before a sender waits.
pub const LINK_CAPACITY: usize = 1024;

/// One participant of an in-process cluster.
#[derive(Debug)]
pub struct LocalEndpoint {
    rank: WorkerId,
    size: u32,
    outbound: HashMap<WorkerId, Sender<Packet>>,
    inbound: HashMap<WorkerId, Receiver<Packet>>,
}

/// Builds a star of `workers` workers around one coordinator.
///
/// Returns the coordinator endpoint and the worker endpoints ordered by
/// rank (`1..=workers`).
pub fn cluster(workers: u32) -> Result<(LocalEndpoint, Vec<LocalEndpoint>)> {
    if workers == 0 {
        return Err(Error::NoWorkers);
    }
    let size = workers + 1;
    let mut coordinator = LocalEndpoint::new(COORDINATOR, size);
    let mut endpoints = Vec::with_capacity(workers as usize);

    for rank in 1..=workers {
        let (down_tx, down_rx) = mpsc::channel(LINK_CAPACITY);
        let (up_tx, up_rx) = mpsc::channel(LINK_CAPACITY);
        coordinator.outbound.insert(rank, down_tx);
        coordinator.inbound.insert(rank, up_rx);

        let mut worker = LocalEndpoint::new(rank, size);
        worker.outbound.insert(COORDINATOR, up_tx);
        worker.inbound.insert(COORDINATOR, down_rx);
        endpoints.push(worker);
    }

    debug!("local cluster with {} workers", workers);
    Ok((coordinator, endpoints))
}

impl LocalEndpoint {
    fn new(rank: WorkerId, size: u32) -> Self {
        Self {
            rank,
            size,
            outbound: HashMap::new(),
            inbound: HashMap::new(),
        }
    }
}

#[async_trait]
impl Transport for LocalEndpoint {
    fn rank(&self) -> WorkerId {
        self.rank
    }

    fn size(&self) -> u32 {
        self.size
    }

    async fn send_packet(&mut self, to: WorkerId, packet: Packet) -> Result<()> {
        check_link(self.rank, self.size, to)?;
        let link = self.outbound.get(&to).ok_or(Error::UnknownPeer {
            rank: self.rank,
            peer: to,
        })?;
        link.send(packet)
            .await
            .map_err(|_| Error::ChannelClosed { peer: to })
    }

    async fn recv_packet(&mut self, from: WorkerId) -> Result<Packet> {
        check_link(self.rank, self.size, from)?;
        let rank = self.rank;
        let link = self
            .inbound
            .get_mut(&from)
            .ok_or(Error::UnknownPeer { rank, peer: from })?;
        link.recv().await.ok_or(Error::ChannelClosed { peer: from })
    }
}
