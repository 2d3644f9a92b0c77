//! Error types for wclite.
//!
//! Only structural failures live here. Bad records inside a shipped table
//! are filtered where they are found (see [`crate::codec::RecordError`]) and
//! never reach the coordinator as errors.

use thiserror::Error;

use crate::WorkerId;

/// Primary error type for all wclite operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Length filter with `max_len < min_len`.
    #[error("invalid length bounds: min_len {min} exceeds max_len {max}")]
    InvalidBounds { min: usize, max: usize },

    /// A run needs at least one worker besides the coordinator.
    #[error("at least one worker is required")]
    NoWorkers,

    /// A coordinator-only operation was run on a worker endpoint.
    #[error("participant {rank} is not the coordinator")]
    NotCoordinator { rank: WorkerId },

    /// The star topology only links the coordinator with each worker.
    #[error("participant {rank} has no link to {peer}")]
    UnknownPeer { rank: WorkerId, peer: WorkerId },

    /// The peer sent a packet that does not fit the protocol step.
    #[error("unexpected packet from {peer}: expected {expected}, got {actual}")]
    UnexpectedPacket {
        peer: WorkerId,
        expected: &'static str,
        actual: &'static str,
    },

    /// Unknown packet tag on the wire.
    #[error("unknown packet tag {0:#04x}")]
    UnknownTag(u8),

    #[error("frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },

    /// The other end of a link went away.
    #[error("link to {peer} closed")]
    ChannelClosed { peer: WorkerId },

    #[error("worker task failed: {0}")]
    WorkerPanicked(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Glob(#[from] glob::PatternError),
}

/// Result type alias for wclite operations.
pub type Result<T> = std::result::Result<T, Error>;
