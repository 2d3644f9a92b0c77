//! Wire framing for [`Packet`]s.
//!
//! ```text
//! Data    0x00 | len: u32 BE | payload
//! Scalar  0x01 | value: u64 BE
//! Barrier 0x02
//! Assign  0x03 | rank: u32 BE | size: u32 BE
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::Packet;
use crate::{Error, Result};

/// Largest `Data` payload accepted from the wire.
pub const MAX_FRAME_LEN: usize = 1 << 30;

const TAG_DATA: u8 = 0x00;
const TAG_SCALAR: u8 = 0x01;
const TAG_BARRIER: u8 = 0x02;
const TAG_ASSIGN: u8 = 0x03;

/// Serializes `packet` into a single frame.
pub fn encode_frame(packet: &Packet) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    match packet {
        Packet::Data(payload) => {
            if payload.len() > MAX_FRAME_LEN {
                return Err(Error::FrameTooLarge {
                    len: payload.len(),
                    max: MAX_FRAME_LEN,
                });
            }
            buf.reserve(5 + payload.len());
            buf.put_u8(TAG_DATA);
            buf.put_u32(payload.len() as u32);
            buf.put_slice(payload);
        }
        Packet::Scalar(value) => {
            buf.put_u8(TAG_SCALAR);
            buf.put_u64(*value);
        }
        Packet::Barrier => buf.put_u8(TAG_BARRIER),
        Packet::Assign { rank, size } => {
            buf.put_u8(TAG_ASSIGN);
            buf.put_u32(*rank);
            buf.put_u32(*size);
        }
    }
    Ok(buf.freeze())
}

pub async fn write_packet<W>(writer: &mut W, packet: &Packet) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&encode_frame(packet)?).await?;
    Ok(())
}

pub async fn read_packet<R>(reader: &mut R) -> Result<Packet>
where
    R: AsyncRead + Unpin,
{
    let packet = match reader.read_u8().await? {
        TAG_DATA => {
            let len = reader.read_u32().await? as usize;
            if len > MAX_FRAME_LEN {
                return Err(Error::FrameTooLarge {
                    len,
                    max: MAX_FRAME_LEN,
                });
            }
            let mut payload = vec![0; len];
            reader.read_exact(&mut payload).await?;
            Packet::Data(Bytes::from(payload))
        }
        TAG_SCALAR => Packet::Scalar(reader.read_u64().await?),
        TAG_BARRIER => Packet::Barrier,
        TAG_ASSIGN => {
            let rank = reader.read_u32().await?;
            let size = reader.read_u32().await?;
            Packet::Assign { rank, size }
        }
        tag => return Err(Error::UnknownTag(tag)),
    };
    Ok(packet)
}
