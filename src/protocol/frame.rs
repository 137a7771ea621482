//! Frame codec
//!
//! A frame is one length byte followed by exactly that many payload bytes.

use std::io::{ErrorKind, Read, Write};

use bytes::Bytes;

use crate::error::{KvError, Result};

/// Largest payload a single frame can carry
pub const MAX_FRAME_LEN: usize = u8::MAX as usize;

/// Write one frame: length byte + raw bytes
///
/// Nothing is written when `bytes` is longer than [`MAX_FRAME_LEN`].
pub fn write_frame<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    let len = frame_len(bytes)?;
    writer.write_all(&[len])?;
    writer.write_all(bytes)?;
    Ok(())
}

/// Read one frame
///
/// Fails with `ShortRead` if the stream ends before the declared length.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Bytes> {
    let mut len = [0u8; 1];
    read_full(reader, &mut len)?;

    let mut payload = vec![0u8; len[0] as usize];
    read_full(reader, &mut payload)?;

    Ok(Bytes::from(payload))
}

/// Encode a single frame to bytes
pub fn encode_frame(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut message = Vec::with_capacity(1 + bytes.len());
    write_frame(&mut message, bytes)?;
    Ok(message)
}

/// Validate a payload length and return it as the wire length byte
pub(crate) fn frame_len(bytes: &[u8]) -> Result<u8> {
    u8::try_from(bytes.len()).map_err(|_| KvError::FrameTooLarge(bytes.len()))
}

/// Read a single tag byte
///
/// EOF surfaces as `Io(UnexpectedEof)` so callers can tell a clean close
/// from a truncated frame.
pub(crate) fn read_byte<R: Read>(reader: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

pub(crate) fn write_byte<W: Write>(writer: &mut W, byte: u8) -> Result<()> {
    writer.write_all(&[byte])?;
    Ok(())
}

fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(KvError::ShortRead {
                    expected: buf.len(),
                    got: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
