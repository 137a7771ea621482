//! Operation codec
//!
//! Encoding and decoding of operations and result tags on top of the
//! frame codec.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! GET: [0x01][klen][key]
//! SET: [0x02][klen][key][vlen][value]
//! ```
//!
//! ### Response
//! ```text
//! [0x01]                  SET success
//! [0x01][vlen][value]     GET success
//! [0x02]                  any failure
//! ```

use std::io::{Read, Write};

use super::frame::{frame_len, read_byte, read_frame, write_byte, write_frame};
use super::{OpType, Operation, ResultTag};
use crate::error::{KvError, Result};

// =============================================================================
// Operation Encoding/Decoding
// =============================================================================

/// Write a single operation tag byte
pub fn write_op_tag<W: Write>(writer: &mut W, tag: OpType) -> Result<()> {
    write_byte(writer, tag as u8)
}

/// Read a single operation tag
///
/// Unknown bytes fail with `UnknownOpTag`. The reserved `Delete` tag is
/// returned as-is; `read_op` is where it gets rejected.
pub fn read_op_tag<R: Read>(reader: &mut R) -> Result<OpType> {
    OpType::try_from(read_byte(reader)?)
}

/// Read a complete operation from a stream
///
/// Blocks until the tag and every frame the tag requires are received.
pub fn read_op<R: Read>(reader: &mut R) -> Result<Operation> {
    match read_op_tag(reader)? {
        OpType::Get => {
            let key = read_frame(reader)?;
            Ok(Operation::Get { key })
        }
        OpType::Set => {
            let key = read_frame(reader)?;
            let value = read_frame(reader)?;
            Ok(Operation::Set { key, value })
        }
        // Reserved: no payload layout is defined, so the stream cannot be
        // resynchronised past it.
        OpType::Delete => Err(KvError::UnknownOpTag(OpType::Delete as u8)),
    }
}

/// Write a complete operation to a stream (not flushed)
///
/// Every field is size-checked before the first byte goes out, so a
/// rejected operation leaves the stream untouched.
pub fn write_op<W: Write>(writer: &mut W, op: &Operation) -> Result<()> {
    match op {
        Operation::Get { key } => {
            frame_len(key)?;
            write_op_tag(writer, OpType::Get)?;
            write_frame(writer, key)
        }
        Operation::Set { key, value } => {
            frame_len(key)?;
            frame_len(value)?;
            write_op_tag(writer, OpType::Set)?;
            write_frame(writer, key)?;
            write_frame(writer, value)
        }
    }
}

/// Encode an operation to bytes
pub fn encode_operation(op: &Operation) -> Result<Vec<u8>> {
    let mut message = Vec::with_capacity(3 + op.key().len());
    write_op(&mut message, op)?;
    Ok(message)
}

// =============================================================================
// Result Tags
// =============================================================================

/// Write a single result tag byte
pub fn write_result_tag<W: Write>(writer: &mut W, tag: ResultTag) -> Result<()> {
    write_byte(writer, tag as u8)
}

/// Read a single result tag
pub fn read_result_tag<R: Read>(reader: &mut R) -> Result<ResultTag> {
    ResultTag::try_from(read_byte(reader)?)
}
