//! Operation definitions
//!
//! Represents requests from clients.

use bytes::Bytes;

use crate::error::KvError;

/// Operation tags as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpType {
    Get = 0x01,
    Set = 0x02,
    /// Reserved. Has no encoding and is rejected by the decoder.
    Delete = 0x03,
}

impl TryFrom<u8> for OpType {
    type Error = KvError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(OpType::Get),
            0x02 => Ok(OpType::Set),
            0x03 => Ok(OpType::Delete),
            _ => Err(KvError::UnknownOpTag(byte)),
        }
    }
}

/// A decoded operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Get a value by key
    Get { key: Bytes },

    /// Set a key-value pair
    Set { key: Bytes, value: Bytes },
}

impl Operation {
    pub fn get(key: impl Into<Bytes>) -> Self {
        Operation::Get { key: key.into() }
    }

    pub fn set(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Operation::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get the operation type
    pub fn op_type(&self) -> OpType {
        match self {
            Operation::Get { .. } => OpType::Get,
            Operation::Set { .. } => OpType::Set,
        }
    }

    pub fn key(&self) -> &Bytes {
        match self {
            Operation::Get { key } | Operation::Set { key, .. } => key,
        }
    }
}
