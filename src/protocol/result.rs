//! Result markers
//!
//! The single byte that opens every response.

use crate::error::KvError;

/// Response result tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResultTag {
    Success = 0x01,
    Error = 0x02,
}

impl TryFrom<u8> for ResultTag {
    type Error = KvError;

    fn try_from(byte: u8) -> Result<Self, KvError> {
        match byte {
            0x01 => Ok(ResultTag::Success),
            0x02 => Ok(ResultTag::Error),
            _ => Err(KvError::UnknownResultTag(byte)),
        }
    }
}
