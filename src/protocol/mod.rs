//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (Single-Byte Length Frames)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬──────────┐
//! │  Op (1)  │ KLen (1) │   Key    │ VLen (1) │  Value   │
//! └──────────┴──────────┴──────────┴──────────┴──────────┘
//!                                   └─── SET only ──────┘
//! ```
//!
//! ### Operation Tags
//! - 0x01: GET   - one frame: key
//! - 0x02: SET   - two frames: key, value
//! - 0x03: DEL   - reserved, rejected on decode
//!
//! ### Response Format
//! ```text
//! ┌───────────┬──────────┬──────────┐
//! │Result (1) │ VLen (1) │  Value   │
//! └───────────┴──────────┴──────────┘
//!             └ SUCCESS for GET only ┘
//! ```
//!
//! ### Result Tags
//! - 0x01: SUCCESS
//! - 0x02: ERROR (no payload)
//!
//! Every length field is a single unsigned byte, so no field can exceed
//! 255 bytes.

mod frame;
mod operation;
mod result;
mod codec;

pub use frame::{encode_frame, read_frame, write_frame, MAX_FRAME_LEN};
pub use operation::{OpType, Operation};
pub use result::ResultTag;
pub use codec::{
    encode_operation, read_op, read_op_tag, read_result_tag, write_op, write_op_tag,
    write_result_tag,
};

pub(crate) use frame::{read_byte, write_byte};
