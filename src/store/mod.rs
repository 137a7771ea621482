//! Store Module
//!
//! The storage capability the network layer dispatches to.
//!
//! ## Contract
//! - `get` returns `Ok(None)` when the key is absent
//! - `set` overwrites any existing value
//! - Implementations must be safe to call from many connection threads at
//!   once; the network layer adds no locking of its own

mod memory;

pub use memory::MemStore;

use bytes::Bytes;

use crate::context::Context;
use crate::error::Result;

/// Key-value storage capability
pub trait Store: Send + Sync {
    /// Look up a key. `Ok(None)` means not found.
    fn get(&self, ctx: &Context, key: &[u8]) -> Result<Option<Bytes>>;

    /// Insert or overwrite a key
    fn set(&self, ctx: &Context, key: Bytes, value: Bytes) -> Result<()>;
}
