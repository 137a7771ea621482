//! Operation handlers
//!
//! The server loop decodes operations and hands them to a [`Handler`]. The
//! handler owns the whole response: result tag, payload and flush.

use std::sync::Arc;

use bytes::Bytes;

use super::Connection;
use crate::context::Context;
use crate::error::{KvError, Result};
use crate::protocol::{ResultTag, MAX_FRAME_LEN};
use crate::store::Store;

/// Dispatch target for decoded operations
///
/// An `Err` return means the response could not be written; the server
/// closes the connection.
pub trait Handler: Send + Sync {
    fn handle_get(&self, ctx: &Context, conn: &mut Connection, key: Bytes) -> Result<()>;

    fn handle_set(&self, ctx: &Context, conn: &mut Connection, key: Bytes, value: Bytes)
        -> Result<()>;
}

/// Handler that serves operations from a [`Store`]
///
/// `Success` is written only when the store call succeeded; every failure,
/// not-found included, is logged and answered with `Error`.
pub struct StoreHandler<S> {
    store: Arc<S>,
}

impl<S: Store> StoreHandler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: Store> Handler for StoreHandler<S> {
    fn handle_get(&self, ctx: &Context, conn: &mut Connection, key: Bytes) -> Result<()> {
        match self.store.get(ctx, &key) {
            Ok(Some(value)) if value.len() <= MAX_FRAME_LEN => {
                conn.write_result_tag(ResultTag::Success)?;
                conn.write_frame(&value)?;
            }
            Ok(Some(value)) => {
                tracing::warn!(
                    "Value for {} cannot be sent to {}: {}",
                    String::from_utf8_lossy(&key),
                    conn.peer_addr(),
                    KvError::FrameTooLarge(value.len())
                );
                conn.write_result_tag(ResultTag::Error)?;
            }
            Ok(None) => {
                tracing::debug!("{} (from {})", KvError::KeyNotFound(key.to_vec()), conn.peer_addr());
                conn.write_result_tag(ResultTag::Error)?;
            }
            Err(e) => {
                tracing::error!("Error applying get for {}: {}", conn.peer_addr(), e);
                conn.write_result_tag(ResultTag::Error)?;
            }
        }
        conn.flush()
    }

    fn handle_set(
        &self,
        ctx: &Context,
        conn: &mut Connection,
        key: Bytes,
        value: Bytes,
    ) -> Result<()> {
        let tag = match self.store.set(ctx, key, value) {
            Ok(()) => ResultTag::Success,
            Err(e) => {
                tracing::error!("Error applying set for {}: {}", conn.peer_addr(), e);
                ResultTag::Error
            }
        };
        conn.write_result_tag(tag)?;
        conn.flush()
    }
}
