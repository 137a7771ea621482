//! In-memory store
//!
//! HashMap wrapped in a single RwLock.

use std::collections::HashMap;

use bytes::Bytes;
use parking_lot::RwLock;

use super::Store;
use crate::context::Context;
use crate::error::Result;

/// In-memory key-value store
///
/// Many concurrent readers, one writer at a time.
#[derive(Debug, Default)]
pub struct MemStore {
    data: RwLock<HashMap<Bytes, Bytes>>,
}

impl MemStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get entry count
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Store for MemStore {
    fn get(&self, _ctx: &Context, key: &[u8]) -> Result<Option<Bytes>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, _ctx: &Context, key: Bytes, value: Bytes) -> Result<()> {
        self.data.write().insert(key, value);
        Ok(())
    }
}
