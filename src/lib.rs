//! # FrameKV
//!
//! A minimal networked key-value service with:
//! - A single-byte length-prefixed binary wire protocol
//! - One thread per client connection
//! - Cooperative, per-connection cancellation
//! - A pluggable storage capability (in-memory by default)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │            (accept loop, thread per connection)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Connection                                │
//! │      (BufReader/BufWriter, Context, read_op / flush)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Operation  │          │   Handler   │
//!   │    Codec    │          │ (GET / SET) │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Frame    │          │    Store    │
//!   │    Codec    │          │  (RwLock)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod context;

pub mod protocol;
pub mod store;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::Config;
pub use context::Context;
pub use network::{Client, Server, ServerHandle};
pub use store::{MemStore, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of FrameKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
