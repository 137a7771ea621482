//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - One thread per connection
//! - Operations dispatched through a [`Handler`]

mod server;
mod connection;
mod handler;
mod client;

pub use server::{Server, ServerHandle};
pub use connection::Connection;
pub use handler::{Handler, StoreHandler};
pub use client::Client;
