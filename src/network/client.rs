//! TCP Client
//!
//! Blocking request/response client, one operation in flight at a time.

use std::net::{TcpStream, ToSocketAddrs};

use bytes::Bytes;

use super::Connection;
use crate::config::Config;
use crate::context::Context;
use crate::error::{KvError, Result};
use crate::protocol::{Operation, ResultTag};

/// Client for a FrameKV server
///
/// After a transport failure the stream may hold a half-written request or
/// an unread response, so the client refuses further calls with
/// `ConnectionBroken`. Reconnect to recover.
pub struct Client {
    conn: Connection,
    broken: bool,
}

impl Client {
    /// Connect with default socket options
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        Self::connect_with_config(addr, &Config::default())
    }

    /// Connect and apply socket options (TCP_NODELAY, timeouts) from config
    pub fn connect_with_config(addr: impl ToSocketAddrs, config: &Config) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let mut conn = Connection::new(stream, Context::background())?;
        conn.configure(config)?;

        tracing::debug!("Connected to {}", conn.peer_addr());
        Ok(Self {
            conn,
            broken: false,
        })
    }

    /// Fetch the value stored under `key`
    ///
    /// A missing key comes back as `RemoteOperation`.
    pub fn get(&mut self, key: &[u8]) -> Result<Bytes> {
        let op = Operation::get(Bytes::copy_from_slice(key));
        match self.send(&op)? {
            ResultTag::Success => {
                let value = self.conn.read_frame();
                self.track(value)
            }
            ResultTag::Error => Err(KvError::RemoteOperation),
        }
    }

    /// Store `value` under `key`
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let op = Operation::set(Bytes::copy_from_slice(key), Bytes::copy_from_slice(value));
        match self.send(&op)? {
            ResultTag::Success => Ok(()),
            ResultTag::Error => Err(KvError::RemoteOperation),
        }
    }

    /// Whether an earlier transport failure made this client unusable
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn peer_addr(&self) -> &str {
        self.conn.peer_addr()
    }

    /// Write an operation, flush, and read the result tag
    fn send(&mut self, op: &Operation) -> Result<ResultTag> {
        if self.broken {
            return Err(KvError::ConnectionBroken);
        }

        let result = exchange(&mut self.conn, op);
        self.track(result)
    }

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            if e.is_transport() {
                tracing::debug!("Transport failure talking to {}: {}", self.conn.peer_addr(), e);
                self.broken = true;
            }
        }
        result
    }
}

fn exchange(conn: &mut Connection, op: &Operation) -> Result<ResultTag> {
    conn.write_op(op)?;
    conn.flush()?;
    conn.read_result_tag()
}
