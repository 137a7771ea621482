//! Connection
//!
//! One TCP stream with buffered reader/writer halves and a cancellable
//! lifetime. Owned by exactly one thread at a time.

use std::io::{BufReader, BufWriter, Write};
use std::net::TcpStream;

use bytes::Bytes;

use crate::config::Config;
use crate::context::Context;
use crate::error::Result;
use crate::protocol::{self, Operation, OpType, ResultTag};

/// A single client or server side connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Governs when the owning loop should stop
    ctx: Context,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Wrap a stream
    pub fn new(stream: TcpStream, ctx: Context) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            ctx,
            peer_addr,
        })
    }

    /// Apply socket options from config: TCP_NODELAY and timeouts
    pub fn configure(&mut self, config: &Config) -> Result<()> {
        let stream = self.reader.get_ref();
        stream.set_nodelay(config.nodelay)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;
        Ok(())
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    // =========================================================================
    // Byte and frame primitives
    // =========================================================================

    pub fn read_byte(&mut self) -> Result<u8> {
        protocol::read_byte(&mut self.reader)
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        protocol::write_byte(&mut self.writer, byte)
    }

    pub fn read_frame(&mut self) -> Result<Bytes> {
        protocol::read_frame(&mut self.reader)
    }

    pub fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        protocol::write_frame(&mut self.writer, bytes)
    }

    // =========================================================================
    // Operation primitives
    // =========================================================================

    /// Block until one full operation is decoded
    pub fn read_op(&mut self) -> Result<Operation> {
        protocol::read_op(&mut self.reader)
    }

    /// Buffer an operation for sending; call [`flush`](Self::flush) after
    pub fn write_op(&mut self, op: &Operation) -> Result<()> {
        protocol::write_op(&mut self.writer, op)
    }

    pub fn write_op_tag(&mut self, tag: OpType) -> Result<()> {
        protocol::write_op_tag(&mut self.writer, tag)
    }

    pub fn read_result_tag(&mut self) -> Result<ResultTag> {
        protocol::read_result_tag(&mut self.reader)
    }

    pub fn write_result_tag(&mut self, tag: ResultTag) -> Result<()> {
        protocol::write_result_tag(&mut self.writer, tag)
    }

    /// Push buffered writes to the socket
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
