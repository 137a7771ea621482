//! TCP Server
//!
//! Accepts connections and runs one thread per connection.
//!
//! ## Lifecycle
//! - `Server::bind` opens the listener (the only fatal failure point)
//! - `run` blocks in the accept loop until `shutdown` is called
//! - `spawn` runs the accept loop on a background thread and returns a
//!   [`ServerHandle`] whose `stop` tears everything down

use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::sync::WaitGroup;
use parking_lot::Mutex;

use super::{Connection, Handler, StoreHandler};
use crate::config::Config;
use crate::context::Context;
use crate::error::{KvError, Result};
use crate::protocol::Operation;
use crate::store::Store;

/// Pause after a failed accept (e.g. out of file descriptors)
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(10);

/// Read halves of live connections, used to wake idle threads on shutdown
type Registry = Arc<Mutex<HashMap<u64, TcpStream>>>;

/// TCP server for FrameKV
pub struct Server {
    config: Config,
    listener: TcpListener,
    local_addr: SocketAddr,
    handler: Arc<dyn Handler>,

    /// Root context; every connection context is derived from it
    ctx: Context,

    connections: Registry,
    active: Arc<AtomicUsize>,
    next_id: AtomicU64,
}

impl Server {
    /// Bind the listener
    pub fn bind(config: Config, handler: Arc<dyn Handler>) -> Result<Self> {
        let listener = TcpListener::bind(config.socket_addr()?)?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            config,
            listener,
            local_addr,
            handler,
            ctx: Context::background(),
            connections: Arc::new(Mutex::new(HashMap::new())),
            active: Arc::new(AtomicUsize::new(0)),
            next_id: AtomicU64::new(0),
        })
    }

    /// Bind a server that serves operations from `store`
    pub fn with_store<S: Store + 'static>(config: Config, store: Arc<S>) -> Result<Self> {
        Self::bind(config, Arc::new(StoreHandler::new(store)))
    }

    /// Address the listener is bound to (resolves ephemeral ports)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of connections currently being handled
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Run the accept loop (blocking)
    ///
    /// Returns after `shutdown` once every connection thread has exited.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr);

        let live = WaitGroup::new();

        while !self.ctx.is_cancelled() {
            match self.listener.accept() {
                // Either the wake-up dial from `shutdown` or a client that
                // raced it; neither gets served.
                Ok(_) if self.ctx.is_cancelled() => break,
                Ok((stream, peer)) => self.spawn_connection(stream, peer, live.clone()),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    tracing::warn!("Error accepting connection: {}", e);
                    thread::sleep(ACCEPT_ERROR_BACKOFF);
                }
            }
        }

        tracing::info!("Shutting down, closing {} connections", self.active_connections());
        self.close_connections();
        live.wait();

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Signal the server to shutdown gracefully
    ///
    /// Connections finish the operation they are dispatching, then exit.
    pub fn shutdown(&self) {
        self.ctx.cancel();
        wake_acceptor(self.local_addr);
    }

    /// Run the accept loop on a background thread
    pub fn spawn(self) -> Result<ServerHandle> {
        let local_addr = self.local_addr;
        let ctx = self.ctx.clone();
        let active = Arc::clone(&self.active);

        let thread = thread::Builder::new()
            .name("framekv-accept".to_string())
            .spawn(move || self.run())?;

        Ok(ServerHandle {
            local_addr,
            ctx,
            active,
            thread: Some(thread),
        })
    }

    fn spawn_connection(&self, stream: TcpStream, peer: SocketAddr, live: WaitGroup) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let ctx = self.ctx.child();

        let conn = match self.open_connection(id, stream, ctx.clone()) {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!("Failed to set up connection from {}: {}", peer, e);
                return;
            }
        };

        self.active.fetch_add(1, Ordering::AcqRel);
        let guard = ConnectionGuard {
            id,
            ctx,
            connections: Arc::clone(&self.connections),
            active: Arc::clone(&self.active),
            _live: live,
        };

        let handler = Arc::clone(&self.handler);
        let spawned = thread::Builder::new()
            .name(format!("framekv-conn-{}", id))
            .spawn(move || {
                let _guard = guard;
                handle_connection(conn, handler.as_ref());
            });

        if let Err(e) = spawned {
            tracing::warn!("Failed to spawn thread for {}: {}", peer, e);
        }
    }

    fn open_connection(&self, id: u64, stream: TcpStream, ctx: Context) -> Result<Connection> {
        let registered = stream.try_clone()?;
        let mut conn = Connection::new(stream, ctx)?;
        conn.configure(&self.config)?;

        self.connections.lock().insert(id, registered);
        Ok(conn)
    }

    fn close_connections(&self) {
        for stream in self.connections.lock().values() {
            // Wakes threads blocked waiting for the next operation
            let _ = stream.shutdown(Shutdown::Read);
        }
    }
}

/// Unblock a listener sitting in `accept` by dialing it once
fn wake_acceptor(local_addr: SocketAddr) {
    let mut addr = local_addr;
    if addr.ip().is_unspecified() {
        addr.set_ip(match addr.ip() {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
        });
    }
    if let Err(e) = TcpStream::connect(addr) {
        tracing::debug!("Wake-up dial to {} failed: {}", addr, e);
    }
}

/// Cleanup that runs on every exit path of a connection thread
struct ConnectionGuard {
    id: u64,
    ctx: Context,
    connections: Registry,
    active: Arc<AtomicUsize>,
    _live: WaitGroup,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.ctx.cancel();
        if let Some(stream) = self.connections.lock().remove(&self.id) {
            let _ = stream.shutdown(Shutdown::Both);
        }
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Per-connection loop: AwaitingOp -> Dispatching -> AwaitingOp ... -> Closed
fn handle_connection(mut conn: Connection, handler: &dyn Handler) {
    let ctx = conn.context().clone();
    tracing::debug!("Connection established from {}", conn.peer_addr());

    loop {
        let op = match conn.read_op() {
            Ok(op) => op,
            Err(KvError::Io(ref e)) => {
                match e.kind() {
                    ErrorKind::UnexpectedEof
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted => {
                        tracing::debug!("Client {} disconnected", conn.peer_addr());
                    }
                    ErrorKind::WouldBlock | ErrorKind::TimedOut => {
                        tracing::debug!("Read timeout for client {}", conn.peer_addr());
                    }
                    _ => tracing::warn!("Error reading from {}: {}", conn.peer_addr(), e),
                }
                return;
            }
            Err(e) => {
                tracing::warn!("Error reading op from {}: {}", conn.peer_addr(), e);
                return;
            }
        };

        tracing::trace!("Received {:?} from {}", op.op_type(), conn.peer_addr());

        let dispatched = match op {
            Operation::Get { key } => handler.handle_get(&ctx, &mut conn, key),
            Operation::Set { key, value } => handler.handle_set(&ctx, &mut conn, key, value),
        };

        if let Err(e) = dispatched {
            tracing::warn!("Error writing to {}: {}", conn.peer_addr(), e);
            return;
        }

        if ctx.is_cancelled() {
            tracing::debug!("Connection to {} cancelled", conn.peer_addr());
            return;
        }
    }
}

/// Handle to a server running on a background thread
///
/// Dropping the handle stops the server.
pub struct ServerHandle {
    local_addr: SocketAddr,
    ctx: Context,
    active: Arc<AtomicUsize>,
    thread: Option<JoinHandle<Result<()>>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of connections currently being handled
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Stop accepting, close connections and wait for their threads
    pub fn stop(mut self) -> Result<()> {
        self.stop_inner()
    }

    fn stop_inner(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };

        self.ctx.cancel();
        wake_acceptor(self.local_addr);
        thread
            .join()
            .map_err(|_| KvError::Io(std::io::Error::other("accept thread panicked")))?
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop_inner() {
            tracing::warn!("Error stopping server: {}", e);
        }
    }
}
