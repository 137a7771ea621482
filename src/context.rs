//! Cancellable execution context
//!
//! A `Context` is a cheap, cloneable cancellation flag. Contexts form a tree:
//! a child derived with [`Context::child`] observes its own cancellation and
//! every ancestor's, while cancelling a child leaves the parent untouched.
//!
//! Cancellation is cooperative. Nothing is interrupted; code checks
//! [`Context::is_cancelled`] at its own check points.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Node {
    cancelled: AtomicBool,
    parent: Option<Arc<Node>>,
}

/// Cooperative cancellation handle
#[derive(Debug, Clone)]
pub struct Context {
    node: Arc<Node>,
}

impl Context {
    /// Root context that is only cancelled explicitly
    pub fn background() -> Self {
        Self {
            node: Arc::new(Node {
                cancelled: AtomicBool::new(false),
                parent: None,
            }),
        }
    }

    /// Derive a child context
    pub fn child(&self) -> Self {
        Self {
            node: Arc::new(Node {
                cancelled: AtomicBool::new(false),
                parent: Some(Arc::clone(&self.node)),
            }),
        }
    }

    /// Cancel this context and every context derived from it
    pub fn cancel(&self) {
        self.node.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        let mut node = Some(&self.node);
        while let Some(n) = node {
            if n.cancelled.load(Ordering::Acquire) {
                return true;
            }
            node = n.parent.as_ref();
        }
        false
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}
