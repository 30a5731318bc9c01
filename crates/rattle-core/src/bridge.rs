//! Call bridge: every host call ends in exactly one notification.
//!
//! Operations run synchronously on the control thread. Their typed result
//! is turned into a [`Notification`] and pushed onto the host channel; no
//! error (and no panic) escapes past [`CallBridge::invoke`].

use crate::compat::{AtomicBool, Ordering, String, ToString};
use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Host-chosen token identifying a pending call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallbackId(pub u64);

impl Display for CallbackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a bridged call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallOutcome<V> {
    Success(V),
    /// Human-readable, never empty.
    Failure(String),
}

/// One bridged call's result, addressed to its callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification<V> {
    pub callback: CallbackId,
    pub outcome: CallOutcome<V>,
}

impl<V> Notification<V> {
    pub fn success(&self) -> bool {
        matches!(self.outcome, CallOutcome::Success(_))
    }

    pub fn value(&self) -> Option<&V> {
        match &self.outcome {
            CallOutcome::Success(v) => Some(v),
            CallOutcome::Failure(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            CallOutcome::Success(_) => None,
            CallOutcome::Failure(msg) => Some(msg),
        }
    }
}

/// Everything the core tells the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent<V> {
    /// Startup finished; commands may be issued.
    Ready,
    /// The engine cannot run on this host. Sent at most once.
    Fatal(String),
    Call(Notification<V>),
}

/// Create an unbounded host channel.
pub fn host_channel<V>() -> (Sender<HostEvent<V>>, Receiver<HostEvent<V>>) {
    crossbeam_channel::unbounded()
}

const UNKNOWN_ERROR: &str = "unknown error";

fn failure_message(msg: String) -> String {
    if msg.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        msg
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::new()
    }
}

/// Adapts typed results into host notifications.
#[derive(Debug)]
pub struct CallBridge<V> {
    sender: Sender<HostEvent<V>>,
    ready_sent: AtomicBool,
    fatal_sent: AtomicBool,
}

impl<V> CallBridge<V> {
    pub fn new(sender: Sender<HostEvent<V>>) -> Self {
        Self {
            sender,
            ready_sent: AtomicBool::new(false),
            fatal_sent: AtomicBool::new(false),
        }
    }

    /// Run `operation` and report its outcome under `callback`.
    ///
    /// Returns whether the operation succeeded. A panic inside the
    /// operation is reported as a failure.
    pub fn invoke<E, F>(&self, callback: CallbackId, operation: F) -> bool
    where
        E: Display,
        F: FnOnce() -> Result<V, E>,
    {
        let outcome = match catch_unwind(AssertUnwindSafe(operation)) {
            Ok(Ok(value)) => CallOutcome::Success(value),
            Ok(Err(e)) => CallOutcome::Failure(failure_message(e.to_string())),
            Err(payload) => CallOutcome::Failure(failure_message(panic_message(payload))),
        };

        let success = matches!(outcome, CallOutcome::Success(_));
        if let CallOutcome::Failure(msg) = &outcome {
            tracing::warn!(%callback, "call failed: {msg}");
        }
        self.send(HostEvent::Call(Notification { callback, outcome }));
        success
    }

    /// Announce a successful startup. Only the first call sends.
    pub fn ready(&self) {
        if !self.ready_sent.swap(true, Ordering::AcqRel) {
            self.send(HostEvent::Ready);
        }
    }

    /// Report an unrecoverable startup failure. Only the first call sends.
    pub fn fatal(&self, message: impl Into<String>) {
        if self.fatal_sent.swap(true, Ordering::AcqRel) {
            return;
        }
        let message = failure_message(message.into());
        tracing::warn!("fatal: {message}");
        self.send(HostEvent::Fatal(message));
    }

    pub fn has_failed(&self) -> bool {
        self.fatal_sent.load(Ordering::Acquire)
    }

    fn send(&self, event: HostEvent<V>) {
        if self.sender.send(event).is_err() {
            tracing::debug!("host channel closed, dropping event");
        }
    }
}
