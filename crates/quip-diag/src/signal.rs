//! Non-error control signals and the unwinding channel.
//!
//! A script-level `return` or a cancellation request has to unwind
//! arbitrarily many evaluation frames to a known boundary, exactly like a
//! fault does, without being one. [`Signal`] rides the same `Err` channel as
//! [`ScriptError`] inside an [`Interrupt`], and the two boundary helpers
//! ([`frame_exit`], [`finish`]) intercept each kind where it belongs; no
//! signal ever reaches the embedder as an error, and [`Signal`] deliberately
//! does not implement `std::error::Error`.

use crate::compose;
use crate::error::ScriptError;
use crate::render::ExcerptRenderer;
use quip_ast::loc::SourceLocation;
use quip_ast::node::{NodeRef, SourceNode};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Payload of a control signal.
#[derive(Debug)]
pub enum SignalKind<V> {
    /// Explicit script-level `return`, carrying the returned value.
    Return(V),
    /// Cooperative termination of an in-flight evaluation.
    Cancel,
}

/// A non-error, non-local exit raised deep inside evaluation and intercepted
/// by kind at its designated boundary: the enclosing call frame for `Return`,
/// the top-level driver for `Cancel`.
#[derive(Debug)]
pub struct Signal<V> {
    kind: SignalKind<V>,
    location: Option<SourceLocation>,
    node: Option<NodeRef>,
}

impl<V> Signal<V> {
    /// `return` signal raised at `node`.
    pub fn ret(node: Option<NodeRef>, value: V) -> Self {
        Self::raise(SignalKind::Return(value), node)
    }

    /// Cancellation signal raised at the node where the request was observed.
    pub fn cancel(node: Option<NodeRef>) -> Self {
        Self::raise(SignalKind::Cancel, node)
    }

    fn raise(kind: SignalKind<V>, node: Option<NodeRef>) -> Self {
        let location = node.as_deref().and_then(SourceNode::location);
        Self { kind, location, node }
    }

    pub fn kind(&self) -> &SignalKind<V> {
        &self.kind
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// The carried return value, for `Return` signals.
    pub fn value(&self) -> Option<&V> {
        match &self.kind {
            SignalKind::Return(value) => Some(value),
            SignalKind::Cancel => None,
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self.kind {
            SignalKind::Return(value) => Some(value),
            SignalKind::Cancel => None,
        }
    }

    /// Fixed, non-diagnostic text; the carried value is exposed through
    /// [`Signal::value`], never through the message.
    pub fn detail(&self) -> &'static str {
        match self.kind {
            SignalKind::Return(_) => "return",
            SignalKind::Cancel => "execution cancelled",
        }
    }

    /// Message composed like an error message, rendering the node through a
    /// fresh `renderer`.
    pub fn message<R: ExcerptRenderer>(&self, mut renderer: R) -> String {
        let mut rendered = None;
        if let Some(node) = self.node.as_deref() {
            if renderer.render(node) {
                rendered = Some((renderer.start(), renderer.end(), renderer.text().to_string()));
            }
        }
        compose::compose_message(
            self.location(),
            rendered.as_ref().map(|(s, e, t)| (*s, *e, t.as_str())),
            self.detail(),
            false,
        )
    }
}

impl<V> fmt::Display for Signal<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose::compose_message(self.location(), None, self.detail(), false))
    }
}

/// The one channel evaluation results propagate through: either a reportable
/// fault or a control signal.
#[derive(Debug)]
pub enum Interrupt<V> {
    Fault(ScriptError),
    Signal(Signal<V>),
}

impl<V> From<ScriptError> for Interrupt<V> {
    fn from(fault: ScriptError) -> Self {
        Interrupt::Fault(fault)
    }
}

impl<V> From<Signal<V>> for Interrupt<V> {
    fn from(signal: Signal<V>) -> Self {
        Interrupt::Signal(signal)
    }
}

impl<V> fmt::Display for Interrupt<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interrupt::Fault(fault) => fmt::Display::fmt(fault, f),
            Interrupt::Signal(signal) => fmt::Display::fmt(signal, f),
        }
    }
}

/// Call-frame exit: a `Return` signal unwinding through this frame becomes
/// the frame's ordinary result; faults and cancellation keep unwinding.
pub fn frame_exit<V>(result: Result<V, Interrupt<V>>) -> Result<V, Interrupt<V>> {
    match result {
        Err(Interrupt::Signal(signal)) => {
            let Signal { kind, location, node } = signal;
            match kind {
                SignalKind::Return(value) => Ok(value),
                SignalKind::Cancel => {
                    Err(Interrupt::Signal(Signal { kind: SignalKind::Cancel, location, node }))
                }
            }
        }
        other => other,
    }
}

/// Top-level driver exit, the last boundary before the embedder: a stray
/// `Return` is the script's result, cancellation yields `Ok(None)`, and only
/// reportable faults surface as errors.
pub fn finish<V>(result: Result<V, Interrupt<V>>) -> Result<Option<V>, ScriptError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Interrupt::Fault(fault)) => Err(fault),
        Err(Interrupt::Signal(signal)) => match signal.kind {
            SignalKind::Return(value) => Ok(Some(value)),
            SignalKind::Cancel => Ok(None),
        },
    }
}

/// Cooperative cancellation flag shared between an external controller and a
/// running evaluation.
///
/// The controller sets it from any thread; evaluation polls it between steps
/// and raises [`Signal::cancel`] on its own thread, so the signal itself
/// never crosses threads.
#[derive(Debug, Default)]
pub struct CancelFlag(AtomicBool);

impl CancelFlag {
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Requests cancellation of the evaluation observing this flag.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
