//! Diagnostics for the quip expression engine.
//!
//! Faults raised while tokenizing, parsing or evaluating an expression become
//! a [`ScriptError`] carrying the best available source location and, when
//! evaluation had one at hand, a back-reference to the offending syntax node.
//! The error propagates unchanged up to the embedding caller; at the point of
//! reporting, [`ScriptError::message`] renders the node through the engine's
//! excerpt renderer and composes the final, bounded, display-safe string.
//!
//! Script-level `return` and cooperative cancellation travel the same
//! unwinding channel as [`Signal`]s inside an [`Interrupt`], and are
//! intercepted by kind at their designated boundaries ([`frame_exit`],
//! [`finish`]) before anything reaches the embedder.

pub mod cause;
pub mod compose;
pub mod error;
pub mod render;
pub mod report;
pub mod signal;

pub use cause::{unwrap_cause, BridgeError, Cause, InvocationError, NullOperand, NULL_OPERAND};
pub use compose::Excerpt;
pub use error::{ErrorKind, ScriptError, SyntaxFault};
pub use render::ExcerptRenderer;
pub use report::Report;
pub use signal::{finish, frame_exit, CancelFlag, Interrupt, Signal, SignalKind};
