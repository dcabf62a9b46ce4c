//! Persistence-stable projection of a diagnostic.

use crate::error::ScriptError;
use crate::render::ExcerptRenderer;
use quip_ast::loc::SourceLocation;
use serde::{Deserialize, Serialize};

/// What survives of a diagnostic outside the owning process: the composed
/// message and the source location. The syntax-node back-reference is
/// transient and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl Report {
    /// Snapshots `error`, rendering its excerpt through a fresh `renderer`.
    pub fn of<R: ExcerptRenderer>(error: &ScriptError, renderer: R) -> Self {
        Self { message: error.message(renderer), location: error.location().cloned() }
    }
}
