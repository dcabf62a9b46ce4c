//! The quip error taxonomy.

use crate::cause::{self, Cause};
use crate::compose;
use quip_ast::loc::SourceLocation;
use quip_ast::node::{NodeRef, SourceNode};
use std::error::Error;
use std::fmt;

/// Lexer/parser fault capability: where in the source the fault occurred.
pub trait SyntaxFault: Error + Send + Sync + 'static {
    fn line(&self) -> u32;
    fn column(&self) -> u32;
}

/// What went wrong, with the kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Tokenization failed; carries the offending expression text.
    Tokenization { expr: String },
    /// The grammar rejected the input; carries the offending expression text.
    Parsing { expr: String },
    /// Reference to a variable the strict evaluator cannot resolve.
    UndefinedVariable { name: String },
    /// Property absent or not reachable through introspection.
    InaccessibleProperty { name: String },
    /// Method overload resolution failed, was ambiguous, or access failed.
    UnresolvedMethod { name: String },
}

impl ErrorKind {
    /// The unresolved symbol, for the kinds that name one.
    pub fn name(&self) -> Option<&str> {
        match self {
            ErrorKind::UndefinedVariable { name }
            | ErrorKind::InaccessibleProperty { name }
            | ErrorKind::UnresolvedMethod { name } => Some(name),
            ErrorKind::Tokenization { .. } | ErrorKind::Parsing { .. } => None,
        }
    }

    /// The offending expression text, for the lexing/parsing kinds.
    pub fn expression(&self) -> Option<&str> {
        match self {
            ErrorKind::Tokenization { expr } | ErrorKind::Parsing { expr } => Some(expr),
            _ => None,
        }
    }
}

/// A failure raised while tokenizing, parsing or evaluating an expression.
///
/// Carries the best available source location, an optional back-reference to
/// the offending syntax node (used only for excerpt rendering) and the
/// resolved cause. All fields are fixed at construction; instances propagate
/// unchanged up to the embedding caller, which decides whether to log,
/// display, or convert.
#[derive(Debug)]
pub struct ScriptError {
    kind: ErrorKind,
    location: Option<SourceLocation>,
    node: Option<NodeRef>,
    cause: Option<Cause>,
}

/// Best available location for a lexing/parsing failure: the fault's own
/// line/column wins over the ambient ones; the ambient source name is kept.
fn merge(ambient: Option<SourceLocation>, fault: Option<(u32, u32)>) -> Option<SourceLocation> {
    match (ambient, fault) {
        (ambient, None) => ambient,
        (None, Some((line, column))) => Some(SourceLocation::anonymous(line, column)),
        (Some(ambient), Some((line, column))) => {
            Some(SourceLocation::new(ambient.name(), line, column))
        }
    }
}

impl ScriptError {
    fn raise(
        kind: ErrorKind,
        location: Option<SourceLocation>,
        node: Option<NodeRef>,
        fault: Option<Cause>,
    ) -> Self {
        let location = location.or_else(|| node.as_deref().and_then(SourceNode::location));
        Self { kind, location, node, cause: fault.map(cause::unwrap_cause) }
    }

    /// Tokenization failure over `expr`, merging the ambient location with
    /// the fault's own line/column.
    pub fn tokenization<F: SyntaxFault>(
        ambient: Option<SourceLocation>,
        expr: impl Into<String>,
        fault: Option<F>,
    ) -> Self {
        let location = merge(ambient, fault.as_ref().map(|f| (f.line(), f.column())));
        let fault = fault.map(|f| Box::new(f) as Cause);
        Self::raise(ErrorKind::Tokenization { expr: expr.into() }, location, None, fault)
    }

    /// Parsing failure over `expr`, merging the ambient location with the
    /// fault's own line/column.
    pub fn parsing<F: SyntaxFault>(
        ambient: Option<SourceLocation>,
        expr: impl Into<String>,
        fault: Option<F>,
    ) -> Self {
        let location = merge(ambient, fault.as_ref().map(|f| (f.line(), f.column())));
        let fault = fault.map(|f| Box::new(f) as Cause);
        Self::raise(ErrorKind::Parsing { expr: expr.into() }, location, None, fault)
    }

    /// Reference to an undeclared variable under strict evaluation.
    pub fn variable(node: Option<NodeRef>, name: impl Into<String>) -> Self {
        Self::raise(ErrorKind::UndefinedVariable { name: name.into() }, None, node, None)
    }

    /// Property that is absent or inaccessible on the target value.
    pub fn property(node: Option<NodeRef>, name: impl Into<String>, fault: Option<Cause>) -> Self {
        Self::raise(ErrorKind::InaccessibleProperty { name: name.into() }, None, node, fault)
    }

    /// Method that is unknown, ambiguous or inaccessible on the target value.
    pub fn method(node: Option<NodeRef>, name: impl Into<String>, fault: Option<Cause>) -> Self {
        Self::raise(ErrorKind::UnresolvedMethod { name: name.into() }, None, node, fault)
    }

    /// Method failure detected away from any syntax node (e.g. in a namespace
    /// functor), with only a location at hand.
    pub fn method_at(
        location: SourceLocation,
        name: impl Into<String>,
        fault: Option<Cause>,
    ) -> Self {
        Self::raise(ErrorKind::UnresolvedMethod { name: name.into() }, Some(location), None, fault)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// The resolved, unwrapped cause.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub(crate) fn node(&self) -> Option<&dyn SourceNode> {
        self.node.as_deref()
    }

    pub(crate) fn null_operand(&self) -> bool {
        self.cause().is_some_and(|c| c.downcast_ref::<cause::NullOperand>().is_some())
    }
}

impl fmt::Display for ScriptError {
    /// Renderer-less form of [`ScriptError::message`]: location and detail,
    /// no excerpt segment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose::compose_message(
            self.location(),
            None,
            &self.detail(),
            self.null_operand(),
        ))
    }
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn Error + 'static))
    }
}
