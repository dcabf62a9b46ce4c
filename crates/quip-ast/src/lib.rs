pub mod loc {
    use serde::{Deserialize, Serialize};
    use std::fmt;

    /// Where a fault or syntax node originates: source name, line and column.
    ///
    /// The parser attaches one to every node it builds; lexing and parsing
    /// failures synthesize one from the fault's own line/column when no node
    /// exists yet. Immutable once attached to a diagnostic.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct SourceLocation {
        name: String,
        line: u32,
        column: u32,
    }

    impl SourceLocation {
        pub fn new(name: impl Into<String>, line: u32, column: u32) -> Self {
            Self { name: name.into(), line, column }
        }

        /// A location with no source name (e.g. an anonymous one-liner).
        pub fn anonymous(line: u32, column: u32) -> Self {
            Self::new("", line, column)
        }

        pub fn name(&self) -> &str {
            &self.name
        }
        pub fn line(&self) -> u32 {
            self.line
        }
        pub fn column(&self) -> u32 {
            self.column
        }
    }

    impl fmt::Display for SourceLocation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}@{}:{}", self.name, self.line, self.column)
        }
    }
}

pub mod node {
    use crate::loc::SourceLocation;
    use std::any::Any;
    use std::fmt;
    use std::sync::Arc;

    /// Capability a syntax node exposes to the diagnostic layer.
    ///
    /// Implemented by the engine's AST types. `as_any` lets a concrete
    /// excerpt renderer recover the node type of its own engine.
    pub trait SourceNode: fmt::Debug + Send + Sync {
        /// The node's own recorded source position, if the parser kept one.
        fn location(&self) -> Option<SourceLocation>;

        fn as_any(&self) -> &dyn Any;
    }

    /// Shared, read-only handle to the node a diagnostic originated from.
    /// Used only for excerpt rendering, never for tree traversal.
    pub type NodeRef = Arc<dyn SourceNode>;
}
