//! Contract for the engine's source-excerpt renderer.

use quip_ast::node::SourceNode;

/// Renders a syntax node into a textual excerpt of its subtree plus the
/// character offsets of the node within that excerpt.
///
/// Implementations are stateful: `start`, `end` and `text` are meaningful
/// only after `render` returned `true` on the same instance. Message
/// composition consumes a renderer by value, so every message is produced by
/// a fresh instance and none is shared between concurrent compositions.
pub trait ExcerptRenderer {
    /// Renders `node`; returns false when the node cannot be rendered
    /// (detached, malformed, or foreign to this renderer).
    fn render(&mut self, node: &dyn SourceNode) -> bool;

    /// Start offset of the node within the excerpt.
    fn start(&self) -> usize;

    /// End offset of the node within the excerpt.
    fn end(&self) -> usize;

    /// The rendered excerpt.
    fn text(&self) -> &str;
}
