//! End-to-end message composition against stub collaborators.

use quip_ast::loc::SourceLocation;
use quip_ast::node::{NodeRef, SourceNode};
use quip_diag::{
    BridgeError, Cause, ExcerptRenderer, InvocationError, ScriptError, SyntaxFault, NULL_OPERAND,
};
use std::any::Any;
use std::sync::Arc;

/// Node standing in for a parsed expression subtree.
#[derive(Debug)]
struct StubNode {
    location: Option<SourceLocation>,
    source: &'static str,
    start: usize,
    end: usize,
}

impl StubNode {
    fn at(name: &str, line: u32, column: u32, source: &'static str) -> NodeRef {
        Arc::new(StubNode {
            location: Some(SourceLocation::new(name, line, column)),
            source,
            start: 0,
            end: source.len(),
        })
    }
}

impl SourceNode for StubNode {
    fn location(&self) -> Option<SourceLocation> {
        self.location.clone()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Renderer that understands `StubNode` trees.
#[derive(Default)]
struct StubRenderer {
    start: usize,
    end: usize,
    text: String,
}

impl ExcerptRenderer for StubRenderer {
    fn render(&mut self, node: &dyn SourceNode) -> bool {
        match node.as_any().downcast_ref::<StubNode>() {
            Some(stub) => {
                self.start = stub.start;
                self.end = stub.end;
                self.text = stub.source.to_string();
                true
            }
            None => false,
        }
    }
    fn start(&self) -> usize {
        self.start
    }
    fn end(&self) -> usize {
        self.end
    }
    fn text(&self) -> &str {
        &self.text
    }
}

/// Renderer that can never render, like a debugger that was never
/// initialized for this tree.
#[derive(Default)]
struct BrokenRenderer;

impl ExcerptRenderer for BrokenRenderer {
    fn render(&mut self, _node: &dyn SourceNode) -> bool {
        false
    }
    fn start(&self) -> usize {
        0
    }
    fn end(&self) -> usize {
        0
    }
    fn text(&self) -> &str {
        ""
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unterminated string literal")]
struct LexFault {
    line: u32,
    column: u32,
}

impl SyntaxFault for LexFault {
    fn line(&self) -> u32 {
        self.line
    }
    fn column(&self) -> u32 {
        self.column
    }
}

#[test]
fn variable_error_without_location_is_detail_only() {
    let err = ScriptError::variable(None, "x");
    let msg = err.message(StubRenderer::default());
    assert_eq!(msg, " undefined variable x");
    assert!(msg.ends_with("undefined variable x"));
}

#[test]
fn full_message_carries_location_excerpt_and_detail() {
    let node = StubNode::at("script.qp", 1, 5, "x + 1");
    let err = ScriptError::variable(Some(node), "x");
    assert_eq!(
        err.message(StubRenderer::default()),
        "script.qp@1:5![0,5]: 'x + 1' undefined variable x"
    );
}

#[test]
fn failing_renderer_drops_only_the_excerpt_segment() {
    let node = StubNode::at("script.qp", 1, 5, "x + 1");
    let err = ScriptError::variable(Some(node), "x");
    assert_eq!(err.message(BrokenRenderer), "script.qp@1:5 undefined variable x");
    // Display is the renderer-less degraded form.
    assert_eq!(err.to_string(), "script.qp@1:5 undefined variable x");
}

#[test]
fn excerpt_accessor_reports_offsets() {
    let node = StubNode::at("script.qp", 2, 1, "a.b.c");
    let err = ScriptError::property(Some(node), "b", None);
    let excerpt = err.excerpt(StubRenderer::default()).unwrap();
    assert_eq!(excerpt.text, "a.b.c");
    assert_eq!((excerpt.start, excerpt.end), (0, 5));

    assert!(err.excerpt(BrokenRenderer).is_none());
    assert!(ScriptError::variable(None, "x").excerpt(StubRenderer::default()).is_none());
}

#[test]
fn null_operand_marker_appends_the_note() {
    let node = StubNode::at("script.qp", 1, 3, "a + null");
    let err = ScriptError::method(Some(node), "plus", Some(Box::new(NULL_OPERAND)));
    let msg = err.message(StubRenderer::default());
    assert!(msg.ends_with(" caused by null operand"), "got: {msg}");
}

#[test]
fn equal_text_impostor_does_not_trigger_the_note() {
    #[derive(Debug, thiserror::Error)]
    #[error("null operand")]
    struct Impostor;

    let err = ScriptError::method(None, "plus", Some(Box::new(Impostor)));
    let msg = err.message(StubRenderer::default());
    assert_eq!(msg, " unknown, ambiguous or inaccessible method plus");
}

#[test]
fn reflective_wrappers_are_unwrapped_at_construction() {
    #[derive(Debug, thiserror::Error)]
    #[error("index out of range")]
    struct HostFault;

    let wrapped: Cause = Box::new(InvocationError(Box::new(HostFault)));
    let err = ScriptError::method(None, "get", Some(wrapped));
    assert!(err.cause().unwrap().downcast_ref::<HostFault>().is_some());

    let bridged: Cause = Box::new(BridgeError(Box::new(HostFault)));
    let err = ScriptError::property(None, "len", Some(bridged));
    assert!(err.cause().unwrap().downcast_ref::<HostFault>().is_some());
}

#[test]
fn tokenization_message_windows_long_input() {
    let expr = "let result = lookup(table, key) + offset * 3";
    let err = ScriptError::tokenization(
        Some(SourceLocation::new("a.qp", 1, 1)),
        expr,
        Some(LexFault { line: 1, column: 25 }),
    );
    let msg = err.message(StubRenderer::default());
    assert_eq!(msg, "a.qp@1:25 tokenization error near '... okup(table, key) + o ...'");
}

#[test]
fn parsing_message_reports_short_input_whole() {
    let err =
        ScriptError::parsing(None, "x +", Some(LexFault { line: 1, column: 3 }));
    assert_eq!(err.message(StubRenderer::default()), "@1:3 parsing error in 'x +'");
}

#[test]
fn detail_texts_per_kind() {
    assert_eq!(
        ScriptError::property(None, "size", None).detail(),
        "inaccessible or unknown property size"
    );
    assert_eq!(
        ScriptError::method(None, "call", None).detail(),
        "unknown, ambiguous or inaccessible method call"
    );
    assert_eq!(ScriptError::variable(None, "n").detail(), "undefined variable n");
}
