//! Message composition: excerpt windowing and the final diagnostic string.
//!
//! The composed message is always a single string safe to display as-is.
//! Its length stays bounded regardless of source size: lexing/parsing
//! details keep a small window around the fault column, and the excerpt
//! segment is whatever the engine's renderer produced for the one offending
//! node. Composition itself never fails; when the renderer cannot render the
//! node, the message degrades to the location + detail form.

use crate::error::{ErrorKind, ScriptError};
use crate::render::ExcerptRenderer;
use quip_ast::loc::SourceLocation;

/// Characters kept visible on each side of the fault column.
const WINDOW_RADIUS: usize = 10;
/// Expressions shorter than this are reported whole.
const WHOLE_EXPR_LIMIT: usize = 15;

/// Rendered excerpt of the outermost expression in error, with the character
/// offsets of the precise trigger inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Bounded detail for a lexing/parsing failure.
///
/// Short expressions are reported verbatim as `"<prefix> error in '<expr>'"`;
/// longer ones as `"<prefix> error near '... <window> ...'"` with a window of
/// characters around `column`, shifted right when it would start before the
/// expression and clamped to its end.
pub(crate) fn parser_error(prefix: &str, expr: &str, column: u32) -> String {
    let chars: Vec<char> = expr.chars().collect();
    if chars.len() < WHOLE_EXPR_LIMIT {
        return format!("{prefix} error in '{expr}'");
    }
    let column = column as usize;
    let (begin, end) = if column < WINDOW_RADIUS {
        (0, column + 2 * WINDOW_RADIUS)
    } else {
        (column - WINDOW_RADIUS, column + WINDOW_RADIUS)
    };
    let begin = begin.min(chars.len());
    let end = end.min(chars.len());
    let window: String = chars[begin..end].iter().collect();
    format!("{prefix} error near '... {window} ...'")
}

/// Assembles `"<location>![<start>,<end>]: '<excerpt>' <detail>"`, each
/// segment present only when available, plus the null-operand note.
pub(crate) fn compose_message(
    location: Option<&SourceLocation>,
    rendered: Option<(usize, usize, &str)>,
    detail: &str,
    null_operand: bool,
) -> String {
    let mut msg = String::new();
    if let Some(location) = location {
        msg.push_str(&location.to_string());
    }
    if let Some((start, end, text)) = rendered {
        msg.push_str(&format!("![{start},{end}]: '{text}'"));
    }
    msg.push(' ');
    msg.push_str(detail);
    if null_operand {
        msg.push_str(" caused by null operand");
    }
    msg
}

impl ScriptError {
    /// Kind-specific one-line detail, independent of location and excerpt.
    pub fn detail(&self) -> String {
        let column = self.location().map_or(0, |l| l.column());
        match self.kind() {
            ErrorKind::Tokenization { expr } => parser_error("tokenization", expr, column),
            ErrorKind::Parsing { expr } => parser_error("parsing", expr, column),
            ErrorKind::UndefinedVariable { name } => format!("undefined variable {name}"),
            ErrorKind::InaccessibleProperty { name } => {
                format!("inaccessible or unknown property {name}")
            }
            ErrorKind::UnresolvedMethod { name } => {
                format!("unknown, ambiguous or inaccessible method {name}")
            }
        }
    }

    /// The fully composed diagnostic, rendering the offending node through a
    /// fresh `renderer`.
    pub fn message<R: ExcerptRenderer>(&self, mut renderer: R) -> String {
        let mut rendered = None;
        if let Some(node) = self.node() {
            if renderer.render(node) {
                rendered = Some((renderer.start(), renderer.end(), renderer.text().to_string()));
            }
        }
        compose_message(
            self.location(),
            rendered.as_ref().map(|(s, e, t)| (*s, *e, t.as_str())),
            &self.detail(),
            self.null_operand(),
        )
    }

    /// Just the rendered excerpt of the outermost expression in error, or
    /// `None` when there is no node back-reference or rendering fails.
    pub fn excerpt<R: ExcerptRenderer>(&self, mut renderer: R) -> Option<Excerpt> {
        let node = self.node()?;
        if !renderer.render(node) {
            return None;
        }
        Some(Excerpt {
            text: renderer.text().to_string(),
            start: renderer.start(),
            end: renderer.end(),
        })
    }
}
