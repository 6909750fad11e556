//! Diagnostics gathered while parsing.

use crate::ast::Span;
use serde::Serialize;

/// Severity of a diagnostic. Only errors are ever collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Nothing could be parsed.
    Fatal,
    /// A function body failed to parse and the function was kept without it.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn fatal(message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            level: Level::Fatal,
            message: message.into(),
            span,
        }
    }

    /// Converts a syntax error. Errors without a location in the source are
    /// end-of-input errors and are placed at `end_of_input`.
    pub(crate) fn from_syn(level: Level, error: &syn::Error, end_of_input: Span) -> Self {
        Self {
            level,
            message: error.to_string(),
            span: Some(Span::from_proc_macro(error.span()).unwrap_or(end_of_input)),
        }
    }
}
