//! Request and response messages exchanged with the driver.
//!
//! Each request is a single JSON object on one line, and so is each
//! response.

use crate::ast::Node;
use crate::diagnostic::Diagnostic;
use crate::parse::{ParseStatus, ParsedAst, parse_source};
use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const LANGUAGE: &str = "Rust";
pub const LANGUAGE_VERSION: &str = "1.0";
pub const DRIVER: &str = concat!("parser-rust:", env!("CARGO_PKG_VERSION"));
pub const PARSE_ACTION: &str = "ParseAST";

pub const ERR_DECODE: &str = "error decoding input from json";

/// Request received on stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseInput {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_version: Option<String>,
    pub content: String,
}

impl ParseInput {
    pub fn parse_ast(content: impl Into<String>) -> Self {
        Self {
            action: PARSE_ACTION.to_string(),
            language: None,
            language_version: None,
            content: content.into(),
        }
    }
}

/// Response written to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput {
    pub ast: Option<Node>,
    pub errors: Vec<Diagnostic>,
    pub status: ParseStatus,
    pub language: String,
    pub language_version: String,
    pub driver: String,
}

impl ParseOutput {
    pub fn from_ast(parsed: ParsedAst) -> Self {
        Self {
            ast: parsed.ast,
            errors: parsed.errors,
            status: parsed.status,
            language: LANGUAGE.to_string(),
            language_version: LANGUAGE_VERSION.to_string(),
            driver: DRIVER.to_string(),
        }
    }

    /// Response for a request that could not be served.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            ast: None,
            errors: vec![Diagnostic::fatal(message, None)],
            status: ParseStatus::Fatal,
            language: LANGUAGE.to_string(),
            language_version: LANGUAGE_VERSION.to_string(),
            driver: DRIVER.to_string(),
        }
    }
}

/// Decodes one request line and parses the source it carries.
pub fn handle_request(line: &str) -> Result<ParseOutput> {
    let input: ParseInput = serde_json::from_str(line).map_err(|e| {
        debug!("Invalid request: {}", e);
        anyhow!(ERR_DECODE)
    })?;

    if input.action != PARSE_ACTION {
        bail!("unknown action {}", input.action);
    }

    if let Some(language) = input.language.as_deref()
        && language != LANGUAGE
    {
        warn!("Request declares language {}, parsing it as {}", language, LANGUAGE);
    }

    debug!("Parsing {} bytes of source", input.content.len());
    Ok(ParseOutput::from_ast(parse_source(&input.content)))
}

/// Like [`handle_request`], but turns a failed request into a fatal response.
pub fn respond(line: &str) -> ParseOutput {
    handle_request(line).unwrap_or_else(|e| ParseOutput::from_error(e.to_string()))
}
