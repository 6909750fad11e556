//! Parsing of Rust source with function-level error recovery.
//!
//! A file that parses cleanly is converted as is. Otherwise every top-level
//! item is parsed on its own so that a function with a broken body does not
//! hide the rest of the file. Any other syntax error is fatal.

use crate::ast::{self, Node, Position, Span};
use crate::diagnostic::{Diagnostic, Level};
use proc_macro2::{TokenStream, TokenTree};
use serde::Serialize;
use std::borrow::Cow;
use std::str::FromStr;
use std::thread;
use syn::parse::discouraged::Speculative;
use syn::parse::{ParseStream, Parser};
use syn::{Attribute, Block, Item, ItemFn, Signature, Visibility, braced};
use tracing::{debug, warn};

/// Deepest delimiter nesting accepted. Parsing and tree building recurse on
/// nesting, so deeper sources are rejected as fatal instead of risking the
/// stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Stack of the thread each source is parsed on.
const PARSER_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Outcome of parsing a source file.
///
/// `Ok` means a tree was produced without diagnostics, `Error` means a tree
/// was produced but some function bodies failed to parse, and `Fatal` means
/// no tree could be produced at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStatus {
    Ok,
    Error,
    Fatal,
}

/// Parsed tree along with the diagnostics gathered while parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedAst {
    pub ast: Option<Node>,
    pub errors: Vec<Diagnostic>,
    pub status: ParseStatus,
}

impl ParsedAst {
    fn new(ast: Option<Node>, errors: Vec<Diagnostic>) -> Self {
        let status = match (&ast, errors.is_empty()) {
            (Some(_), true) => ParseStatus::Ok,
            (Some(_), false) => ParseStatus::Error,
            (None, _) => ParseStatus::Fatal,
        };
        Self {
            ast,
            errors,
            status,
        }
    }

    fn fatal(diagnostic: Diagnostic) -> Self {
        Self::new(None, vec![diagnostic])
    }
}

/// Parses `source` as the contents of a Rust file.
///
/// The work happens on a dedicated thread with a large stack. The lexer's
/// span table is thread-local, so it is released together with the thread.
pub fn parse_source(source: &str) -> ParsedAst {
    let source = strip_shebang(source).into_owned();
    let worker = thread::Builder::new()
        .name("parser".to_string())
        .stack_size(PARSER_STACK_SIZE)
        .spawn(move || parse_tokens(&source));

    let parsed = match worker {
        Ok(handle) => handle.join().unwrap_or_else(|_| {
            warn!("Parser thread panicked");
            ParsedAst::fatal(Diagnostic::fatal("parser panicked", None))
        }),
        Err(e) => ParsedAst::fatal(Diagnostic::fatal(
            format!("failed to start parser thread: {e}"),
            None,
        )),
    };

    debug!(
        "Parsed source with status {:?} and {} error(s)",
        parsed.status,
        parsed.errors.len()
    );
    parsed
}

fn parse_tokens(source: &str) -> ParsedAst {
    let end = end_of_source(source);

    let tokens = match TokenStream::from_str(source) {
        Ok(tokens) => tokens,
        Err(e) => {
            let span = Span::from_proc_macro(e.span()).unwrap_or(end);
            return ParsedAst::fatal(Diagnostic::fatal(e.to_string(), Some(span)));
        }
    };

    if let Some(group) = too_deep(tokens.clone(), 0) {
        let span = Span::from_proc_macro(group).unwrap_or(end);
        return ParsedAst::fatal(Diagnostic::fatal(
            format!("delimiters nested deeper than {MAX_NESTING_DEPTH} levels"),
            Some(span),
        ));
    }

    if let Ok(file) = syn::parse2::<syn::File>(tokens.clone()) {
        return ParsedAst::new(Some(ast::build_tree(&file)), Vec::new());
    }

    let mut recovered = Vec::new();
    let result = (|input: ParseStream| recover(input, &mut recovered)).parse2(tokens);

    let mut errors: Vec<_> = recovered
        .iter()
        .map(|e| Diagnostic::from_syn(Level::Error, e, end))
        .collect();
    match result {
        Ok(file) => ParsedAst::new(Some(ast::build_tree(&file)), errors),
        Err(e) => {
            errors.push(Diagnostic::from_syn(Level::Fatal, &e, end));
            ParsedAst::new(None, errors)
        }
    }
}

/// Finds the first group nested deeper than [`MAX_NESTING_DEPTH`].
fn too_deep(tokens: TokenStream, depth: usize) -> Option<proc_macro2::Span> {
    for tt in tokens {
        if let TokenTree::Group(group) = tt {
            if depth == MAX_NESTING_DEPTH {
                return Some(group.span());
            }
            if let Some(span) = too_deep(group.stream(), depth + 1) {
                return Some(span);
            }
        }
    }
    None
}

/// Location reported for errors found at the end of the input.
fn end_of_source(source: &str) -> Span {
    let line = source.matches('\n').count() + 1;
    let column = source.rsplit('\n').next().unwrap_or_default().chars().count();
    let end = Position { line, column };
    Span { start: end, end }
}

/// Blanks out a leading `#!` interpreter line, keeping its newline so the
/// remaining lines keep their numbers. `#![...]` is an inner attribute and
/// is left alone.
fn strip_shebang(source: &str) -> Cow<'_, str> {
    match source.strip_prefix("#!") {
        Some(rest) if !rest.trim_start().starts_with('[') => {
            let next_line = source.find('\n').map_or("", |i| &source[i..]);
            Cow::Owned(next_line.to_string())
        }
        _ => Cow::Borrowed(source),
    }
}

/// Parses the file one item at a time. Functions whose body fails to parse
/// are kept and their error pushed to `recovered`; any other error aborts.
fn recover(input: ParseStream, recovered: &mut Vec<syn::Error>) -> syn::Result<syn::File> {
    let attrs = input.call(Attribute::parse_inner)?;

    let mut items = Vec::new();
    while !input.is_empty() {
        let fork = input.fork();
        match fork.parse::<Item>() {
            Ok(item) => {
                input.advance_to(&fork);
                items.push(item);
            }
            Err(e) => match salvage_fn(input) {
                Some(item) => {
                    debug!("Recovered function {} from: {}", item.sig.ident, e);
                    recovered.push(e);
                    items.push(Item::Fn(item));
                }
                None => return Err(e),
            },
        }
    }

    Ok(syn::File {
        shebang: None,
        attrs,
        items,
    })
}

/// Keeps a function whose body does not parse, as long as its header does.
/// The function is returned with an empty body.
fn salvage_fn(input: ParseStream) -> Option<ItemFn> {
    let fork = input.fork();
    let item = fn_header(&fork).ok()?;
    input.advance_to(&fork);
    Some(item)
}

fn fn_header(input: ParseStream) -> syn::Result<ItemFn> {
    let attrs = input.call(Attribute::parse_outer)?;
    let vis: Visibility = input.parse()?;
    let sig: Signature = input.parse()?;

    let content;
    let brace_token = braced!(content in input);
    content.parse::<TokenStream>()?;

    Ok(ItemFn {
        attrs,
        vis,
        sig,
        block: Box::new(Block {
            brace_token,
            stmts: Vec::new(),
        }),
    })
}
