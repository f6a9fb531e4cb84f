//! Recursive descent parser for placeholder expressions.
//!
//! Grammar (whitespace tolerated everywhere):
//!
//! ```text
//! expression  := head ("|" stage)*
//! head        := call | placeholder
//! stage       := call
//! call        := "fn" ":" word "(" args ")"
//! args        := ε | arg ("," arg)*
//! arg         := quoted | placeholder
//! placeholder := word ":" word (":" word)*
//! ```
//!
//! Error mapping: malformed text outside a function call makes the whole
//! expression an unresolvable placeholder; malformed text inside a call's
//! parentheses is a signature error for that function (or an unknown
//! function when the name is not registered).

mod stream;

pub use stream::TokenStream;

use crate::ast::{Arg, Expression, FunctionCall, Head, PlaceholderRef};
use crate::error::{Error, Result};
use crate::executor::MAX_PIPELINE_STAGES;
use crate::lexer::{self, Token};
use crate::registry;

/// Prefix that marks a stage or head as a function call.
pub const FUNCTION_PREFIX: &str = "fn";

/// Parse a full expression, enforcing the stage cap before anything can
/// execute.
pub fn parse(src: &str) -> Result<Expression> {
    let tokens = lexer::tokenize(src).map_err(|_| Error::unresolved(src))?;
    let mut stream = TokenStream::new(&tokens);

    let head = parse_head(&mut stream, src)?;
    let mut stages = Vec::new();
    while stream.check(&Token::Pipe) {
        stream.advance();
        stages.push(parse_stage(&mut stream, src)?);
    }
    if !stream.at_end() {
        return Err(Error::unresolved(src));
    }
    if stages.len() > MAX_PIPELINE_STAGES {
        return Err(Error::too_complex(format!(
            "{} stages after the head, at most {MAX_PIPELINE_STAGES} allowed",
            stages.len()
        )));
    }

    Ok(Expression { head, stages })
}

fn parse_head(stream: &mut TokenStream, src: &str) -> Result<Head> {
    let prefix = match stream.advance() {
        Some(Token::Word(word)) => word.clone(),
        _ => return Err(Error::unresolved(src)),
    };
    stream
        .expect(&Token::Colon)
        .map_err(|()| Error::unresolved(src))?;

    if prefix == FUNCTION_PREFIX {
        Ok(Head::Function(parse_call_body(stream, src)?))
    } else {
        let name = parse_name(stream).map_err(|()| Error::unresolved(src))?;
        Ok(Head::Placeholder(PlaceholderRef { prefix, name }))
    }
}

fn parse_stage(stream: &mut TokenStream, src: &str) -> Result<FunctionCall> {
    match stream.advance() {
        Some(Token::Word(word)) if word == FUNCTION_PREFIX => {}
        _ => return Err(Error::unresolved(src)),
    }
    stream
        .expect(&Token::Colon)
        .map_err(|()| Error::unresolved(src))?;
    parse_call_body(stream, src)
}

/// Parse `name "(" args ")"`, the `fn:` prefix already consumed.
fn parse_call_body(stream: &mut TokenStream, src: &str) -> Result<FunctionCall> {
    let name = match stream.advance() {
        Some(Token::Word(word)) => word.clone(),
        _ => return Err(Error::unresolved(src)),
    };
    stream
        .expect(&Token::LParen)
        .map_err(|()| call_error(&name))?;

    let mut args = Vec::new();
    if !stream.check(&Token::RParen) {
        loop {
            args.push(parse_arg(stream, &name)?);
            if stream.check(&Token::Comma) {
                stream.advance();
                continue;
            }
            break;
        }
    }
    stream
        .expect(&Token::RParen)
        .map_err(|()| call_error(&name))?;

    Ok(FunctionCall { name, args })
}

fn parse_arg(stream: &mut TokenStream, function: &str) -> Result<Arg> {
    match stream.advance() {
        Some(Token::SingleQuoted(literal)) | Some(Token::DoubleQuoted(literal)) => {
            Ok(Arg::Literal(literal.clone()))
        }
        Some(Token::Word(prefix)) if prefix != FUNCTION_PREFIX => {
            let prefix = prefix.clone();
            stream
                .expect(&Token::Colon)
                .map_err(|()| call_error(function))?;
            let name = parse_name(stream).map_err(|()| call_error(function))?;
            Ok(Arg::Reference(PlaceholderRef { prefix, name }))
        }
        _ => Err(call_error(function)),
    }
}

/// Parse a placeholder name: `word (":" word)*`, joined back with `:`.
fn parse_name(stream: &mut TokenStream) -> std::result::Result<String, ()> {
    let mut name = match stream.advance() {
        Some(Token::Word(word)) => word.clone(),
        _ => return Err(()),
    };
    while stream.check(&Token::Colon) {
        stream.advance();
        match stream.advance() {
            Some(Token::Word(word)) => {
                name.push(':');
                name.push_str(word);
            }
            _ => return Err(()),
        }
    }
    Ok(name)
}

/// Error for malformed text inside a call's parentheses.
fn call_error(name: &str) -> Error {
    match registry::get(name) {
        Some(descriptor) => Error::invalid_signature(name, descriptor.signature),
        None => Error::unknown_function(name),
    }
}
