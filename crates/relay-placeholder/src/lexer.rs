//! Expression lexer.
//!
//! Tokenizes one placeholder expression (the text between `{{` and `}}`)
//! using logos. Quoted literals are opaque, so a `|` or `,` inside quotes
//! never splits a stage or an argument.
//!
//! Quoting: single or double quotes; the only escape is a backslash before
//! the matching quote (`\'` inside `'...'`, `\"` inside `"..."`). Any other
//! backslash sequence is literal text.

use logos::Logos;

/// One lexical element of a placeholder expression.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[token("|")]
    Pipe,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    /// Single-quoted literal, unescaped.
    #[regex(r"'(?:[^'\\]|\\.)*'", |lex| unescape(lex.slice(), '\''))]
    SingleQuoted(String),
    /// Double-quoted literal, unescaped.
    #[regex(r#""(?:[^"\\]|\\.)*""#, |lex| unescape(lex.slice(), '"'))]
    DoubleQuoted(String),
    /// Bare word: a prefix, a placeholder name, or a function name.
    #[regex(r#"[^ \t\r\n|():,'"]+"#, |lex| lex.slice().to_string())]
    Word(String),
}

/// Strip the surrounding quotes and resolve `\<quote>` escapes.
fn unescape(quoted: &str, quote: char) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&quote) {
            out.push(quote);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

/// Tokenize a whole expression.
///
/// On a lexical error (e.g. an unterminated quote) returns the byte range
/// of the offending input.
pub fn tokenize(src: &str) -> Result<Vec<Token>, std::ops::Range<usize>> {
    let mut lexer = Token::lexer(src);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(lexer.span()),
        }
    }
    Ok(tokens)
}
