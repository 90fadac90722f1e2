//! Recursive-descent parser building a [`KvNode`] tree

use super::lexer::{Lexer, Spanned, Token};
use super::{KvNode, KvValue};
use crate::error::{Error, Result};

/// Deepest block nesting accepted before the document is rejected
pub const MAX_DEPTH: usize = 256;

/// Parse `KeyValues` text into its top-level node
///
/// `#base` / `#include` directives are dropped; conditionals such as
/// `[$X360]` are accepted and ignored.
///
/// # Errors
///
/// Returns [`Error::KeyValuesSyntax`] for unbalanced braces, a key without a
/// value, an unterminated string, or blocks nested deeper than [`MAX_DEPTH`].
pub fn parse_keyvalues(input: &str) -> Result<KvNode> {
    let mut parser = Parser {
        lexer: Lexer::new(input),
        peeked: None,
        depth: 0,
    };
    parser.pairs(None)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Spanned>,
    depth: usize,
}

impl Parser<'_> {
    fn next(&mut self) -> Result<Option<Spanned>> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.lexer.next_token(),
        }
    }

    fn peek(&mut self) -> Result<Option<&Spanned>> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next_token()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn error(line: usize, message: impl Into<String>) -> Error {
        Error::KeyValuesSyntax {
            line,
            message: message.into(),
        }
    }

    fn block(&mut self, line: usize) -> Result<KvNode> {
        if self.depth >= MAX_DEPTH {
            return Err(Self::error(line, "nesting too deep"));
        }
        self.depth += 1;
        let node = self.pairs(Some(line));
        self.depth -= 1;
        node
    }

    /// Parse pairs until `}` (when `opened_at` is set) or end of input
    fn pairs(&mut self, opened_at: Option<usize>) -> Result<KvNode> {
        let mut node = KvNode::default();

        loop {
            let Some(Spanned { token, line }) = self.next()? else {
                return match opened_at {
                    Some(open_line) => Err(Self::error(
                        open_line,
                        "block opened here is never closed",
                    )),
                    None => Ok(node),
                };
            };

            let key = match token {
                Token::Str(key) => key,
                Token::Close => {
                    return match opened_at {
                        Some(_) => Ok(node),
                        None => Err(Self::error(line, "unexpected '}'")),
                    };
                }
                Token::Open => return Err(Self::error(line, "expected a key, found '{'")),
                Token::Conditional(_) => continue,
            };

            let value = match self.next()? {
                Some(Spanned { token: Token::Str(value), .. }) => KvValue::String(value),
                Some(Spanned { token: Token::Open, line }) => KvValue::Block(self.block(line)?),
                Some(Spanned { token: Token::Close, line }) => {
                    return Err(Self::error(line, format!("key \"{key}\" has no value")));
                }
                Some(Spanned { token: Token::Conditional(_), line }) => {
                    return Err(Self::error(line, format!("key \"{key}\" has no value")));
                }
                None => {
                    return Err(Self::error(
                        self.lexer.line(),
                        format!("key \"{key}\" has no value"),
                    ));
                }
            };

            // A conditional may trail the value
            if matches!(self.peek()?, Some(Spanned { token: Token::Conditional(_), .. })) {
                self.next()?;
            }

            if key.starts_with('#') && matches!(value, KvValue::String(_)) {
                tracing::debug!("Ignoring KeyValues directive {}", key);
                continue;
            }

            node.pairs.push((key, value));
        }
    }
}
