//! Tokenizer for `KeyValues` text

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token {
    /// Quoted or bare string
    Str(String),
    Open,
    Close,
    /// Platform conditional such as `[$WIN32]`
    Conditional(String),
}

/// A token with the 1-based line it started on
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Spanned {
    pub token: Token,
    pub line: usize,
}

pub(super) struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Skip whitespace and `//` comments
    fn skip_trivia(&mut self) {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    if lookahead.peek() != Some(&'/') {
                        return;
                    }
                    while let Some(c) = self.chars.peek() {
                        if *c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => return,
            }
        }
    }

    /// Only `\"` and `\\` are escapes; other backslashes are literal so
    /// Windows paths survive.
    fn quoted(&mut self, start_line: usize) -> Result<String> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(Error::KeyValuesSyntax {
                        line: start_line,
                        message: "unterminated quoted string".to_string(),
                    });
                }
                Some('"') => return Ok(value),
                Some('\\') => match self.chars.peek() {
                    Some('"') => {
                        self.bump();
                        value.push('"');
                    }
                    Some('\\') => {
                        self.bump();
                        value.push('\\');
                    }
                    _ => value.push('\\'),
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn bare(&mut self, first: char) -> String {
        let mut value = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '{' | '}' | '"') {
                break;
            }
            value.push(c);
            self.bump();
        }
        value
    }

    fn conditional(&mut self, start_line: usize) -> Result<String> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(Error::KeyValuesSyntax {
                        line: start_line,
                        message: "unterminated conditional".to_string(),
                    });
                }
                Some(']') => return Ok(value),
                Some(c) => value.push(c),
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Option<Spanned>> {
        self.skip_trivia();
        let line = self.line;
        let Some(c) = self.bump() else {
            return Ok(None);
        };

        let token = match c {
            '{' => Token::Open,
            '}' => Token::Close,
            '"' => Token::Str(self.quoted(line)?),
            '[' => Token::Conditional(self.conditional(line)?),
            other => Token::Str(self.bare(other)),
        };

        Ok(Some(Spanned { token, line }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        while let Some(spanned) = lexer.next_token().unwrap() {
            out.push(spanned.token);
        }
        out
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            tokens("\"GameInfo\" { game hl2 }"),
            vec![
                Token::Str("GameInfo".into()),
                Token::Open,
                Token::Str("game".into()),
                Token::Str("hl2".into()),
                Token::Close,
            ]
        );
    }

    #[test]
    fn test_comments_and_conditionals() {
        assert_eq!(
            tokens("// header\ngame \"x\" [$WIN32] // trailing\n"),
            vec![
                Token::Str("game".into()),
                Token::Str("x".into()),
                Token::Conditional("$WIN32".into()),
            ]
        );
    }

    #[test]
    fn test_backslashes_in_paths() {
        assert_eq!(
            tokens(r#""C:\games\tf" "say \"hi\"""#),
            vec![
                Token::Str(r"C:\games\tf".into()),
                Token::Str("say \"hi\"".into()),
            ]
        );
    }

    #[test]
    fn test_bare_pipe_token() {
        assert_eq!(
            tokens("game+mod |gameinfo_path|."),
            vec![
                Token::Str("game+mod".into()),
                Token::Str("|gameinfo_path|.".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("\"open");
        assert!(matches!(
            lexer.next_token(),
            Err(Error::KeyValuesSyntax { line: 1, .. })
        ));
    }
}
