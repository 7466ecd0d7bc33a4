//! Tokenizer for the schema language.
//!
//! Newlines only separate tokens, so the one-line form
//! `model User { id Int name String }` lexes the same as the multi-line form.
//! `\r` is plain whitespace, which makes CRLF input work unchanged.

use crate::error::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Identifier, type token, or any other bare word (`=`, `env("URL")`).
    Word(String),
    /// Field attribute such as `@id` or `@default(now())`.
    Attr(String),
    /// Block attribute such as `@@index([email])`.
    BlockAttr(String),
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, SchemaError> {
    let mut lexer = Lexer {
        chars: input.chars().collect(),
        pos: 0,
        line: 1,
    };
    let mut tokens = Vec::new();

    while let Some(ch) = lexer.peek() {
        match ch {
            '\n' => {
                lexer.line += 1;
                lexer.pos += 1;
            }
            c if c.is_whitespace() => lexer.pos += 1,
            '/' if lexer.peek_at(1) == Some('/') => lexer.skip_comment(),
            '{' => {
                tokens.push(lexer.single(TokenKind::Open));
            }
            '}' => {
                tokens.push(lexer.single(TokenKind::Close));
            }
            _ => tokens.push(lexer.word()?),
        }
    }

    Ok(tokens)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        self.pos += 1;
        Token {
            kind,
            line: self.line,
        }
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    /// Read a bare word or attribute. Parentheses and quoted strings are kept
    /// whole, so `@default("a b")` and `Unsupported("point")?` are single tokens.
    fn word(&mut self) -> Result<Token, SchemaError> {
        let start_line = self.line;
        let mut text = String::new();
        let mut depth = 0usize;

        while let Some(ch) = self.peek() {
            if depth == 0 && (ch.is_whitespace() || ch == '{' || ch == '}') {
                break;
            }
            if depth == 0 && ch == '/' && self.peek_at(1) == Some('/') {
                break;
            }
            match ch {
                '"' => {
                    self.string(&mut text, start_line)?;
                    continue;
                }
                '(' | '[' => depth += 1,
                ')' | ']' => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        SchemaError::malformed(self.line, format!("unbalanced '{ch}' in '{text}{ch}'"))
                    })?;
                }
                '\n' => self.line += 1,
                _ => {}
            }
            text.push(ch);
            self.pos += 1;
        }

        if depth != 0 {
            return Err(SchemaError::malformed(
                start_line,
                format!("unclosed parenthesis in '{}'", text.trim_end()),
            ));
        }

        let kind = if text.starts_with("@@") {
            TokenKind::BlockAttr(text)
        } else if text.starts_with('@') {
            TokenKind::Attr(text)
        } else {
            TokenKind::Word(text)
        };

        Ok(Token {
            kind,
            line: start_line,
        })
    }

    fn string(&mut self, text: &mut String, start_line: usize) -> Result<(), SchemaError> {
        text.push('"');
        self.pos += 1;
        while let Some(ch) = self.peek() {
            text.push(ch);
            self.pos += 1;
            match ch {
                '\\' => {
                    if let Some(escaped) = self.peek() {
                        text.push(escaped);
                        self.pos += 1;
                    }
                }
                '"' => return Ok(()),
                '\n' => {
                    return Err(SchemaError::malformed(
                        self.line,
                        "string literal runs past end of line",
                    ));
                }
                _ => {}
            }
        }
        Err(SchemaError::malformed(start_line, "unterminated string literal"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .expect("input should lex")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn word(text: &str) -> TokenKind {
        TokenKind::Word(text.to_string())
    }

    #[test]
    fn one_line_model() {
        assert_eq!(
            kinds("model User { id Int name String }"),
            vec![
                word("model"),
                word("User"),
                TokenKind::Open,
                word("id"),
                word("Int"),
                word("name"),
                word("String"),
                TokenKind::Close,
            ]
        );
    }

    #[test]
    fn attributes_keep_parenthesized_arguments() {
        assert_eq!(
            kinds(r#"id Int @id @default(autoincrement()) @@index([a, b])"#),
            vec![
                word("id"),
                word("Int"),
                TokenKind::Attr("@id".to_string()),
                TokenKind::Attr("@default(autoincrement())".to_string()),
                TokenKind::BlockAttr("@@index([a, b])".to_string()),
            ]
        );
    }

    #[test]
    fn comments_are_dropped_outside_strings() {
        let tokens = kinds("/// doc\nurl String @default(\"http://x\") // trailing\n");
        assert_eq!(
            tokens,
            vec![
                word("url"),
                word("String"),
                TokenKind::Attr("@default(\"http://x\")".to_string()),
            ]
        );
    }

    #[test]
    fn crlf_line_endings_count_lines() {
        let tokens = tokenize("model A {\r\n  id Int\r\n}\r\n").expect("lex");
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn unterminated_string_is_malformed() {
        let err = tokenize("a @default(\"oops").expect_err("should fail");
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn unbalanced_parenthesis_is_malformed() {
        assert!(tokenize("a @default(now()").is_err());
        assert!(tokenize("a @default)").is_err());
    }
}
