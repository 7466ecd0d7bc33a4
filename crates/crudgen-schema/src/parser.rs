//! Block parser: tokens → `Schema`.

use std::collections::HashMap;
use std::path::Path;

use crudgen_core::{EnumDecl, Field, Model, Schema};

use crate::error::SchemaError;
use crate::lexer::{Token, TokenKind, tokenize};

/// Top-level blocks that carry no models and are skipped whole.
const SKIPPED_BLOCKS: [&str; 4] = ["generator", "datasource", "type", "view"];

/// Parse schema text into models and enums, in declaration order.
///
/// Whitespace-only input yields an empty schema. Any other input without a
/// `model` block is [`SchemaError::NoModelsFound`].
pub fn parse_schema(input: &str) -> Result<Schema, SchemaError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let mut schema = Schema::default();
    let mut declared: HashMap<String, usize> = HashMap::new();

    while let Some(token) = parser.bump() {
        match &token.kind {
            TokenKind::Word(keyword) if keyword == "model" => {
                let model = parser.model(token.line)?;
                claim_name(&mut declared, &model.name, model.line)?;
                tracing::debug!(model = %model.name, fields = model.fields.len(), "parsed model");
                schema.models.push(model);
            }
            TokenKind::Word(keyword) if keyword == "enum" => {
                let decl = parser.enum_decl(token.line)?;
                claim_name(&mut declared, &decl.name, decl.line)?;
                schema.enums.push(decl);
            }
            TokenKind::Word(keyword) if SKIPPED_BLOCKS.contains(&keyword.as_str()) => {
                parser.skip_block(keyword, token.line)?;
            }
            TokenKind::Close => {
                return Err(SchemaError::malformed(token.line, "unexpected '}'"));
            }
            other => {
                return Err(SchemaError::malformed(
                    token.line,
                    format!("expected a `model` declaration, found {}", describe(other)),
                ));
            }
        }
    }

    if schema.models.is_empty() && !input.trim().is_empty() {
        return Err(SchemaError::NoModelsFound);
    }

    Ok(schema)
}

/// Read and parse a schema file.
pub fn parse_schema_file(path: &Path) -> Result<Schema, SchemaError> {
    let input = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&input)
}

fn claim_name(
    declared: &mut HashMap<String, usize>,
    name: &str,
    line: usize,
) -> Result<(), SchemaError> {
    if let Some(first) = declared.get(name) {
        return Err(SchemaError::in_model(
            line,
            name,
            format!("duplicate declaration of '{name}' (first declared at line {first})"),
        ));
    }
    declared.insert(name.to_string(), line);
    Ok(())
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn model(&mut self, line: usize) -> Result<Model, SchemaError> {
        let name = self.block_name("model", line)?;
        self.expect_open(&name, line)?;

        let mut fields: Vec<Field> = Vec::new();
        loop {
            let Some(token) = self.bump() else {
                return Err(SchemaError::in_model(
                    line,
                    &name,
                    format!("block for model '{name}' is never closed"),
                ));
            };
            match &token.kind {
                TokenKind::Close => break,
                TokenKind::BlockAttr(_) => {}
                TokenKind::Word(field_name) => {
                    let field = self.field(&name, field_name, token.line)?;
                    if fields.iter().any(|existing| existing.name == field.name) {
                        return Err(SchemaError::in_model(
                            token.line,
                            &name,
                            format!("duplicate field '{}' in model '{name}'", field.name),
                        ));
                    }
                    fields.push(field);
                }
                TokenKind::Attr(attr) => {
                    return Err(SchemaError::in_model(
                        token.line,
                        &name,
                        format!("attribute '{attr}' is not attached to a field"),
                    ));
                }
                TokenKind::Open => {
                    return Err(SchemaError::in_model(
                        token.line,
                        &name,
                        "unexpected '{' inside model block",
                    ));
                }
            }
        }

        Ok(Model { name, fields, line })
    }

    fn field(&mut self, model: &str, name: &str, line: usize) -> Result<Field, SchemaError> {
        if !is_identifier(name) {
            return Err(SchemaError::in_model(
                line,
                model,
                format!("invalid field name '{name}' in model '{model}'"),
            ));
        }

        let type_hint = match self.peek() {
            Some(Token {
                kind: TokenKind::Word(type_hint),
                line: type_line,
            }) if *type_line == line => type_hint.clone(),
            _ => {
                return Err(SchemaError::in_model(
                    line,
                    model,
                    format!("field '{name}' in model '{model}' has no type"),
                ));
            }
        };
        self.pos += 1;

        if !type_hint.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(SchemaError::in_model(
                line,
                model,
                format!("invalid type '{type_hint}' for field '{name}' in model '{model}'"),
            ));
        }

        let mut attributes = Vec::new();
        while let Some(Token {
            kind: TokenKind::Attr(attr),
            line: attr_line,
        }) = self.peek()
        {
            if *attr_line != line {
                return Err(SchemaError::in_model(
                    *attr_line,
                    model,
                    format!("attribute '{attr}' belongs on the line of field '{name}'"),
                ));
            }
            attributes.push(attr.clone());
            self.pos += 1;
        }

        Ok(Field {
            name: name.to_string(),
            type_hint,
            attributes,
            line,
        })
    }

    fn enum_decl(&mut self, line: usize) -> Result<EnumDecl, SchemaError> {
        let name = self.block_name("enum", line)?;
        self.expect_open(&name, line)?;

        let mut variants = Vec::new();
        loop {
            let Some(token) = self.bump() else {
                return Err(SchemaError::malformed(
                    line,
                    format!("block for enum '{name}' is never closed"),
                ));
            };
            match &token.kind {
                TokenKind::Close => break,
                TokenKind::Word(variant) if is_identifier(variant) => {
                    variants.push(variant.clone());
                }
                TokenKind::Attr(_) | TokenKind::BlockAttr(_) => {}
                other => {
                    return Err(SchemaError::malformed(
                        token.line,
                        format!("unexpected {} in enum '{name}'", describe(other)),
                    ));
                }
            }
        }

        Ok(EnumDecl {
            name,
            variants,
            line,
        })
    }

    fn block_name(&mut self, keyword: &str, line: usize) -> Result<String, SchemaError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Word(name),
                ..
            }) if is_identifier(name) => {
                self.pos += 1;
                Ok(name.clone())
            }
            Some(Token {
                kind: TokenKind::Word(name),
                ..
            }) => Err(SchemaError::malformed(
                line,
                format!("invalid {keyword} name '{name}'"),
            )),
            _ => Err(SchemaError::malformed(
                line,
                format!("{keyword} declaration is missing a name"),
            )),
        }
    }

    fn expect_open(&mut self, name: &str, line: usize) -> Result<(), SchemaError> {
        match self.bump() {
            Some(Token {
                kind: TokenKind::Open,
                ..
            }) => Ok(()),
            _ => Err(SchemaError::in_model(
                line,
                name,
                format!("expected '{{' after '{name}'"),
            )),
        }
    }

    fn skip_block(&mut self, keyword: &str, line: usize) -> Result<(), SchemaError> {
        let name = self.block_name(keyword, line)?;
        self.expect_open(&name, line)?;
        let mut depth = 1usize;
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::Open => depth += 1,
                TokenKind::Close => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(SchemaError::malformed(
            line,
            format!("block for {keyword} '{name}' is never closed"),
        ))
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Word(text) | TokenKind::Attr(text) | TokenKind::BlockAttr(text) => {
            format!("'{text}'")
        }
        TokenKind::Open => "'{'".to_string(),
        TokenKind::Close => "'}'".to_string(),
    }
}
