//! Rule text parser
//!
//! Parses segment rules such as:
//! - `level >= 3 and country in ('US', 'CA')`
//! - `purchase_amount between 100 and 200`
//! - `last_session > _now() - 86400 * 7`
//! - `not (country like 'U_' or level < 2)`
//!
//! Parsing happens in four passes over a token stream: `_now()`
//! substitution on the raw text, tokenization, a parenthesis balance check,
//! and a field-name check that reports every unknown identifier at once.
//! Only then is the tree built, by precedence OR < AND < NOT < atom.

use super::lexer::{tokenize, Token, TokenKind};
use super::like::LikePattern;
use crate::arith::{self, ArithExpr};
use crate::ast::{Expression, Literal, Operand};
use crate::error::{Result, SyntaxError, UnknownFieldError};
use crate::types::{FieldType, Schema};

/// Placeholder replaced by the request timestamp
pub const NOW_TOKEN: &str = "_now()";

/// Maximum depth of nested parentheses and NOTs
const MAX_DEPTH: usize = 64;

/// Parser for segment rule text
#[derive(Debug, Clone, Copy)]
pub struct RuleParser {
    /// Unix timestamp substituted for `_now()`
    now: i64,
}

impl RuleParser {
    /// Create a parser that resolves `_now()` to `now`
    pub fn new(now: i64) -> Self {
        Self { now }
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    /// Parse rule text into an expression tree
    pub fn parse(&self, rule: &str) -> Result<Expression> {
        let text = rule.replace(NOW_TOKEN, &self.now.to_string());
        if text.trim().is_empty() {
            return Err(SyntaxError::EmptyCondition.into());
        }

        let tokens = tokenize(&text)?;
        check_parens(&tokens)?;
        check_fields(&tokens)?;

        let mut stream = TokenStream::new(&text, &tokens);
        let expr = stream.parse_or()?;
        if !stream.at_end() {
            return Err(SyntaxError::UnrecognizedForm {
                condition: text.trim().to_string(),
            }
            .into());
        }

        log::trace!("parsed rule '{}' into {:?}", rule, expr);
        Ok(expr)
    }
}

/// Parse rule text with `_now()` resolved to `now`
pub fn parse(rule: &str, now: i64) -> Result<Expression> {
    RuleParser::new(now).parse(rule)
}

fn check_parens(tokens: &[Token]) -> std::result::Result<(), SyntaxError> {
    let mut depth: usize = 0;
    for token in tokens {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth = depth.checked_sub(1).ok_or(SyntaxError::UnbalancedParens)?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(SyntaxError::UnbalancedParens);
    }
    Ok(())
}

fn check_fields(tokens: &[Token]) -> std::result::Result<(), UnknownFieldError> {
    let mut unknown: Vec<String> = Vec::new();
    for token in tokens {
        if let TokenKind::Ident(name) = &token.kind {
            if name != "_now" && !Schema::is_known(name) && !unknown.contains(name) {
                unknown.push(name.clone());
            }
        }
    }
    if unknown.is_empty() {
        Ok(())
    } else {
        log::debug!("rule references unknown fields: {:?}", unknown);
        Err(UnknownFieldError { fields: unknown })
    }
}

/// Cursor over the token stream
struct TokenStream<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> TokenStream<'a> {
    fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Byte offset of the current token
    fn offset(&self) -> usize {
        self.peek().map(|t| t.span.start).unwrap_or(self.source.len())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::NestingTooDeep.into());
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Source text covered by a run of tokens
    fn span_text(&self, tokens: &[Token]) -> &'a str {
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => &self.source[first.span.start..last.span.end],
            _ => "",
        }
    }

    /// Build an `UnrecognizedForm` error covering the clause that started at
    /// `start`, up to the next top-level AND/OR or closing parenthesis.
    fn unrecognized(&self, start: usize) -> crate::error::RuleError {
        let mut end = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span.end)
            .unwrap_or(start);
        let mut depth = 0usize;
        for token in &self.tokens[self.pos.min(self.tokens.len())..] {
            match token.kind {
                TokenKind::And | TokenKind::Or if depth == 0 => break,
                TokenKind::RParen if depth == 0 => break,
                TokenKind::RParen => depth -= 1,
                TokenKind::LParen => depth += 1,
                _ => {}
            }
            end = token.span.end;
        }
        let end = end.max(start);
        SyntaxError::UnrecognizedForm {
            condition: self.source[start..end].trim().to_string(),
        }
        .into()
    }

    /// or := and (OR and)*
    fn parse_or(&mut self) -> Result<Expression> {
        let mut children = vec![self.parse_and()?];
        while self.eat(&TokenKind::Or) {
            children.push(self.parse_and()?);
        }
        Ok(match children.len() {
            1 => children.remove(0),
            _ => Expression::Or(children),
        })
    }

    /// and := not (AND not)*
    fn parse_and(&mut self) -> Result<Expression> {
        let mut children = vec![self.parse_not()?];
        while self.eat(&TokenKind::And) {
            children.push(self.parse_not()?);
        }
        Ok(match children.len() {
            1 => children.remove(0),
            _ => Expression::And(children),
        })
    }

    /// not := NOT not | atom
    fn parse_not(&mut self) -> Result<Expression> {
        if self.eat(&TokenKind::Not) {
            self.enter()?;
            let inner = self.parse_not()?;
            self.leave();
            return Ok(Expression::not(inner));
        }
        self.parse_atom()
    }

    /// atom := '(' or ')' | field predicate
    fn parse_atom(&mut self) -> Result<Expression> {
        let start = self.offset();
        match self.peek_kind() {
            Some(TokenKind::LParen) => {
                self.advance();
                self.enter()?;
                let inner = self.parse_or()?;
                self.leave();
                if !self.eat(&TokenKind::RParen) {
                    return Err(self.unrecognized(start));
                }
                Ok(inner)
            }
            Some(TokenKind::Ident(field)) => {
                self.advance();
                self.parse_predicate(field, start)
            }
            _ => Err(self.unrecognized(start)),
        }
    }

    /// Everything after the field name: BETWEEN, IN, LIKE (each optionally
    /// preceded by NOT) or a relational comparison.
    fn parse_predicate(&mut self, field: &str, start: usize) -> Result<Expression> {
        let negated = matches!(self.peek_kind(), Some(TokenKind::Not))
            && matches!(
                self.peek_kind_at(1),
                Some(TokenKind::Between | TokenKind::In | TokenKind::Like)
            );
        if negated {
            self.advance();
        }

        let expr = match self.peek_kind() {
            Some(TokenKind::Between) => {
                self.advance();
                self.parse_between(field, start)?
            }
            Some(TokenKind::In) => {
                self.advance();
                self.parse_in(field, start)?
            }
            Some(TokenKind::Like) => {
                self.advance();
                self.parse_like(field, start)?
            }
            Some(TokenKind::Op(op)) => {
                self.advance();
                Expression::Comparison {
                    field: field.to_string(),
                    op: *op,
                    operand: self.parse_operand(start)?,
                }
            }
            _ => return Err(self.unrecognized(start)),
        };

        Ok(if negated { Expression::not(expr) } else { expr })
    }

    /// Consume the tokens of one operand: everything up to a top-level
    /// keyword, comma, or the closing parenthesis of an enclosing group.
    fn collect_operand(&mut self) -> &'a [Token] {
        let begin = self.pos;
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen if depth == 0 => break,
                TokenKind::RParen => depth -= 1,
                TokenKind::Comma
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::In
                | TokenKind::Between
                | TokenKind::Like
                    if depth == 0 =>
                {
                    break
                }
                _ => {}
            }
            self.advance();
        }
        &self.tokens[begin..self.pos]
    }

    fn parse_operand(&mut self, start: usize) -> Result<Operand> {
        let tokens = self.collect_operand();
        match tokens {
            [] => Err(self.unrecognized(start)),
            [Token {
                kind: TokenKind::Str(s),
                ..
            }] => Ok(Operand::Text(s.clone())),
            _ if has_string(tokens) => Err(self.unrecognized(start)),
            _ => Ok(Operand::Arith(arith::parse(self.span_text(tokens))?)),
        }
    }

    fn parse_arith_bound(&mut self, start: usize) -> Result<ArithExpr> {
        let tokens = self.collect_operand();
        if tokens.is_empty() {
            return Err(self.unrecognized(start));
        }
        Ok(arith::parse(self.span_text(tokens))?)
    }

    /// BETWEEN lower AND upper
    fn parse_between(&mut self, field: &str, start: usize) -> Result<Expression> {
        let lower = self.parse_arith_bound(start)?;
        if !self.eat(&TokenKind::And) {
            return Err(self.unrecognized(start));
        }
        let upper = self.parse_arith_bound(start)?;
        Ok(Expression::Between {
            field: field.to_string(),
            lower,
            upper,
        })
    }

    /// IN '(' [element (',' element)*] ')'
    fn parse_in(&mut self, field: &str, start: usize) -> Result<Expression> {
        if !self.eat(&TokenKind::LParen) {
            return Err(self.unrecognized(start));
        }
        let field_type = Schema::field_type(field).ok_or_else(|| UnknownFieldError {
            fields: vec![field.to_string()],
        })?;

        let mut values = Vec::new();
        if !self.eat(&TokenKind::RParen) {
            loop {
                let tokens = self.collect_operand();
                values.push(self.in_element(field_type, tokens, start)?);
                if self.eat(&TokenKind::Comma) {
                    continue;
                }
                if self.eat(&TokenKind::RParen) {
                    break;
                }
                return Err(self.unrecognized(start));
            }
        }

        Ok(Expression::In {
            field: field.to_string(),
            values,
        })
    }

    /// Coerce one IN element to the field's type
    fn in_element(&self, field_type: FieldType, tokens: &[Token], start: usize) -> Result<Literal> {
        match (field_type, tokens) {
            (_, []) => Err(self.unrecognized(start)),
            (FieldType::Text, [Token { kind: TokenKind::Str(s), .. }]) => Ok(Literal::Text(s.clone())),
            // a blank quoted element can never equal an integer field
            (FieldType::Integer, [Token { kind: TokenKind::Str(s), .. }]) if s.trim().is_empty() => {
                Ok(Literal::Text(s.clone()))
            }
            (FieldType::Integer, [Token { kind: TokenKind::Str(s), .. }]) => {
                Ok(Literal::Integer(arith::evaluate(s)?))
            }
            _ if has_string(tokens) => Err(self.unrecognized(start)),
            (FieldType::Text, _) => Ok(Literal::Text(self.span_text(tokens).to_string())),
            (FieldType::Integer, _) => {
                Ok(Literal::Integer(arith::parse(self.span_text(tokens))?.eval()?))
            }
        }
    }

    /// LIKE 'pattern'
    fn parse_like(&mut self, field: &str, start: usize) -> Result<Expression> {
        match self.peek_kind() {
            Some(TokenKind::Str(pattern)) => {
                self.advance();
                let pattern =
                    LikePattern::new(pattern.as_str()).map_err(|_| self.unrecognized(start))?;
                Ok(Expression::Like {
                    field: field.to_string(),
                    pattern,
                })
            }
            _ => Err(self.unrecognized(start)),
        }
    }
}

fn has_string(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| matches!(t.kind, TokenKind::Str(_)))
}
