//! Rule tokenizer
//!
//! Turns rule text into a flat token stream in a single pass. Keywords are
//! matched case-insensitively and only as whole words, so identifiers such
//! as `origin` or `standard` never produce `OR`/`AND` tokens. Quoted text is
//! a single `Str` token and is never inspected for keywords or fields.

use crate::ast::{ArithOperator, Operator};
use crate::error::SyntaxError;
use std::ops::Range;

/// Token kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier (field name candidate)
    Ident(String),
    /// Unsigned integer literal, kept as written
    Number(String),
    /// Quoted string literal, quotes removed
    Str(String),
    LParen,
    RParen,
    Comma,
    /// Relational operator
    Op(Operator),
    /// Arithmetic operator
    Arith(ArithOperator),
    And,
    Or,
    Not,
    In,
    Between,
    Like,
}

impl TokenKind {
    fn keyword(word: &str) -> Option<TokenKind> {
        match word.to_ascii_lowercase().as_str() {
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            "not" => Some(TokenKind::Not),
            "in" => Some(TokenKind::In),
            "between" => Some(TokenKind::Between),
            "like" => Some(TokenKind::Like),
            _ => None,
        }
    }

    /// Tokens that may appear inside an arithmetic operand
    pub fn is_arith(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_) | TokenKind::Arith(_) | TokenKind::LParen | TokenKind::RParen
        )
    }
}

/// A token with its byte span in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokenize rule text
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        while let Some(&(start, c)) = self.chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '\'' | '"' => self.read_string(start, c)?,
                '0'..='9' => self.read_number(start)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.read_word(start),
                '(' => self.single(start, TokenKind::LParen),
                ')' => self.single(start, TokenKind::RParen),
                ',' => self.single(start, TokenKind::Comma),
                '<' | '>' | '=' | '!' => self.read_operator(start)?,
                c => match ArithOperator::from_char(c) {
                    Some(op) => self.single(start, TokenKind::Arith(op)),
                    None => {
                        return Err(SyntaxError::UnexpectedCharacter { ch: c, position: start });
                    }
                },
            }
        }
        Ok(self.tokens)
    }

    fn single(&mut self, start: usize, kind: TokenKind) {
        self.chars.next();
        self.push(kind, start..start + 1);
    }

    fn push(&mut self, kind: TokenKind, span: Range<usize>) {
        self.tokens.push(Token { kind, span });
    }

    /// Consume characters while `pred` holds, returning the end offset
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        while let Some(&(_, c)) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            self.chars.next();
        }
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.input.len())
    }

    fn read_string(&mut self, start: usize, quote: char) -> Result<(), SyntaxError> {
        self.chars.next();
        let close = self.chars.by_ref().find(|&(_, c)| c == quote).map(|(i, _)| i);
        match close {
            Some(end) => {
                let content = self.input[start + 1..end].to_string();
                self.push(TokenKind::Str(content), start..end + 1);
                Ok(())
            }
            None => Err(SyntaxError::UnterminatedString { position: start }),
        }
    }

    fn read_number(&mut self, start: usize) -> Result<(), SyntaxError> {
        let end = self.take_while(|c| c.is_ascii_digit());
        if let Some(&(i, c)) = self.chars.peek() {
            if c.is_ascii_alphabetic() || c == '_' {
                return Err(SyntaxError::UnexpectedCharacter { ch: c, position: i });
            }
        }
        self.push(TokenKind::Number(self.input[start..end].to_string()), start..end);
        Ok(())
    }

    fn read_word(&mut self, start: usize) {
        let end = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let word = &self.input[start..end];
        let kind = TokenKind::keyword(word).unwrap_or_else(|| TokenKind::Ident(word.to_string()));
        self.push(kind, start..end);
    }

    /// Relational operators are read greedily so that `>=<` or `===` fail as
    /// one bad operator instead of splitting into valid pieces.
    fn read_operator(&mut self, start: usize) -> Result<(), SyntaxError> {
        let end = self.take_while(|c| matches!(c, '<' | '>' | '=' | '!'));
        let symbol = &self.input[start..end];
        match Operator::from_symbol(symbol) {
            Some(op) => {
                self.push(TokenKind::Op(op), start..end);
                Ok(())
            }
            None => Err(SyntaxError::InvalidOperator {
                operator: symbol.to_string(),
            }),
        }
    }
}
