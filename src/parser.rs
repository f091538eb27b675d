//! Recursive-descent parser for statement-level forms with precedence
//! climbing for binary operators.
//!
//! Grammar entry is `func name(params) { ... }` at the top level. Anything
//! else there is an error. The parser stops at the first error and keeps the
//! functions completed before it.

use crate::ast::{
    BinaryOperator, Block, ElseBranch, Expression, Function, Program, Prototype, UnaryOperator,
};
use crate::token::{Span, Token, TokenKind};

pub mod error;

pub use self::error::{ParseError, ParseResult};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Returned by `peek` past the end, so a stream without a trailing `EOF`
    /// still terminates cleanly.
    eof: Token,
    error: Option<ParseError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|token| {
                let span = token.span();
                Span {
                    start: span.end,
                    end: span.end,
                    line: span.line,
                    column: span.column + (span.end - span.start),
                }
            })
            .unwrap_or_default();
        Self {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::EOF, "", end),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<ParseError> {
        self.error.take()
    }

    /// Parse top-level functions until end of input or the first error. The
    /// error, if any, is available through [`Parser::error`].
    pub fn parse(&mut self) -> Program {
        let mut functions = Vec::new();

        while self.error.is_none() {
            match self.current().kind {
                TokenKind::EOF => break,
                TokenKind::Semi => self.advance(),
                TokenKind::Func => match self.parse_function() {
                    Ok(function) => functions.push(function),
                    Err(error) => self.error = Some(error),
                },
                _ => self.error = Some(self.unexpected("'func' at top level")),
            }
        }

        Program { functions }
    }

    fn parse_function(&mut self) -> ParseResult<Function> {
        self.expect(TokenKind::Func, "'func'")?;
        let prototype = self.parse_prototype(true)?;
        let body = self.parse_block()?;
        Ok(Function { prototype, body })
    }

    fn parse_prototype(&mut self, require_name: bool) -> ParseResult<Prototype> {
        let name = match self.current().kind {
            TokenKind::Name => {
                let name = self.current().literal.clone();
                self.advance();
                name
            }
            _ if require_name => return Err(self.unexpected("function name in prototype")),
            _ => String::new(),
        };

        self.expect(TokenKind::LParen, "'(' in prototype")?;
        let mut params = Vec::new();
        if self.current().kind != TokenKind::RParen {
            loop {
                let param = self.expect(TokenKind::Name, "parameter name in prototype")?;
                params.push(param.literal);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')' in prototype")?;

        Ok(Prototype { name, params })
    }

    /// `{}` (or a block of bare separators) yields `None`.
    fn parse_block(&mut self) -> ParseResult<Option<Block>> {
        self.expect(TokenKind::LBrace, "'{' to open a block")?;

        let mut items = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::RBrace => break,
                TokenKind::Semi => {
                    self.advance();
                    continue;
                }
                _ => {}
            }

            items.push(self.parse_expression()?);

            if !matches!(self.current().kind, TokenKind::Semi | TokenKind::RBrace) {
                return Err(self.unexpected("';' or '}' in block"));
            }
        }
        self.advance();

        if items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Block { items }))
        }
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        let lhs = self.parse_primary()?;
        self.parse_binary_rhs(0, lhs)
    }

    /// Fold binary operators binding at least as tightly as `min_precedence`
    /// onto `lhs`, recursing when the following operator binds tighter.
    fn parse_binary_rhs(&mut self, min_precedence: u8, lhs: Expression) -> ParseResult<Expression> {
        let mut lhs = lhs;
        loop {
            let kind = self.current().kind;
            let (Some(op), Some(precedence)) = (BinaryOperator::from_token(kind), kind.precedence())
            else {
                return Ok(lhs);
            };
            if precedence < min_precedence {
                return Ok(lhs);
            }
            self.advance();

            let mut rhs = self.parse_primary()?;
            if self
                .current()
                .kind
                .precedence()
                .is_some_and(|next| precedence < next)
            {
                rhs = self.parse_binary_rhs(precedence + 1, rhs)?;
            }

            lhs = Expression::binary(lhs, op, rhs);
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current().kind {
            TokenKind::Number => self.parse_number(),
            TokenKind::True | TokenKind::False => {
                let value = self.current().kind == TokenKind::True;
                self.advance();
                Ok(Expression::Boolean(value))
            }
            TokenKind::String => {
                let value = self.current().literal.clone();
                self.advance();
                Ok(Expression::String(value))
            }
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LParen => self.parse_paren(),
            TokenKind::Name => self.parse_identifier(),
            TokenKind::LBrace => Ok(Expression::Block(self.parse_block()?.unwrap_or_default())),
            TokenKind::If => {
                self.advance();
                self.parse_if_rest()
            }
            TokenKind::For => self.parse_for(),
            TokenKind::Let | TokenKind::Var => self.parse_declaration(),
            TokenKind::Func => self.parse_lambda(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Bang => self.parse_unary(UnaryOperator::Not),
            TokenKind::Minus => self.parse_unary(UnaryOperator::Negate),
            _ => {
                let token = self.current();
                Err(ParseError::at(
                    token,
                    format!(
                        "Unexpected token {} when expecting an expression",
                        token.describe()
                    ),
                ))
            }
        }
    }

    fn parse_number(&mut self) -> ParseResult<Expression> {
        let token = self.expect(TokenKind::Number, "number")?;
        match token.literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Expression::Number(value)),
            _ => Err(ParseError::at(&token, "Could not parse number")),
        }
    }

    fn parse_array(&mut self) -> ParseResult<Expression> {
        self.expect(TokenKind::LBracket, "'['")?;
        let mut elements = Vec::new();
        while self.current().kind != TokenKind::RBracket {
            elements.push(self.parse_expression()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket, "',' or ']' in array literal")?;
        Ok(Expression::Array(elements))
    }

    fn parse_paren(&mut self) -> ParseResult<Expression> {
        self.expect(TokenKind::LParen, "'('")?;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(expr)
    }

    /// Identifier-led forms, told apart by the token after the name.
    fn parse_identifier(&mut self) -> ParseResult<Expression> {
        let name = self.current().literal.clone();
        let next = self.peek(1).kind;

        if next == TokenKind::Assign {
            self.advance();
            self.advance();
            let value = self.parse_expression()?;
            return Ok(Expression::Assign {
                name,
                value: Box::new(value),
            });
        }

        if let Some(op) = BinaryOperator::from_compound_assign(next) {
            self.advance();
            self.advance();
            let rhs = self.parse_expression()?;
            let value = Expression::binary(Expression::Variable(name.clone()), op, rhs);
            return Ok(Expression::Assign {
                name,
                value: Box::new(value),
            });
        }

        match next {
            TokenKind::LParen => self.parse_call(name),
            TokenKind::LBracket => self.parse_index(name),
            _ => {
                self.advance();
                Ok(Expression::Variable(name))
            }
        }
    }

    fn parse_call(&mut self, callee: String) -> ParseResult<Expression> {
        self.advance();
        self.expect(TokenKind::LParen, "'(' in call")?;
        let mut args = Vec::new();
        while self.current().kind != TokenKind::RParen {
            args.push(self.parse_expression()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "',' or ')' in arguments")?;
        Ok(Expression::Call { callee, args })
    }

    fn parse_index(&mut self, name: String) -> ParseResult<Expression> {
        self.advance();
        let mut target = Expression::Variable(name);
        loop {
            self.expect(TokenKind::LBracket, "'['")?;
            let index = self.parse_expression()?;
            self.expect(TokenKind::RBracket, "']' after index")?;

            match self.current().kind {
                TokenKind::LBracket => {
                    target = Expression::Index {
                        target: Box::new(target),
                        index: Box::new(index),
                    };
                }
                TokenKind::Assign => {
                    self.advance();
                    let value = self.parse_expression()?;
                    return Ok(Expression::IndexAssign {
                        target: Box::new(target),
                        index: Box::new(index),
                        value: Box::new(value),
                    });
                }
                _ => {
                    return Ok(Expression::Index {
                        target: Box::new(target),
                        index: Box::new(index),
                    });
                }
            }
        }
    }

    /// Condition, then-block and optional else branch; the leading `if` (or
    /// fused `else if`) is already consumed.
    fn parse_if_rest(&mut self) -> ParseResult<Expression> {
        let condition = self.parse_expression()?;
        let then_body = self.parse_block()?;

        let else_branch = match self.current().kind {
            TokenKind::Else => {
                self.advance();
                Some(ElseBranch::Block(self.parse_block()?))
            }
            TokenKind::ElseIf => {
                self.advance();
                Some(ElseBranch::If(Box::new(self.parse_if_rest()?)))
            }
            _ => None,
        };

        Ok(Expression::If {
            condition: Box::new(condition),
            then_body,
            else_branch,
        })
    }

    fn parse_for(&mut self) -> ParseResult<Expression> {
        self.expect(TokenKind::For, "'for'")?;

        match self.current().kind {
            TokenKind::LBrace => {
                let body = self.parse_block()?;
                Ok(Expression::Loop { body })
            }
            TokenKind::Var | TokenKind::Let => {
                self.advance();
                let variable = self
                    .expect(TokenKind::Name, "loop variable name in for loop")?
                    .literal;
                self.expect(TokenKind::Assign, "'=' in for loop")?;
                let start = self.parse_expression()?;
                self.expect(TokenKind::Semi, "';' after for loop initializer")?;
                let condition = self.parse_expression()?;
                self.expect(TokenKind::Semi, "';' after for loop condition")?;
                let step = self.parse_expression()?;
                let body = self.parse_block()?;
                Ok(Expression::For {
                    variable,
                    start: Box::new(start),
                    condition: Box::new(condition),
                    step: Box::new(step),
                    body,
                })
            }
            TokenKind::Name if self.peek(1).kind == TokenKind::In => {
                let variable = self.current().literal.clone();
                self.advance();
                self.advance();
                let iterable = self.parse_expression()?;
                let body = self.parse_block()?;
                Ok(Expression::ForEach {
                    variable,
                    iterable: Box::new(iterable),
                    body,
                })
            }
            _ => Err(self.unexpected("'var', '<name> in' or '{' after 'for'")),
        }
    }

    fn parse_declaration(&mut self) -> ParseResult<Expression> {
        let mutable = match self.current().kind {
            TokenKind::Var => true,
            TokenKind::Let => false,
            _ => return Err(self.unexpected("'let' or 'var' in declaration")),
        };
        self.advance();

        let name = self
            .expect(TokenKind::Name, "variable name in declaration")?
            .literal;
        self.expect(TokenKind::Assign, "'=' in declaration")?;
        let value = self.parse_expression()?;

        Ok(Expression::Declaration {
            name,
            mutable,
            value: Box::new(value),
        })
    }

    fn parse_lambda(&mut self) -> ParseResult<Expression> {
        self.expect(TokenKind::Func, "'func'")?;
        let prototype = self.parse_prototype(false)?;
        let body = self.parse_block()?;
        Ok(Expression::Function(Function { prototype, body }))
    }

    fn parse_return(&mut self) -> ParseResult<Expression> {
        self.expect(TokenKind::Return, "'return'")?;
        if matches!(
            self.current().kind,
            TokenKind::Semi | TokenKind::RBrace | TokenKind::EOF
        ) {
            return Ok(Expression::Return(None));
        }
        let value = self.parse_expression()?;
        Ok(Expression::Return(Some(Box::new(value))))
    }

    fn parse_unary(&mut self, op: UnaryOperator) -> ParseResult<Expression> {
        self.advance();
        let operand = self.parse_primary()?;
        Ok(Expression::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Look `offset` tokens ahead without moving the cursor.
    fn peek(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&self.eof)
    }

    fn advance(&mut self) {
        if self.current().kind != TokenKind::EOF {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.current().kind == kind {
            let token = self.current().clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        ParseError::at(
            token,
            format!("Expected {expected}, got {}", token.describe()),
        )
    }
}

/// Parse a full token stream into a program, failing on the first error.
pub fn parse_tokens(tokens: Vec<Token>) -> ParseResult<Program> {
    let mut parser = Parser::new(tokens);
    let program = parser.parse();
    match parser.take_error() {
        Some(error) => Err(error),
        None => Ok(program),
    }
}

/// Parse a token stream holding exactly one expression.
pub fn parse_expression_tokens(tokens: Vec<Token>) -> ParseResult<Expression> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression()?;
    if parser.current().kind != TokenKind::EOF {
        return Err(parser.unexpected("end of input after expression"));
    }
    Ok(expr)
}
