//! Lexical categories shared by the lexer and the parser.
//!
//! The keyword table and the binary-operator precedence table live here as
//! plain `match` lookups, so they are fixed at compile time and safe to share
//! between concurrent compilations.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    EOF,

    // Literals
    Name,
    Number,
    String,

    // Keywords
    Let,
    Var,
    Func,
    Return,
    If,
    Else,
    ElseIf,
    For,
    In,
    True,
    False,

    // Operators
    Assign,       // =
    Eq,           // ==
    NotEq,        // !=
    Bang,         // !
    Less,         // <
    LessEq,       // <=
    Greater,      // >
    GreaterEq,    // >=
    Plus,         // +
    PlusAssign,   // +=
    Minus,        // -
    MinusAssign,  // -=
    Star,         // *
    StarAssign,   // *=
    Slash,        // /
    SlashAssign,  // /=
    Amp,          // &
    AmpAmp,       // &&
    Pipe,         // |
    PipePipe,     // ||

    // Delimiters
    Semi,     // ;
    Colon,    // :
    Comma,    // ,
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
}

impl TokenKind {
    /// Look up a scanned word in the keyword table.
    ///
    /// `else if` is not in the table: the lexer fuses it after seeing `else`.
    pub fn keyword(word: &str) -> Option<Self> {
        match word {
            "let" => Some(Self::Let),
            "var" => Some(Self::Var),
            "func" => Some(Self::Func),
            "return" => Some(Self::Return),
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            "for" => Some(Self::For),
            "in" => Some(Self::In),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            _ => None,
        }
    }

    /// Binding strength of a binary operator token; higher binds tighter.
    /// `None` for tokens that never continue a binary chain.
    pub fn precedence(self) -> Option<u8> {
        match self {
            Self::Less
            | Self::LessEq
            | Self::Greater
            | Self::GreaterEq
            | Self::Eq
            | Self::NotEq
            | Self::Amp
            | Self::Pipe
            | Self::AmpAmp
            | Self::PipePipe => Some(10),
            Self::Plus | Self::Minus => Some(20),
            Self::Star | Self::Slash => Some(40),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::EOF | Self::Illegal)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::EOF => "EOF",
            Self::Name => "NAME",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Let => "LET",
            Self::Var => "VAR",
            Self::Func => "FUNC",
            Self::Return => "RETURN",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::ElseIf => "ELSE_IF",
            Self::For => "FOR",
            Self::In => "IN",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Assign => "ASSIGN",
            Self::Eq => "EQ",
            Self::NotEq => "NOT_EQ",
            Self::Bang => "BANG",
            Self::Less => "LESS",
            Self::LessEq => "LESS_EQ",
            Self::Greater => "GREATER",
            Self::GreaterEq => "GREATER_EQ",
            Self::Plus => "PLUS",
            Self::PlusAssign => "PLUS_ASSIGN",
            Self::Minus => "MINUS",
            Self::MinusAssign => "MINUS_ASSIGN",
            Self::Star => "STAR",
            Self::StarAssign => "STAR_ASSIGN",
            Self::Slash => "SLASH",
            Self::SlashAssign => "SLASH_ASSIGN",
            Self::Amp => "AMP",
            Self::AmpAmp => "AMP_AMP",
            Self::Pipe => "PIPE",
            Self::PipePipe => "PIPE_PIPE",
            Self::Semi => "SEMI",
            Self::Colon => "COLON",
            Self::Comma => "COMMA",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Zero-based line of the token's first character.
    pub fn line(&self) -> usize {
        self.span.line
    }

    /// Zero-based offset of the token's first character within its line.
    pub fn column(&self) -> usize {
        self.span.column
    }

    /// Text used when a diagnostic quotes this token.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF => "end of input".to_string(),
            TokenKind::String => format!("\"{}\"", self.literal),
            _ => format!("'{}'", self.literal),
        }
    }
}
