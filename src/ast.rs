//! Syntax tree shared by the parser and the JavaScript transpiler.
//!
//! The parser builds these nodes once per compilation; the transpiler walks
//! them read-only. Every node owns its children.

use crate::token::TokenKind;

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Boolean(bool),
    String(String),
    Array(Vec<Expression>),
    Variable(String),
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
    Call {
        callee: String,
        args: Vec<Expression>,
    },
    Index {
        target: Box<Expression>,
        index: Box<Expression>,
    },
    IndexAssign {
        target: Box<Expression>,
        index: Box<Expression>,
        value: Box<Expression>,
    },
    /// Plain assignment. Compound assignment (`x += e`) is desugared into this
    /// node wrapping a binary operation.
    Assign {
        name: String,
        value: Box<Expression>,
    },
    Declaration {
        name: String,
        mutable: bool,
        value: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        then_body: Option<Block>,
        else_branch: Option<ElseBranch>,
    },
    For {
        variable: String,
        start: Box<Expression>,
        condition: Box<Expression>,
        step: Box<Expression>,
        body: Option<Block>,
    },
    ForEach {
        variable: String,
        iterable: Box<Expression>,
        body: Option<Block>,
    },
    Loop {
        body: Option<Block>,
    },
    Return(Option<Box<Expression>>),
    Block(Block),
    Function(Function),
}

impl Expression {
    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn kind(&self) -> ExprKind {
        match self {
            Self::Number(_) => ExprKind::Number,
            Self::Boolean(_) => ExprKind::Boolean,
            Self::String(_) => ExprKind::String,
            Self::Array(_) => ExprKind::Array,
            Self::Variable(_) => ExprKind::Variable,
            Self::Unary { .. } => ExprKind::Unary,
            Self::Binary { .. } => ExprKind::Binary,
            Self::Call { .. } => ExprKind::Call,
            Self::Index { .. } => ExprKind::Index,
            Self::IndexAssign { .. } => ExprKind::IndexAssign,
            Self::Assign { .. } => ExprKind::Assign,
            Self::Declaration { .. } => ExprKind::Declaration,
            Self::If { .. } => ExprKind::If,
            Self::For { .. } => ExprKind::For,
            Self::ForEach { .. } => ExprKind::ForEach,
            Self::Loop { .. } => ExprKind::Loop,
            Self::Return(_) => ExprKind::Return,
            Self::Block(_) => ExprKind::Block,
            Self::Function(function) if function.prototype.is_anonymous() => ExprKind::Lambda,
            Self::Function(_) => ExprKind::Function,
        }
    }
}

/// Discriminant of [`Expression`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Number,
    Boolean,
    String,
    Array,
    Variable,
    Unary,
    Binary,
    Call,
    Index,
    IndexAssign,
    Assign,
    Declaration,
    If,
    For,
    ForEach,
    Loop,
    Return,
    Block,
    Function,
    Lambda,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOperator {
    Not,
    Negate,
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Negate => "-",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Eq,
    NotEq,
    BitAnd,
    BitOr,
    And,
    Or,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Star => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            TokenKind::Less => Some(Self::Less),
            TokenKind::Greater => Some(Self::Greater),
            TokenKind::LessEq => Some(Self::LessEq),
            TokenKind::GreaterEq => Some(Self::GreaterEq),
            TokenKind::Eq => Some(Self::Eq),
            TokenKind::NotEq => Some(Self::NotEq),
            TokenKind::Amp => Some(Self::BitAnd),
            TokenKind::Pipe => Some(Self::BitOr),
            TokenKind::AmpAmp => Some(Self::And),
            TokenKind::PipePipe => Some(Self::Or),
            _ => None,
        }
    }

    /// Operator folded into the assignment by `+=`, `-=`, `*=` and `/=`.
    pub fn from_compound_assign(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::PlusAssign => Some(Self::Add),
            TokenKind::MinusAssign => Some(Self::Sub),
            TokenKind::StarAssign => Some(Self::Mul),
            TokenKind::SlashAssign => Some(Self::Div),
            _ => None,
        }
    }

    /// Source spelling, which the transpiler emits verbatim.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Brace-delimited statement list. Blocks do not yield their last value.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block {
    pub items: Vec<Expression>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ElseBranch {
    Block(Option<Block>),
    /// `else if`: the nested node is always an [`Expression::If`].
    If(Box<Expression>),
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Prototype {
    /// Empty for lambdas.
    pub name: String,
    pub params: Vec<String>,
}

impl Prototype {
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Option<Block>,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.prototype.name
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}
